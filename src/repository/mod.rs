// ==========================================
// 经销商/商城 ETL - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化
// ==========================================

pub mod car_dealer_repo;
pub mod column;
pub mod error;
pub mod product_shop_repo;

// 重导出核心仓储
pub use car_dealer_repo::CarDealerRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use product_shop_repo::ProductShopRepository;
