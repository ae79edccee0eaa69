// ==========================================
// 经销商/商城 ETL - 领域模型层
// ==========================================
// 职责: 定义两套独立的关系实体（经销商 / 商城）
// 红线: 不含数据访问逻辑,不含生成/查询逻辑
// ==========================================

pub mod car_dealer;
pub mod product_shop;
pub mod types;

// 重导出核心类型
pub use car_dealer::{Car, CarDealerSnapshot, Customer, Part, PartCar, Sale, Supplier};
pub use product_shop::{
    Category, CategoryProduct, Product, ProductShopSnapshot, TradePair, User,
};
pub use types::SaleDiscount;
