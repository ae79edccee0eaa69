// ==========================================
// 经销商/商城 ETL - 引擎层
// ==========================================
// 职责: 关系生成 + 聚合查询
// 红线: Engine 不拼 SQL；输入为 id 列表或全量快照
// ==========================================

pub mod car_dealer_queries;
pub mod error;
pub mod product_shop_queries;
pub mod synthesizer;

// 重导出核心引擎
pub use error::{SynthesisError, SynthesisResult};
pub use synthesizer::{RelationshipSynthesizer, CATEGORIES_PER_PRODUCT};
