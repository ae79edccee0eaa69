// ==========================================
// 汽车经销商 / 商品商城 - 夹具数据导入导出核心库
// ==========================================
// 技术栈: Rust + SQLite
// 流程: 读夹具 → 映射实体 → 落库 → 随机生成关联 → 落库 → 查询 → 导出 JSON
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 关系生成与聚合查询
pub mod engine;

// 导入层 - 夹具解析与映射
pub mod importer;

// 导出层 - 导出 DTO 与 JSON 写入
pub mod exporter;

// 配置层 - 运行配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/schema）
pub mod db;

// 日志系统
pub mod logging;

// 应用层 - 批处理流程
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use app::{run, EtlError, EtlResult, RunSummary};
pub use config::{EtlConfig, LogFormat};
pub use domain::{
    Car, CarDealerSnapshot, Category, CategoryProduct, Customer, Part, PartCar, Product,
    ProductShopSnapshot, Sale, SaleDiscount, Supplier, User,
};
pub use engine::RelationshipSynthesizer;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "汽车经销商/商品商城 ETL";
