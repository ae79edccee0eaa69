// ==========================================
// 经销商/商城 ETL - 导入层
// ==========================================
// 职责: 夹具文件解析 + DTO → 实体映射
// 支持: JSON
// ==========================================

pub mod dto;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{FixtureParser, JsonFixtureParser};

/// 夹具文件名（相对导入目录）
pub mod fixture_files {
    pub const SUPPLIERS: &str = "suppliers.json";
    pub const PARTS: &str = "parts.json";
    pub const CARS: &str = "cars.json";
    pub const CUSTOMERS: &str = "customers.json";

    pub const USERS: &str = "users.json";
    pub const PRODUCTS: &str = "products.json";
    pub const CATEGORIES: &str = "categories.json";
}
