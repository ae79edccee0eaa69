// ==========================================
// 经销商/商城 ETL - 导出层
// ==========================================
// 职责: 导出 DTO 定义 + JSON 文件写入
// ==========================================

pub mod dto;
pub mod error;
pub mod json_writer;

pub use error::{ExportError, ExportResult};
pub use json_writer::JsonExporter;

/// 导出文件名（相对导出目录）
pub mod export_files {
    pub const ORDERED_CUSTOMERS: &str = "ordered-customers.json";
    pub const TOYOTA_CARS: &str = "toyota-cars.json";
    pub const LOCAL_SUPPLIERS: &str = "local-suppliers.json";
    pub const CARS_AND_PARTS: &str = "cars-and-parts.json";
    pub const CUSTOMERS_TOTAL_SALES: &str = "customers-total-sales.json";
    pub const SALES_DISCOUNTS: &str = "sales-discounts.json";

    pub const PRODUCTS_IN_RANGE: &str = "products-in-range.json";
    pub const USERS_SOLD_PRODUCTS: &str = "users-sold-products.json";
    pub const CATEGORIES_BY_PRODUCTS: &str = "categories-by-products.json";
    pub const USERS_AND_PRODUCTS: &str = "users-and-products.json";
}
