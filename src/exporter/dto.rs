// ==========================================
// 经销商/商城 ETL - 导出 DTO
// ==========================================
// 对齐: Datasets/Export/*.json
// 约定: 属性名 PascalCase；金额以 JSON 数值输出
// 说明: 同时派生 Deserialize，导出文件可原样回读
// ==========================================

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// 汽车经销商导出
// ==========================================

/// ordered-customers.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderedCustomerDto {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDateTime,
    #[serde(rename = "IsYoungerDriver")]
    pub is_young_driver: bool,
}

/// toyota-cars.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ToyotaCarDto {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub travelled_distance: i64,
}

/// local-suppliers.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalSupplierDto {
    pub id: i64,
    pub name: String,
    pub parts_count: usize,
}

/// cars-and-parts.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CarWithPartsDto {
    pub make: String,
    pub model: String,
    pub travelled_distance: i64,
    pub parts: Vec<PartExportDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartExportDto {
    pub name: String,
    pub price: Decimal,
}

/// customers-total-sales.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerTotalSalesDto {
    pub full_name: String,
    pub bought_cars: usize,
    pub spent_money: Decimal,
}

/// sales-discounts.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SaleWithDiscountDto {
    pub car: CarSummaryDto,
    pub customer_name: String,
    pub discount: Decimal,
    pub price: Decimal,
    pub price_with_discount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CarSummaryDto {
    pub make: String,
    pub model: String,
    pub travelled_distance: i64,
}

// ==========================================
// 商品商城导出
// ==========================================

/// products-in-range.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductInRangeDto {
    pub name: String,
    pub price: Decimal,
    pub buyer: String,
}

/// users-sold-products.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserSoldProductsDto {
    pub first_name: Option<String>,
    pub last_name: String,
    pub sold_products: Vec<SoldProductDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SoldProductDto {
    pub name: String,
    pub price: Decimal,
    pub buyer_first_name: Option<String>,
    pub buyer_last_name: Option<String>,
}

/// categories-by-products.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryStatsDto {
    pub category: String,
    pub products_count: usize,
    pub average_price: Decimal,
    pub total_revenue: Decimal,
}

/// users-and-products.json（单个对象）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsersAndProductsDto {
    pub user_count: usize,
    pub users: Vec<UserWithProductsDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserWithProductsDto {
    pub first_name: Option<String>,
    pub last_name: String,
    pub age: Option<i32>,
    pub sold_products: SoldProductsSummaryDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SoldProductsSummaryDto {
    pub count: usize,
    pub products: Vec<ProductSummaryDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductSummaryDto {
    pub name: String,
    pub price: Decimal,
}
