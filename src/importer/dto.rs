// ==========================================
// 经销商/商城 ETL - 导入 DTO
// ==========================================
// 对齐: Datasets/Import/*.json（扁平 camelCase 对象数组）
// 说明: 未知字段忽略，缺失的必填字段由反序列化直接拒绝
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// ==========================================
// 经销商夹具
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDto {
    pub name: String,
    pub is_importer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartDto {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    pub make: String,
    pub model: String,
    pub travelled_distance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub name: String,
    #[serde(deserialize_with = "deserialize_birth_date")]
    pub birth_date: NaiveDateTime,
    pub is_young_driver: bool,
}

// ==========================================
// 商城夹具
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default)]
    pub first_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub age: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub name: String,
}

/// 解析出生日期
///
/// 支持: `1997-10-24T00:00:00`（可带小数秒）/ `1997-10-24`
fn deserialize_birth_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_birth_date(raw.trim()).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "日期格式错误: 期望 YYYY-MM-DDTHH:MM:SS 或 YYYY-MM-DD，实际 {}",
            raw
        ))
    })
}

pub(crate) fn parse_birth_date(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
