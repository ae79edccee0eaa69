// ==========================================
// 经销商/商城 ETL - 列值转换工具
// ==========================================
// 职责: 精确十进制 / 折扣档位 与 SQLite 列之间的转换
// ==========================================

use crate::domain::types::SaleDiscount;
use rusqlite::types::Type;
use rusqlite::Row;
use rust_decimal::Decimal;
use std::str::FromStr;

/// 读取 TEXT 列为精确十进制
pub fn get_decimal(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(raw.trim())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// 读取 INTEGER 列为折扣档位
pub fn get_discount(row: &Row<'_>, idx: usize) -> rusqlite::Result<SaleDiscount> {
    let percent: i32 = row.get(idx)?;
    SaleDiscount::try_from(percent).map_err(|msg| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, msg.into())
    })
}

/// 十进制写入格式（保留原始精度）
pub fn decimal_to_sql(value: &Decimal) -> String {
    value.to_string()
}
