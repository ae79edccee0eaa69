// ==========================================
// 经销商/商城 ETL - 领域类型定义
// ==========================================
// 职责: 跨实体复用的值类型
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 销售折扣 (Sale Discount)
// ==========================================
// 红线: 折扣只能取固定档位 {0,5,10,15,20,30,40,50}
// 存储: sale.discount 列保存整数百分比
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum SaleDiscount {
    None,    // 0%
    P5,      // 5%
    P10,     // 10%
    P15,     // 15%
    P20,     // 20%
    P30,     // 30%
    P40,     // 40%
    P50,     // 50%
}

impl SaleDiscount {
    /// 全部折扣档位（随机抽取的候选集合）
    pub const ALL: [SaleDiscount; 8] = [
        SaleDiscount::None,
        SaleDiscount::P5,
        SaleDiscount::P10,
        SaleDiscount::P15,
        SaleDiscount::P20,
        SaleDiscount::P30,
        SaleDiscount::P40,
        SaleDiscount::P50,
    ];

    /// 整数百分比
    pub fn percent(self) -> i32 {
        match self {
            SaleDiscount::None => 0,
            SaleDiscount::P5 => 5,
            SaleDiscount::P10 => 10,
            SaleDiscount::P15 => 15,
            SaleDiscount::P20 => 20,
            SaleDiscount::P30 => 30,
            SaleDiscount::P40 => 40,
            SaleDiscount::P50 => 50,
        }
    }

    /// 从整数百分比解析（不在档位内返回 None）
    pub fn from_percent(percent: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.percent() == percent)
    }

    /// 折扣比例 = 百分比 / 100（精确十进制）
    pub fn fraction(self) -> Decimal {
        Decimal::new(i64::from(self.percent()), 2)
    }
}

impl TryFrom<i32> for SaleDiscount {
    type Error = String;

    fn try_from(percent: i32) -> Result<Self, Self::Error> {
        SaleDiscount::from_percent(percent)
            .ok_or_else(|| format!("无效的折扣百分比: {}", percent))
    }
}

impl From<SaleDiscount> for i32 {
    fn from(discount: SaleDiscount) -> Self {
        discount.percent()
    }
}

impl fmt::Display for SaleDiscount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_roundtrip() {
        for d in SaleDiscount::ALL {
            assert_eq!(SaleDiscount::from_percent(d.percent()), Some(d));
        }
        assert_eq!(SaleDiscount::from_percent(25), None);
        assert_eq!(SaleDiscount::from_percent(-5), None);
    }

    #[test]
    fn test_fraction_is_exact() {
        assert_eq!(SaleDiscount::P10.fraction(), Decimal::new(1, 1));
        assert_eq!(SaleDiscount::None.fraction(), Decimal::ZERO);
        assert_eq!(SaleDiscount::P50.fraction().to_string(), "0.50");
    }
}
