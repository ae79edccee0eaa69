// ==========================================
// 经销商/商城 ETL - 汽车经销商领域模型
// ==========================================
// 对齐: schema/car_dealer.sql
// 关系: Supplier 1→N Part, Car N↔N Part (PartCar),
//       Customer 1→N Sale, Car 1→N Sale
// ==========================================

use crate::domain::types::SaleDiscount;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Supplier - 供应商
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub is_importer: bool, // 是否为进口商
}

// ==========================================
// Part - 零件
// ==========================================
// 红线: supplier_id 由关系生成器随机指派（夹具中不含）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: i64,
    pub name: String,
    pub price: Decimal, // 单价（精确十进制）
    pub quantity: i32,  // 库存数量
    pub supplier_id: i64,
}

// ==========================================
// Car - 车辆
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub travelled_distance: i64, // 行驶里程
}

// ==========================================
// PartCar - 车辆零件关联
// ==========================================
// 红线: (car_id, part_id) 唯一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartCar {
    pub car_id: i64,
    pub part_id: i64,
}

// ==========================================
// Customer - 客户
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDateTime,
    pub is_young_driver: bool, // 是否为年轻驾驶员
}

// ==========================================
// Sale - 销售记录
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub car_id: i64,
    pub customer_id: i64,
    pub discount: SaleDiscount,
}

// ==========================================
// CarDealerSnapshot - 经销商库全量快照
// ==========================================
// 用途: 仓储层一次性读出，查询层只读消费
// 约定: 各集合按 id 升序
#[derive(Debug, Clone, Default)]
pub struct CarDealerSnapshot {
    pub suppliers: Vec<Supplier>,
    pub parts: Vec<Part>,
    pub cars: Vec<Car>,
    pub part_cars: Vec<PartCar>,
    pub customers: Vec<Customer>,
    pub sales: Vec<Sale>,
}

impl CarDealerSnapshot {
    /// 按 id 索引零件
    pub fn parts_by_id(&self) -> HashMap<i64, &Part> {
        self.parts.iter().map(|p| (p.id, p)).collect()
    }

    /// 按 id 索引车辆
    pub fn cars_by_id(&self) -> HashMap<i64, &Car> {
        self.cars.iter().map(|c| (c.id, c)).collect()
    }

    /// 按 id 索引客户
    pub fn customers_by_id(&self) -> HashMap<i64, &Customer> {
        self.customers.iter().map(|c| (c.id, c)).collect()
    }

    /// 车辆 → 零件列表（保持 part_car 读取顺序）
    pub fn parts_by_car(&self) -> HashMap<i64, Vec<&Part>> {
        let parts = self.parts_by_id();
        let mut map: HashMap<i64, Vec<&Part>> = HashMap::new();
        for link in &self.part_cars {
            if let Some(part) = parts.get(&link.part_id) {
                map.entry(link.car_id).or_default().push(*part);
            }
        }
        map
    }

    /// 车辆零件总价（无零件为 0）
    pub fn car_price(&self, parts_by_car: &HashMap<i64, Vec<&Part>>, car_id: i64) -> Decimal {
        parts_by_car
            .get(&car_id)
            .map(|parts| parts.iter().map(|p| p.price).sum())
            .unwrap_or(Decimal::ZERO)
    }
}
