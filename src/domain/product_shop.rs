// ==========================================
// 经销商/商城 ETL - 商品商城领域模型
// ==========================================
// 对齐: schema/product_shop.sql
// 关系: User 1→N Product (seller), User 1→N Product (buyer),
//       Product N↔N Category (CategoryProduct)
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// User - 用户
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: String,
    pub age: Option<i32>,
}

// ==========================================
// Product - 商品
// ==========================================
// 红线: buyer_id 与 seller_id 不得相同
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub seller_id: i64,
    pub buyer_id: Option<i64>,
}

// ==========================================
// Category - 分类
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// ==========================================
// CategoryProduct - 商品分类关联
// ==========================================
// 红线: (product_id, category_id) 唯一，每个商品恰好 3 个分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryProduct {
    pub product_id: i64,
    pub category_id: i64,
}

// ==========================================
// TradePair - 卖家/买家指派结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradePair {
    pub seller_id: i64,
    pub buyer_id: i64,
}

// ==========================================
// ProductShopSnapshot - 商城库全量快照
// ==========================================
// 约定: 各集合按 id 升序
#[derive(Debug, Clone, Default)]
pub struct ProductShopSnapshot {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub category_products: Vec<CategoryProduct>,
}

impl ProductShopSnapshot {
    /// 按 id 索引用户
    pub fn users_by_id(&self) -> HashMap<i64, &User> {
        self.users.iter().map(|u| (u.id, u)).collect()
    }

    /// 卖家 → 名下商品列表（保持商品 id 顺序）
    pub fn products_by_seller(&self) -> HashMap<i64, Vec<&Product>> {
        let mut map: HashMap<i64, Vec<&Product>> = HashMap::new();
        for product in &self.products {
            map.entry(product.seller_id).or_default().push(product);
        }
        map
    }

    /// 分类 → 商品列表
    pub fn products_by_category(&self) -> HashMap<i64, Vec<&Product>> {
        let products: HashMap<i64, &Product> =
            self.products.iter().map(|p| (p.id, p)).collect();
        let mut map: HashMap<i64, Vec<&Product>> = HashMap::new();
        for link in &self.category_products {
            if let Some(product) = products.get(&link.product_id) {
                map.entry(link.category_id).or_default().push(*product);
            }
        }
        map
    }
}
