// ==========================================
// 经销商/商城 ETL - 商品商城查询
// ==========================================
// 职责: 全量快照 → 有序导出记录（纯函数，只读）
// 红线: 排序键与次序键属于输出契约；所有排序为稳定排序
// ==========================================

use crate::domain::product_shop::{ProductShopSnapshot, User};
use crate::exporter::dto::{
    CategoryStatsDto, ProductInRangeDto, ProductSummaryDto, SoldProductDto,
    SoldProductsSummaryDto, UserSoldProductsDto, UserWithProductsDto, UsersAndProductsDto,
};
use rust_decimal::Decimal;

/// 价格区间下限（含）
pub const PRICE_BAND_MIN: i64 = 500;

/// 价格区间上限（含）
pub const PRICE_BAND_MAX: i64 = 1000;

/// 用户全名（名缺失时只用姓），去除首尾空白
fn full_name(user: &User) -> String {
    format!(
        "{} {}",
        user.first_name.as_deref().unwrap_or(""),
        user.last_name
    )
    .trim()
    .to_string()
}

/// 价格在 [500, 1000] 内的商品：价格升序
///
/// 买家为空时 buyer 字段为空字符串
pub fn products_in_range(snapshot: &ProductShopSnapshot) -> Vec<ProductInRangeDto> {
    let users = snapshot.users_by_id();
    let (min, max) = (Decimal::from(PRICE_BAND_MIN), Decimal::from(PRICE_BAND_MAX));

    let mut products: Vec<ProductInRangeDto> = snapshot
        .products
        .iter()
        .filter(|p| p.price >= min && p.price <= max)
        .map(|p| ProductInRangeDto {
            name: p.name.clone(),
            price: p.price,
            buyer: p
                .buyer_id
                .and_then(|id| users.get(&id))
                .map(|u| full_name(u))
                .unwrap_or_default(),
        })
        .collect();

    products.sort_by(|a, b| a.price.cmp(&b.price));
    products
}

/// 至少售出一件商品的用户及其已售商品：姓升序，再按名升序
pub fn sold_products_by_user(snapshot: &ProductShopSnapshot) -> Vec<UserSoldProductsDto> {
    let users = snapshot.users_by_id();
    let by_seller = snapshot.products_by_seller();

    let mut result: Vec<UserSoldProductsDto> = snapshot
        .users
        .iter()
        .filter_map(|u| {
            let sold = by_seller.get(&u.id)?;
            Some(UserSoldProductsDto {
                first_name: u.first_name.clone(),
                last_name: u.last_name.clone(),
                sold_products: sold
                    .iter()
                    .map(|p| {
                        let buyer = p.buyer_id.and_then(|id| users.get(&id));
                        SoldProductDto {
                            name: p.name.clone(),
                            price: p.price,
                            buyer_first_name: buyer.and_then(|b| b.first_name.clone()),
                            buyer_last_name: buyer.map(|b| b.last_name.clone()),
                        }
                    })
                    .collect(),
            })
        })
        .collect();

    result.sort_by(|a, b| {
        a.last_name
            .cmp(&b.last_name)
            .then(a.first_name.cmp(&b.first_name))
    });
    result
}

/// 分类统计：商品数 / 平均价 / 总营收，分类名升序
///
/// 无商品的分类平均价与总营收均为 0
pub fn categories_by_product_count(snapshot: &ProductShopSnapshot) -> Vec<CategoryStatsDto> {
    let by_category = snapshot.products_by_category();

    let mut result: Vec<CategoryStatsDto> = snapshot
        .categories
        .iter()
        .map(|c| {
            let products = by_category.get(&c.id).map(Vec::as_slice).unwrap_or(&[]);
            let products_count = products.len();
            let total_revenue: Decimal = products.iter().map(|p| p.price).sum();
            let average_price = if products_count == 0 {
                Decimal::ZERO
            } else {
                total_revenue / Decimal::from(products_count)
            };

            CategoryStatsDto {
                category: c.name.clone(),
                products_count,
                average_price,
                total_revenue,
            }
        })
        .collect();

    result.sort_by(|a, b| a.category.cmp(&b.category));
    result
}

/// 用户与已售商品汇总：已售数量降序
pub fn users_and_products(snapshot: &ProductShopSnapshot) -> UsersAndProductsDto {
    let by_seller = snapshot.products_by_seller();

    let mut users: Vec<UserWithProductsDto> = snapshot
        .users
        .iter()
        .filter_map(|u| {
            let sold = by_seller.get(&u.id)?;
            Some(UserWithProductsDto {
                first_name: u.first_name.clone(),
                last_name: u.last_name.clone(),
                age: u.age,
                sold_products: SoldProductsSummaryDto {
                    count: sold.len(),
                    products: sold
                        .iter()
                        .map(|p| ProductSummaryDto {
                            name: p.name.clone(),
                            price: p.price,
                        })
                        .collect(),
                },
            })
        })
        .collect();

    users.sort_by(|a, b| b.sold_products.count.cmp(&a.sold_products.count));

    UsersAndProductsDto {
        user_count: users.len(),
        users,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product_shop::{Category, CategoryProduct, Product};
    use std::str::FromStr;

    fn user(id: i64, first: Option<&str>, last: &str) -> User {
        User {
            id,
            first_name: first.map(str::to_string),
            last_name: last.to_string(),
            age: Some(20 + id as i32),
        }
    }

    fn product(id: i64, name: &str, price: &str, seller: i64, buyer: Option<i64>) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: Decimal::from_str(price).unwrap(),
            seller_id: seller,
            buyer_id: buyer,
        }
    }

    fn sample() -> ProductShopSnapshot {
        ProductShopSnapshot {
            users: vec![
                user(1, Some("Chrissy"), "Falconbridge"),
                user(2, None, "Stewart"),
                user(3, Some("Kathy"), "Stewart"),
                user(4, Some("Idle"), "Nobody"),
            ],
            products: vec![
                product(1, "Edge", "500", 1, Some(2)),
                product(2, "Over", "1001", 1, Some(3)),
                product(3, "Top", "1000", 3, Some(1)),
                product(4, "Mid", "750.50", 2, None),
                product(5, "Cheap", "499.99", 3, Some(2)),
            ],
            categories: vec![
                Category {
                    id: 1,
                    name: "Toys".to_string(),
                },
                Category {
                    id: 2,
                    name: "Adult".to_string(),
                },
                Category {
                    id: 3,
                    name: "Empty".to_string(),
                },
            ],
            category_products: vec![
                CategoryProduct {
                    product_id: 1,
                    category_id: 1,
                },
                CategoryProduct {
                    product_id: 2,
                    category_id: 1,
                },
                CategoryProduct {
                    product_id: 4,
                    category_id: 2,
                },
            ],
        }
    }

    #[test]
    fn test_price_band_is_inclusive() {
        let result = products_in_range(&sample());
        let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Edge", "Mid", "Top"]);
    }

    #[test]
    fn test_price_band_only_500_of_500_and_1001() {
        let snapshot = ProductShopSnapshot {
            users: vec![user(1, Some("A"), "B"), user(2, Some("C"), "D")],
            products: vec![
                product(1, "Exactly 500", "500", 1, Some(2)),
                product(2, "Too expensive", "1001", 2, Some(1)),
            ],
            ..Default::default()
        };
        let result = products_in_range(&snapshot);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Exactly 500");
        assert_eq!(result[0].buyer, "C D");
    }

    #[test]
    fn test_price_band_buyer_name_formatting() {
        let result = products_in_range(&sample());
        // 买家 2 无名字，只保留姓
        assert_eq!(result[0].buyer, "Stewart");
        // 无买家 → 空字符串
        assert_eq!(result[1].buyer, "");
        assert_eq!(result[2].buyer, "Chrissy Falconbridge");
    }

    #[test]
    fn test_sold_products_sorted_by_last_then_first() {
        let result = sold_products_by_user(&sample());
        let keys: Vec<(Option<&str>, &str)> = result
            .iter()
            .map(|u| (u.first_name.as_deref(), u.last_name.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (Some("Chrissy"), "Falconbridge"),
                (None, "Stewart"),
                (Some("Kathy"), "Stewart"),
            ]
        );

        let chrissy = &result[0];
        assert_eq!(chrissy.sold_products.len(), 2);
        assert_eq!(chrissy.sold_products[0].buyer_first_name, None);
        assert_eq!(chrissy.sold_products[0].buyer_last_name.as_deref(), Some("Stewart"));
        // 无买家的商品
        assert_eq!(result[1].sold_products[0].buyer_last_name, None);
    }

    #[test]
    fn test_category_stats() {
        let result = categories_by_product_count(&sample());
        let names: Vec<&str> = result.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Adult", "Empty", "Toys"]);

        let toys = &result[2];
        assert_eq!(toys.products_count, 2);
        assert_eq!(toys.total_revenue, Decimal::from(1501));
        assert_eq!(toys.average_price, Decimal::new(7505, 1));

        let empty = &result[1];
        assert_eq!(empty.products_count, 0);
        assert_eq!(empty.average_price, Decimal::ZERO);
        assert_eq!(empty.total_revenue, Decimal::ZERO);
    }

    #[test]
    fn test_users_and_products_summary() {
        let result = users_and_products(&sample());
        assert_eq!(result.user_count, 3);
        assert_eq!(result.users.len(), 3);

        let counts: Vec<usize> = result.users.iter().map(|u| u.sold_products.count).collect();
        assert_eq!(counts, vec![2, 2, 1]);
        // 同数量保持用户 id 顺序
        assert_eq!(result.users[0].last_name, "Falconbridge");
        assert_eq!(result.users[1].first_name.as_deref(), Some("Kathy"));
        assert_eq!(result.users[0].age, Some(21));
        assert_eq!(result.users[2].sold_products.products[0].name, "Mid");
    }
}
