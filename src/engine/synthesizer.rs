// ==========================================
// 经销商/商城 ETL - 关系生成器
// ==========================================
// 职责: 基础实体落库后，随机生成夹具中缺失的关联行
// 红线: 单次运行只用一个随机数发生器实例，显式传入
// 红线: 候选 id 一律取自当前库中实际存在的实体
// ==========================================
// 生成内容:
// - Part.supplier_id      每个零件 1 个随机供应商
// - PartCar               每辆车 1 个随机零件
// - Sale                  车辆数量次，车辆/客户有放回抽取 + 随机折扣档位
// - Product 卖家/买家     买家重抽直到不同于卖家
// - CategoryProduct       每个商品恰好 3 个不同分类（拒绝重复）
// ==========================================

use crate::domain::car_dealer::{PartCar, Sale};
use crate::domain::product_shop::{CategoryProduct, TradePair};
use crate::domain::types::SaleDiscount;
use crate::engine::error::{SynthesisError, SynthesisResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// 每个商品的分类数量
pub const CATEGORIES_PER_PRODUCT: usize = 3;

// ==========================================
// RelationshipSynthesizer - 关系生成器
// ==========================================
pub struct RelationshipSynthesizer<R: Rng> {
    rng: R,
}

impl RelationshipSynthesizer<StdRng> {
    /// 按可选种子创建（None 时取系统熵）
    pub fn with_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> RelationshipSynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// 在候选 id 列表上做一次均匀抽取（调用方保证非空）
    fn pick(&mut self, ids: &[i64]) -> i64 {
        ids[self.rng.gen_range(0..ids.len())]
    }

    // ==========================================
    // 汽车经销商
    // ==========================================

    /// 为 part_count 个零件各抽取一个供应商 id
    #[instrument(skip(self, supplier_ids), fields(suppliers = supplier_ids.len()))]
    pub fn draw_part_suppliers(
        &mut self,
        part_count: usize,
        supplier_ids: &[i64],
    ) -> SynthesisResult<Vec<i64>> {
        if part_count > 0 && supplier_ids.is_empty() {
            return Err(SynthesisError::EmptyCandidatePool {
                candidate: "supplier",
                target: "part",
                count: part_count,
            });
        }

        Ok((0..part_count).map(|_| self.pick(supplier_ids)).collect())
    }

    /// 每辆车关联一个随机零件
    ///
    /// 零件可被多辆车共享；每辆车只生成一条关联，(car_id, part_id) 天然唯一
    #[instrument(skip(self, car_ids, part_ids), fields(cars = car_ids.len(), parts = part_ids.len()))]
    pub fn generate_part_cars(
        &mut self,
        car_ids: &[i64],
        part_ids: &[i64],
    ) -> SynthesisResult<Vec<PartCar>> {
        if !car_ids.is_empty() && part_ids.is_empty() {
            return Err(SynthesisError::EmptyCandidatePool {
                candidate: "part",
                target: "car",
                count: car_ids.len(),
            });
        }

        let links: Vec<PartCar> = car_ids
            .iter()
            .map(|&car_id| PartCar {
                car_id,
                part_id: self.pick(part_ids),
            })
            .collect();

        debug!(count = links.len(), "PartCar 生成完成");
        Ok(links)
    }

    /// 生成销售记录
    ///
    /// 次数 = 车辆数；车辆与客户独立有放回抽取，允许重复
    #[instrument(skip(self, car_ids, customer_ids), fields(cars = car_ids.len(), customers = customer_ids.len()))]
    pub fn generate_sales(
        &mut self,
        car_ids: &[i64],
        customer_ids: &[i64],
    ) -> SynthesisResult<Vec<Sale>> {
        if car_ids.is_empty() {
            return Ok(Vec::new());
        }
        if customer_ids.is_empty() {
            return Err(SynthesisError::EmptyCandidatePool {
                candidate: "customer",
                target: "sale",
                count: car_ids.len(),
            });
        }

        let sales: Vec<Sale> = (1..=car_ids.len() as i64)
            .map(|id| {
                let car_id = self.pick(car_ids);
                let customer_id = self.pick(customer_ids);
                let discount = SaleDiscount::ALL[self.rng.gen_range(0..SaleDiscount::ALL.len())];
                Sale {
                    id,
                    car_id,
                    customer_id,
                    discount,
                }
            })
            .collect();

        debug!(count = sales.len(), "Sale 生成完成");
        Ok(sales)
    }

    // ==========================================
    // 商品商城
    // ==========================================

    /// 为 product_count 个商品各指派卖家与买家（买家 ≠ 卖家）
    #[instrument(skip(self, user_ids), fields(users = user_ids.len()))]
    pub fn draw_trade_pairs(
        &mut self,
        product_count: usize,
        user_ids: &[i64],
    ) -> SynthesisResult<Vec<TradePair>> {
        if product_count == 0 {
            return Ok(Vec::new());
        }
        let distinct = user_ids.iter().collect::<HashSet<_>>().len();
        if distinct < 2 {
            return Err(SynthesisError::InsufficientUsers {
                available: distinct,
            });
        }

        let pairs = (0..product_count)
            .map(|_| {
                let seller_id = self.pick(user_ids);
                let mut buyer_id = self.pick(user_ids);
                while buyer_id == seller_id {
                    buyer_id = self.pick(user_ids);
                }
                TradePair {
                    seller_id,
                    buyer_id,
                }
            })
            .collect();

        Ok(pairs)
    }

    /// 为每个商品生成恰好 3 个不同分类
    ///
    /// 前置条件: 不同分类 id 数 ≥ 3，否则直接报错
    #[instrument(skip(self, product_ids, category_ids), fields(products = product_ids.len(), categories = category_ids.len()))]
    pub fn generate_category_products(
        &mut self,
        product_ids: &[i64],
        category_ids: &[i64],
    ) -> SynthesisResult<Vec<CategoryProduct>> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }
        let distinct = category_ids.iter().collect::<HashSet<_>>().len();
        if distinct < CATEGORIES_PER_PRODUCT {
            return Err(SynthesisError::InsufficientCategories {
                required: CATEGORIES_PER_PRODUCT,
                available: distinct,
            });
        }

        let mut links = Vec::with_capacity(product_ids.len() * CATEGORIES_PER_PRODUCT);
        for &product_id in product_ids {
            let mut chosen: HashSet<i64> = HashSet::with_capacity(CATEGORIES_PER_PRODUCT);
            while chosen.len() < CATEGORIES_PER_PRODUCT {
                let category_id = self.pick(category_ids);
                // 重复分类拒绝，重新抽取
                if chosen.insert(category_id) {
                    links.push(CategoryProduct {
                        product_id,
                        category_id,
                    });
                }
            }
        }

        debug!(count = links.len(), "CategoryProduct 生成完成");
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn seeded(seed: u64) -> RelationshipSynthesizer<StdRng> {
        RelationshipSynthesizer::with_seed(Some(seed))
    }

    fn ids(range: std::ops::RangeInclusive<i64>) -> Vec<i64> {
        range.collect()
    }

    #[test]
    fn test_part_cars_reference_existing_entities() {
        let cars = ids(1..=50);
        let parts = vec![3, 7, 11, 131, 500];
        for seed in 0..20 {
            let links = seeded(seed).generate_part_cars(&cars, &parts).unwrap();
            assert_eq!(links.len(), cars.len());
            for (link, car_id) in links.iter().zip(&cars) {
                assert_eq!(link.car_id, *car_id);
                assert!(parts.contains(&link.part_id));
            }
            let unique: HashSet<_> = links.iter().collect();
            assert_eq!(unique.len(), links.len());
        }
    }

    #[test]
    fn test_part_cars_need_parts() {
        let err = seeded(1).generate_part_cars(&[1, 2], &[]).unwrap_err();
        assert_eq!(
            err,
            SynthesisError::EmptyCandidatePool {
                candidate: "part",
                target: "car",
                count: 2
            }
        );
        assert!(seeded(1).generate_part_cars(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_part_suppliers_drawn_from_existing() {
        let suppliers = vec![10, 20, 30];
        let drawn = seeded(5).draw_part_suppliers(200, &suppliers).unwrap();
        assert_eq!(drawn.len(), 200);
        assert!(drawn.iter().all(|id| suppliers.contains(id)));
        // 200 次抽取应覆盖全部供应商
        let seen: HashSet<_> = drawn.into_iter().collect();
        assert_eq!(seen.len(), 3);

        assert!(seeded(5).draw_part_suppliers(1, &[]).is_err());
        assert!(seeded(5).draw_part_suppliers(0, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_sales_invariants() {
        let cars = ids(1..=40);
        let customers = ids(1..=7);
        for seed in 0..20 {
            let sales = seeded(seed).generate_sales(&cars, &customers).unwrap();
            assert_eq!(sales.len(), cars.len());
            for (i, sale) in sales.iter().enumerate() {
                assert_eq!(sale.id, i as i64 + 1);
                assert!(cars.contains(&sale.car_id));
                assert!(customers.contains(&sale.customer_id));
                assert!(SaleDiscount::ALL.contains(&sale.discount));
                assert!([0, 5, 10, 15, 20, 30, 40, 50].contains(&sale.discount.percent()));
            }
        }
    }

    #[test]
    fn test_sales_can_reach_last_car_and_customer() {
        let cars = ids(1..=3);
        let customers = ids(1..=2);
        let mut synthesizer = seeded(99);
        let mut seen_car = HashSet::new();
        let mut seen_customer = HashSet::new();
        for _ in 0..50 {
            for sale in synthesizer.generate_sales(&cars, &customers).unwrap() {
                seen_car.insert(sale.car_id);
                seen_customer.insert(sale.customer_id);
            }
        }
        assert!(seen_car.contains(&3));
        assert!(seen_customer.contains(&2));
    }

    #[test]
    fn test_sales_need_customers() {
        assert!(matches!(
            seeded(1).generate_sales(&[1], &[]),
            Err(SynthesisError::EmptyCandidatePool { .. })
        ));
        assert!(seeded(1).generate_sales(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_trade_pairs_buyer_differs_from_seller() {
        let users = ids(1..=5);
        for seed in 0..20 {
            let pairs = seeded(seed).draw_trade_pairs(100, &users).unwrap();
            assert_eq!(pairs.len(), 100);
            for pair in pairs {
                assert_ne!(pair.buyer_id, pair.seller_id);
                assert!(users.contains(&pair.seller_id));
                assert!(users.contains(&pair.buyer_id));
            }
        }
    }

    #[test]
    fn test_trade_pairs_with_two_users() {
        let pairs = seeded(3).draw_trade_pairs(30, &[8, 9]).unwrap();
        for pair in pairs {
            assert_eq!(pair.seller_id + pair.buyer_id, 17);
        }
    }

    #[test]
    fn test_trade_pairs_fail_fast_with_single_user() {
        assert_eq!(
            seeded(1).draw_trade_pairs(1, &[4, 4, 4]).unwrap_err(),
            SynthesisError::InsufficientUsers { available: 1 }
        );
        assert!(seeded(1).draw_trade_pairs(0, &[4]).unwrap().is_empty());
    }

    #[test]
    fn test_category_products_exactly_three_distinct() {
        let products = ids(1..=60);
        let categories = ids(1..=11);
        for seed in 0..20 {
            let links = seeded(seed)
                .generate_category_products(&products, &categories)
                .unwrap();
            assert_eq!(links.len(), products.len() * CATEGORIES_PER_PRODUCT);

            let mut per_product: HashMap<i64, HashSet<i64>> = HashMap::new();
            for link in &links {
                assert!(categories.contains(&link.category_id));
                per_product
                    .entry(link.product_id)
                    .or_default()
                    .insert(link.category_id);
            }
            assert_eq!(per_product.len(), products.len());
            assert!(per_product.values().all(|c| c.len() == CATEGORIES_PER_PRODUCT));
        }
    }

    #[test]
    fn test_category_products_with_exactly_three_categories() {
        let links = seeded(7)
            .generate_category_products(&[1, 2], &[5, 6, 7])
            .unwrap();
        let mut first: Vec<i64> = links
            .iter()
            .filter(|l| l.product_id == 1)
            .map(|l| l.category_id)
            .collect();
        first.sort();
        assert_eq!(first, vec![5, 6, 7]);
    }

    #[test]
    fn test_category_products_fail_fast_with_small_pool() {
        let err = seeded(1)
            .generate_category_products(&[1], &[1, 2, 2])
            .unwrap_err();
        assert_eq!(
            err,
            SynthesisError::InsufficientCategories {
                required: 3,
                available: 2
            }
        );
        assert!(err.to_string().contains("分类数量不足"));
    }

    #[test]
    fn test_same_seed_same_output() {
        let cars = ids(1..=10);
        let customers = ids(1..=10);
        let a = seeded(42).generate_sales(&cars, &customers).unwrap();
        let b = seeded(42).generate_sales(&cars, &customers).unwrap();
        assert_eq!(a, b);
    }
}
