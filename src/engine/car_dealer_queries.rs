// ==========================================
// 经销商/商城 ETL - 汽车经销商查询
// ==========================================
// 职责: 全量快照 → 有序导出记录（纯函数，只读）
// 红线: 排序键与次序键属于输出契约；所有排序为稳定排序
// 红线: 金额汇总一律使用精确十进制
// ==========================================

use crate::domain::car_dealer::CarDealerSnapshot;
use crate::exporter::dto::{
    CarSummaryDto, CarWithPartsDto, CustomerTotalSalesDto, LocalSupplierDto,
    OrderedCustomerDto, PartExportDto, SaleWithDiscountDto, ToyotaCarDto,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Toyota 车辆查询的品牌字面量
pub const TOYOTA_MAKE: &str = "Toyota";

/// 全部客户：出生日期升序，再按年轻驾驶员标记升序（false 在前）
pub fn ordered_customers(snapshot: &CarDealerSnapshot) -> Vec<OrderedCustomerDto> {
    let mut customers: Vec<OrderedCustomerDto> = snapshot
        .customers
        .iter()
        .map(|c| OrderedCustomerDto {
            id: c.id,
            name: c.name.clone(),
            birth_date: c.birth_date,
            is_young_driver: c.is_young_driver,
        })
        .collect();

    customers.sort_by(|a, b| {
        a.birth_date
            .cmp(&b.birth_date)
            .then(a.is_young_driver.cmp(&b.is_young_driver))
    });
    customers
}

/// Toyota 车辆：型号升序，再按里程降序
pub fn toyota_cars(snapshot: &CarDealerSnapshot) -> Vec<ToyotaCarDto> {
    let mut cars: Vec<ToyotaCarDto> = snapshot
        .cars
        .iter()
        .filter(|c| c.make == TOYOTA_MAKE)
        .map(|c| ToyotaCarDto {
            id: c.id,
            make: c.make.clone(),
            model: c.model.clone(),
            travelled_distance: c.travelled_distance,
        })
        .collect();

    cars.sort_by(|a, b| {
        a.model
            .cmp(&b.model)
            .then(b.travelled_distance.cmp(&a.travelled_distance))
    });
    cars
}

/// 全部供应商及其零件数：名称升序
pub fn local_suppliers(snapshot: &CarDealerSnapshot) -> Vec<LocalSupplierDto> {
    let mut parts_count: HashMap<i64, usize> = HashMap::new();
    for part in &snapshot.parts {
        *parts_count.entry(part.supplier_id).or_insert(0) += 1;
    }

    let mut suppliers: Vec<LocalSupplierDto> = snapshot
        .suppliers
        .iter()
        .map(|s| LocalSupplierDto {
            id: s.id,
            name: s.name.clone(),
            parts_count: parts_count.get(&s.id).copied().unwrap_or(0),
        })
        .collect();

    suppliers.sort_by(|a, b| a.name.cmp(&b.name));
    suppliers
}

/// 全部车辆及其零件（不过滤、不排序，保持 id 顺序）
pub fn cars_with_parts(snapshot: &CarDealerSnapshot) -> Vec<CarWithPartsDto> {
    let parts_by_car = snapshot.parts_by_car();

    snapshot
        .cars
        .iter()
        .map(|c| CarWithPartsDto {
            make: c.make.clone(),
            model: c.model.clone(),
            travelled_distance: c.travelled_distance,
            parts: parts_by_car
                .get(&c.id)
                .map(|parts| {
                    parts
                        .iter()
                        .map(|p| PartExportDto {
                            name: p.name.clone(),
                            price: p.price,
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

/// 客户消费汇总：仅含至少一笔销售的客户
///
/// 消费额 = 所购全部车辆的零件价格之和（不计折扣）；
/// 消费额降序，再按购车数降序
pub fn total_sales_by_customer(snapshot: &CarDealerSnapshot) -> Vec<CustomerTotalSalesDto> {
    let parts_by_car = snapshot.parts_by_car();

    let mut totals: HashMap<i64, (usize, Decimal)> = HashMap::new();
    for sale in &snapshot.sales {
        let entry = totals.entry(sale.customer_id).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += snapshot.car_price(&parts_by_car, sale.car_id);
    }

    let mut result: Vec<CustomerTotalSalesDto> = snapshot
        .customers
        .iter()
        .filter_map(|c| {
            totals.get(&c.id).map(|&(bought_cars, spent_money)| CustomerTotalSalesDto {
                full_name: c.name.clone(),
                bought_cars,
                spent_money,
            })
        })
        .collect();

    result.sort_by(|a, b| {
        b.spent_money
            .cmp(&a.spent_money)
            .then(b.bought_cars.cmp(&a.bought_cars))
    });
    result
}

/// 全部销售及折扣后价格（销售 id 顺序）
///
/// price = 车辆零件价格之和；discount = 百分比 / 100；
/// price_with_discount = price - price × discount
pub fn sales_with_discount(snapshot: &CarDealerSnapshot) -> Vec<SaleWithDiscountDto> {
    let parts_by_car = snapshot.parts_by_car();
    let cars = snapshot.cars_by_id();
    let customers = snapshot.customers_by_id();

    snapshot
        .sales
        .iter()
        .filter_map(|sale| {
            // 外键保证引用存在；缺失时跳过该行
            let car = cars.get(&sale.car_id)?;
            let customer = customers.get(&sale.customer_id)?;
            let price = snapshot.car_price(&parts_by_car, sale.car_id);
            let discount = sale.discount.fraction();

            Some(SaleWithDiscountDto {
                car: CarSummaryDto {
                    make: car.make.clone(),
                    model: car.model.clone(),
                    travelled_distance: car.travelled_distance,
                },
                customer_name: customer.name.clone(),
                discount,
                price,
                price_with_discount: price - price * discount,
            })
        })
        .collect()
}
