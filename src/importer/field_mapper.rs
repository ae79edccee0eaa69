// ==========================================
// 经销商/商城 ETL - 字段映射器
// ==========================================
// 职责: 导入 DTO → 领域实体（逐字段显式转换）
// 约定: id 按夹具顺序从 1 开始顺序分配
// ==========================================

use crate::domain::car_dealer::{Car, Customer, Part, Supplier};
use crate::domain::product_shop::{Category, Product, TradePair, User};
use crate::importer::dto::{
    CarDto, CategoryDto, CustomerDto, PartDto, ProductDto, SupplierDto, UserDto,
};

/// 按夹具顺序分配 id（从 1 开始）并逐条映射
pub fn map_with_ids<D, E>(dtos: Vec<D>, map: impl Fn(D, i64) -> E) -> Vec<E> {
    dtos.into_iter()
        .zip(1_i64..)
        .map(|(dto, id)| map(dto, id))
        .collect()
}

pub fn map_supplier(dto: SupplierDto, id: i64) -> Supplier {
    Supplier {
        id,
        name: dto.name,
        is_importer: dto.is_importer,
    }
}

/// 零件映射（supplier_id 来自关系生成器）
pub fn map_part(dto: PartDto, id: i64, supplier_id: i64) -> Part {
    Part {
        id,
        name: dto.name,
        price: dto.price,
        quantity: dto.quantity,
        supplier_id,
    }
}

pub fn map_car(dto: CarDto, id: i64) -> Car {
    Car {
        id,
        make: dto.make,
        model: dto.model,
        travelled_distance: dto.travelled_distance,
    }
}

pub fn map_customer(dto: CustomerDto, id: i64) -> Customer {
    Customer {
        id,
        name: dto.name,
        birth_date: dto.birth_date,
        is_young_driver: dto.is_young_driver,
    }
}

pub fn map_user(dto: UserDto, id: i64) -> User {
    User {
        id,
        // 空白名字视为缺失
        first_name: dto
            .first_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        last_name: dto.last_name,
        age: dto.age,
    }
}

/// 商品映射（卖家/买家来自关系生成器）
pub fn map_product(dto: ProductDto, id: i64, pair: TradePair) -> Product {
    Product {
        id,
        name: dto.name,
        price: dto.price,
        seller_id: pair.seller_id,
        buyer_id: Some(pair.buyer_id),
    }
}

pub fn map_category(dto: CategoryDto, id: i64) -> Category {
    Category { id, name: dto.name }
}
