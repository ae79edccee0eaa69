// ==========================================
// 经销商/商城 ETL - 商品商城数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有写入使用参数化 + 事务批量提交
// ==========================================

use crate::db::{init_product_shop_schema, open_sqlite_connection};
use crate::domain::product_shop::{
    Category, CategoryProduct, Product, ProductShopSnapshot, User,
};
use crate::repository::column::{decimal_to_sql, get_decimal};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// ProductShopRepository - 商品商城仓储
// ==========================================
/// 商品商城仓储
/// 职责: shop_user / product / category / category_product 四张表的写入与全量读取
pub struct ProductShopRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductShopRepository {
    /// 创建新的 ProductShopRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 重建表结构（清空上一次运行的数据）
    pub fn init_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        init_product_shop_schema(&conn)?;
        Ok(())
    }

    /// 批量插入用户
    pub fn batch_insert_users(&self, users: &[User]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO shop_user (id, first_name, last_name, age) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for u in users {
                stmt.execute(params![u.id, u.first_name, u.last_name, u.age])?;
            }
        }
        tx.commit()?;
        Ok(users.len())
    }

    /// 批量插入商品
    pub fn batch_insert_products(&self, products: &[Product]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO product (id, name, price, seller_id, buyer_id) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for p in products {
                stmt.execute(params![
                    p.id,
                    p.name,
                    decimal_to_sql(&p.price),
                    p.seller_id,
                    p.buyer_id
                ])?;
            }
        }
        tx.commit()?;
        Ok(products.len())
    }

    /// 批量插入分类
    pub fn batch_insert_categories(&self, categories: &[Category]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO category (id, name) VALUES (?1, ?2)")?;
            for c in categories {
                stmt.execute(params![c.id, c.name])?;
            }
        }
        tx.commit()?;
        Ok(categories.len())
    }

    /// 批量插入商品分类关联
    pub fn batch_insert_category_products(
        &self,
        links: &[CategoryProduct],
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO category_product (product_id, category_id) VALUES (?1, ?2)",
            )?;
            for link in links {
                stmt.execute(params![link.product_id, link.category_id])?;
            }
        }
        tx.commit()?;
        Ok(links.len())
    }

    pub fn list_user_ids(&self) -> RepositoryResult<Vec<i64>> {
        self.list_ids("shop_user")
    }

    pub fn list_product_ids(&self) -> RepositoryResult<Vec<i64>> {
        self.list_ids("product")
    }

    pub fn list_category_ids(&self) -> RepositoryResult<Vec<i64>> {
        self.list_ids("category")
    }

    fn list_ids(&self, table: &str) -> RepositoryResult<Vec<i64>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("SELECT id FROM {} ORDER BY id ASC", table))?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(ids)
    }

    /// 读取全部四张表（各集合按主键升序）
    pub fn load_snapshot(&self) -> RepositoryResult<ProductShopSnapshot> {
        let conn = self.get_conn()?;

        let users = conn
            .prepare("SELECT id, first_name, last_name, age FROM shop_user ORDER BY id ASC")?
            .query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    age: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        let products = conn
            .prepare(
                "SELECT id, name, price, seller_id, buyer_id FROM product ORDER BY id ASC",
            )?
            .query_map([], |row| {
                Ok(Product {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    price: get_decimal(row, 2)?,
                    seller_id: row.get(3)?,
                    buyer_id: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        let categories = conn
            .prepare("SELECT id, name FROM category ORDER BY id ASC")?
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        let category_products = conn
            .prepare(
                "SELECT product_id, category_id FROM category_product \
                 ORDER BY product_id ASC, category_id ASC",
            )?
            .query_map([], |row| {
                Ok(CategoryProduct {
                    product_id: row.get(0)?,
                    category_id: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(ProductShopSnapshot {
            users,
            products,
            categories,
            category_products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory_connection;
    use rust_decimal::Decimal;

    fn setup_repo() -> ProductShopRepository {
        let conn = open_in_memory_connection().unwrap();
        let repo = ProductShopRepository::from_connection(Arc::new(Mutex::new(conn)));
        repo.init_schema().unwrap();
        repo
    }

    fn user(id: i64, first: Option<&str>, last: &str) -> User {
        User {
            id,
            first_name: first.map(str::to_string),
            last_name: last.to_string(),
            age: None,
        }
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let repo = setup_repo();
        repo.batch_insert_users(&[user(1, Some("Chrissy"), "Falconbridge"), user(2, None, "Stewart")])
            .unwrap();
        repo.batch_insert_products(&[Product {
            id: 1,
            name: "Allopurinol".to_string(),
            price: Decimal::new(51895, 2),
            seller_id: 1,
            buyer_id: Some(2),
        }])
        .unwrap();
        repo.batch_insert_categories(&[Category {
            id: 1,
            name: "Drugs".to_string(),
        }])
        .unwrap();
        repo.batch_insert_category_products(&[CategoryProduct {
            product_id: 1,
            category_id: 1,
        }])
        .unwrap();

        let snapshot = repo.load_snapshot().unwrap();
        assert_eq!(snapshot.users[1].first_name, None);
        assert_eq!(snapshot.products[0].price, Decimal::new(51895, 2));
        assert_eq!(snapshot.products[0].buyer_id, Some(2));
        assert_eq!(snapshot.category_products.len(), 1);
        assert_eq!(repo.list_user_ids().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_buyer_equal_to_seller_is_rejected() {
        let repo = setup_repo();
        repo.batch_insert_users(&[user(1, None, "Solo")]).unwrap();
        let result = repo.batch_insert_products(&[Product {
            id: 1,
            name: "Self deal".to_string(),
            price: Decimal::ONE,
            seller_id: 1,
            buyer_id: Some(1),
        }]);
        assert!(matches!(
            result,
            Err(RepositoryError::CheckConstraintViolation(_))
        ));
    }
}
