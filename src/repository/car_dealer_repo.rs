// ==========================================
// 经销商/商城 ETL - 汽车经销商数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有写入使用参数化 + 事务批量提交
// ==========================================

use crate::db::{init_car_dealer_schema, open_sqlite_connection};
use crate::domain::car_dealer::{
    Car, CarDealerSnapshot, Customer, Part, PartCar, Sale, Supplier,
};
use crate::repository::column::{decimal_to_sql, get_decimal, get_discount};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// CarDealerRepository - 汽车经销商仓储
// ==========================================
/// 汽车经销商仓储
/// 职责: supplier / part / car / part_car / customer / sale 六张表的写入与全量读取
pub struct CarDealerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CarDealerRepository {
    /// 创建新的 CarDealerRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
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
        init_car_dealer_schema(&conn)?;
        Ok(())
    }

    // ==========================================
    // 批量写入（每批一个事务）
    // ==========================================

    /// 批量插入供应商
    pub fn batch_insert_suppliers(&self, suppliers: &[Supplier]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO supplier (id, name, is_importer) VALUES (?1, ?2, ?3)")?;
            for s in suppliers {
                stmt.execute(params![s.id, s.name, s.is_importer])?;
            }
        }
        tx.commit()?;
        Ok(suppliers.len())
    }

    /// 批量插入零件
    pub fn batch_insert_parts(&self, parts: &[Part]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO part (id, name, price, quantity, supplier_id) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for p in parts {
                stmt.execute(params![
                    p.id,
                    p.name,
                    decimal_to_sql(&p.price),
                    p.quantity,
                    p.supplier_id
                ])?;
            }
        }
        tx.commit()?;
        Ok(parts.len())
    }

    /// 批量插入车辆
    pub fn batch_insert_cars(&self, cars: &[Car]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO car (id, make, model, travelled_distance) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for c in cars {
                stmt.execute(params![c.id, c.make, c.model, c.travelled_distance])?;
            }
        }
        tx.commit()?;
        Ok(cars.len())
    }

    /// 批量插入车辆零件关联
    pub fn batch_insert_part_cars(&self, part_cars: &[PartCar]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO part_car (car_id, part_id) VALUES (?1, ?2)")?;
            for pc in part_cars {
                stmt.execute(params![pc.car_id, pc.part_id])?;
            }
        }
        tx.commit()?;
        Ok(part_cars.len())
    }

    /// 批量插入客户
    pub fn batch_insert_customers(&self, customers: &[Customer]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO customer (id, name, birth_date, is_young_driver) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for c in customers {
                stmt.execute(params![c.id, c.name, c.birth_date, c.is_young_driver])?;
            }
        }
        tx.commit()?;
        Ok(customers.len())
    }

    /// 批量插入销售记录
    pub fn batch_insert_sales(&self, sales: &[Sale]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO sale (id, car_id, customer_id, discount) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for s in sales {
                stmt.execute(params![s.id, s.car_id, s.customer_id, s.discount.percent()])?;
            }
        }
        tx.commit()?;
        Ok(sales.len())
    }

    // ==========================================
    // id 列表（关系生成器的候选集合）
    // ==========================================

    pub fn list_supplier_ids(&self) -> RepositoryResult<Vec<i64>> {
        self.list_ids("supplier")
    }

    pub fn list_part_ids(&self) -> RepositoryResult<Vec<i64>> {
        self.list_ids("part")
    }

    pub fn list_car_ids(&self) -> RepositoryResult<Vec<i64>> {
        self.list_ids("car")
    }

    pub fn list_customer_ids(&self) -> RepositoryResult<Vec<i64>> {
        self.list_ids("customer")
    }

    fn list_ids(&self, table: &str) -> RepositoryResult<Vec<i64>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("SELECT id FROM {} ORDER BY id ASC", table))?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(ids)
    }

    // ==========================================
    // 全量快照
    // ==========================================

    /// 读取全部六张表（各集合按主键升序）
    pub fn load_snapshot(&self) -> RepositoryResult<CarDealerSnapshot> {
        let conn = self.get_conn()?;

        let suppliers = conn
            .prepare("SELECT id, name, is_importer FROM supplier ORDER BY id ASC")?
            .query_map([], |row| {
                Ok(Supplier {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    is_importer: row.get(2)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        let parts = conn
            .prepare(
                "SELECT id, name, price, quantity, supplier_id FROM part ORDER BY id ASC",
            )?
            .query_map([], |row| {
                Ok(Part {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    price: get_decimal(row, 2)?,
                    quantity: row.get(3)?,
                    supplier_id: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        let cars = conn
            .prepare("SELECT id, make, model, travelled_distance FROM car ORDER BY id ASC")?
            .query_map([], |row| {
                Ok(Car {
                    id: row.get(0)?,
                    make: row.get(1)?,
                    model: row.get(2)?,
                    travelled_distance: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        let part_cars = conn
            .prepare("SELECT car_id, part_id FROM part_car ORDER BY car_id ASC, part_id ASC")?
            .query_map([], |row| {
                Ok(PartCar {
                    car_id: row.get(0)?,
                    part_id: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        let customers = conn
            .prepare(
                "SELECT id, name, birth_date, is_young_driver FROM customer ORDER BY id ASC",
            )?
            .query_map([], |row| {
                Ok(Customer {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    birth_date: row.get(2)?,
                    is_young_driver: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        let sales = conn
            .prepare("SELECT id, car_id, customer_id, discount FROM sale ORDER BY id ASC")?
            .query_map([], |row| {
                Ok(Sale {
                    id: row.get(0)?,
                    car_id: row.get(1)?,
                    customer_id: row.get(2)?,
                    discount: get_discount(row, 3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(CarDealerSnapshot {
            suppliers,
            parts,
            cars,
            part_cars,
            customers,
            sales,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory_connection;
    use crate::domain::types::SaleDiscount;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn setup_repo() -> CarDealerRepository {
        let conn = open_in_memory_connection().unwrap();
        let repo = CarDealerRepository::from_connection(Arc::new(Mutex::new(conn)));
        repo.init_schema().unwrap();
        repo
    }

    fn seed_base(repo: &CarDealerRepository) {
        repo.batch_insert_suppliers(&[Supplier {
            id: 1,
            name: "3M Company".to_string(),
            is_importer: true,
        }])
        .unwrap();
        repo.batch_insert_parts(&[Part {
            id: 1,
            name: "Bonnet/hood".to_string(),
            price: Decimal::from_str("1001.345678901234").unwrap(),
            quantity: 10,
            supplier_id: 1,
        }])
        .unwrap();
        repo.batch_insert_cars(&[Car {
            id: 1,
            make: "Opel".to_string(),
            model: "Omega".to_string(),
            travelled_distance: 2_147_483_648,
        }])
        .unwrap();
        repo.batch_insert_customers(&[Customer {
            id: 1,
            name: "Emmitt Benally".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1993, 11, 20)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            is_young_driver: true,
        }])
        .unwrap();
    }

    #[test]
    fn test_snapshot_roundtrip_keeps_exact_values() {
        let repo = setup_repo();
        seed_base(&repo);
        repo.batch_insert_part_cars(&[PartCar { car_id: 1, part_id: 1 }])
            .unwrap();
        repo.batch_insert_sales(&[Sale {
            id: 1,
            car_id: 1,
            customer_id: 1,
            discount: SaleDiscount::P15,
        }])
        .unwrap();

        let snapshot = repo.load_snapshot().unwrap();
        assert_eq!(snapshot.parts[0].price.to_string(), "1001.345678901234");
        assert_eq!(snapshot.cars[0].travelled_distance, 2_147_483_648);
        assert_eq!(snapshot.customers[0].birth_date.to_string(), "1993-11-20 00:00:00");
        assert_eq!(snapshot.sales[0].discount, SaleDiscount::P15);
        assert_eq!(snapshot.part_cars, vec![PartCar { car_id: 1, part_id: 1 }]);
    }

    #[test]
    fn test_duplicate_part_car_is_rejected() {
        let repo = setup_repo();
        seed_base(&repo);
        let link = PartCar { car_id: 1, part_id: 1 };
        let result = repo.batch_insert_part_cars(&[link, link]);
        assert!(matches!(
            result,
            Err(RepositoryError::UniqueConstraintViolation(_))
        ));
        // 事务回滚，无残留
        assert!(repo.load_snapshot().unwrap().part_cars.is_empty());
    }

    #[test]
    fn test_part_with_unknown_supplier_is_rejected() {
        let repo = setup_repo();
        let result = repo.batch_insert_parts(&[Part {
            id: 1,
            name: "Orphan".to_string(),
            price: Decimal::ONE,
            quantity: 0,
            supplier_id: 42,
        }]);
        assert!(matches!(result, Err(RepositoryError::ForeignKeyViolation(_))));
    }

    #[test]
    fn test_list_ids_sorted() {
        let repo = setup_repo();
        repo.batch_insert_cars(&[
            Car {
                id: 2,
                make: "BMW".to_string(),
                model: "M5".to_string(),
                travelled_distance: 1,
            },
            Car {
                id: 1,
                make: "BMW".to_string(),
                model: "M3".to_string(),
                travelled_distance: 1,
            },
        ])
        .unwrap();
        assert_eq!(repo.list_car_ids().unwrap(), vec![1, 2]);
        assert!(repo.list_customer_ids().unwrap().is_empty());
    }
}
