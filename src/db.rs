// ==========================================
// 经销商/商城 ETL - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为（外键每个连接单独开启）
// - 每次运行重建两套 schema
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 汽车经销商库 schema
pub const CAR_DEALER_SCHEMA_SQL: &str = include_str!("../schema/car_dealer.sql");

/// 商品商城库 schema
pub const PRODUCT_SHOP_SCHEMA_SQL: &str = include_str!("../schema/product_shop.sql");

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 打开内存库（测试用）
pub fn open_in_memory_connection() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 重建汽车经销商库表结构
pub fn init_car_dealer_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CAR_DEALER_SCHEMA_SQL)
}

/// 重建商品商城库表结构
pub fn init_product_shop_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(PRODUCT_SHOP_SCHEMA_SQL)
}
