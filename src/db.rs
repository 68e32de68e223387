// ==========================================
// 卷材库存服务 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 启动时幂等建表（不是迁移，只保证表存在）
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// rolls 表结构
///
/// 说明：
/// - AUTOINCREMENT 保证 id 在表的整个生命周期内不复用（硬删除后也不会复用）
/// - 日期统一以 `YYYY-MM-DD` 文本存储，字典序即时间序
pub const ROLLS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS rolls (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    length REAL NOT NULL CHECK (length > 0),
    weight REAL NOT NULL CHECK (weight > 0),
    date_added TEXT NOT NULL,
    date_removed TEXT NULL CHECK (date_removed IS NULL OR date_removed >= date_added)
);
CREATE INDEX IF NOT EXISTS idx_rolls_date_added ON rolls (date_added);
"#;

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

/// 打开内存数据库（测试 / 临时运行）
pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_sqlite_connection(&conn)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// 确保 rolls 表存在（幂等）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(ROLLS_SCHEMA)
}
