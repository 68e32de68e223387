use super::queries::fetch_roll;
use crate::domain::roll::ensure_removal_order;
use crate::domain::{NewRoll, Roll, RollUpdate};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

// ==========================================
// RollRepository - 卷材仓储
// ==========================================
// 所有写操作在单个事务内完成；事务未提交即被丢弃时自动回滚
pub struct RollRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RollRepository {
    /// 从已有连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    pub(super) fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 入库登记
    ///
    /// # 参数
    /// - `new_roll`: 长度、重量（必须 > 0），可选入库日期（默认当天）
    ///
    /// # 返回
    /// - `Ok(Roll)`: 新记录（id 由存储分配，date_removed = None）
    /// - `Err(FieldValueError)`: 长度或重量非正，存储不变
    pub fn create(&self, new_roll: &NewRoll) -> RepositoryResult<Roll> {
        new_roll.validate()?;
        let date_added = new_roll.date_added.unwrap_or_else(today);

        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT INTO rolls (length, weight, date_added, date_removed)
            VALUES (?1, ?2, ?3, NULL)
            "#,
            params![new_roll.length, new_roll.weight, date_added],
        )?;
        let id = tx.last_insert_rowid();

        let roll = fetch_roll(&tx, id)?.ok_or_else(|| {
            RepositoryError::InternalError(format!("新插入的卷材读取失败: id={}", id))
        })?;

        tx.commit()?;
        info!(roll_id = roll.id, length = roll.length, weight = roll.weight, "卷材入库");
        Ok(roll)
    }

    /// 部分更新
    ///
    /// 字段映射见 `RollUpdate::apply_to`：0 / None 视为未提供。
    ///
    /// # 返回
    /// - `Ok(Roll)`: 更新后的记录（无字段生效时原样返回）
    /// - `Err(NotFound)`: id 不存在
    /// - `Err(FieldValueError)`: 字段值违反约束，记录不变
    pub fn update(&self, id: i64, update: &RollUpdate) -> RepositoryResult<Roll> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut roll = fetch_roll(&tx, id)?.ok_or_else(|| RepositoryError::not_found("Roll", id))?;

        if !update.apply_to(&mut roll)? {
            debug!(roll_id = id, "更新请求无有效字段, 跳过写入");
            return Ok(roll);
        }

        tx.execute(
            r#"
            UPDATE rolls
            SET length = ?2, weight = ?3, date_removed = ?4
            WHERE id = ?1
            "#,
            params![roll.id, roll.length, roll.weight, roll.date_removed],
        )?;

        tx.commit()?;
        info!(roll_id = id, "卷材信息已更新");
        Ok(roll)
    }

    /// 软删除（出库）：写入当天为出库日期，记录仍可查询
    ///
    /// 已出库的记录原样返回，出库日期只写一次。
    pub fn soft_delete(&self, id: i64) -> RepositoryResult<Roll> {
        self.soft_delete_on(id, today())
    }

    /// 以指定日期软删除（补录出库）
    pub fn soft_delete_on(&self, id: i64, removed_on: NaiveDate) -> RepositoryResult<Roll> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut roll = fetch_roll(&tx, id)?.ok_or_else(|| RepositoryError::not_found("Roll", id))?;

        if let Some(existing) = roll.date_removed {
            debug!(roll_id = id, date_removed = %existing, "卷材已出库, 保留原出库日期");
            return Ok(roll);
        }

        ensure_removal_order(roll.date_added, removed_on)?;

        tx.execute(
            "UPDATE rolls SET date_removed = ?2 WHERE id = ?1",
            params![id, removed_on],
        )?;
        tx.commit()?;

        roll.date_removed = Some(removed_on);
        info!(roll_id = id, date_removed = %removed_on, "卷材出库(软删除)");
        Ok(roll)
    }

    /// 硬删除：从存储中物理删除
    ///
    /// # 返回
    /// - `Ok(Roll)`: 删除前的记录
    /// - `Err(NotFound)`: id 不存在
    pub fn hard_delete(&self, id: i64) -> RepositoryResult<Roll> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let roll = fetch_roll(&tx, id)?.ok_or_else(|| RepositoryError::not_found("Roll", id))?;

        let affected = tx.execute("DELETE FROM rolls WHERE id = ?1", params![id])?;
        if affected != 1 {
            return Err(RepositoryError::DatabaseTransactionError(format!(
                "删除卷材影响行数异常: id={}, affected={}",
                id, affected
            )));
        }
        tx.commit()?;

        info!(roll_id = id, "卷材已物理删除");
        Ok(roll)
    }
}

/// 当天（本地时区）
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
