use super::core::RollRepository;
use crate::domain::{Roll, RollFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sql_builder::{date_value, SqlQueryBuilder};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result as SqliteResult, Row};
use tracing::debug;

const SELECT_ROLLS: &str = "SELECT id, length, weight, date_added, date_removed FROM rolls";

impl RollRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 按 id 查询
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Roll>> {
        let conn = self.get_conn()?;
        fetch_roll(&conn, id)
    }

    /// 按 id 查询，不存在时返回 NotFound
    pub fn get(&self, id: i64) -> RepositoryResult<Roll> {
        self.find_by_id(id)?
            .ok_or_else(|| RepositoryError::not_found("Roll", id))
    }

    /// 条件查询（按 id 升序）
    ///
    /// 所有生效条件为 AND 关系；区间条件需同时给出上下界。
    /// 出库日期区间: 仍在库（date_removed 为空）或出库日期落在区间内的记录都匹配。
    pub fn query(&self, filter: &RollFilter) -> RepositoryResult<Vec<Roll>> {
        let mut builder = SqlQueryBuilder::new(SELECT_ROLLS);

        if let Some(id) = filter.effective_id() {
            builder = builder.where_clause("id = ?", vec![id.into()]);
        }
        builder = builder
            .between_if("weight", filter.weight_range())
            .between_if("length", filter.length_range())
            .between_dates_if("date_added", filter.date_added_range());

        if let Some((start, end)) = filter.date_removed_range() {
            builder = builder.where_clause(
                "(date_removed IS NULL OR date_removed BETWEEN ? AND ?)",
                vec![date_value(start), date_value(end)],
            );
        }

        let (sql, values) = builder.order_by("id ASC").build();
        debug!(sql = %sql, params = values.len(), "执行卷材条件查询");

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rolls = stmt
            .query_map(params_from_iter(values.iter()), map_roll_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rolls)
    }

    /// 查询全部卷材
    pub fn list_all(&self) -> RepositoryResult<Vec<Roll>> {
        self.query(&RollFilter::default())
    }

    /// 记录总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n = conn.query_row("SELECT COUNT(*) FROM rolls", [], |row| row.get(0))?;
        Ok(n)
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 在给定连接（或事务）上按 id 读取
pub(super) fn fetch_roll(conn: &Connection, id: i64) -> RepositoryResult<Option<Roll>> {
    let roll = conn
        .query_row(
            &format!("{} WHERE id = ?1", SELECT_ROLLS),
            params![id],
            map_roll_row,
        )
        .optional()?;
    Ok(roll)
}

fn map_roll_row(row: &Row) -> SqliteResult<Roll> {
    Ok(Roll {
        id: row.get(0)?,
        length: row.get(1)?,
        weight: row.get(2)?,
        date_added: row.get(3)?,
        date_removed: row.get(4)?,
    })
}
