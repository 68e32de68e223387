// ==========================================
// 卷材库存服务 - 统计数据仓储
// ==========================================
// 职责: 按入库日期区间执行聚合 SQL
// - 标量聚合: COUNT / AVG / MAX / MIN
// - 按日分组: 每个入库日的卷数与总重
// 红线: 极值日期的判定不在这里做（见 engine::statistics）
// ==========================================

use crate::domain::{DailyTotal, RollAggregate};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sql_builder::{date_value, SqlQueryBuilder};
use chrono::NaiveDate;
use rusqlite::{params_from_iter, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// 区间内统计所需的原始数据（同一快照读取）
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub aggregate: RollAggregate,
    pub daily_totals: Vec<DailyTotal>,
}

pub struct RollStatsRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RollStatsRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取 [start_date, end_date]（闭区间）内的标量聚合与按日汇总
    ///
    /// 两条查询在同一个读事务中执行，结果对应同一时刻的存储状态。
    pub fn load_snapshot(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepositoryResult<StatsSnapshot> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let aggregate = query_aggregate(&tx, start_date, end_date)?;
        let daily_totals = query_daily_totals(&tx, start_date, end_date)?;

        tx.commit()?;
        Ok(StatsSnapshot {
            aggregate,
            daily_totals,
        })
    }

    /// 仅读取标量聚合
    pub fn aggregate(&self, start_date: NaiveDate, end_date: NaiveDate) -> RepositoryResult<RollAggregate> {
        let conn = self.get_conn()?;
        query_aggregate(&conn, start_date, end_date)
    }

    /// 仅读取按日汇总（按入库日期升序）
    pub fn daily_totals(&self, start_date: NaiveDate, end_date: NaiveDate) -> RepositoryResult<Vec<DailyTotal>> {
        let conn = self.get_conn()?;
        query_daily_totals(&conn, start_date, end_date)
    }
}

// ==========================================
// 辅助函数
// ==========================================

fn date_range_builder(select: &str, start_date: NaiveDate, end_date: NaiveDate) -> SqlQueryBuilder {
    SqlQueryBuilder::new(select)
        .where_clause("date_added >= ?", vec![date_value(start_date)])
        .where_clause("date_added <= ?", vec![date_value(end_date)])
}

fn query_aggregate(
    conn: &Connection,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> RepositoryResult<RollAggregate> {
    let (sql, values) = date_range_builder(
        r#"
        SELECT
            COUNT(id) AS total_rolls,
            AVG(length) AS average_length,
            AVG(weight) AS average_weight,
            MAX(length) AS max_length,
            MIN(length) AS min_length,
            MAX(weight) AS max_weight,
            MIN(weight) AS min_weight
        FROM rolls
        "#,
        start_date,
        end_date,
    )
    .build();

    let aggregate = conn.query_row(&sql, params_from_iter(values.iter()), |row| {
        Ok(RollAggregate {
            total_rolls: row.get(0)?,
            average_length: row.get(1)?,
            average_weight: row.get(2)?,
            max_length: row.get(3)?,
            min_length: row.get(4)?,
            max_weight: row.get(5)?,
            min_weight: row.get(6)?,
        })
    })?;

    Ok(aggregate)
}

fn query_daily_totals(
    conn: &Connection,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> RepositoryResult<Vec<DailyTotal>> {
    let (sql, values) = date_range_builder(
        r#"
        SELECT
            date_added,
            COUNT(id) AS daily_total_rolls,
            SUM(weight) AS daily_total_weight
        FROM rolls
        "#,
        start_date,
        end_date,
    )
    .group_by("date_added")
    .order_by("date_added ASC")
    .build();

    let mut stmt = conn.prepare(&sql)?;
    let totals = stmt
        .query_map(params_from_iter(values.iter()), |row| {
            Ok(DailyTotal {
                date_added: row.get(0)?,
                roll_count: row.get(1)?,
                total_weight: row.get(2)?,
            })
        })?
        .collect::<SqliteResult<Vec<_>>>()?;

    Ok(totals)
}
