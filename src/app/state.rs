// ==========================================
// 卷材库存服务 - 应用状态
// ==========================================
// 职责: 进程启动时构建一次的共享连接与 API 实例
// 说明: 不使用全局变量，由入口显式创建后注入调用方
// ==========================================

use std::sync::{Arc, Mutex};
use rusqlite::Connection;

use crate::api::RollApi;
use crate::db;
use crate::engine::StatisticsAggregator;
use crate::repository::{RepositoryResult, RollRepository, RollStatsRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径（内存库为 `:memory:`）
    pub db_path: String,

    /// 卷材API
    pub roll_api: Arc<RollApi>,

    /// 卷材仓储（供需要直接访问存储的调用方使用）
    pub roll_repo: Arc<RollRepository>,

    /// 统计聚合器
    pub aggregator: Arc<StatisticsAggregator>,
}

impl AppState {
    /// 打开数据库文件并初始化所有组件
    pub fn new(db_path: String) -> RepositoryResult<Self> {
        tracing::info!("初始化AppState, 数据库路径: {}", db_path);

        let conn = db::open_sqlite_connection(&db_path)?;
        db::init_schema(&conn)?;

        Ok(Self::from_connection(db_path, conn))
    }

    /// 使用内存数据库（测试 / 试运行）
    pub fn in_memory() -> RepositoryResult<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self::from_connection(":memory:".to_string(), conn))
    }

    fn from_connection(db_path: String, conn: Connection) -> Self {
        let conn = Arc::new(Mutex::new(conn));

        let roll_repo = Arc::new(RollRepository::new(conn.clone()));
        let stats_repo = Arc::new(RollStatsRepository::new(conn));
        let aggregator = Arc::new(StatisticsAggregator::new(stats_repo));

        let roll_api = Arc::new(RollApi::new(roll_repo.clone(), aggregator.clone()));

        Self {
            db_path,
            roll_api,
            roll_repo,
            aggregator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewRoll, RollFilter};

    #[test]
    fn test_in_memory_state_shares_one_store() {
        let state = AppState::in_memory().unwrap();
        assert_eq!(state.db_path, ":memory:");

        let roll = state.roll_api.create_roll(NewRoll::new(2.0, 1.0)).unwrap();
        assert_eq!(state.roll_repo.get(roll.id).unwrap(), roll);
        assert_eq!(state.roll_api.list_rolls(&RollFilter::default()).unwrap().len(), 1);

        let stats = state
            .aggregator
            .get_statistics(roll.date_added, roll.date_added)
            .unwrap();
        assert_eq!(stats.total_rolls, 1);
    }
}
