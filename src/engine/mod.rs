// ==========================================
// 卷材库存服务 - 引擎层
// ==========================================
// 职责: 实现统计规则,不拼 SQL
// ==========================================

pub mod statistics;

// 重导出核心引擎
pub use statistics::{find_extremal_days, StatisticsAggregator};
