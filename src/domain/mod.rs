// ==========================================
// 卷材库存服务 - 领域模型层
// ==========================================
// 职责: 定义领域实体、查询条件、统计结构与校验规则
// 红线: 不含数据访问逻辑
// ==========================================

pub mod filter;
pub mod roll;
pub mod stats;

// 重导出核心类型
pub use filter::RollFilter;
pub use roll::{NewRoll, Roll, RollRuleViolation, RollUpdate};
pub use stats::{DailyTotal, ExtremalDays, RollAggregate, RollStatistics};
