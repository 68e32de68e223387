// ==========================================
// 卷材库存服务 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod roll_repo;
pub mod sql_builder;
pub mod stats_repo;

// 重导出核心仓储
pub use error::{ErrorKind, RepositoryError, RepositoryResult};
pub use roll_repo::RollRepository;
pub use stats_repo::{RollStatsRepository, StatsSnapshot};
