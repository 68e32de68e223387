// ==========================================
// 卷材库存服务 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 卷材（布料/纸卷等）入库、出库登记与区间统计
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 统计规则
pub mod engine;

// 配置层 - 运行配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组件装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{NewRoll, Roll, RollFilter, RollStatistics, RollUpdate};

// 仓储
pub use repository::{ErrorKind, RepositoryError, RollRepository, RollStatsRepository};

// 引擎
pub use engine::StatisticsAggregator;

// API
pub use api::{ApiError, RollApi};

// 应用
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "卷材库存服务";
