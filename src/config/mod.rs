// ==========================================
// 卷材库存服务 - 配置层
// ==========================================
// 职责: 运行配置加载（数据库路径、日志）
// 存储: 环境变量 / .env
// ==========================================

pub mod app_config;

// 重导出核心配置
pub use app_config::{env_keys, AppConfig, LogFormat, LoggingConfig};
