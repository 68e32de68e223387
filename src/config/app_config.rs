// ==========================================
// 卷材库存服务 - 运行配置
// ==========================================
// 来源: 进程环境变量（启动时先加载 .env）
// ==========================================

use std::path::PathBuf;

/// 环境变量名
pub mod env_keys {
    /// SQLite 数据库文件路径
    pub const DB_PATH: &str = "ROLL_STOCK_DB_PATH";
    /// 兼容: DATABASE_URL（支持 sqlite:// 前缀）
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// 日志文件（可选）
    pub const LOG_FILE: &str = "LOG_FILE";
    /// 日志过滤级别
    pub const LOG_LEVEL: &str = "ROLL_STOCK_LOG";
    /// 兼容: RUST_LOG
    pub const RUST_LOG: &str = "RUST_LOG";
    /// 日志格式: text / json
    pub const LOG_FORMAT: &str = "ROLL_STOCK_LOG_FORMAT";
}

/// 默认日志级别
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// 默认数据库文件名
pub const DEFAULT_DB_FILE: &str = "roll_stock.db";

/// 日志输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// EnvFilter 指令，例如 `info` 或 `roll_stock=debug`
    pub level: String,
    pub format: LogFormat,
    /// 同时写入的日志文件
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Text,
            file: None,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 显式配置的数据库路径；未配置时由 `resolve_db_path` 退回默认位置
    pub db_path: Option<String>,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 从进程环境读取配置
    ///
    /// | 变量                    | 默认值                                |
    /// |-------------------------|---------------------------------------|
    /// | `ROLL_STOCK_DB_PATH`    | `DATABASE_URL`，再退回用户数据目录     |
    /// | `LOG_FILE`              | 不写文件                               |
    /// | `ROLL_STOCK_LOG`        | `RUST_LOG`，再退回 `info`              |
    /// | `ROLL_STOCK_LOG_FORMAT` | `text`                                |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置（测试时无需修改进程环境）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db_path = get(env_keys::DB_PATH)
            .or_else(|| get(env_keys::DATABASE_URL).map(|url| strip_sqlite_scheme(&url)));

        let logging = LoggingConfig {
            level: get(env_keys::LOG_LEVEL)
                .or_else(|| get(env_keys::RUST_LOG))
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            format: get(env_keys::LOG_FORMAT)
                .map(|s| LogFormat::parse(&s))
                .unwrap_or_default(),
            file: get(env_keys::LOG_FILE).map(PathBuf::from),
        };

        Self { db_path, logging }
    }

    /// 覆盖数据库路径（命令行参数优先）
    pub fn with_db_path(mut self, db_path: Option<String>) -> Self {
        if let Some(path) = db_path.filter(|p| !p.trim().is_empty()) {
            self.db_path = Some(path);
        }
        self
    }

    /// 最终使用的数据库路径
    ///
    /// 只有未显式配置时才访问（并创建）用户数据目录。
    pub fn resolve_db_path(&self) -> String {
        self.db_path.clone().unwrap_or_else(default_db_path)
    }
}

/// `sqlite:///var/x.db` / `sqlite://x.db` / `sqlite:x.db` → 文件路径
fn strip_sqlite_scheme(url: &str) -> String {
    for prefix in ["sqlite://", "sqlite:"] {
        if let Some(rest) = url.strip_prefix(prefix) {
            return rest.to_string();
        }
    }
    url.to_string()
}

/// 默认数据库路径: 用户数据目录下的 roll-stock/roll_stock.db
pub fn default_db_path() -> String {
    let mut path = PathBuf::from(".").join(DEFAULT_DB_FILE);

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("roll-stock");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join(DEFAULT_DB_FILE);
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_db_path_wins() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (env_keys::DB_PATH, "/tmp/a.db"),
            (env_keys::DATABASE_URL, "sqlite:///tmp/b.db"),
        ]));
        assert_eq!(config.db_path.as_deref(), Some("/tmp/a.db"));
        assert_eq!(config.resolve_db_path(), "/tmp/a.db");
    }

    #[test]
    fn test_database_url_scheme_stripped() {
        let config = AppConfig::from_lookup(lookup_from(&[(env_keys::DATABASE_URL, "sqlite:///tmp/b.db")]));
        assert_eq!(config.db_path.as_deref(), Some("/tmp/b.db"));

        let config = AppConfig::from_lookup(lookup_from(&[(env_keys::DATABASE_URL, "sqlite:rolls.db")]));
        assert_eq!(config.db_path.as_deref(), Some("rolls.db"));
    }

    #[test]
    fn test_logging_defaults_and_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[(env_keys::DB_PATH, "x.db")]));
        assert_eq!(config.logging, LoggingConfig::default());

        let config = AppConfig::from_lookup(lookup_from(&[
            (env_keys::DB_PATH, "x.db"),
            (env_keys::RUST_LOG, "warn"),
            (env_keys::LOG_FORMAT, "JSON"),
            (env_keys::LOG_FILE, "/tmp/roll.log"),
        ]));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/roll.log")));
    }

    #[test]
    fn test_default_db_path_deferred_until_resolved() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.db_path, None);

        let config = config.with_db_path(Some("override.db".to_string()));
        assert_eq!(config.resolve_db_path(), "override.db");

        let config = AppConfig::from_lookup(lookup_from(&[])).with_db_path(Some("  ".to_string()));
        assert_eq!(config.db_path, None);
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (env_keys::DB_PATH, "   "),
            (env_keys::DATABASE_URL, "data.db"),
            (env_keys::LOG_LEVEL, ""),
        ]))
        .with_db_path(Some("cli.db".to_string()));

        assert_eq!(config.db_path.as_deref(), Some("cli.db"));
        assert_eq!(config.resolve_db_path(), "cli.db");
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    }
}
