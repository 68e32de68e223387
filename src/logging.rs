// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// - 控制台输出到 stderr（stdout 留给命令结果）
// - 可选同时写入日志文件
// ==========================================

use crate::config::{LogFormat, LoggingConfig};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// 初始化日志系统
///
/// 只应在进程启动时调用一次；重复调用返回错误。
///
/// # 示例
/// ```no_run
/// use roll_stock::config::LoggingConfig;
/// use roll_stock::logging;
/// logging::init(&LoggingConfig::default()).unwrap();
/// ```
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);
    layers.push(match config.format {
        LogFormat::Json => console.json().with_filter(build_filter(&config.level)).boxed(),
        LogFormat::Text => console.with_filter(build_filter(&config.level)).boxed(),
    });

    if let Some(path) = &config.file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let file_layer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true);
        layers.push(match config.format {
            LogFormat::Json => file_layer.json().with_filter(build_filter(&config.level)).boxed(),
            LogFormat::Text => file_layer.with_filter(build_filter(&config.level)).boxed(),
        });
    }

    tracing_subscriber::registry().with(layers).try_init()?;
    Ok(())
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// 解析过滤指令，非法时退回 info
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

