// ==========================================
// 卷材库存服务 - 命令行入口
// ==========================================
// 职责: 解析命令 → 调用 RollApi → 以 JSON 输出结果
// 失败时输出 ErrorResponse 并以非零状态退出
// ==========================================

mod cli;

use clap::Parser;
use serde::Serialize;

use cli::{Cli, Commands};
use roll_stock::api::{ApiError, ApiResult, RollApi};
use roll_stock::config::AppConfig;
use roll_stock::{logging, AppState};

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::from_env().with_db_path(cli.db.clone());
    if let Err(e) = logging::init(&config.logging) {
        eprintln!("日志系统初始化失败: {}", e);
    }

    tracing::debug!("{} v{}", roll_stock::APP_NAME, roll_stock::VERSION);

    let state = match AppState::new(config.resolve_db_path()) {
        Ok(state) => state,
        Err(e) => exit_with_error(ApiError::from(e), cli.pretty),
    };

    let pretty = cli.pretty;
    let output = execute(&state.roll_api, cli.command, pretty);
    match output {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(e, pretty),
    }
}

fn execute(api: &RollApi, command: Commands, pretty: bool) -> ApiResult<String> {
    match command {
        Commands::Create {
            length,
            weight,
            date_added,
        } => render(&api.create_roll(cli::new_roll(length, weight, date_added))?, pretty),
        Commands::List(args) => render(&api.list_rolls(&args.into())?, pretty),
        Commands::Get { id } => render(&api.get_roll(id)?, pretty),
        Commands::Update {
            id,
            length,
            weight,
            date_removed,
        } => render(
            &api.update_roll(id, cli::roll_update(length, weight, date_removed))?,
            pretty,
        ),
        Commands::SoftDelete { id } => render(&api.soft_delete_roll(id)?, pretty),
        Commands::HardDelete { id } => render(&api.hard_delete_roll(id)?, pretty),
        Commands::Stats { start, end } => render(&api.get_statistics(start, end)?, pretty),
    }
}

fn render<T: Serialize>(value: &T, pretty: bool) -> ApiResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(|e| ApiError::InternalError(format!("结果序列化失败: {}", e)))
}

fn exit_with_error(err: ApiError, pretty: bool) -> ! {
    tracing::error!(code = err.code(), status = err.status_code(), "{}", err);

    let response = err.to_response();
    let body = render(&response, pretty).unwrap_or_else(|_| err.to_string());
    eprintln!("{}", body);

    let code = match err.status_code() {
        404 => 2,
        400 => 3,
        _ => 1,
    };
    std::process::exit(code);
}
