//! 命令行定义（clap）

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use roll_stock::{NewRoll, RollFilter, RollUpdate};

#[derive(Parser)]
#[command(name = "roll-stock")]
#[command(version)]
#[command(about = "卷材库存服务: 入库、查询、出库与统计")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite 数据库文件（优先于 ROLL_STOCK_DB_PATH / DATABASE_URL）
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// 美化 JSON 输出
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 卷材入库
    Create {
        #[arg(long, allow_negative_numbers = true)]
        length: f64,

        #[arg(long, allow_negative_numbers = true)]
        weight: f64,

        /// 入库日期 (YYYY-MM-DD)，默认当天
        #[arg(long)]
        date_added: Option<NaiveDate>,
    },

    /// 条件查询卷材列表
    List(ListArgs),

    /// 查询单个卷材
    Get { id: i64 },

    /// 部分更新（0 视为未提供）
    Update {
        id: i64,

        #[arg(long, allow_negative_numbers = true)]
        length: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        weight: Option<f64>,

        /// 出库日期 (YYYY-MM-DD)
        #[arg(long)]
        date_removed: Option<NaiveDate>,
    },

    /// 出库：写入当天为出库日期，记录保留
    SoftDelete { id: i64 },

    /// 物理删除记录
    HardDelete { id: i64 },

    /// 入库日期区间统计（闭区间）
    Stats {
        #[arg(long)]
        start: NaiveDate,

        #[arg(long)]
        end: NaiveDate,
    },
}

/// 列表过滤参数；区间参数需成对提供才生效
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(long)]
    pub id: Option<i64>,
    #[arg(long)]
    pub weight_min: Option<f64>,
    #[arg(long)]
    pub weight_max: Option<f64>,
    #[arg(long)]
    pub length_min: Option<f64>,
    #[arg(long)]
    pub length_max: Option<f64>,
    #[arg(long)]
    pub date_added_start: Option<NaiveDate>,
    #[arg(long)]
    pub date_added_end: Option<NaiveDate>,
    #[arg(long)]
    pub date_removed_start: Option<NaiveDate>,
    #[arg(long)]
    pub date_removed_end: Option<NaiveDate>,
}

impl From<ListArgs> for RollFilter {
    fn from(args: ListArgs) -> Self {
        RollFilter {
            id: args.id,
            weight_min: args.weight_min,
            weight_max: args.weight_max,
            length_min: args.length_min,
            length_max: args.length_max,
            date_added_start: args.date_added_start,
            date_added_end: args.date_added_end,
            date_removed_start: args.date_removed_start,
            date_removed_end: args.date_removed_end,
        }
    }
}

pub fn new_roll(length: f64, weight: f64, date_added: Option<NaiveDate>) -> NewRoll {
    NewRoll {
        length,
        weight,
        date_added,
    }
}

pub fn roll_update(length: Option<f64>, weight: Option<f64>, date_removed: Option<NaiveDate>) -> RollUpdate {
    RollUpdate {
        length,
        weight,
        date_removed,
    }
}
