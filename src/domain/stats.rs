// ==========================================
// 卷材库存服务 - 统计领域模型
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RollStatistics - 区间统计结果
// ==========================================
// 对外结构: 无记录时 total_rolls = 0，其余字段全部为 null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollStatistics {
    pub total_rolls: i64,
    pub average_length: Option<f64>,
    pub average_weight: Option<f64>,
    pub max_length: Option<f64>,
    pub min_length: Option<f64>,
    pub max_weight: Option<f64>,
    pub min_weight: Option<f64>,

    // ===== 按入库日分组的极值日期 =====
    pub min_count_date: Option<NaiveDate>,  // 入库卷数最少的日期
    pub max_count_date: Option<NaiveDate>,  // 入库卷数最多的日期
    pub min_weight_date: Option<NaiveDate>, // 入库总重最小的日期
    pub max_weight_date: Option<NaiveDate>, // 入库总重最大的日期
}

/// 不分组的标量聚合（COUNT/AVG/MAX/MIN）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollAggregate {
    pub total_rolls: i64,
    pub average_length: Option<f64>,
    pub average_weight: Option<f64>,
    pub max_length: Option<f64>,
    pub min_length: Option<f64>,
    pub max_weight: Option<f64>,
    pub min_weight: Option<f64>,
}

/// 单个入库日的汇总（daily group）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date_added: NaiveDate,
    pub roll_count: i64,
    pub total_weight: f64,
}

/// 分组极值扫描结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtremalDays {
    pub min_count_date: Option<NaiveDate>,
    pub max_count_date: Option<NaiveDate>,
    pub min_weight_date: Option<NaiveDate>,
    pub max_weight_date: Option<NaiveDate>,
}

impl RollStatistics {
    pub fn from_parts(aggregate: RollAggregate, extremal: ExtremalDays) -> Self {
        Self {
            total_rolls: aggregate.total_rolls,
            average_length: aggregate.average_length,
            average_weight: aggregate.average_weight,
            max_length: aggregate.max_length,
            min_length: aggregate.min_length,
            max_weight: aggregate.max_weight,
            min_weight: aggregate.min_weight,
            min_count_date: extremal.min_count_date,
            max_count_date: extremal.max_count_date,
            min_weight_date: extremal.min_weight_date,
            max_weight_date: extremal.max_weight_date,
        }
    }
}
