// ==========================================
// 卷材库存服务 - 卷材领域模型
// ==========================================
// 对齐: rolls 表
// 红线: length > 0, weight > 0, date_removed >= date_added
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==========================================
// Roll - 卷材
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roll {
    pub id: i64,                          // 主键（由存储分配，不可变）
    pub length: f64,                      // 长度
    pub weight: f64,                      // 重量
    pub date_added: NaiveDate,            // 入库日期（不可变）
    pub date_removed: Option<NaiveDate>,  // 出库日期 (null表示在库)
}

impl Roll {
    /// 是否仍在库
    pub fn is_active(&self) -> bool {
        self.date_removed.is_none()
    }
}

// ==========================================
// NewRoll - 入库请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRoll {
    pub length: f64,
    pub weight: f64,
    /// 未提供时取当天
    #[serde(default)]
    pub date_added: Option<NaiveDate>,
}

impl NewRoll {
    pub fn new(length: f64, weight: f64) -> Self {
        Self {
            length,
            weight,
            date_added: None,
        }
    }

    /// 指定入库日期（补录历史数据）
    pub fn added_on(mut self, date: NaiveDate) -> Self {
        self.date_added = Some(date);
        self
    }

    /// 校验入库参数
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(RollRuleViolation): 长度或重量非正
    pub fn validate(&self) -> Result<(), RollRuleViolation> {
        ensure_positive("length", self.length)?;
        ensure_positive("weight", self.weight)?;
        Ok(())
    }
}

// ==========================================
// RollUpdate - 部分更新请求
// ==========================================
// 数值字段为 0 视同"未提供"，不会写入
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollUpdate {
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub date_removed: Option<NaiveDate>,
}

impl RollUpdate {
    pub fn is_empty(&self) -> bool {
        self.length.is_none() && self.weight.is_none() && self.date_removed.is_none()
    }

    /// 将更新应用到已有记录（逐字段显式映射）
    ///
    /// 规则:
    /// - None 或 0.0 → 跳过（falsy skip）
    /// - 负数 / NaN / 无穷 → 拒绝
    /// - date_removed 早于 date_added → 拒绝
    /// - 已出库记录的 date_removed 只能原值提交，改动 → 拒绝
    ///
    /// # 返回
    /// - Ok(true): 至少一个字段被修改
    /// - Ok(false): 无字段生效
    pub fn apply_to(&self, roll: &mut Roll) -> Result<bool, RollRuleViolation> {
        let length = supplied_measure("length", self.length)?;
        let weight = supplied_measure("weight", self.weight)?;

        if let Some(date_removed) = self.date_removed {
            ensure_removal_unset(roll, date_removed)?;
            ensure_removal_order(roll.date_added, date_removed)?;
        }

        let mut changed = false;
        if let Some(v) = length {
            roll.length = v;
            changed = true;
        }
        if let Some(v) = weight {
            roll.weight = v;
            changed = true;
        }
        if let Some(d) = self.date_removed.filter(|d| roll.date_removed != Some(*d)) {
            roll.date_removed = Some(d);
            changed = true;
        }
        Ok(changed)
    }
}

// ==========================================
// RollRuleViolation - 领域规则违反
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {message}")]
pub struct RollRuleViolation {
    pub field: &'static str,
    pub message: String,
}

// ==========================================
// 辅助函数
// ==========================================

fn ensure_positive(field: &'static str, value: f64) -> Result<(), RollRuleViolation> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RollRuleViolation {
            field,
            message: format!("必须为正数, 实际值={}", value),
        })
    }
}

/// 解析更新请求里的数值字段: 0 视为未提供
fn supplied_measure(
    field: &'static str,
    value: Option<f64>,
) -> Result<Option<f64>, RollRuleViolation> {
    match value {
        None => Ok(None),
        Some(v) if v == 0.0 => Ok(None),
        Some(v) => ensure_positive(field, v).map(|_| Some(v)),
    }
}

/// 出库日期一经写入不再变更
fn ensure_removal_unset(roll: &Roll, date_removed: NaiveDate) -> Result<(), RollRuleViolation> {
    match roll.date_removed {
        Some(existing) if existing != date_removed => Err(RollRuleViolation {
            field: "date_removed",
            message: format!("卷材已于{}出库, 不能改为{}", existing, date_removed),
        }),
        _ => Ok(()),
    }
}

/// 出库日期不得早于入库日期
pub fn ensure_removal_order(
    date_added: NaiveDate,
    date_removed: NaiveDate,
) -> Result<(), RollRuleViolation> {
    if date_removed < date_added {
        return Err(RollRuleViolation {
            field: "date_removed",
            message: format!(
                "出库日期{}早于入库日期{}",
                date_removed, date_added
            ),
        });
    }
    Ok(())
}
