// ==========================================
// 卷材库存服务 - 查询过滤条件
// ==========================================
// 规则:
// - 各条件之间为 AND 关系，未提供的条件不做约束
// - 区间条件必须同时提供上下界才生效（只给一端 → 忽略该维度）
// - 区间为闭区间 [min, max]
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 卷材查询过滤条件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollFilter {
    pub id: Option<i64>,
    pub weight_min: Option<f64>,
    pub weight_max: Option<f64>,
    pub length_min: Option<f64>,
    pub length_max: Option<f64>,
    pub date_added_start: Option<NaiveDate>,
    pub date_added_end: Option<NaiveDate>,
    /// 与 date_removed_end 同时提供时: 匹配"仍在库"或"出库日期落在区间内"
    pub date_removed_start: Option<NaiveDate>,
    pub date_removed_end: Option<NaiveDate>,
}

impl RollFilter {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, min: f64, max: f64) -> Self {
        self.weight_min = Some(min);
        self.weight_max = Some(max);
        self
    }

    pub fn with_length(mut self, min: f64, max: f64) -> Self {
        self.length_min = Some(min);
        self.length_max = Some(max);
        self
    }

    pub fn with_date_added(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_added_start = Some(start);
        self.date_added_end = Some(end);
        self
    }

    pub fn with_date_removed(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_removed_start = Some(start);
        self.date_removed_end = Some(end);
        self
    }

    /// 生效的 id 条件；0 与未提供等同
    pub fn effective_id(&self) -> Option<i64> {
        self.id.filter(|&id| id != 0)
    }

    pub fn weight_range(&self) -> Option<(f64, f64)> {
        both(self.weight_min, self.weight_max)
    }

    pub fn length_range(&self) -> Option<(f64, f64)> {
        both(self.length_min, self.length_max)
    }

    pub fn date_added_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        both(self.date_added_start, self.date_added_end)
    }

    pub fn date_removed_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        both(self.date_removed_start, self.date_removed_end)
    }

    /// 是否没有任何生效的条件
    pub fn is_unconstrained(&self) -> bool {
        self.effective_id().is_none()
            && self.weight_range().is_none()
            && self.length_range().is_none()
            && self.date_added_range().is_none()
            && self.date_removed_range().is_none()
    }
}

fn both<T>(lower: Option<T>, upper: Option<T>) -> Option<(T, T)> {
    match (lower, upper) {
        (Some(l), Some(u)) => Some((l, u)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bound_is_ignored() {
        let filter = RollFilter {
            weight_min: Some(3.0),
            length_max: Some(7.0),
            date_removed_start: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };

        assert_eq!(filter.weight_range(), None);
        assert_eq!(filter.length_range(), None);
        assert_eq!(filter.date_removed_range(), None);
        assert!(filter.is_unconstrained());
    }

    #[test]
    fn test_both_bounds_apply() {
        let filter = RollFilter::default().with_weight(1.0, 2.0);
        assert_eq!(filter.weight_range(), Some((1.0, 2.0)));
        assert!(!filter.is_unconstrained());
        assert!(!RollFilter::by_id(5).is_unconstrained());
    }

    #[test]
    fn test_zero_id_is_ignored() {
        let filter = RollFilter::by_id(0);
        assert_eq!(filter.effective_id(), None);
        assert!(filter.is_unconstrained());
        assert_eq!(RollFilter::by_id(-3).effective_id(), Some(-3));
    }
}
