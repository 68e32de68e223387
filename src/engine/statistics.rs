// ==========================================
// 卷材库存服务 - 统计聚合引擎
// ==========================================
// 职责: 在入库日期区间内汇总卷材统计
// 输入: 仓储层的标量聚合 + 按日汇总
// 输出: RollStatistics
// 红线: Engine 不拼 SQL
// ==========================================
// 并列规则: 多个入库日取值相同时，取最早的日期
// ==========================================

use crate::domain::{DailyTotal, ExtremalDays, RollStatistics};
use crate::repository::{RepositoryResult, RollStatsRepository};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

// ==========================================
// StatisticsAggregator - 统计聚合器
// ==========================================
pub struct StatisticsAggregator {
    stats_repo: Arc<RollStatsRepository>,
}

impl StatisticsAggregator {
    pub fn new(stats_repo: Arc<RollStatsRepository>) -> Self {
        Self { stats_repo }
    }

    /// 计算 [start_date, end_date]（闭区间，按入库日期）内的统计
    ///
    /// 每次调用都基于当前存储状态重新计算，无缓存。
    /// 区间内无记录时 total_rolls = 0，其余字段均为 None。
    pub fn get_statistics(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepositoryResult<RollStatistics> {
        let snapshot = self.stats_repo.load_snapshot(start_date, end_date)?;
        let extremal = find_extremal_days(&snapshot.daily_totals);

        debug!(
            start = %start_date,
            end = %end_date,
            total_rolls = snapshot.aggregate.total_rolls,
            days = snapshot.daily_totals.len(),
            "统计计算完成"
        );

        Ok(RollStatistics::from_parts(snapshot.aggregate, extremal))
    }
}

// ==========================================
// 极值日扫描（纯函数）
// ==========================================

/// 在按日汇总中找出卷数/总重的最小、最大日期
///
/// 四个极值独立扫描；取值相同的多个日期中取最早的一个，与输入顺序无关。
pub fn find_extremal_days(days: &[DailyTotal]) -> ExtremalDays {
    let by_count = |a: &DailyTotal, b: &DailyTotal| a.roll_count.cmp(&b.roll_count);
    let by_weight = |a: &DailyTotal, b: &DailyTotal| {
        a.total_weight
            .partial_cmp(&b.total_weight)
            .unwrap_or(Ordering::Equal)
    };

    ExtremalDays {
        min_count_date: pick_day(days, |a, b| by_count(a, b)),
        max_count_date: pick_day(days, |a, b| by_count(b, a)),
        min_weight_date: pick_day(days, |a, b| by_weight(a, b)),
        max_weight_date: pick_day(days, |a, b| by_weight(b, a)),
    }
}

/// 取排序最靠前的日期；`rank` 相等时比较日期
fn pick_day<F>(days: &[DailyTotal], rank: F) -> Option<NaiveDate>
where
    F: Fn(&DailyTotal, &DailyTotal) -> Ordering,
{
    days.iter()
        .min_by(|a, b| rank(a, b).then_with(|| a.date_added.cmp(&b.date_added)))
        .map(|d| d.date_added)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    fn total(d: u32, roll_count: i64, total_weight: f64) -> DailyTotal {
        DailyTotal {
            date_added: day(d),
            roll_count,
            total_weight,
        }
    }

    #[test]
    fn test_empty_days_all_none() {
        assert_eq!(find_extremal_days(&[]), ExtremalDays::default());
    }

    #[test]
    fn test_extremal_days_basic() {
        let days = vec![total(1, 2, 20.0), total(2, 1, 25.0)];
        let result = find_extremal_days(&days);

        assert_eq!(result.min_count_date, Some(day(2)));
        assert_eq!(result.max_count_date, Some(day(1)));
        assert_eq!(result.min_weight_date, Some(day(1)));
        assert_eq!(result.max_weight_date, Some(day(2)));
    }

    #[test]
    fn test_ties_resolve_to_earliest_date_regardless_of_order() {
        let days = vec![total(9, 3, 10.0), total(4, 3, 10.0), total(6, 1, 10.0)];
        let result = find_extremal_days(&days);

        assert_eq!(result.max_count_date, Some(day(4)));
        assert_eq!(result.min_count_date, Some(day(6)));
        assert_eq!(result.min_weight_date, Some(day(4)));
        assert_eq!(result.max_weight_date, Some(day(4)));
    }

    #[test]
    fn test_single_day_is_every_extreme() {
        let result = find_extremal_days(&[total(3, 5, 7.5)]);
        assert_eq!(result.min_count_date, Some(day(3)));
        assert_eq!(result.max_count_date, Some(day(3)));
        assert_eq!(result.min_weight_date, Some(day(3)));
        assert_eq!(result.max_weight_date, Some(day(3)));
    }
}
