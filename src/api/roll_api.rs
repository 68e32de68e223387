// ==========================================
// 卷材库存服务 - 卷材 API
// ==========================================
// 职责: 卷材登记/查询/更新/删除与区间统计，供传输层调用
// 错误: Repository 错误统一转换为 ApiError（带对外状态码）
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{NewRoll, Roll, RollFilter, RollStatistics, RollUpdate};
use crate::engine::StatisticsAggregator;
use crate::repository::RollRepository;

// ==========================================
// RollApi - 卷材 API
// ==========================================

/// 卷材API
///
/// 职责：
/// 1. 卷材入库、查询、部分更新
/// 2. 出库（软删除）与物理删除（硬删除），两种语义分别暴露
/// 3. 入库日期区间统计
pub struct RollApi {
    roll_repo: Arc<RollRepository>,
    aggregator: Arc<StatisticsAggregator>,
}

impl RollApi {
    pub fn new(roll_repo: Arc<RollRepository>, aggregator: Arc<StatisticsAggregator>) -> Self {
        Self {
            roll_repo,
            aggregator,
        }
    }

    /// 卷材入库
    pub fn create_roll(&self, new_roll: NewRoll) -> ApiResult<Roll> {
        self.roll_repo.create(&new_roll).map_err(|e| {
            warn!(error = %e, length = new_roll.length, weight = new_roll.weight, "入库请求被拒绝");
            ApiError::from(e)
        })
    }

    /// 条件查询卷材列表
    pub fn list_rolls(&self, filter: &RollFilter) -> ApiResult<Vec<Roll>> {
        let rolls = self.roll_repo.query(filter)?;
        debug!(count = rolls.len(), unconstrained = filter.is_unconstrained(), "卷材列表查询");
        Ok(rolls)
    }

    /// 查询单个卷材
    pub fn get_roll(&self, id: i64) -> ApiResult<Roll> {
        Ok(self.roll_repo.get(id)?)
    }

    /// 部分更新卷材
    pub fn update_roll(&self, id: i64, update: RollUpdate) -> ApiResult<Roll> {
        if update.is_empty() {
            debug!(roll_id = id, "更新请求未携带任何字段");
        }
        self.roll_repo.update(id, &update).map_err(|e| {
            warn!(roll_id = id, error = %e, "更新请求失败");
            ApiError::from(e)
        })
    }

    /// 出库（软删除）
    pub fn soft_delete_roll(&self, id: i64) -> ApiResult<Roll> {
        Ok(self.roll_repo.soft_delete(id)?)
    }

    /// 物理删除（硬删除）
    pub fn hard_delete_roll(&self, id: i64) -> ApiResult<Roll> {
        Ok(self.roll_repo.hard_delete(id)?)
    }

    /// 入库日期区间统计（闭区间）
    pub fn get_statistics(&self, start_date: NaiveDate, end_date: NaiveDate) -> ApiResult<RollStatistics> {
        if start_date > end_date {
            debug!(start = %start_date, end = %end_date, "统计区间起点晚于终点, 结果为空");
        }
        Ok(self.aggregator.get_statistics(start_date, end_date)?)
    }
}
