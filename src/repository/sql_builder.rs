// ==========================================
// 卷材库存服务 - SQL 构建工具
// ==========================================
// 职责: 按可选条件拼接 WHERE 子句，同时收集绑定参数
// 约束: 条件值一律走参数绑定，不拼接进 SQL 文本
// ==========================================

use chrono::NaiveDate;
use rusqlite::types::Value;

/// 日期参数的存储格式（与 rolls 表 TEXT 列一致）
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQL 查询构建器（流式 API）
///
/// # 示例
/// ```
/// use roll_stock::repository::sql_builder::SqlQueryBuilder;
///
/// let (sql, params) = SqlQueryBuilder::new("SELECT * FROM rolls")
///     .where_clause("id = ?", vec![7_i64.into()])
///     .between_if("weight", Some((1.0, 2.0)))
///     .order_by("id ASC")
///     .build();
///
/// assert_eq!(sql, "SELECT * FROM rolls WHERE id = ? AND weight BETWEEN ? AND ? ORDER BY id ASC");
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SqlQueryBuilder {
    select_clause: String,
    where_clauses: Vec<String>,
    params: Vec<Value>,
    group_by_clause: Option<String>,
    order_by_clause: Option<String>,
}

impl SqlQueryBuilder {
    /// 创建新的 SQL 查询构建器
    pub fn new(select: &str) -> Self {
        Self {
            select_clause: select.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            group_by_clause: None,
            order_by_clause: None,
        }
    }

    /// 添加 WHERE 条件及其参数（占位符数量需与参数一致）
    pub fn where_clause(mut self, condition: &str, params: Vec<Value>) -> Self {
        self.where_clauses.push(condition.to_string());
        self.params.extend(params);
        self
    }

    /// 区间存在时添加 `column BETWEEN ? AND ?`（闭区间）
    pub fn between_if<T: Into<Value>>(self, column: &str, range: Option<(T, T)>) -> Self {
        match range {
            Some((lower, upper)) => self.where_clause(
                &format!("{} BETWEEN ? AND ?", column),
                vec![lower.into(), upper.into()],
            ),
            None => self,
        }
    }

    /// 日期区间版本的 between_if
    pub fn between_dates_if(self, column: &str, range: Option<(NaiveDate, NaiveDate)>) -> Self {
        self.between_if(column, range.map(|(s, e)| (date_value(s), date_value(e))))
    }

    /// 添加 GROUP BY 子句
    pub fn group_by(mut self, group: &str) -> Self {
        self.group_by_clause = Some(group.to_string());
        self
    }

    /// 添加 ORDER BY 子句
    pub fn order_by(mut self, order: &str) -> Self {
        self.order_by_clause = Some(order.to_string());
        self
    }

    /// 构建最终的 SQL 语句与参数列表
    pub fn build(self) -> (String, Vec<Value>) {
        let mut sql = self.select_clause;

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(group) = &self.group_by_clause {
            sql.push_str(" GROUP BY ");
            sql.push_str(group);
        }

        if let Some(order) = &self.order_by_clause {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        (sql, self.params)
    }
}

/// NaiveDate → 绑定参数
pub fn date_value(date: NaiveDate) -> Value {
    Value::Text(date.format(DATE_FORMAT).to_string())
}

// ==========================================
// 单元测试
// ==========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_builder_basic() {
        let (sql, params) = SqlQueryBuilder::new("SELECT * FROM rolls").build();

        assert_eq!(sql, "SELECT * FROM rolls");
        assert!(params.is_empty());
    }

    #[test]
    fn test_between_if_none_adds_nothing() {
        let (sql, params) = SqlQueryBuilder::new("SELECT * FROM rolls")
            .between_if::<f64>("weight", None)
            .order_by("id ASC")
            .build();

        assert_eq!(sql, "SELECT * FROM rolls ORDER BY id ASC");
        assert!(params.is_empty());
    }

    #[test]
    fn test_multiple_conditions_joined_with_and() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        let (sql, params) = SqlQueryBuilder::new("SELECT * FROM rolls")
            .between_if("length", Some((1.0, 5.0)))
            .between_dates_if("date_added", Some((start, end)))
            .build();

        assert_eq!(
            sql,
            "SELECT * FROM rolls WHERE length BETWEEN ? AND ? AND date_added BETWEEN ? AND ?"
        );
        assert_eq!(params[0], Value::Real(1.0));
        assert_eq!(params[2], Value::Text("2024-01-01".to_string()));
        assert_eq!(params[3], Value::Text("2024-01-31".to_string()));
    }

    #[test]
    fn test_group_by_before_order_by() {
        let (sql, _) = SqlQueryBuilder::new("SELECT date_added, COUNT(id) FROM rolls")
            .where_clause("date_added >= ?", vec![Value::Text("2024-01-01".into())])
            .group_by("date_added")
            .order_by("date_added ASC")
            .build();

        assert_eq!(
            sql,
            "SELECT date_added, COUNT(id) FROM rolls WHERE date_added >= ? GROUP BY date_added ORDER BY date_added ASC"
        );
    }
}
