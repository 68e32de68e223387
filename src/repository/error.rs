// ==========================================
// 卷材库存服务 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: Validation / NotFound / ConstraintViolation / Store
// ==========================================

use crate::domain::RollRuleViolation;
use thiserror::Error;

/// 错误大类（对外映射依据）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 输入违反领域约束，不重试
    Validation,
    /// 记录不存在，不重试
    NotFound,
    /// 存储层约束违反（唯一/外键/CHECK），不重试
    ConstraintViolation,
    /// 其他存储故障，调用方可自行决定是否重试
    Store,
}

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    #[error("外键约束违反: {0}")]
    ForeignKeyViolation(String),

    #[error("检查约束违反: {0}")]
    CheckConstraintViolation(String),

    // ===== 数据质量错误 =====
    #[error("字段值错误 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl RepositoryError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotFound { .. } => ErrorKind::NotFound,
            RepositoryError::FieldValueError { .. } => ErrorKind::Validation,
            RepositoryError::UniqueConstraintViolation(_)
            | RepositoryError::ForeignKeyViolation(_)
            | RepositoryError::CheckConstraintViolation(_) => ErrorKind::ConstraintViolation,
            RepositoryError::DatabaseConnectionError(_)
            | RepositoryError::LockError(_)
            | RepositoryError::DatabaseTransactionError(_)
            | RepositoryError::DatabaseQueryError(_)
            | RepositoryError::InternalError(_) => ErrorKind::Store,
        }
    }
}

impl From<RollRuleViolation> for RepositoryError {
    fn from(v: RollRuleViolation) -> Self {
        RepositoryError::FieldValueError {
            field: v.field.to_string(),
            message: v.message,
        }
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, msg)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                let msg = msg.unwrap_or_else(|| code.to_string());
                if msg.contains("UNIQUE") || msg.contains("PRIMARY KEY") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    // CHECK / NOT NULL
                    RepositoryError::CheckConstraintViolation(msg)
                }
            }
            rusqlite::Error::SqliteFailure(code, msg)
                if matches!(
                    code.code,
                    rusqlite::ErrorCode::DatabaseBusy
                        | rusqlite::ErrorCode::DatabaseLocked
                        | rusqlite::ErrorCode::CannotOpen
                ) =>
            {
                RepositoryError::DatabaseConnectionError(msg.unwrap_or_else(|| code.to_string()))
            }
            rusqlite::Error::SqliteFailure(_, Some(msg)) => RepositoryError::DatabaseQueryError(msg),
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_check_constraint_maps_to_constraint_violation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v REAL NOT NULL CHECK (v > 0));")
            .unwrap();

        let err: RepositoryError = conn
            .execute("INSERT INTO t (v) VALUES (-1)", [])
            .unwrap_err()
            .into();

        assert!(matches!(err, RepositoryError::CheckConstraintViolation(_)));
        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
    }

    #[test]
    fn test_unique_constraint_maps_to_constraint_violation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, code TEXT UNIQUE);")
            .unwrap();
        conn.execute("INSERT INTO t (code) VALUES ('A')", []).unwrap();

        let err: RepositoryError = conn
            .execute("INSERT INTO t (code) VALUES ('A')", [])
            .unwrap_err()
            .into();

        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(RepositoryError::not_found("Roll", 7).kind(), ErrorKind::NotFound);
        assert_eq!(
            RepositoryError::FieldValueError {
                field: "length".into(),
                message: "x".into(),
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            RepositoryError::DatabaseQueryError("x".into()).kind(),
            ErrorKind::Store
        );
    }
}
