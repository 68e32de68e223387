// ==========================================
// 卷材库存服务 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供传输层（命令行）调用
// ==========================================

pub mod error;
pub mod roll_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use roll_api::RollApi;
