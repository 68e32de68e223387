// ==========================================
// 卷材库存服务 - 应用层
// ==========================================
// 职责: 组装存储句柄与 API，供入口使用
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
