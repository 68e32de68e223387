// ==========================================
// 卷材库存服务 - 卷材数据仓储
// ==========================================
// 对齐: rolls 表
// 红线: Repository 只做数据映射与事务边界，规则校验委托给领域模型
// ==========================================

mod core;
mod queries;


pub use self::core::RollRepository;
