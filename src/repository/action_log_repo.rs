// ==========================================
// 空间站货舱调度系统 - 操作日志数据仓储
// ==========================================
// 存储: action_log.json (按写入顺序追加)
// 红线: 所有写入必须记录
// ==========================================

mod core;
mod queries;


pub use core::ActionLogRepository;
