// ==========================================
// 空间站货舱调度系统 - 应用层
// ==========================================
// 职责: 组装配置/仓储/API, 供命令行入口使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_data_dir, AppState, DATA_DIR_ENV};
