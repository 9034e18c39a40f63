// ==========================================
// 空间站货舱调度系统 - 引擎层
// ==========================================
// 职责: 实现重排决策规则, 不做 I/O
// 红线: 引擎只读快照, 所有输出可解释
// ==========================================

pub mod arrangement;
pub mod inventory;
pub mod rearrangement;
pub mod tasks;
pub mod utilization;

// 重导出核心引擎
pub use arrangement::{
    project_arrangement, summarize, ArrangementProjection, RearrangementSummary, ZoneProjection,
};
pub use inventory::{
    expiring_items, search_items, ExpiringItem, ItemMatch, DEFAULT_EXPIRY_WINDOW_DAYS,
};
pub use rearrangement::{RearrangementConfig, RearrangementEngine};
pub use tasks::{build_task_list, TaskList, TaskPlanConfig};
pub use utilization::UtilizationThresholds;
