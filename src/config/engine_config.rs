use crate::engine::{RearrangementConfig, TaskPlanConfig, UtilizationThresholds};
use serde::{Deserialize, Serialize};

/// 引擎参数集合（由 ConfigManager 组装, 传给各引擎）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// 重排判定参数
    pub rearrangement: RearrangementConfig,

    /// 容量状态分级阈值
    pub thresholds: UtilizationThresholds,

    /// 任务耗时参数
    pub tasks: TaskPlanConfig,
}
