// ==========================================
// 空间站货舱调度系统 - 容量状态判定
// ==========================================
// 顺序: Normal < Alert (>= alert) < Critical (>= critical)
// ==========================================

use crate::domain::types::UtilizationStatus;
use crate::domain::zone::SpaceConstraint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationThresholds {
    pub alert_threshold: f64,
    pub critical_threshold: f64,
}

impl Default for UtilizationThresholds {
    fn default() -> Self {
        Self {
            alert_threshold: 0.9,
            critical_threshold: 0.95,
        }
    }
}

impl UtilizationThresholds {
    /// 按使用率分级
    pub fn classify(&self, utilization: f64) -> UtilizationStatus {
        if utilization >= self.critical_threshold {
            UtilizationStatus::Critical
        } else if utilization >= self.alert_threshold {
            UtilizationStatus::Alert
        } else {
            UtilizationStatus::Normal
        }
    }

    /// 对任意空间约束对象分级 (全局容量或单货舱)
    pub fn classify_space<S: SpaceConstraint>(&self, space: &S) -> UtilizationStatus {
        self.classify(space.utilization())
    }
}
