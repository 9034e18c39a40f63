// ==========================================
// 空间站货舱调度系统 - 来货领域模型
// ==========================================

use crate::domain::types::{EvaluationOutcome, Priority};
use serde::{Deserialize, Serialize};

// ==========================================
// Shipment - 待入舱来货
// ==========================================
// 只有体积与优先级，尚未落位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub volume: f64,
    pub priority: Priority,
    #[serde(default)]
    pub contents: Option<String>,
}

impl Shipment {
    pub fn new(volume: f64, priority: Priority) -> Self {
        Self {
            volume,
            priority,
            contents: None,
        }
    }
}

// ==========================================
// ShipmentEvaluation - 来货空间评估结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentEvaluation {
    pub sufficient_space: bool,
    pub is_required: bool,
    pub shortfall: f64,              // 空间缺口 (充足时为 0)
    pub available_space: f64,        // 全局剩余空间
    pub projected_utilization: f64,  // 入舱后预计使用率
    pub outcome: EvaluationOutcome,
}

impl ShipmentEvaluation {
    /// 是否需要给出重排建议（强制或建议性）
    pub fn needs_plan(&self) -> bool {
        self.outcome != EvaluationOutcome::NoRearrangementNeeded
    }

    /// 生成重排所需腾挪的空间
    ///
    /// 强制重排时为缺口，建议性重排时为 0（无早停目标）
    pub fn space_needed(&self) -> f64 {
        if self.is_required {
            self.shortfall
        } else {
            0.0
        }
    }
}
