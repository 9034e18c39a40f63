// ==========================================
// 空间站货舱调度系统 - 领域类型定义
// ==========================================
// 职责: 优先级 / 易碎等级 / 容量状态 等有序枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 货物优先级 (Priority)
// ==========================================
// 红线: 等级制,全序比较
// 顺序: Low < Medium < High < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,      // 低
    Medium,   // 中
    High,     // 高
    Critical, // 关键
}

impl Priority {
    /// 重排序号 (Low=0, Medium=1, High=2, Critical=3)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Critical => 3,
        }
    }

    /// 从字符串解析（大小写不敏感）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "critical" => Some(Priority::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
            Priority::Critical => write!(f, "Critical"),
        }
    }
}

// ==========================================
// 易碎等级 (Fragility)
// ==========================================
// 仅用于展示与任务提示，不参与重排决策
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Fragility {
    Low,
    Medium,
    High,
}

impl Fragility {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Fragility::Low),
            "medium" => Some(Fragility::Medium),
            "high" => Some(Fragility::High),
            _ => None,
        }
    }
}

impl Default for Fragility {
    fn default() -> Self {
        Fragility::Low
    }
}

impl fmt::Display for Fragility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragility::Low => write!(f, "Low"),
            Fragility::Medium => write!(f, "Medium"),
            Fragility::High => write!(f, "High"),
        }
    }
}

// ==========================================
// 容量状态 (Utilization Status)
// ==========================================
// 顺序: Normal < Alert < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UtilizationStatus {
    Normal,   // 正常
    Alert,    // 接近满载
    Critical, // 危险
}

impl fmt::Display for UtilizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilizationStatus::Normal => write!(f, "NORMAL"),
            UtilizationStatus::Alert => write!(f, "ALERT"),
            UtilizationStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ==========================================
// 评估结论 (Evaluation Outcome)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationOutcome {
    NoRearrangementNeeded, // 空间充足且未触及告警阈值
    AdvisoryOptimization,  // 空间充足但接近满载，建议优化
    RequiredOptimization,  // 空间不足，必须重排
}

impl fmt::Display for EvaluationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationOutcome::NoRearrangementNeeded => write!(f, "NO_REARRANGEMENT_NEEDED"),
            EvaluationOutcome::AdvisoryOptimization => write!(f, "ADVISORY_OPTIMIZATION"),
            EvaluationOutcome::RequiredOptimization => write!(f, "REQUIRED_OPTIMIZATION"),
        }
    }
}
