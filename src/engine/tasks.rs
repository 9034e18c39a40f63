// ==========================================
// 空间站货舱调度系统 - 搬移任务清单
// ==========================================
// 职责: 将重排方案转为操作员任务列表 + 预计耗时
// ==========================================

use crate::domain::relocation::RelocationPlan;
use crate::domain::types::Fragility;
use serde::{Deserialize, Serialize};

/// 任务耗时参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskPlanConfig {
    pub minutes_per_move: u32,
    pub min_completion_minutes: u32,
}

impl Default for TaskPlanConfig {
    fn default() -> Self {
        Self {
            minutes_per_move: 10,
            min_completion_minutes: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    pub tasks: Vec<String>,
    pub estimated_minutes: u32, // 空方案为 0
}

/// 生成任务清单
///
/// 每条搬移一条任务, 末尾追加复检任务;
/// 预计耗时 = max(min_completion_minutes, moves * minutes_per_move)
pub fn build_task_list(plan: &RelocationPlan, config: &TaskPlanConfig) -> TaskList {
    if plan.is_empty() {
        return TaskList {
            tasks: vec!["No rearrangement tasks required.".to_string()],
            estimated_minutes: 0,
        };
    }

    let mut tasks: Vec<String> = plan
        .moves
        .iter()
        .map(|m| {
            let mut line = format!(
                "Move {} from {} to {}",
                m.item.name, m.item.location, m.destination
            );
            if m.item.fragility == Fragility::High {
                line.push_str(" (fragile, handle with care)");
            }
            line
        })
        .collect();
    tasks.push("Conduct final inspection after rearrangement".to_string());

    let moves = u32::try_from(plan.len()).unwrap_or(u32::MAX);
    let estimated_minutes = config
        .min_completion_minutes
        .max(moves.saturating_mul(config.minutes_per_move));

    TaskList {
        tasks,
        estimated_minutes,
    }
}
