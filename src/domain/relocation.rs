// ==========================================
// 空间站货舱调度系统 - 重排方案领域模型
// ==========================================
// 用途: 重排引擎输出格式
// 红线: 方案每次调用新生成,引擎不落库
// ==========================================

use crate::domain::item::{Location, StoredItem};
use crate::domain::shipment::ShipmentEvaluation;
use serde::{Deserialize, Serialize};

// ==========================================
// RelocationMove - 单条搬移
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelocationMove {
    pub item: StoredItem,      // 货物快照
    pub from_zone: String,     // 原货舱
    pub destination: Location, // 目的货舱 + 分区
    pub volume_recovered: f64, // 腾出体积 (= item.volume)
}

// ==========================================
// RelocationPlan - 重排方案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelocationPlan {
    pub moves: Vec<RelocationMove>,
    pub space_recovered: f64,
    pub space_needed: f64,
    pub is_required: bool,
}

impl RelocationPlan {
    /// 空方案
    pub fn empty(space_needed: f64, is_required: bool) -> Self {
        Self {
            moves: Vec::new(),
            space_recovered: 0.0,
            space_needed,
            is_required,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// 追加一条搬移并累计腾出体积
    pub(crate) fn push(&mut self, item: &StoredItem, destination: Location) {
        self.space_recovered += item.volume;
        self.moves.push(RelocationMove {
            item: item.clone(),
            from_zone: item.location.zone.clone(),
            destination,
            volume_recovered: item.volume,
        });
    }

    /// 强制重排的缺口是否已补足
    ///
    /// 引擎不把“补不足”当作错误，调用方需据此自行处理
    pub fn target_met(&self) -> bool {
        self.space_recovered >= self.space_needed
    }
}

// ==========================================
// RearrangementSuggestion - 评估 + 方案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RearrangementSuggestion {
    pub evaluation: ShipmentEvaluation,
    pub plan: RelocationPlan,
}
