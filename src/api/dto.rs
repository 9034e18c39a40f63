// ==========================================
// 空间站货舱调度系统 - API 响应对象
// ==========================================

use crate::domain::relocation::RearrangementSuggestion;
use crate::domain::shipment::Shipment;
use crate::domain::snapshot::StationSnapshot;
use crate::domain::types::UtilizationStatus;
use crate::domain::zone::{SpaceConstraint, StorageCapacity, StorageZone};
use crate::engine::{ArrangementProjection, RearrangementSummary, TaskList, UtilizationThresholds};
use serde::{Deserialize, Serialize};

/// 单货舱状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneStatus {
    pub name: String,
    pub capacity: f64,
    pub used: f64,
    pub available: f64,
    pub utilization: f64,
    pub status: UtilizationStatus,
    pub item_count: usize,
    pub special_conditions: Option<String>,
}

/// 舱内总览
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationStatus {
    pub capacity: StorageCapacity,
    pub available: f64,
    pub utilization: f64,
    pub status: UtilizationStatus,
    pub zones: Vec<ZoneStatus>,
    pub item_count: usize,
    pub zones_used_total: f64, // 各货舱已用之和, 与全局口径相互独立
}

impl StationStatus {
    pub fn from_snapshot(snapshot: &StationSnapshot, thresholds: &UtilizationThresholds) -> Self {
        Self {
            capacity: snapshot.capacity,
            available: snapshot.capacity.available(),
            utilization: snapshot.capacity.utilization(),
            status: thresholds.classify_space(&snapshot.capacity),
            zones: snapshot
                .zones
                .iter()
                .map(|z| ZoneStatus::from_zone(z, snapshot, thresholds))
                .collect(),
            item_count: snapshot.items.len(),
            zones_used_total: snapshot.zones_used_total(),
        }
    }
}

impl ZoneStatus {
    fn from_zone(
        zone: &StorageZone,
        snapshot: &StationSnapshot,
        thresholds: &UtilizationThresholds,
    ) -> Self {
        Self {
            name: zone.name.clone(),
            capacity: zone.capacity,
            used: zone.used,
            available: zone.available(),
            utilization: zone.utilization(),
            status: thresholds.classify_space(zone),
            item_count: snapshot
                .items
                .iter()
                .filter(|i| i.current_zone() == zone.name)
                .count(),
            special_conditions: zone.special_conditions.clone(),
        }
    }
}

/// 来货评估报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RearrangementReport {
    pub action_id: String,
    pub shipment: Shipment,
    pub status_before: UtilizationStatus,
    pub suggestion: RearrangementSuggestion,
    pub summary: RearrangementSummary,
    pub projection: ArrangementProjection,
    pub tasks: TaskList,
}

/// 方案执行结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub action_id: String,
    pub moves_applied: usize,
    pub space_recovered: f64,
    pub zones: Vec<ZoneStatus>,
}
