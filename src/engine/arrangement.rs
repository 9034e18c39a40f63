// ==========================================
// 空间站货舱调度系统 - 重排后布局推演
// ==========================================
// 职责: 在货舱快照副本上模拟执行方案, 生成重排前后对比与摘要
// 输入: 货舱快照 + 重排方案 + 全局容量
// 输出: ArrangementProjection / RearrangementSummary
// ==========================================

use crate::domain::relocation::RelocationPlan;
use crate::domain::zone::{SpaceConstraint, StorageCapacity, StorageZone};
use serde::{Deserialize, Serialize};

// ==========================================
// ZoneProjection - 单货舱推演结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneProjection {
    pub zone_name: String,
    pub capacity: f64,
    pub used_before: f64,
    pub used_after: f64,
    pub available_after: f64,
    pub utilization_after: f64, // 0.0 ~ 1.0+
    pub affected: bool,         // 方案是否涉及本货舱 (迁出或迁入)
    pub over_capacity: bool,    // 推演后超出容量 (同一快照多次落位同一货舱时可能出现)
}

// ==========================================
// ArrangementProjection - 布局推演
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrangementProjection {
    pub zones: Vec<ZoneProjection>,
    pub notes: Vec<String>,
}

impl ArrangementProjection {
    pub fn affected_zones(&self) -> impl Iterator<Item = &ZoneProjection> {
        self.zones.iter().filter(|z| z.affected)
    }

    pub fn has_overflow(&self) -> bool {
        self.zones.iter().any(|z| z.over_capacity)
    }
}

// ==========================================
// RearrangementSummary - 重排摘要
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RearrangementSummary {
    pub shipment_volume: f64,
    pub available_space: f64,     // 全局剩余空间 (重排前)
    pub space_recovered: f64,     // 方案腾出体积
    pub total_space_after: f64,   // available_space + space_recovered
    pub space_needed: f64,        // 强制重排时的缺口, 否则 0
    pub shortfall_met: bool,      // 腾出体积是否覆盖缺口
    pub moves_count: usize,
}

/// 推演方案执行后的货舱布局
///
/// 每条搬移: 原货舱 used -= 体积, 目的货舱 used += 体积;
/// 原货舱或目的货舱任一在快照中找不到时, 该条搬移不计入。
pub fn project_arrangement(zones: &[StorageZone], plan: &RelocationPlan) -> ArrangementProjection {
    let mut after: Vec<StorageZone> = zones.to_vec();

    for mv in &plan.moves {
        let from_idx = after.iter().position(|z| z.name == mv.from_zone);
        let to_idx = after.iter().position(|z| z.name == mv.destination.zone);
        if let (Some(from_idx), Some(to_idx)) = (from_idx, to_idx) {
            after[from_idx].used -= mv.volume_recovered;
            after[to_idx].used += mv.volume_recovered;
        }
    }

    let projections = zones
        .iter()
        .zip(after.iter())
        .map(|(before, after)| {
            let affected = plan
                .moves
                .iter()
                .any(|m| m.from_zone == before.name || m.destination.zone == before.name);
            ZoneProjection {
                zone_name: before.name.clone(),
                capacity: before.capacity,
                used_before: before.used,
                used_after: after.used,
                available_after: after.available(),
                utilization_after: after.utilization(),
                affected,
                over_capacity: after.used > after.capacity,
            }
        })
        .collect();

    ArrangementProjection {
        zones: projections,
        notes: arrangement_notes(plan),
    }
}

/// 布局说明
fn arrangement_notes(plan: &RelocationPlan) -> Vec<String> {
    if plan.is_empty() {
        return vec!["No rearrangement required at this time.".to_string()];
    }

    let mut notes = vec![
        "Items are relocated to optimize space efficiency.".to_string(),
        "Priority was given to keeping critical items in their original locations.".to_string(),
    ];
    if plan
        .moves
        .iter()
        .any(|m| m.item.fragility == crate::domain::types::Fragility::High)
    {
        notes.push("Fragile items will be handled with extra care during relocation.".to_string());
    }
    notes
}

/// 生成重排摘要
///
/// # 参数
/// - `capacity`: 全局容量 (重排前)
/// - `shipment_volume`: 来货体积
/// - `plan`: 重排方案
pub fn summarize(
    capacity: &StorageCapacity,
    shipment_volume: f64,
    plan: &RelocationPlan,
) -> RearrangementSummary {
    let available_space = capacity.available();
    RearrangementSummary {
        shipment_volume,
        available_space,
        space_recovered: plan.space_recovered,
        total_space_after: available_space + plan.space_recovered,
        space_needed: plan.space_needed,
        shortfall_met: plan.target_met(),
        moves_count: plan.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{Location, StoredItem};
    use crate::domain::types::{Fragility, Priority};

    fn zone(name: &str, capacity: f64, used: f64) -> StorageZone {
        StorageZone {
            id: name.to_string(),
            name: name.to_string(),
            capacity,
            used,
            sections: vec!["Section 1".to_string()],
            special_conditions: None,
        }
    }

    fn item(id: &str, zone: &str, volume: f64, fragility: Fragility) -> StoredItem {
        StoredItem {
            id: id.to_string(),
            name: id.to_string(),
            category: "Test".to_string(),
            location: Location::new(zone, "Section 1"),
            volume,
            priority: Priority::Low,
            movable: true,
            fragility,
            last_accessed: None,
            expiration_date: None,
        }
    }

    fn plan_with(
        moves: &[(StoredItem, &str)],
        space_needed: f64,
        is_required: bool,
    ) -> RelocationPlan {
        let mut plan = RelocationPlan::empty(space_needed, is_required);
        for (it, dest) in moves {
            plan.push(it, Location::new(*dest, "Section 1"));
        }
        plan
    }

    #[test]
    fn test_projection_moves_volume_and_conserves_total() {
        let zones = vec![
            zone("Bay A", 35.0, 33.0),
            zone("Bay B", 30.0, 22.0),
            zone("Bay C", 25.0, 21.0),
        ];
        let plan = plan_with(
            &[(item("1", "Bay A", 6.0, Fragility::Low), "Bay B")],
            0.0,
            false,
        );

        let proj = project_arrangement(&zones, &plan);
        assert_eq!(proj.zones[0].used_after, 27.0);
        assert_eq!(proj.zones[1].used_after, 28.0);
        assert_eq!(proj.zones[2].used_after, 21.0);
        let affected: Vec<&str> = proj
            .affected_zones()
            .map(|z| z.zone_name.as_str())
            .collect();
        assert_eq!(affected, vec!["Bay A", "Bay B"]);

        let before: f64 = proj.zones.iter().map(|z| z.used_before).sum();
        let after: f64 = proj.zones.iter().map(|z| z.used_after).sum();
        assert!((before - after).abs() < 1e-9);
        assert!(!proj.has_overflow());
    }

    #[test]
    fn test_projection_flags_overflow_from_shared_destination() {
        let zones = vec![zone("Bay A", 40.0, 20.0), zone("Bay B", 10.0, 4.0)];
        let plan = plan_with(
            &[
                (item("1", "Bay A", 5.0, Fragility::Low), "Bay B"),
                (item("2", "Bay A", 5.0, Fragility::Low), "Bay B"),
            ],
            0.0,
            false,
        );

        let proj = project_arrangement(&zones, &plan);
        assert_eq!(proj.zones[1].used_after, 14.0);
        assert!(proj.zones[1].over_capacity);
        assert!(proj.has_overflow());
    }

    #[test]
    fn test_projection_ignores_move_with_unknown_origin() {
        let zones = vec![zone("Bay B", 30.0, 10.0)];
        let plan = plan_with(
            &[(item("1", "Bay Z", 5.0, Fragility::Low), "Bay B")],
            0.0,
            false,
        );

        let proj = project_arrangement(&zones, &plan);
        assert_eq!(proj.zones[0].used_after, 10.0);
        assert!(proj.zones[0].affected);
    }

    #[test]
    fn test_notes_mention_fragile_items_only_when_present() {
        let zones = vec![zone("Bay A", 35.0, 10.0), zone("Bay B", 30.0, 0.0)];
        let plain = plan_with(
            &[(item("1", "Bay A", 1.0, Fragility::Low), "Bay B")],
            0.0,
            false,
        );
        let fragile = plan_with(
            &[(item("1", "Bay A", 1.0, Fragility::High), "Bay B")],
            0.0,
            false,
        );

        assert_eq!(project_arrangement(&zones, &plain).notes.len(), 2);
        assert_eq!(project_arrangement(&zones, &fragile).notes.len(), 3);

        let empty = project_arrangement(&zones, &RelocationPlan::empty(0.0, false));
        assert_eq!(
            empty.notes,
            vec!["No rearrangement required at this time.".to_string()]
        );
    }

    #[test]
    fn test_summary_totals() {
        let cap = StorageCapacity {
            total_capacity: 100.0,
            used_capacity: 95.0,
        };
        let plan = plan_with(
            &[(item("1", "Bay A", 6.0, Fragility::Low), "Bay B")],
            5.0,
            true,
        );

        let summary = summarize(&cap, 10.0, &plan);
        assert_eq!(summary.available_space, 5.0);
        assert_eq!(summary.total_space_after, 11.0);
        assert_eq!(summary.space_needed, 5.0);
        assert!(summary.shortfall_met);
        assert_eq!(summary.moves_count, 1);
    }
}
