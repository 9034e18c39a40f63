// ==========================================
// 空间站货舱调度系统 - 示例数据
// ==========================================
// 用途: 本地演示 / 集成测试基线
// 口径: 全局 100/70, 货舱 A 35/33, B 30/22, C 25/21, D 20/14
// ==========================================

use crate::domain::item::{Location, StoredItem};
use crate::domain::snapshot::StationSnapshot;
use crate::domain::types::{Fragility, Priority};
use crate::domain::zone::{StorageCapacity, StorageZone};
use chrono::NaiveDate;

/// 示例舱内快照
pub fn sample_snapshot() -> StationSnapshot {
    StationSnapshot {
        capacity: StorageCapacity {
            total_capacity: 100.0,
            used_capacity: 70.0,
        },
        zones: sample_zones(),
        items: sample_items(),
    }
}

pub fn sample_zones() -> Vec<StorageZone> {
    let three = ["Section 1", "Section 2", "Section 3"];
    vec![
        zone("bay-a", "Bay A", 35.0, 33.0, &three, None),
        zone("bay-b", "Bay B", 30.0, 22.0, &three, None),
        zone("bay-c", "Bay C", 25.0, 21.0, &three, Some("Temperature controlled")),
        zone("bay-d", "Bay D", 20.0, 14.0, &three[..2], Some("Low traffic area")),
    ]
}

#[rustfmt::skip]
pub fn sample_items() -> Vec<StoredItem> {
    use Fragility as F;
    use Priority as P;

    vec![
        item("1", "Food Rations", "Supplies", "Bay A, Section 1", 12.0, P::High, true, F::Low, "2025-03-10", Some("2025-09-15")),
        item("2", "Scientific Equipment", "Research", "Bay B, Section 3", 8.0, P::Medium, true, F::High, "2025-03-05", None),
        item("3", "Backup Life Support", "Critical Systems", "Bay A, Section 2", 15.0, P::Critical, false, F::High, "2025-02-20", None),
        item("4", "Spare Parts", "Maintenance", "Bay C, Section 1", 10.0, P::Medium, true, F::Medium, "2025-03-15", None),
        item("5", "Medical Supplies", "Medical", "Bay A, Section 3", 6.0, P::High, true, F::Medium, "2025-03-08", Some("2026-01-20")),
        item("6", "Personal Items", "Crew", "Bay D, Section 2", 9.0, P::Low, true, F::Low, "2025-03-12", None),
        item("7", "Water Reserves", "Supplies", "Bay B, Section 2", 14.0, P::High, true, F::Low, "2025-03-01", Some("2025-10-30")),
        item("8", "EVA Equipment", "Operations", "Bay C, Section 3", 11.0, P::Medium, true, F::High, "2025-02-25", None),
    ]
}

fn zone(
    id: &str,
    name: &str,
    capacity: f64,
    used: f64,
    sections: &[&str],
    special_conditions: Option<&str>,
) -> StorageZone {
    StorageZone {
        id: id.to_string(),
        name: name.to_string(),
        capacity,
        used,
        sections: sections.iter().map(|s| s.to_string()).collect(),
        special_conditions: special_conditions.map(str::to_string),
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    category: &str,
    location: &str,
    volume: f64,
    priority: Priority,
    movable: bool,
    fragility: Fragility,
    last_accessed: &str,
    expiration_date: Option<&str>,
) -> StoredItem {
    StoredItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        location: Location::parse(location),
        volume,
        priority,
        movable,
        fragility,
        last_accessed: parse_date(last_accessed),
        expiration_date: expiration_date.and_then(parse_date),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
