// ==========================================
// 空间站货舱调度系统 - 舱内快照
// ==========================================
// 用途: 调用方持有的全量目录 (全局容量 + 货舱 + 货物)
// 引擎只读快照,执行方案由应用层负责
// ==========================================

use crate::domain::item::StoredItem;
use crate::domain::zone::{StorageCapacity, StorageZone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSnapshot {
    pub capacity: StorageCapacity,
    #[serde(default)]
    pub zones: Vec<StorageZone>,
    #[serde(default)]
    pub items: Vec<StoredItem>,
}

impl StationSnapshot {
    pub fn new(capacity: StorageCapacity) -> Self {
        Self {
            capacity,
            zones: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn find_zone(&self, name: &str) -> Option<&StorageZone> {
        self.zones.iter().find(|z| z.name == name)
    }

    pub fn find_zone_mut(&mut self, name: &str) -> Option<&mut StorageZone> {
        self.zones.iter_mut().find(|z| z.name == name)
    }

    pub fn find_item(&self, id: &str) -> Option<&StoredItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn find_item_mut(&mut self, id: &str) -> Option<&mut StoredItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// 各货舱已用容量之和
    pub fn zones_used_total(&self) -> f64 {
        self.zones.iter().map(|z| z.used).sum()
    }
}
