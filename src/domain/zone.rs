// ==========================================
// 空间站货舱调度系统 - 货舱领域模型
// ==========================================
// 用途: 货舱容量管理,重排目的地选择
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// StorageZone - 货舱
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageZone {
    // ===== 标识 =====
    pub id: String,   // 如 "bay-a"
    pub name: String, // 如 "Bay A"

    // ===== 容量 =====
    pub capacity: f64, // 总容量 (立方米)
    pub used: f64,     // 已用容量 (立方米)

    // ===== 分区 =====
    pub sections: Vec<String>, // 有序分区列表，首个分区为默认落位

    #[serde(default)]
    pub special_conditions: Option<String>, // 如 "Temperature controlled"
}

// ==========================================
// StorageCapacity - 全舱容量 (全局口径)
// ==========================================
// 注意: 与各货舱容量之和相互独立，充足性判定只看此口径
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageCapacity {
    pub total_capacity: f64,
    pub used_capacity: f64,
}

// ==========================================
// Trait: SpaceConstraint
// ==========================================
// 用途: 重排引擎的空间约束检查接口
pub trait SpaceConstraint {
    /// 剩余空间（可能为负，表示已超载）
    fn available(&self) -> f64;

    /// 是否可容纳给定体积
    fn can_fit(&self, volume: f64) -> bool {
        self.available() >= volume
    }

    /// 使用率 (0.0 ~ 1.0+)；容量非正时按是否有负载返回 1.0 / 0.0
    fn utilization(&self) -> f64;
}

impl SpaceConstraint for StorageZone {
    fn available(&self) -> f64 {
        self.capacity - self.used
    }

    fn utilization(&self) -> f64 {
        ratio(self.used, self.capacity)
    }
}

impl SpaceConstraint for StorageCapacity {
    fn available(&self) -> f64 {
        self.total_capacity - self.used_capacity
    }

    fn utilization(&self) -> f64 {
        ratio(self.used_capacity, self.total_capacity)
    }
}

impl StorageZone {
    /// 默认落位分区
    pub fn first_section(&self) -> Option<&str> {
        self.sections.first().map(|s| s.as_str())
    }
}

impl StorageCapacity {
    /// 加入给定体积后的预计使用率
    pub fn projected_utilization(&self, incoming_volume: f64) -> f64 {
        ratio(self.used_capacity + incoming_volume, self.total_capacity)
    }
}

/// 负载 / 容量，容量非正时不做除法
pub(crate) fn ratio(load: f64, capacity: f64) -> f64 {
    if capacity <= 0.0 {
        return if load > 0.0 { 1.0 } else { 0.0 };
    }
    load / capacity
}
