// ==========================================
// 空间站货舱调度系统 - 货物领域模型
// ==========================================
// 红线: 不可移动货物永不进入重排方案
// ==========================================

use crate::domain::types::{Fragility, Priority};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Location - 存放位置 (货舱 + 分区)
// ==========================================
// 文本形式: "Bay A, Section 1"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub zone: String,    // 货舱名称 (对应 StorageZone.name)
    pub section: String, // 分区名称
}

impl Location {
    pub fn new(zone: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            section: section.into(),
        }
    }

    /// 解析 "Bay A, Section 1" 形式的位置
    ///
    /// 只有货舱、没有分区时（如 "Bay A"），section 为空字符串
    pub fn parse(s: &str) -> Self {
        match s.split_once(',') {
            Some((zone, section)) => Self::new(zone.trim(), section.trim()),
            None => Self::new(s.trim(), ""),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.section.is_empty() {
            write!(f, "{}", self.zone)
        } else {
            write!(f, "{}, {}", self.zone, self.section)
        }
    }
}

// ==========================================
// StoredItem - 在舱货物
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredItem {
    // ===== 标识 =====
    pub id: String,
    pub name: String,
    pub category: String,

    // ===== 位置与体积 =====
    pub location: Location,
    pub volume: f64, // 立方米

    // ===== 重排属性 =====
    pub priority: Priority,
    pub movable: bool,
    #[serde(default)]
    pub fragility: Fragility,

    // ===== 展示字段 =====
    #[serde(default)]
    pub last_accessed: Option<NaiveDate>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
}

impl StoredItem {
    /// 当前所在货舱名称
    pub fn current_zone(&self) -> &str {
        &self.location.zone
    }

    /// 是否可作为重排候选
    ///
    /// # 参数
    /// - `is_required`: 是否强制重排（非强制时关键货物不动）
    pub fn is_relocation_candidate(&self, is_required: bool) -> bool {
        if !self.movable {
            return false;
        }
        is_required || self.priority != Priority::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_parse_and_display() {
        let loc = Location::parse("Bay A, Section 1");
        assert_eq!(loc.zone, "Bay A");
        assert_eq!(loc.section, "Section 1");
        assert_eq!(loc.to_string(), "Bay A, Section 1");

        let bare = Location::parse("Bay D");
        assert_eq!(bare.zone, "Bay D");
        assert!(bare.section.is_empty());
        assert_eq!(bare.to_string(), "Bay D");
    }
}
