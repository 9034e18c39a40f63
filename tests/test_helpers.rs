// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的临时数据目录、测试数据生成等功能
// ==========================================

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use station_stowage::config::EngineConfig;
use station_stowage::domain::{
    Fragility, Location, Priority, StorageCapacity, StorageZone, StoredItem,
};
use station_stowage::repository::ActionLogRepository;
use station_stowage::seed;
use station_stowage::RearrangeApi;
use tempfile::TempDir;

/// 创建临时数据目录（需要保持存活）
pub fn create_test_data_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// 创建全局容量
pub fn create_test_capacity(total: f64, used: f64) -> StorageCapacity {
    StorageCapacity {
        total_capacity: total,
        used_capacity: used,
    }
}

/// 创建测试用货舱 (单分区 "Section 1")
pub fn create_test_zone(name: &str, capacity: f64, used: f64) -> StorageZone {
    StorageZone {
        id: name.to_ascii_lowercase().replace(' ', "-"),
        name: name.to_string(),
        capacity,
        used,
        sections: vec!["Section 1".to_string()],
        special_conditions: None,
    }
}

/// 创建测试用货物
pub fn create_test_item(
    id: &str,
    zone: &str,
    volume: f64,
    priority: Priority,
    movable: bool,
) -> StoredItem {
    StoredItem {
        id: id.to_string(),
        name: format!("Item {}", id),
        category: "Test".to_string(),
        location: Location::new(zone, "Section 1"),
        volume,
        priority,
        movable,
        fragility: Fragility::Low,
        last_accessed: None,
        expiration_date: None,
    }
}

/// 基于示例数据的纯内存 API
pub fn create_test_api() -> RearrangeApi {
    RearrangeApi::new(
        seed::sample_snapshot(),
        None,
        Arc::new(ActionLogRepository::in_memory()),
        EngineConfig::default(),
    )
}

/// 写入 CSV 测试文件
pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write csv");
    path
}
