// ==========================================
// 空间站货舱调度系统 - 舱内快照仓储
// ==========================================
// 存储: snapshot.json (全局容量 + 货舱 + 货物)
// 红线: Repository 不做业务逻辑,只做数据映射
// ==========================================

use crate::domain::snapshot::StationSnapshot;
use crate::domain::zone::StorageCapacity;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::store;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub struct SnapshotRepository {
    path: PathBuf,
}

impl SnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// 读取快照
    ///
    /// # 返回
    /// - `Err(NotFound)`: 快照文件不存在 (尚未 seed / import)
    pub fn load(&self) -> RepositoryResult<StationSnapshot> {
        let snapshot: StationSnapshot =
            store::read_json(&self.path)?.ok_or_else(|| RepositoryError::NotFound {
                entity: "StationSnapshot".to_string(),
                id: self.path.display().to_string(),
            })?;
        validate(&snapshot)?;
        Ok(snapshot)
    }

    /// 读取快照, 不存在时返回给定容量的空快照
    pub fn load_or_empty(&self, capacity: StorageCapacity) -> RepositoryResult<StationSnapshot> {
        match self.load() {
            Ok(snapshot) => Ok(snapshot),
            Err(RepositoryError::NotFound { .. }) => Ok(StationSnapshot::new(capacity)),
            Err(e) => Err(e),
        }
    }

    /// 保存快照（整体覆盖）
    pub fn save(&self, snapshot: &StationSnapshot) -> RepositoryResult<()> {
        validate(snapshot)?;
        store::write_json(&self.path, snapshot)?;
        tracing::debug!(
            path = %self.path.display(),
            zones = snapshot.zones.len(),
            items = snapshot.items.len(),
            "快照已保存"
        );
        Ok(())
    }
}

/// 主键唯一性检查 (货舱名 / 货物ID)
fn validate(snapshot: &StationSnapshot) -> RepositoryResult<()> {
    let mut zone_names = HashSet::new();
    for zone in &snapshot.zones {
        if !zone_names.insert(zone.name.as_str()) {
            return Err(RepositoryError::ValidationError(format!(
                "货舱名称重复: {}",
                zone.name
            )));
        }
    }

    let mut item_ids = HashSet::new();
    for item in &snapshot.items {
        if !item_ids.insert(item.id.as_str()) {
            return Err(RepositoryError::ValidationError(format!(
                "货物ID重复: {}",
                item.id
            )));
        }
    }
    Ok(())
}
