// ==========================================
// 空间站货舱调度系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::{ApiResult, RearrangeApi};
use crate::config::ConfigManager;
use crate::domain::zone::StorageCapacity;
use crate::repository::{ActionLogRepository, SnapshotRepository};

/// 数据目录覆盖用的环境变量
pub const DATA_DIR_ENV: &str = "STATION_STOWAGE_DATA_DIR";

pub const SNAPSHOT_FILE: &str = "snapshot.json";
pub const ACTION_LOG_FILE: &str = "action_log.json";
pub const CONFIG_FILE: &str = "config.json";

/// 应用状态
///
/// 包含API实例和共享资源
pub struct AppState {
    /// 数据目录
    pub data_dir: PathBuf,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 重排API
    pub rearrange_api: Arc<RearrangeApi>,

    /// 操作日志仓储（用于审计追踪）
    pub action_log_repo: Arc<ActionLogRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 加载配置 (config.json)
    /// 2. 打开快照与操作日志 (快照不存在时以空舱启动)
    /// 3. 创建API实例
    pub fn new(data_dir: impl Into<PathBuf>) -> ApiResult<Self> {
        let data_dir = data_dir.into();
        tracing::info!("初始化AppState，数据目录: {}", data_dir.display());

        let config_manager = Arc::new(ConfigManager::new(data_dir.join(CONFIG_FILE))?);
        let engine_config = config_manager.get_engine_config()?;

        let snapshot_repo = Arc::new(SnapshotRepository::new(data_dir.join(SNAPSHOT_FILE)));
        let snapshot = snapshot_repo.load_or_empty(StorageCapacity {
            total_capacity: 0.0,
            used_capacity: 0.0,
        })?;
        if !snapshot_repo.exists() {
            tracing::warn!("快照文件不存在，以空舱启动（可先执行 seed，或 import 后用 capacity 设定全局容量）");
        }

        let action_log_repo = Arc::new(ActionLogRepository::open(data_dir.join(ACTION_LOG_FILE))?);

        let rearrange_api = Arc::new(RearrangeApi::new(
            snapshot,
            Some(snapshot_repo),
            action_log_repo.clone(),
            engine_config,
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            data_dir,
            config_manager,
            rearrange_api,
            action_log_repo,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// 获取默认数据目录
///
/// 优先级: 环境变量 STATION_STOWAGE_DATA_DIR > 用户数据目录 > 当前目录
pub fn get_default_data_dir() -> PathBuf {
    // 允许通过环境变量显式指定数据目录（便于调试/测试/CI）
    if let Ok(path) = std::env::var(DATA_DIR_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::data_dir() {
        // 开发环境使用独立目录，避免污染正式数据
        Some(data_dir) if cfg!(debug_assertions) => data_dir.join("station-stowage-dev"),
        Some(data_dir) => data_dir.join("station-stowage"),
        None => PathBuf::from("./station-stowage-data"),
    }
}
