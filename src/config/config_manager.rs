// ==========================================
// 空间站货舱调度系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config.json (扁平 key-value, 值一律为字符串)
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::engine::{RearrangementConfig, TaskPlanConfig, UtilizationThresholds};
use crate::store;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

// ==========================================
// ConfigError - 配置层错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置文件格式错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("配置锁获取失败: {0}")]
    LockError(String),

    #[error("未知配置键: {0}")]
    UnknownKey(String),

    #[error("配置值无效 (key={key}): {value}")]
    InvalidValue { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    path: Option<PathBuf>,
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl ConfigManager {
    /// 从配置文件创建 ConfigManager
    ///
    /// 文件不存在时以空配置启动 (全部取默认值), 首次写入时创建
    ///
    /// # 参数
    /// - path: 配置文件路径
    pub fn new(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path),
            values: Arc::new(Mutex::new(values)),
        })
    }

    /// 纯内存配置 (测试 / 一次性命令)
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    /// 写入配置值并落盘
    ///
    /// 仅接受 config_keys 中登记的键, 值须能解析为非负数
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        validate_value(key, value)?;

        let mut values = self
            .values
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;
        values.insert(key.to_string(), value.trim().to_string());
        self.persist(&values)
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    fn get_f64(&self, key: &str, default: f64) -> ConfigResult<f64> {
        let value = self.get_config_or_default(key, &default.to_string())?;
        Ok(value.parse::<f64>().unwrap_or_else(|_| {
            tracing::warn!(config_key = key, raw_value = %value, "配置值格式错误，使用默认值");
            default
        }))
    }

    fn get_u32(&self, key: &str, default: u32) -> ConfigResult<u32> {
        let value = self.get_config_or_default(key, &default.to_string())?;
        Ok(value.parse::<u32>().unwrap_or_else(|_| {
            tracing::warn!(config_key = key, raw_value = %value, "配置值格式错误，使用默认值");
            default
        }))
    }

    // ===== 容量阈值 =====

    /// 告警阈值 (默认 0.9)
    pub fn get_alert_threshold(&self) -> ConfigResult<f64> {
        self.get_f64(
            config_keys::ALERT_THRESHOLD,
            RearrangementConfig::DEFAULT_ALERT_THRESHOLD,
        )
    }

    /// 严重阈值 (默认 0.95)
    pub fn get_critical_threshold(&self) -> ConfigResult<f64> {
        self.get_f64(
            config_keys::CRITICAL_THRESHOLD,
            UtilizationThresholds::default().critical_threshold,
        )
    }

    // ===== 任务耗时 =====

    pub fn get_minutes_per_move(&self) -> ConfigResult<u32> {
        self.get_u32(
            config_keys::MINUTES_PER_MOVE,
            TaskPlanConfig::default().minutes_per_move,
        )
    }

    pub fn get_min_completion_minutes(&self) -> ConfigResult<u32> {
        self.get_u32(
            config_keys::MIN_COMPLETION_MINUTES,
            TaskPlanConfig::default().min_completion_minutes,
        )
    }

    /// 组装引擎参数
    pub fn get_engine_config(&self) -> ConfigResult<EngineConfig> {
        let alert_threshold = self.get_alert_threshold()?;
        Ok(EngineConfig {
            rearrangement: RearrangementConfig { alert_threshold },
            thresholds: UtilizationThresholds {
                alert_threshold,
                critical_threshold: self.get_critical_threshold()?,
            },
            tasks: TaskPlanConfig {
                minutes_per_move: self.get_minutes_per_move()?,
                min_completion_minutes: self.get_min_completion_minutes()?,
            },
        })
    }

    /// 获取全部已覆写配置的快照 (JSON)
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let values = self
            .values
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;
        Ok(serde_json::to_string(&*values)?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 先整体校验, 任一项无效则不做任何修改
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let incoming: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;
        for (key, value) in &incoming {
            validate_value(key, value)?;
        }

        let mut values = self
            .values
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;
        let count = incoming.len();
        values.extend(incoming);
        self.persist(&values)?;
        Ok(count)
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> ConfigResult<()> {
        if let Some(path) = &self.path {
            store::write_json(path, values)?;
        }
        Ok(())
    }
}

fn validate_value(key: &str, value: &str) -> ConfigResult<()> {
    if !config_keys::ALL.contains(&key) {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };
    match key {
        config_keys::MINUTES_PER_MOVE | config_keys::MIN_COMPLETION_MINUTES => {
            value.trim().parse::<u32>().map(|_| ()).map_err(|_| invalid())
        }
        _ => match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(()),
            _ => Err(invalid()),
        },
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 容量阈值
    pub const ALERT_THRESHOLD: &str = "alert_threshold";
    pub const CRITICAL_THRESHOLD: &str = "critical_threshold";

    // 任务耗时
    pub const MINUTES_PER_MOVE: &str = "minutes_per_move";
    pub const MIN_COMPLETION_MINUTES: &str = "min_completion_minutes";

    pub const ALL: [&str; 4] = [
        ALERT_THRESHOLD,
        CRITICAL_THRESHOLD,
        MINUTES_PER_MOVE,
        MIN_COMPLETION_MINUTES,
    ];
}
