// ==========================================
// 空间站货舱调度系统 - 配置层
// ==========================================
// 职责: 系统配置管理, 为引擎组装参数
// 存储: config.json
// ==========================================

pub mod config_manager;
pub mod engine_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigResult};
pub use engine_config::EngineConfig;
