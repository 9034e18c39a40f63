// ==========================================
// 空间站货舱调度系统 - 核心库
// ==========================================
// 系统定位: 决策支持系统 (重排方案须人工确认后执行)
// 技术栈: Rust + 本地 JSON 文件
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 本地文件基础设施
pub mod store;

// 示例数据
pub mod seed;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{EvaluationOutcome, Fragility, Priority, UtilizationStatus};

// 领域实体
pub use domain::{
    ActionLog, ActionType, Location, RearrangementSuggestion, RelocationMove, RelocationPlan,
    Shipment, ShipmentEvaluation, StationSnapshot, StorageCapacity, StorageZone, StoredItem,
};

// 引擎
pub use engine::{RearrangementConfig, RearrangementEngine, TaskPlanConfig, UtilizationThresholds};

// API
pub use api::{ApiError, ApiResult, RearrangeApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "空间站货舱调度系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
