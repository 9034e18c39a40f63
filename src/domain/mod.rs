// ==========================================
// 空间站货舱调度系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、空间约束接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod action_log;
pub mod item;
pub mod relocation;
pub mod shipment;
pub mod snapshot;
pub mod types;
pub mod zone;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use item::{Location, StoredItem};
pub use relocation::{RearrangementSuggestion, RelocationMove, RelocationPlan};
pub use shipment::{Shipment, ShipmentEvaluation};
pub use snapshot::StationSnapshot;
pub use types::{EvaluationOutcome, Fragility, Priority, UtilizationStatus};
pub use zone::{SpaceConstraint, StorageCapacity, StorageZone};
