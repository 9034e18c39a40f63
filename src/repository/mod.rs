// ==========================================
// 空间站货舱调度系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽本地文件细节
// ==========================================

pub mod action_log_repo;
pub mod error;
pub mod snapshot_repo;

// 重导出核心仓储
pub use action_log_repo::ActionLogRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use snapshot_repo::SnapshotRepository;
