// ==========================================
// 空间站货舱调度系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行调用
// ==========================================

pub mod dto;
pub mod error;
pub mod rearrange_api;

// 重导出核心类型
pub use dto::{ApplyOutcome, RearrangementReport, StationStatus, ZoneStatus};
pub use error::{ApiError, ApiResult};
pub use rearrange_api::RearrangeApi;
