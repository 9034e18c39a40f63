// ==========================================
// 空间站货舱调度系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 把下层错误转换为可读的业务错误
// 红线: 所有错误信息必须包含显式原因
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 执行方案时舱内状态已变化
    #[error("重排方案冲突 (第 {move_index} 条搬移, item_id={item_id}): {reason}")]
    PlanConflict {
        move_index: usize,
        item_id: String,
        reason: String,
    },

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("存储错误: {0}")]
    StorageError(String),

    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::LockError(msg) => ApiError::InternalError(format!("锁获取失败: {}", msg)),
            other => ApiError::StorageError(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownKey(_) | ConfigError::InvalidValue { .. } => {
                ApiError::InvalidInput(err.to_string())
            }
            other => ApiError::ConfigError(other.to_string()),
        }
    }
}

/// API Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
