// ==========================================
// 空间站货舱调度系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 存储错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("数据格式错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("锁获取失败: {0}")]
    LockError(String),

    // ===== 数据质量错误 =====
    #[error("数据验证失败: {0}")]
    ValidationError(String),
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
