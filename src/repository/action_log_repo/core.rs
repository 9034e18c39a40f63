use crate::domain::action_log::ActionLog;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::store;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ActionLogRepository - 操作日志仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
pub struct ActionLogRepository {
    path: Option<PathBuf>,
    logs: Arc<Mutex<Vec<ActionLog>>>,
}

impl ActionLogRepository {
    /// 打开日志文件（不存在时以空日志启动）
    pub fn open(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let path = path.into();
        let logs: Vec<ActionLog> = store::read_json(&path)?.unwrap_or_default();
        Ok(Self {
            path: Some(path),
            logs: Arc::new(Mutex::new(logs)),
        })
    }

    /// 纯内存日志 (测试用)
    pub fn in_memory() -> Self {
        Self {
            path: None,
            logs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(super) fn get_logs(&self) -> RepositoryResult<MutexGuard<'_, Vec<ActionLog>>> {
        self.logs
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 插入操作日志
    ///
    /// # 返回
    /// - `Ok(action_id)`: 成功插入,返回action_id
    /// - `Err(ValidationError)`: action_id 已存在
    pub fn insert(&self, log: &ActionLog) -> RepositoryResult<String> {
        let mut logs = self.get_logs()?;
        if logs.iter().any(|l| l.action_id == log.action_id) {
            return Err(RepositoryError::ValidationError(format!(
                "action_id 重复: {}",
                log.action_id
            )));
        }

        logs.push(log.clone());
        if let Some(path) = &self.path {
            if let Err(e) = store::write_json(path, &*logs) {
                logs.pop();
                return Err(e.into());
            }
        }

        Ok(log.action_id.clone())
    }
}
