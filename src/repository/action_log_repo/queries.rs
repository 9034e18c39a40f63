use super::core::ActionLogRepository;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDateTime;

impl ActionLogRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 按 action_id 查询单个日志
    pub fn find_by_id(&self, action_id: &str) -> RepositoryResult<Option<ActionLog>> {
        let logs = self.get_logs()?;
        Ok(logs.iter().find(|l| l.action_id == action_id).cloned())
    }

    /// 查询最近的操作日志 (最新在前)
    ///
    /// 时间戳相同的日志按写入顺序倒序
    pub fn find_recent(&self, limit: usize) -> RepositoryResult<Vec<ActionLog>> {
        let logs = self.get_logs()?;
        Ok(newest_first(logs.iter()).into_iter().take(limit).collect())
    }

    /// 查询指定类型的操作日志 (最新在前)
    pub fn find_by_type(&self, action_type: ActionType) -> RepositoryResult<Vec<ActionLog>> {
        let logs = self.get_logs()?;
        Ok(newest_first(
            logs.iter()
                .filter(|l| l.action_type == action_type.as_str()),
        ))
    }

    /// 查询指定时间范围的操作日志 (闭区间, 最新在前)
    pub fn find_by_time_range(
        &self,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> RepositoryResult<Vec<ActionLog>> {
        let logs = self.get_logs()?;
        Ok(newest_first(
            logs.iter()
                .filter(|l| l.action_ts >= start_time && l.action_ts <= end_time),
        ))
    }

    pub fn count(&self) -> RepositoryResult<usize> {
        Ok(self.get_logs()?.len())
    }
}

fn newest_first<'a>(logs: impl DoubleEndedIterator<Item = &'a ActionLog>) -> Vec<ActionLog> {
    let mut out: Vec<ActionLog> = logs.rev().cloned().collect();
    // 倒序后做稳定排序, 同一时间戳保持“后写在前”
    out.sort_by(|a, b| b.action_ts.cmp(&a.action_ts));
    out
}
