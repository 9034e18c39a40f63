// ==========================================
// 空间站货舱调度系统 - 重排 API
// ==========================================
// 职责: 持有舱内快照, 串联引擎/仓储/导入, 记录操作日志
// 红线: 方案仅在人工确认 (apply_plan) 后才落到快照
// 红线: 所有写入必须记录
// ==========================================

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use serde_json::json;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::api::dto::{ApplyOutcome, RearrangementReport, StationStatus};
use crate::api::error::{ApiError, ApiResult};
use crate::config::EngineConfig;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::item::StoredItem;
use crate::domain::relocation::RelocationPlan;
use crate::domain::shipment::Shipment;
use crate::domain::snapshot::StationSnapshot;
use crate::domain::zone::{SpaceConstraint, StorageCapacity};
use crate::engine::{
    build_task_list, expiring_items, project_arrangement, search_items, summarize, ExpiringItem,
    ItemMatch, RearrangementEngine,
};
use crate::importer::CatalogImporter;
use crate::repository::{ActionLogRepository, SnapshotRepository};
use crate::seed;

// ==========================================
// RearrangeApi - 重排 API
// ==========================================
pub struct RearrangeApi {
    snapshot: Arc<Mutex<StationSnapshot>>,
    snapshot_repo: Option<Arc<SnapshotRepository>>,
    action_log_repo: Arc<ActionLogRepository>,
    engine: RearrangementEngine,
    config: EngineConfig,
    importer: CatalogImporter,
}

impl RearrangeApi {
    /// 创建新的 RearrangeApi 实例
    ///
    /// # 参数
    /// - snapshot: 初始舱内快照
    /// - snapshot_repo: 快照落盘仓储 (None 时仅驻留内存)
    /// - action_log_repo: 操作日志仓储
    /// - config: 引擎参数
    pub fn new(
        snapshot: StationSnapshot,
        snapshot_repo: Option<Arc<SnapshotRepository>>,
        action_log_repo: Arc<ActionLogRepository>,
        config: EngineConfig,
    ) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(snapshot)),
            snapshot_repo,
            action_log_repo,
            engine: RearrangementEngine::new(config.rearrangement),
            config,
            importer: CatalogImporter::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn lock_snapshot(&self) -> ApiResult<MutexGuard<'_, StationSnapshot>> {
        self.snapshot
            .lock()
            .map_err(|e| ApiError::InternalError(format!("快照锁获取失败: {}", e)))
    }

    /// 当前快照副本
    pub fn snapshot(&self) -> ApiResult<StationSnapshot> {
        Ok(self.lock_snapshot()?.clone())
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 舱内总览 (全局使用率 + 各货舱状态)
    pub fn get_status(&self) -> ApiResult<StationStatus> {
        let snapshot = self.lock_snapshot()?;
        Ok(StationStatus::from_snapshot(&snapshot, &self.config.thresholds))
    }

    /// 最近的操作日志 (最新在前)
    pub fn list_action_logs(&self, limit: usize) -> ApiResult<Vec<ActionLog>> {
        Ok(self.action_log_repo.find_recent(limit)?)
    }

    /// 指定类型的操作日志
    pub fn list_action_logs_by_type(
        &self,
        action_type: ActionType,
    ) -> ApiResult<Vec<ActionLog>> {
        Ok(self.action_log_repo.find_by_type(action_type)?)
    }

    /// 按名称/编号检索货物 (`today` 用于计算剩余保质天数)
    pub fn find_items(
        &self,
        query: &str,
        category: Option<&str>,
        today: NaiveDate,
    ) -> ApiResult<Vec<ItemMatch>> {
        let snapshot = self.lock_snapshot()?;
        Ok(search_items(&snapshot.items, query, category, today))
    }

    /// `within_days` 天内到期的货物, 按剩余天数升序
    pub fn list_expiring_items(
        &self,
        within_days: i64,
        today: NaiveDate,
    ) -> ApiResult<Vec<ExpiringItem>> {
        if within_days < 0 {
            return Err(ApiError::InvalidInput(format!(
                "临期窗口不能为负数: {}",
                within_days
            )));
        }
        let snapshot = self.lock_snapshot()?;
        Ok(expiring_items(&snapshot.items, today, within_days))
    }

    // ==========================================
    // 来货评估
    // ==========================================

    /// 评估来货并生成重排建议 (不修改快照)
    ///
    /// # 返回
    /// - Ok(RearrangementReport): 评估 + 方案 + 推演 + 任务清单
    /// - Err(InvalidInput): 体积为负或非有限数
    #[instrument(
        skip(self, shipment),
        fields(volume = shipment.volume, priority = %shipment.priority)
    )]
    pub fn evaluate_shipment(
        &self,
        shipment: &Shipment,
        actor: &str,
    ) -> ApiResult<RearrangementReport> {
        if !shipment.volume.is_finite() || shipment.volume < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "来货体积必须为非负数: {}",
                shipment.volume
            )));
        }

        let snapshot = self.lock_snapshot()?.clone();

        let suggestion = self.engine.suggest(
            &snapshot.capacity,
            &snapshot.zones,
            &snapshot.items,
            shipment,
        );
        let summary = summarize(&snapshot.capacity, shipment.volume, &suggestion.plan);
        let projection = project_arrangement(&snapshot.zones, &suggestion.plan);
        let tasks = build_task_list(&suggestion.plan, &self.config.tasks);

        if suggestion.evaluation.is_required && !summary.shortfall_met {
            warn!(
                space_needed = summary.space_needed,
                space_recovered = summary.space_recovered,
                "重排方案无法补足空间缺口"
            );
        }
        if projection.has_overflow() {
            warn!("多条搬移落位同一货舱, 推演后超出容量");
        }

        let log = ActionLog::new(
            Uuid::new_v4().to_string(),
            ActionType::EvaluateShipment,
            actor.to_string(),
        )
        .with_payload(&json!({
            "shipment": shipment,
            "outcome": suggestion.evaluation.outcome,
            "moves": suggestion.plan.len(),
            "space_recovered": suggestion.plan.space_recovered,
        }))
        .with_detail(format!(
            "来货 {} m³ ({}): {}",
            shipment.volume, shipment.priority, suggestion.evaluation.outcome
        ));
        let action_id = self.action_log_repo.insert(&log)?;

        info!(
            outcome = %suggestion.evaluation.outcome,
            moves = suggestion.plan.len(),
            "来货评估完成"
        );

        Ok(RearrangementReport {
            action_id,
            shipment: shipment.clone(),
            status_before: self.config.thresholds.classify_space(&snapshot.capacity),
            suggestion,
            summary,
            projection,
            tasks,
        })
    }

    // ==========================================
    // 方案确认 / 取消
    // ==========================================

    /// 执行重排方案
    ///
    /// 逐条校验 (按方案顺序, 每条校验看到前面搬移的结果):
    /// 1. 货物存在, 可移动, 且仍在方案记录的原货舱
    /// 2. 原货舱与目的货舱均存在且不同, 目的分区属于目的货舱
    /// 3. 目的货舱此刻剩余空间 >= 货物体积
    ///
    /// 任一条失败则整体不生效。全局已用容量不变 (舱内搬移)。
    #[instrument(skip(self, plan), fields(moves = plan.len()))]
    pub fn apply_plan(&self, plan: &RelocationPlan, actor: &str) -> ApiResult<ApplyOutcome> {
        if plan.is_empty() {
            return Err(ApiError::InvalidInput("重排方案为空".to_string()));
        }

        let mut guard = self.lock_snapshot()?;
        let mut working = guard.clone();
        let mut space_recovered = 0.0;

        for (move_index, mv) in plan.moves.iter().enumerate() {
            let conflict = |reason: String| ApiError::PlanConflict {
                move_index,
                item_id: mv.item.id.clone(),
                reason,
            };

            let item = working
                .find_item(&mv.item.id)
                .ok_or_else(|| conflict("货物不存在".to_string()))?;
            if !item.movable {
                return Err(conflict("货物不可移动".to_string()));
            }
            if item.current_zone() != mv.from_zone {
                return Err(conflict(format!(
                    "货物已不在 {} (当前位置 {})",
                    mv.from_zone, item.location
                )));
            }
            if mv.destination.zone == mv.from_zone {
                return Err(conflict("目的货舱与原货舱相同".to_string()));
            }
            let volume = item.volume;

            if working.find_zone(&mv.from_zone).is_none() {
                return Err(conflict(format!("原货舱不存在: {}", mv.from_zone)));
            }
            let dest = working
                .find_zone(&mv.destination.zone)
                .ok_or_else(|| conflict(format!("目的货舱不存在: {}", mv.destination.zone)))?;
            if !dest.sections.iter().any(|s| *s == mv.destination.section) {
                return Err(conflict(format!("目的分区不存在: {}", mv.destination)));
            }
            if !dest.can_fit(volume) {
                return Err(conflict(format!(
                    "目的货舱剩余空间不足: 需要 {} m³, 剩余 {} m³",
                    volume,
                    dest.available()
                )));
            }

            if let Some(from) = working.find_zone_mut(&mv.from_zone) {
                from.used -= volume;
            }
            if let Some(to) = working.find_zone_mut(&mv.destination.zone) {
                to.used += volume;
            }
            if let Some(item) = working.find_item_mut(&mv.item.id) {
                item.location = mv.destination.clone();
            }
            space_recovered += volume;
        }

        let log = ActionLog::new(
            Uuid::new_v4().to_string(),
            ActionType::ApplyRearrangement,
            actor.to_string(),
        )
        .with_payload(&plan.moves)
        .with_detail(format!(
            "执行重排: {} 条搬移, 腾出 {} m³",
            plan.len(),
            space_recovered
        ));
        let action_id = self.commit_snapshot(&mut guard, working, &log)?;

        info!(moves = plan.len(), space_recovered, "重排方案已执行");

        let status = StationStatus::from_snapshot(&guard, &self.config.thresholds);
        Ok(ApplyOutcome {
            action_id,
            moves_applied: plan.len(),
            space_recovered,
            zones: status.zones,
        })
    }

    /// 取消重排方案 (只记录日志, 快照不变)
    pub fn cancel_plan(
        &self,
        plan: &RelocationPlan,
        actor: &str,
        reason: Option<&str>,
    ) -> ApiResult<String> {
        let mut log = ActionLog::new(
            Uuid::new_v4().to_string(),
            ActionType::CancelRearrangement,
            actor.to_string(),
        )
        .with_payload(&json!({
            "moves": plan.len(),
            "space_recovered": plan.space_recovered,
            "reason": reason,
        }));
        if let Some(reason) = reason {
            log = log.with_detail(reason);
        }

        info!(moves = plan.len(), "重排方案已取消");
        Ok(self.action_log_repo.insert(&log)?)
    }

    // ==========================================
    // 数据维护
    // ==========================================

    /// 写入示例数据 (覆盖当前快照)
    pub fn seed_sample_data(&self, actor: &str) -> ApiResult<StationStatus> {
        let sample = seed::sample_snapshot();
        let detail = format!(
            "写入示例数据: {} 个货舱, {} 件货物",
            sample.zones.len(),
            sample.items.len()
        );
        self.replace_snapshot(sample, ActionType::Seed, actor, detail, None)
    }

    /// 导入货物清单 (替换全部货物)
    pub fn import_items(&self, file_path: &Path, actor: &str) -> ApiResult<StationStatus> {
        let items = self.importer.import_items(file_path)?;

        let mut next = self.snapshot()?;
        for item in &items {
            if next.find_zone(item.current_zone()).is_none() {
                warn!(item_id = %item.id, zone = %item.current_zone(), "货物所在货舱不在货舱清单中");
            }
        }
        let detail = format!("导入货物清单: {} 件", items.len());
        next.items = items;
        self.replace_snapshot(next, ActionType::ImportItems, actor, detail, Some(file_path))
    }

    /// 导入货舱清单 (替换全部货舱, 全局容量不变)
    pub fn import_zones(&self, file_path: &Path, actor: &str) -> ApiResult<StationStatus> {
        let zones = self.importer.import_zones(file_path)?;

        let mut next = self.snapshot()?;
        let detail = format!("导入货舱清单: {} 个", zones.len());
        next.zones = zones;
        for item in &next.items {
            if next.find_zone(item.current_zone()).is_none() {
                warn!(item_id = %item.id, zone = %item.current_zone(), "导入后货物所在货舱缺失");
            }
        }
        self.replace_snapshot(next, ActionType::ImportZones, actor, detail, Some(file_path))
    }

    /// 设定全局容量口径
    ///
    /// 要求: 数值有限, 0 <= used <= total
    pub fn set_capacity(&self, total: f64, used: f64, actor: &str) -> ApiResult<StationStatus> {
        if !total.is_finite() || !used.is_finite() || total < 0.0 || used < 0.0 || used > total {
            return Err(ApiError::InvalidInput(format!(
                "全局容量需满足 0 <= used <= total, 实际 used={} total={}",
                used, total
            )));
        }

        let mut next = self.snapshot()?;
        next.capacity = StorageCapacity {
            total_capacity: total,
            used_capacity: used,
        };
        let detail = format!("设定全局容量: {}/{} m³", used, total);
        self.replace_snapshot(next, ActionType::SetCapacity, actor, detail, None)
    }

    /// 记录一次货物取用 (更新最近取用日期)
    pub fn retrieve_item(
        &self,
        item_id: &str,
        actor: &str,
        today: NaiveDate,
    ) -> ApiResult<StoredItem> {
        let mut next = self.snapshot()?;
        let item = next
            .find_item_mut(item_id)
            .ok_or_else(|| ApiError::NotFound(format!("货物不存在: {}", item_id)))?;
        item.last_accessed = Some(today);
        let retrieved = item.clone();

        let detail = format!(
            "取用货物 {} ({}), 位置 {}",
            retrieved.id, retrieved.name, retrieved.location
        );
        self.replace_snapshot(next, ActionType::RetrieveItem, actor, detail, None)?;
        Ok(retrieved)
    }

    fn replace_snapshot(
        &self,
        next: StationSnapshot,
        action_type: ActionType,
        actor: &str,
        detail: String,
        source: Option<&Path>,
    ) -> ApiResult<StationStatus> {
        let log = ActionLog::new(Uuid::new_v4().to_string(), action_type, actor.to_string())
            .with_payload(&json!({
                "source": source.map(|p| p.display().to_string()),
                "capacity": next.capacity,
                "zones": next.zones.len(),
                "items": next.items.len(),
            }))
            .with_detail(detail);

        let mut guard = self.lock_snapshot()?;
        self.commit_snapshot(&mut guard, next, &log)?;

        info!(action_type = action_type.as_str(), "舱内快照已更新");
        Ok(StationStatus::from_snapshot(&guard, &self.config.thresholds))
    }

    /// 提交新快照: 先落盘, 再写操作日志, 两者都成功后才替换内存快照
    ///
    /// 日志写入失败时把磁盘上的快照恢复为 `current`, 保证不存在无日志的变更
    fn commit_snapshot(
        &self,
        current: &mut StationSnapshot,
        next: StationSnapshot,
        log: &ActionLog,
    ) -> ApiResult<String> {
        if let Some(repo) = &self.snapshot_repo {
            repo.save(&next)?;
        }

        let action_id = match self.action_log_repo.insert(log) {
            Ok(action_id) => action_id,
            Err(e) => {
                if let Some(repo) = &self.snapshot_repo {
                    if let Err(rollback) = repo.save(current) {
                        error!(error = %rollback, "操作日志写入失败后快照回滚失败");
                    }
                }
                warn!(action_type = %log.action_type, error = %e, "操作日志写入失败, 变更已撤销");
                return Err(e.into());
            }
        };

        *current = next;
        Ok(action_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::Location;
    use crate::domain::types::Priority;

    fn sample_api() -> RearrangeApi {
        RearrangeApi::new(
            seed::sample_snapshot(),
            None,
            Arc::new(ActionLogRepository::in_memory()),
            EngineConfig::default(),
        )
    }

    #[test]
    fn test_evaluate_rejects_negative_volume() {
        let api = sample_api();
        let err = api
            .evaluate_shipment(&Shipment::new(-1.0, Priority::Low), "tester")
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert!(api.list_action_logs(10).unwrap().is_empty());
    }

    #[test]
    fn test_apply_rejects_stale_origin() {
        let api = sample_api();
        let mut plan = RelocationPlan::empty(0.0, false);
        let mut moved = api.snapshot().unwrap().find_item("6").unwrap().clone();
        moved.location = Location::new("Bay A", "Section 1");
        plan.push(&moved, Location::new("Bay B", "Section 1"));

        let err = api.apply_plan(&plan, "tester").unwrap_err();
        assert!(matches!(err, ApiError::PlanConflict { move_index: 0, .. }));
        assert_eq!(api.snapshot().unwrap(), seed::sample_snapshot());
    }

    #[test]
    fn test_apply_rejects_unknown_section() {
        let api = sample_api();
        let item = api.snapshot().unwrap().find_item("6").unwrap().clone();
        let mut plan = RelocationPlan::empty(0.0, false);
        plan.push(&item, Location::new("Bay B", "Section 9"));

        assert!(matches!(
            api.apply_plan(&plan, "tester"),
            Err(ApiError::PlanConflict { .. })
        ));
    }

    #[test]
    fn test_cancel_records_log_only() {
        let api = sample_api();
        let before = api.snapshot().unwrap();
        api.cancel_plan(&RelocationPlan::empty(0.0, false), "tester", Some("crew busy"))
            .unwrap();

        assert_eq!(api.snapshot().unwrap(), before);
        let logs = api.list_action_logs_by_type(ActionType::CancelRearrangement).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].detail.as_deref(), Some("crew busy"));
    }
}
