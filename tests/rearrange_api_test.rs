// ==========================================
// RearrangeApi 集成测试
// ==========================================
// 测试目标: 评估 → 确认执行 / 取消 的完整流程
// 覆盖范围: 快照落盘、方案冲突校验、操作日志
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use station_stowage::api::ApiError;
use station_stowage::app::AppState;
use station_stowage::domain::{
    ActionType, EvaluationOutcome, Location, Priority, RelocationMove, RelocationPlan, Shipment,
};
use station_stowage::{seed, RearrangeApi};
use test_helpers::{create_test_api, create_test_data_dir};

fn manual_move(api: &RearrangeApi, item_id: &str, dest_zone: &str) -> RelocationMove {
    let item = api.snapshot().unwrap().find_item(item_id).unwrap().clone();
    RelocationMove {
        from_zone: item.location.zone.clone(),
        destination: Location::new(dest_zone, "Section 1"),
        volume_recovered: item.volume,
        item,
    }
}

fn plan_of(moves: Vec<RelocationMove>) -> RelocationPlan {
    RelocationPlan {
        space_recovered: moves.iter().map(|m| m.volume_recovered).sum(),
        moves,
        space_needed: 0.0,
        is_required: false,
    }
}

#[test]
fn test_evaluate_apply_and_reload() {
    station_stowage::logging::init_test();
    let dir = create_test_data_dir();

    {
        let state = AppState::new(dir.path()).unwrap();
        let api = &state.rearrange_api;
        api.seed_sample_data("tester").unwrap();

        // 示例数据全局 70/100, 来货 25 → 95% 触发建议性重排
        let report = api
            .evaluate_shipment(&Shipment::new(25.0, Priority::High), "tester")
            .unwrap();
        assert_eq!(
            report.suggestion.evaluation.outcome,
            EvaluationOutcome::AdvisoryOptimization
        );
        assert_eq!(report.suggestion.plan.len(), 1);
        assert_eq!(report.tasks.estimated_minutes, 15);
        assert_eq!(report.tasks.tasks.len(), 2);
        assert_eq!(report.summary.total_space_after, 36.0);

        let outcome = api.apply_plan(&report.suggestion.plan, "tester").unwrap();
        assert_eq!(outcome.moves_applied, 1);
        assert_eq!(outcome.space_recovered, 6.0);
    }

    // 重新打开数据目录, 快照已持久化
    let state = AppState::new(dir.path()).unwrap();
    let snapshot = state.rearrange_api.snapshot().unwrap();
    assert_eq!(snapshot.find_zone("Bay A").unwrap().used, 27.0);
    assert_eq!(snapshot.find_zone("Bay B").unwrap().used, 28.0);
    assert_eq!(
        snapshot.find_item("5").unwrap().location,
        Location::new("Bay B", "Section 1")
    );
    // 舱内搬移不改变全局口径
    assert_eq!(snapshot.capacity.used_capacity, 70.0);

    let kinds: Vec<Option<ActionType>> = state
        .rearrange_api
        .list_action_logs(10)
        .unwrap()
        .iter()
        .map(|l| l.kind())
        .collect();
    assert_eq!(kinds.len(), 3);
    assert!(kinds.contains(&Some(ActionType::Seed)));
    assert!(kinds.contains(&Some(ActionType::EvaluateShipment)));
    assert!(kinds.contains(&Some(ActionType::ApplyRearrangement)));
}

#[test]
fn test_applying_same_plan_twice_conflicts() {
    let api = create_test_api();
    let plan = plan_of(vec![manual_move(&api, "5", "Bay B")]);

    api.apply_plan(&plan, "tester").unwrap();
    let err = api.apply_plan(&plan, "tester").unwrap_err();
    assert!(matches!(err, ApiError::PlanConflict { move_index: 0, .. }));
}

#[test]
fn test_plan_is_all_or_nothing() {
    let api = create_test_api();
    let before = api.snapshot().unwrap();

    // Bay B 剩余 8: 先放 6 后只剩 2, 第二条 (9 m³) 放不下
    let plan = plan_of(vec![
        manual_move(&api, "5", "Bay B"),
        manual_move(&api, "6", "Bay B"),
    ]);

    let err = api.apply_plan(&plan, "tester").unwrap_err();
    match err {
        ApiError::PlanConflict {
            move_index,
            item_id,
            ..
        } => {
            assert_eq!(move_index, 1);
            assert_eq!(item_id, "6");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(api.snapshot().unwrap(), before);
    assert!(api
        .list_action_logs_by_type(ActionType::ApplyRearrangement)
        .unwrap()
        .is_empty());
}

#[test]
fn test_immovable_item_cannot_be_applied() {
    let api = create_test_api();
    let plan = plan_of(vec![manual_move(&api, "3", "Bay B")]);
    assert!(matches!(
        api.apply_plan(&plan, "tester"),
        Err(ApiError::PlanConflict { .. })
    ));
}

#[test]
fn test_empty_plan_is_invalid_input() {
    let api = create_test_api();
    assert!(matches!(
        api.apply_plan(&RelocationPlan::empty(0.0, false), "tester"),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_status_reports_thresholds() {
    let api = create_test_api();
    let status = api.get_status().unwrap();
    assert_eq!(status.zones.len(), 4);
    assert_eq!(status.item_count, 8);
    assert_eq!(status.zones_used_total, 90.0);
    assert_eq!(status.status.to_string(), "NORMAL");

    let bay_a = &status.zones[0];
    assert_eq!(bay_a.name, "Bay A");
    assert_eq!(bay_a.item_count, 3);
    // 33/35 ≈ 94.3%
    assert_eq!(bay_a.status.to_string(), "ALERT");
}

#[test]
fn test_failed_log_write_rolls_back_changes() {
    let dir = create_test_data_dir();

    {
        let state = AppState::new(dir.path()).unwrap();
        let api = &state.rearrange_api;
        api.seed_sample_data("tester").unwrap();
        let report = api
            .evaluate_shipment(&Shipment::new(35.0, Priority::High), "tester")
            .unwrap();
        assert!(!report.suggestion.plan.is_empty());
        let before = api.snapshot().unwrap();

        // 日志临时文件路径被目录占用, 日志写入必然失败
        let blocker = dir.path().join("action_log.json.tmp");
        std::fs::create_dir(&blocker).unwrap();

        assert!(api.apply_plan(&report.suggestion.plan, "tester").is_err());
        assert!(api.set_capacity(200.0, 70.0, "tester").is_err());
        assert_eq!(api.snapshot().unwrap(), before);

        std::fs::remove_dir(&blocker).unwrap();
    }

    // 磁盘上的快照同样未变
    let state = AppState::new(dir.path()).unwrap();
    assert_eq!(
        state.rearrange_api.snapshot().unwrap(),
        seed::sample_snapshot()
    );
    assert!(state
        .rearrange_api
        .list_action_logs_by_type(ActionType::ApplyRearrangement)
        .unwrap()
        .is_empty());
    assert!(state
        .rearrange_api
        .list_action_logs_by_type(ActionType::SetCapacity)
        .unwrap()
        .is_empty());
}

#[test]
fn test_find_items_and_expiring_items() {
    let api = create_test_api();
    let today = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();

    let hits = api.find_items("rations", None, today).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].item.id, "1");
    assert_eq!(hits[0].days_to_expiry, Some(5));
    assert!(hits[0].expiring_soon);

    let supplies = api.find_items("", Some("Supplies"), today).unwrap();
    let ids: Vec<&str> = supplies.iter().map(|m| m.item.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "7"]);

    // 食品 09-15 (5 天), 饮水 10-30 (50 天), 药品 2026-01-20
    let soon = api.list_expiring_items(7, today).unwrap();
    assert_eq!(soon.len(), 1);
    assert_eq!(soon[0].item.id, "1");

    let wide = api.list_expiring_items(60, today).unwrap();
    let ids: Vec<&str> = wide.iter().map(|e| e.item.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "7"]);

    assert!(matches!(
        api.list_expiring_items(-1, today),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_retrieve_item_updates_last_accessed() {
    let api = create_test_api();
    let today = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

    let item = api.retrieve_item("4", "tester", today).unwrap();
    assert_eq!(item.last_accessed, Some(today));
    assert_eq!(
        api.snapshot().unwrap().find_item("4").unwrap().last_accessed,
        Some(today)
    );
    assert_eq!(
        api.list_action_logs_by_type(ActionType::RetrieveItem)
            .unwrap()
            .len(),
        1
    );

    assert!(matches!(
        api.retrieve_item("99", "tester", today),
        Err(ApiError::NotFound(_))
    ));
}
