// ==========================================
// 目录导入集成测试
// ==========================================
// 测试目标: CSV → 货物/货舱 + 通过 API 替换快照
// ==========================================

mod test_helpers;

use station_stowage::api::ApiError;
use station_stowage::app::AppState;
use station_stowage::domain::{ActionType, EvaluationOutcome, Priority, Shipment};
use station_stowage::importer::{CatalogImporter, ImportError};
use test_helpers::{create_test_api, create_test_data_dir, write_csv};

const ZONES_CSV: &str = "\
id,name,capacity,used,sections,specialConditions
bay-a,Bay A,10,9,Section 1;Section 2,
bay-b,Bay B,10,2,Section 1,Temperature controlled
";

const ITEMS_CSV: &str = "\
id,name,category,location,volume,priority,movable,fragility,lastAccessed,expirationDate
1,Oxygen Canisters,Life Support,\"Bay A, Section 1\",3,Low,yes,High,2025-03-01,
2,Repair Kit,Maintenance,\"Bay A, Section 2\",2,Critical,no,Low,,
";

#[test]
fn test_import_zones_and_items_from_csv() {
    let dir = create_test_data_dir();
    let importer = CatalogImporter::new();

    let zones = importer
        .import_zones(write_csv(dir.path(), "zones.csv", ZONES_CSV))
        .unwrap();
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0].sections, vec!["Section 1", "Section 2"]);
    assert!(zones[0].special_conditions.is_none());
    assert_eq!(
        zones[1].special_conditions.as_deref(),
        Some("Temperature controlled")
    );

    let items = importer
        .import_items(write_csv(dir.path(), "items.csv", ITEMS_CSV))
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].location.section, "Section 1");
    assert!(items[0].movable);
    assert!(!items[1].movable);
    assert_eq!(items[1].priority, Priority::Critical);
}

#[test]
fn test_duplicate_ids_are_rejected_with_row_number() {
    let dir = create_test_data_dir();
    let csv = "id,name,zone,volume,priority\n1,A,Bay A,1,Low\n2,B,Bay A,1,Low\n1,C,Bay B,1,Low\n";
    let err = CatalogImporter::new()
        .import_items(write_csv(dir.path(), "dup.csv", csv))
        .unwrap_err();
    assert!(matches!(err, ImportError::DuplicateKey { row: 3, .. }));
}

#[test]
fn test_error_row_number_counts_blank_rows() {
    let dir = create_test_data_dir();
    // 第 2 数据行为空白行, 第 3 数据行 used 非法
    let csv = "name,capacity,used\nBay A,10,1\n\nBay C,10,lots\n";
    let err = CatalogImporter::new()
        .import_zones(write_csv(dir.path(), "zones.csv", csv))
        .unwrap_err();
    match err {
        ImportError::TypeConversionError { row, field, .. } => {
            assert_eq!(row, 3);
            assert_eq!(field, "used");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_missing_file_is_reported() {
    let dir = create_test_data_dir();
    let err = CatalogImporter::new()
        .import_zones(dir.path().join("absent.csv"))
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_api_import_replaces_catalog_and_drives_engine() {
    let dir = create_test_data_dir();
    let api = create_test_api();

    api.import_zones(&write_csv(dir.path(), "zones.csv", ZONES_CSV), "tester")
        .unwrap();
    let status = api
        .import_items(&write_csv(dir.path(), "items.csv", ITEMS_CSV), "tester")
        .unwrap();
    assert_eq!(status.zones.len(), 2);
    assert_eq!(status.item_count, 2);

    // 全局口径沿用示例数据 (100/70), 来货 35 → 缺口 5
    let report = api
        .evaluate_shipment(&Shipment::new(35.0, Priority::High), "tester")
        .unwrap();
    assert!(report.suggestion.evaluation.is_required);
    let plan = &report.suggestion.plan;
    assert_eq!(plan.len(), 1);
    assert_eq!(plan.moves[0].item.id, "1");
    assert_eq!(plan.moves[0].destination.zone, "Bay B");
    assert!(report.tasks.tasks[0].contains("fragile"));
    assert!(!report.summary.shortfall_met);

    assert_eq!(
        api.list_action_logs_by_type(ActionType::ImportItems)
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        api.list_action_logs_by_type(ActionType::ImportZones)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_api_import_error_leaves_snapshot_untouched() {
    let dir = create_test_data_dir();
    let api = create_test_api();
    let before = api.snapshot().unwrap();

    let bad = write_csv(dir.path(), "bad.csv", "name,capacity,used\nBay X,10,11\n");
    let err = api.import_zones(&bad, "tester").unwrap_err();
    assert!(matches!(err, ApiError::ImportError(_)));
    assert_eq!(api.snapshot().unwrap(), before);
}

#[test]
fn test_imported_station_needs_capacity_before_evaluation() {
    let dir = create_test_data_dir();
    let zones = "name,capacity,used,sections\nBay A,100,10,Section 1\nBay B,100,10,Section 1\n";
    let zones_path = write_csv(dir.path(), "zones.csv", zones);

    {
        let state = AppState::new(dir.path().join("data")).unwrap();
        let api = &state.rearrange_api;
        api.import_zones(&zones_path, "tester").unwrap();

        // 未设定全局容量 (0/0) 时任何来货都是强制重排
        let report = api
            .evaluate_shipment(&Shipment::new(1.0, Priority::Low), "tester")
            .unwrap();
        assert!(report.suggestion.evaluation.is_required);

        let status = api.set_capacity(200.0, 20.0, "tester").unwrap();
        assert_eq!(status.capacity.total_capacity, 200.0);
        assert_eq!(status.zones.len(), 2);

        assert!(matches!(
            api.set_capacity(10.0, 20.0, "tester"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            api.set_capacity(f64::NAN, 0.0, "tester"),
            Err(ApiError::InvalidInput(_))
        ));
    }

    // 重新打开后全局容量仍然有效
    let state = AppState::new(dir.path().join("data")).unwrap();
    let report = state
        .rearrange_api
        .evaluate_shipment(&Shipment::new(1.0, Priority::Low), "tester")
        .unwrap();
    assert_eq!(
        report.suggestion.evaluation.outcome,
        EvaluationOutcome::NoRearrangementNeeded
    );
    assert_eq!(
        state
            .rearrange_api
            .list_action_logs_by_type(ActionType::SetCapacity)
            .unwrap()
            .len(),
        1
    );
}
