//! Integration tests for the scenario store and exports.

use infra_store::{export_to_file, ExportFormat, ScenarioStore};
use kaizen_core::{ScenarioInputs, ValuationParams};
use kaizen_portfolio::ScenarioEngine;
use proptest::prelude::*;

// ============================================================================
// Store
// ============================================================================

#[test]
fn test_examples_survive_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScenarioStore::new(dir.path().join("kaizen_scenarios.json"));

    let mut engine = store.load(ValuationParams::default()).unwrap();
    assert!(engine.is_empty());
    engine.add_examples();
    engine
        .clone_scenario("Product Image Enhancement", None)
        .unwrap();
    store.save(&engine).unwrap();

    let reloaded = store.load(ValuationParams::default()).unwrap();
    assert_eq!(reloaded.names(), engine.names());
    for name in engine.names() {
        assert_eq!(reloaded.metrics(name).unwrap(), engine.metrics(name).unwrap());
    }
}

#[test]
fn test_store_tolerates_unknown_and_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.json");
    std::fs::write(
        &path,
        r#"[{
            "scenario_name": "Legacy",
            "product_name": "Widget",
            "current_unit_sales": 100,
            "current_returns": 10,
            "current_unit_cost": 5,
            "avg_sale_price": 20,
            "development_cost": 1000,
            "estimated_return_reduction": 20,
            "bubble_size": 42,
            "roi": 1.5
        }]"#,
    )
    .unwrap();

    let engine = ScenarioStore::new(&path)
        .load(ValuationParams::default())
        .unwrap();
    let legacy = engine.get("Legacy").unwrap();
    assert_eq!(legacy.return_reduction_pct, 20.0);
    assert_eq!(legacy.sales_increase_pct, 0.0);
    assert_eq!(legacy.time_to_implement, 1.0);
    assert!(legacy.return_processing_cost.is_none());
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_csv_export_has_one_row_per_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = ScenarioEngine::new();
    engine.add_examples();

    let path = export_to_file(&engine, ExportFormat::Csv, &dir.path().join("out.csv")).unwrap();
    let content = std::fs::read_to_string(path).unwrap();
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let names: Vec<String> = reader
        .records()
        .map(|r| r.unwrap().get(0).unwrap().to_string())
        .collect();
    assert_eq!(names, engine.names());
}

#[test]
fn test_json_export_can_be_imported() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = ScenarioEngine::new();
    engine.add_examples();

    let path = export_to_file(&engine, ExportFormat::Json, &dir.path().join("out.json")).unwrap();
    let mut imported = ScenarioEngine::new();
    imported
        .deserialize(&std::fs::read_to_string(path).unwrap())
        .unwrap();
    assert_eq!(imported.scenarios(), engine.scenarios());
}

// ============================================================================
// Property-based tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_store_round_trip_is_bit_exact(
        values in prop::collection::vec((0.0..1e7f64, 0.0..1.0f64, 0.0..1e4f64, -10.0..10.0f64), 1..6)
    ) {
        let dir = tempfile::tempdir().unwrap();
        let store = ScenarioStore::new(dir.path().join("scenarios.json"));

        let mut engine = ScenarioEngine::new();
        for (i, (sales, share, price, ucc)) in values.into_iter().enumerate() {
            let inputs = ScenarioInputs::builder(format!("S{}", i), "Widget")
                .current_unit_sales(sales)
                .current_returns(sales * share)
                .avg_sale_price(price)
                .current_unit_cost(price / 3.0)
                .unit_cost_change(ucc)
                .development_cost(sales / 7.0)
                .return_reduction_pct(share * 100.0)
                .build_unchecked();
            engine.add(inputs).unwrap();
        }
        store.save(&engine).unwrap();

        let loaded = store.load(ValuationParams::default()).unwrap();
        prop_assert_eq!(loaded.scenarios(), engine.scenarios());
    }
}
