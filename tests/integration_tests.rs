use vmms_dashboard::analyzers::dashboard::{DashboardSettings, vehicle_dashboard};
use vmms_dashboard::analyzers::ranking::top_k;
use vmms_dashboard::charts::{ChartRegistry, JsonFileSurface};
use vmms_dashboard::parser::{parse_feature_importance, parse_observations};

#[test]
fn test_full_pipeline() {
    let data = parse_observations(include_bytes!("fixtures/sample_data.json"))
        .expect("Failed to parse sample data");
    let importances = parse_feature_importance(include_bytes!("fixtures/feature_importance.json"))
        .expect("Failed to parse feature importance");

    let dashboard = vehicle_dashboard(&data, &importances, &DashboardSettings::default())
        .expect("Failed to build dashboard");

    let dist = &dashboard.chart("cost-distribution-chart").unwrap().series;
    assert_eq!(dist.len(), 8);
    assert_eq!(dist.points[0].label, "$0-$200");
    assert_eq!(dist.points[7].label, "$1400-$1600");
    assert_eq!(dist.values(), vec![2.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0]);

    let make = &dashboard.chart("make-chart").unwrap().series;
    assert_eq!(
        make.labels(),
        vec!["Toyota", "Honda", "Ford", "Chevrolet", "BMW", "Tesla"]
    );
    assert_eq!(make.values(), vec![950.0, 188.0, 903.5, 0.0, 1400.0, 200.0]);

    let condition = &dashboard.chart("condition-chart").unwrap().series;
    assert_eq!(condition.values(), vec![538.75, 1393.625, 188.0]);

    let age = &dashboard.chart("age-chart").unwrap().series;
    assert_eq!(age.labels(), vec!["1", "2", "4", "6", "8"]);
    assert_eq!(age.values()[0], 175.0);

    let features = &dashboard.chart("feature-importance-chart").unwrap().series;
    assert_eq!(features.len(), 10);
    assert_eq!(features.points[0].label, "num__mileage");
    assert_eq!(features.points[2].label, "num__vehicle_age");
    assert_eq!(features.points[3].label, "num__fault_codes");
    assert_eq!(features.points[9].label, "num__service_interval");

    assert_eq!(dashboard.summary.count, 7);
    let mileage = &dashboard.chart("mileage-chart").unwrap().series;
    assert_eq!(mileage.scatter.len(), 7);
}

#[test]
fn test_top_k_leaves_input_order() {
    let importances =
        parse_feature_importance(include_bytes!("fixtures/feature_importance.json")).unwrap();
    let before = importances.clone();

    let ranked = top_k(&importances, 3);

    assert_eq!(ranked.len(), 3);
    assert_eq!(importances, before);
}

#[test]
fn test_publish_writes_one_document_per_chart() {
    let data = parse_observations(include_bytes!("fixtures/sample_data.json")).unwrap();
    let dashboard = vehicle_dashboard(&data, &[], &DashboardSettings::default()).unwrap();

    let dir = std::env::temp_dir().join("vmms_dashboard_it_publish");
    let _ = std::fs::remove_dir_all(&dir);

    let mut registry = ChartRegistry::new(JsonFileSurface::new(&dir).unwrap());
    dashboard.publish(&mut registry).unwrap();
    // publishing again replaces rather than accumulates
    dashboard.publish(&mut registry).unwrap();

    assert_eq!(registry.len(), dashboard.charts.len());
    let files = std::fs::read_dir(&dir).unwrap().count();
    assert_eq!(files, dashboard.charts.len());

    assert!(registry.contains("mileage-chart"));
    let doc: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.join("mileage-chart.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(doc["kind"], "scatter");
    assert_eq!(doc["points"].as_array().unwrap().len(), 7);

    std::fs::remove_dir_all(&dir).unwrap();
}
