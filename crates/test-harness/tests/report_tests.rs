//! Tests for the report module.

use fault_surface::MultiSurface;
use test_harness::fixtures::{north_dipping_pair, two_section_surface};
use test_harness::helpers::site_grid;
use test_harness::SurfaceReport;

#[test]
fn report_lists_sections_and_checks() {
    let ms = two_section_surface().unwrap();
    let report = SurfaceReport::build(&ms, &site_grid(&ms.get_bounding_box(), 0.1, 5));
    let text = report.to_text();
    assert!(text.contains("Sections (2):"), "{}", text);
    assert!(text.contains("Oracle Results (7 checks)"), "{}", text);
    assert!(text.contains("[PASS] edge_set"), "{}", text);
    assert!(text.contains("Bounding Box"), "Should have bounding box line");
    assert!(report.all_passed());
    assert_eq!(report.to_string(), text);
}

#[test]
fn report_json_round_trips_through_value() {
    let ms = MultiSurface::from_surfaces(north_dipping_pair().unwrap()).unwrap();
    let report = SurfaceReport::build(&ms, &site_grid(&ms.get_bounding_box(), 0.1, 4));
    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let sections = value["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["reversed"], serde_json::Value::Bool(false));
    assert!(value["checks"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["passed"] == serde_json::Value::Bool(true)));
    let strike = value["strike"].as_f64().unwrap();
    assert!((strike - 270.0).abs() < 1.0, "strike {}", strike);
}
