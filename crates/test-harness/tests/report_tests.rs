//! Tests for the report module.

use nnws_engine::{AnchorParams, Design, ShelfParams, WallParams};
use test_harness::{HarnessError, Workbench};

#[test]
fn report_needs_a_design() {
    let w = Workbench::mock();
    assert!(matches!(w.report(), Err(HarnessError::NothingGenerated)));
}

#[test]
fn wall_report_lists_cells_and_oracles() {
    let mut w = Workbench::mock();
    w.generate(&Design::Wall(WallParams::standard(2, 1, true)))
        .unwrap();
    let report = w.report().unwrap();
    let text = report.to_text();
    assert!(text.contains("NNWS Design Report: Wall"), "{}", text);
    assert!(text.contains("Bodies (2):"), "{}", text);
    assert!(text.contains("\"Wall (2)\""), "{}", text);
    assert!(text.contains("[PASS] cell_spacing"), "{}", text);
    assert!(text.contains("Warnings: none"), "{}", text);
    assert!(report.all_passed());
}

#[test]
fn report_lists_stages_in_order() {
    let mut w = Workbench::mock();
    w.generate(&Design::Anchor(AnchorParams::default())).unwrap();
    let text = w.report().unwrap().to_text();
    let base = text.find("base geometry").unwrap();
    let hole = text.find("screw hole").unwrap();
    assert!(base < hole, "{}", text);
}

#[test]
fn report_serializes_to_json() {
    let mut w = Workbench::mock();
    w.generate(&Design::Shelf(ShelfParams::default())).unwrap();
    let json = w.report().unwrap().to_json();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["component"], "Shelf");
    assert_eq!(value["bodies"].as_array().unwrap().len(), 1);
}

#[test]
fn workbench_exports_latest_design() {
    let dir = std::env::temp_dir().join(format!("nnws-harness-{}", uuid::Uuid::new_v4()));
    let mut w = Workbench::mock();
    w.generate(&Design::Wall(WallParams::standard(1, 1, false)))
        .unwrap();
    let bytes = w.export(&dir.join("cell.stl")).unwrap();
    assert!(bytes > 0);
    assert!(dir.join("cell.stl").is_file());
    std::fs::remove_dir_all(&dir).unwrap();
}
