//! Tests for verification oracles.

use nnws_engine::{AnchorParams, Design, HookParams, InsertParams, WallParams};
use nnws_kernel::{MockKernel, MockOp};
use test_harness::oracle::*;
use test_harness::Workbench;

fn wall(width: usize, height: usize) -> Workbench {
    let mut w = Workbench::mock();
    w.generate(&Design::Wall(WallParams::standard(width, height, false)))
        .unwrap();
    w
}

// ── Body oracles ────────────────────────────────────────────────────────

#[test]
fn bodies_named_passes_after_generation() {
    let w = wall(2, 1);
    let verdict = check_bodies_named(w.kernel(), w.last().unwrap());
    assert!(verdict.passed, "{}", verdict.detail);
}

#[test]
fn bodies_have_faces_for_every_accessory() {
    for design in [
        Design::Insert(InsertParams::default()),
        Design::Hook(HookParams::default()),
        Design::OffsetAnchor(AnchorParams::default()),
    ] {
        let mut w = Workbench::mock();
        w.generate(&design).unwrap();
        let verdict = check_bodies_have_faces(w.kernel(), w.last().unwrap());
        assert!(verdict.passed, "{}: {}", design.component(), verdict.detail);
    }
}

#[test]
fn body_count_reports_value() {
    let w = wall(3, 1);
    let design = w.last().unwrap();
    let ok = check_body_count(design, 3);
    assert!(ok.passed);
    assert_eq!(ok.value, Some(3.0));
    let bad = check_body_count(design, 4);
    assert!(!bad.passed);
    assert!(bad.detail.contains("expected 4"));
}

#[test]
fn no_warnings_fails_on_skipped_fillets() {
    let mut w = Workbench::mock();
    w.fail_on(MockOp::Fillet);
    w.generate(&Design::Wall(WallParams::standard(1, 1, false)))
        .unwrap();
    let verdict = check_no_warnings(w.last().unwrap());
    assert!(!verdict.passed);
    assert!(verdict.value.unwrap() >= 1.0);
}

// ── Lattice oracles ─────────────────────────────────────────────────────

#[test]
fn cell_spacing_passes_for_tiled_wall() {
    let w = wall(3, 3);
    let verdict = check_cell_spacing(w.kernel(), w.last().unwrap());
    assert!(verdict.passed, "{}", verdict.detail);
    assert!(verdict.value.is_some());
}

#[test]
fn cell_spacing_single_cell() {
    let w = wall(1, 1);
    let verdict = check_cell_spacing(w.kernel(), w.last().unwrap());
    assert!(verdict.passed);
    assert!(verdict.value.is_none());
}

#[test]
fn extent_bounds_anchor_height() {
    let mut w = Workbench::mock();
    w.generate(&Design::Anchor(AnchorParams::default())).unwrap();
    let design = w.last().unwrap();
    assert!(check_extent_at_most(w.kernel(), design, 2, 0.4).passed);
    assert!(!check_extent_at_most(w.kernel(), design, 2, 0.1).passed);
}

#[test]
fn unknown_bodies_fail_instead_of_panicking() {
    let w = wall(2, 1);
    let design = w.last().unwrap().clone();
    // a fresh session knows none of the handles
    let verdict = check_cell_spacing(&MockKernel::new(), &design);
    assert!(!verdict.passed);
    assert!(verdict.detail.contains("no bounding box"), "{}", verdict.detail);
}
