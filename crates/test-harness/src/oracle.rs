//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Oracles never panic, so one pass can collect every failure.

use nnws_engine::constants::CELL_SIZE;
use nnws_engine::GeneratedDesign;
use nnws_kernel::KernelIntrospect;

use crate::helpers::{body_boxes, min_center_spacing};

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

// ── Body oracles ────────────────────────────────────────────────────────────

/// Every body carries its generated name in the kernel.
pub fn check_bodies_named(
    introspect: &dyn KernelIntrospect,
    design: &GeneratedDesign,
) -> OracleVerdict {
    let mismatched: Vec<String> = design
        .bodies
        .iter()
        .filter(|b| introspect.solid_name(&b.handle).as_deref() != Some(b.name.as_str()))
        .map(|b| b.name.clone())
        .collect();
    if mismatched.is_empty() {
        OracleVerdict::pass(
            "bodies_named",
            format!("{} bodies named", design.bodies.len()),
        )
    } else {
        OracleVerdict::fail(
            "bodies_named",
            format!("unnamed in kernel: [{}]", mismatched.join(", ")),
        )
    }
}

/// Every body has faces and a non-empty bounding box.
pub fn check_bodies_have_faces(
    introspect: &dyn KernelIntrospect,
    design: &GeneratedDesign,
) -> OracleVerdict {
    let empty: Vec<String> = design
        .bodies
        .iter()
        .filter(|b| {
            introspect.list_faces(&b.handle).is_empty()
                || introspect
                    .bounding_box(&b.handle)
                    .map_or(true, |bbox| bbox.is_empty())
        })
        .map(|b| b.name.clone())
        .collect();
    if empty.is_empty() {
        OracleVerdict::pass("bodies_have_faces", "all bodies solid".to_string())
    } else {
        OracleVerdict::fail(
            "bodies_have_faces",
            format!("empty bodies: [{}]", empty.join(", ")),
        )
    }
}

/// Exactly `expected` bodies.
pub fn check_body_count(design: &GeneratedDesign, expected: usize) -> OracleVerdict {
    let actual = design.bodies.len();
    let verdict = if actual == expected {
        OracleVerdict::pass("body_count", format!("{} bodies", actual))
    } else {
        OracleVerdict::fail(
            "body_count",
            format!("expected {} bodies, got {}", expected, actual),
        )
    };
    verdict.with_value(actual as f64)
}

/// No cosmetic step was skipped.
pub fn check_no_warnings(design: &GeneratedDesign) -> OracleVerdict {
    if design.warnings.is_empty() {
        OracleVerdict::pass("no_warnings", "no cosmetic steps skipped".to_string())
    } else {
        OracleVerdict::fail(
            "no_warnings",
            format!(
                "{} skipped: {}",
                design.warnings.len(),
                design.warnings.join(" | ")
            ),
        )
        .with_value(design.warnings.len() as f64)
    }
}

// ── Lattice oracles ─────────────────────────────────────────────────────────

/// Wall cells sit at least one cell size apart, so no two cells share a slot.
pub fn check_cell_spacing(
    introspect: &dyn KernelIntrospect,
    design: &GeneratedDesign,
) -> OracleVerdict {
    let boxes = match body_boxes(introspect, design) {
        Ok(boxes) => boxes,
        Err(e) => return OracleVerdict::fail("cell_spacing", e.to_string()),
    };
    match min_center_spacing(&boxes) {
        None => OracleVerdict::pass("cell_spacing", "single cell".to_string()),
        Some(d) if d >= CELL_SIZE - 1e-6 => OracleVerdict::pass(
            "cell_spacing",
            format!("closest cells {:.4} apart", d),
        )
        .with_value(d),
        Some(d) => OracleVerdict::fail(
            "cell_spacing",
            format!("closest cells {:.4} apart, expected >= {}", d, CELL_SIZE),
        )
        .with_value(d),
    }
}

/// Every body fits within `extent` along `axis` (0 = X, 1 = Y, 2 = Z).
pub fn check_extent_at_most(
    introspect: &dyn KernelIntrospect,
    design: &GeneratedDesign,
    axis: usize,
    extent: f64,
) -> OracleVerdict {
    let boxes = match body_boxes(introspect, design) {
        Ok(boxes) => boxes,
        Err(e) => return OracleVerdict::fail("extent", e.to_string()),
    };
    let widest = boxes
        .iter()
        .map(|(_, b)| b.size()[axis])
        .fold(0.0f64, f64::max);
    if widest <= extent + 1e-9 {
        OracleVerdict::pass("extent", format!("axis {} extent {:.4}", axis, widest)).with_value(widest)
    } else {
        OracleVerdict::fail(
            "extent",
            format!("axis {} extent {:.4} exceeds {:.4}", axis, widest, extent),
        )
        .with_value(widest)
    }
}
