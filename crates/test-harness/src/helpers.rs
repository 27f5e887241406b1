//! Harness error type and small geometry helpers.

use nnws_engine::{EngineError, GeneratedDesign};
use nnws_export::ExportError;
use nnws_kernel::{BoundingBox, KernelIntrospect};

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("no design generated yet")]
    NothingGenerated,

    #[error("body not found: {name}")]
    BodyNotFound { name: String },

    #[error("no bounding box for body: {name}")]
    NoBoundingBox { name: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

/// Bounding box of every body, paired with its name.
pub fn body_boxes(
    introspect: &dyn KernelIntrospect,
    design: &GeneratedDesign,
) -> Result<Vec<(String, BoundingBox)>, HarnessError> {
    design
        .bodies
        .iter()
        .map(|b| {
            introspect
                .bounding_box(&b.handle)
                .map(|bbox| (b.name.clone(), bbox))
                .ok_or_else(|| HarnessError::NoBoundingBox {
                    name: b.name.clone(),
                })
        })
        .collect()
}

pub fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    (0..3).map(|i| (a[i] - b[i]).powi(2)).sum::<f64>().sqrt()
}

/// Smallest distance between any two body centers, `None` below two bodies.
pub fn min_center_spacing(boxes: &[(String, BoundingBox)]) -> Option<f64> {
    let centers: Vec<[f64; 3]> = boxes.iter().map(|(_, b)| b.center()).collect();
    let mut best: Option<f64> = None;
    for (i, a) in centers.iter().enumerate() {
        for b in &centers[i + 1..] {
            let d = distance(*a, *b);
            best = Some(best.map_or(d, |m| m.min(d)));
        }
    }
    best
}
