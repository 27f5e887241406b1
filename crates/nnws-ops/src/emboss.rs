use nnws_kernel::KernelSolidHandle;
use nnws_types::SketchPlane;
use tracing::instrument;

use crate::diff;
use crate::kernel_ext::KernelBundle;
use crate::types::{OpError, OpResult, Provenance, RewriteReason};

/// Raise (positive `depth`) or engrave (negative `depth`) a text label on a planar face.
/// The input is consumed.
#[instrument(skip(kb, solid, plane), fields(solid = solid.raw()))]
pub fn execute_emboss(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    text: &str,
    plane: &SketchPlane,
    position: [f64; 2],
    height: f64,
    depth: f64,
) -> Result<OpResult, OpError> {
    if text.trim().is_empty() {
        return Err(OpError::InvalidParameter {
            reason: "emboss text is empty".to_string(),
        });
    }
    if height <= 0.0 {
        return Err(OpError::InvalidParameter {
            reason: "text height must be positive".to_string(),
        });
    }

    let before = diff::snapshot(kb.as_introspect(), solid);
    let handle = kb.emboss_text(solid, text, plane, position, height, depth)?;
    kb.delete_solid(solid)?;

    let after = diff::snapshot(kb.as_introspect(), &handle);
    let diff_result = diff::diff(&before, &after);

    Ok(OpResult::single(
        handle,
        Provenance::reshaped(diff_result, RewriteReason::Trimmed, Vec::new()),
    ))
}
