use nnws_kernel::{HoleSpec, KernelSolidHandle};
use nnws_types::{Role, TopoKind};
use tracing::instrument;

use crate::diff;
use crate::kernel_ext::KernelBundle;
use crate::types::{OpError, OpResult, Provenance, RewriteReason};

/// Drill a simple or countersunk hole. The input is consumed.
#[instrument(skip(kb, solid), fields(solid = solid.raw()))]
pub fn execute_hole(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    hole: &HoleSpec,
) -> Result<OpResult, OpError> {
    if hole.diameter <= 0.0 || hole.depth <= 0.0 {
        return Err(OpError::InvalidParameter {
            reason: "hole diameter and depth must be positive".to_string(),
        });
    }
    if let Some(cs) = hole.countersink {
        if cs.diameter <= hole.diameter {
            return Err(OpError::InvalidParameter {
                reason: format!(
                    "countersink diameter {} must exceed hole diameter {}",
                    cs.diameter, hole.diameter
                ),
            });
        }
    }

    let before = diff::snapshot(kb.as_introspect(), solid);
    let handle = kb.make_hole(solid, hole)?;
    kb.delete_solid(solid)?;

    let after = diff::snapshot(kb.as_introspect(), &handle);
    let diff_result = diff::diff(&before, &after);

    let role_assignments = diff_result
        .created
        .iter()
        .filter(|e| e.kind == TopoKind::Face)
        .filter_map(|e| match e.signature.surface_type.as_deref() {
            Some("cylindrical") => Some((e.kernel_id, Role::HoleWall)),
            Some("conical") => Some((e.kernel_id, Role::CountersinkFace)),
            _ => None,
        })
        .collect();

    Ok(OpResult::single(
        handle,
        Provenance::reshaped(diff_result, RewriteReason::Trimmed, role_assignments),
    ))
}
