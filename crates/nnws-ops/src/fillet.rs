use nnws_kernel::{KernelId, KernelSolidHandle};
use nnws_types::{Role, TopoKind};
use tracing::instrument;

use crate::diff;
use crate::kernel_ext::KernelBundle;
use crate::types::{OpError, OpResult, Provenance, RewriteReason};

/// Execute a fillet operation on specified edges of a solid. The input is consumed.
#[instrument(skip(kb, solid, edges), fields(solid = solid.raw(), edges = edges.len()))]
pub fn execute_fillet(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    edges: &[KernelId],
    radius: f64,
) -> Result<OpResult, OpError> {
    if radius <= 0.0 {
        return Err(OpError::InvalidParameter {
            reason: "fillet radius must be positive".to_string(),
        });
    }
    if edges.is_empty() {
        return Err(OpError::InvalidParameter {
            reason: "no edges selected for fillet".to_string(),
        });
    }

    let before = diff::snapshot(kb.as_introspect(), solid);
    let handle = kb.fillet_edges(solid, edges, radius)?;
    kb.delete_solid(solid)?;

    let after = diff::snapshot(kb.as_introspect(), &handle);
    let diff_result = diff::diff(&before, &after);

    // Faces the fillet created are the blends; surviving faces keep no special role.
    let role_assignments = diff_result
        .created
        .iter()
        .filter(|e| e.kind == TopoKind::Face)
        .enumerate()
        .map(|(index, e)| (e.kernel_id, Role::FilletFace { index }))
        .collect();

    Ok(OpResult::single(
        handle,
        Provenance::reshaped(diff_result, RewriteReason::Trimmed, role_assignments),
    ))
}
