use nnws_kernel::{ChamferKind, KernelId, KernelSolidHandle};
use nnws_types::{Role, TopoKind};
use tracing::instrument;

use crate::diff;
use crate::kernel_ext::KernelBundle;
use crate::types::{OpError, OpResult, Provenance, RewriteReason};

/// Execute a chamfer operation on specified edges of a solid. The input is consumed.
#[instrument(skip(kb, solid, edges), fields(solid = solid.raw(), edges = edges.len()))]
pub fn execute_chamfer(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    edges: &[KernelId],
    kind: ChamferKind,
) -> Result<OpResult, OpError> {
    if kind.distance() <= 0.0 {
        return Err(OpError::InvalidParameter {
            reason: "chamfer distance must be positive".to_string(),
        });
    }
    if let ChamferKind::DistanceAngle { angle_deg, .. } = kind {
        if angle_deg <= 0.0 || angle_deg >= 90.0 {
            return Err(OpError::InvalidParameter {
                reason: format!("chamfer angle {} outside (0, 90)", angle_deg),
            });
        }
    }
    if edges.is_empty() {
        return Err(OpError::InvalidParameter {
            reason: "no edges selected for chamfer".to_string(),
        });
    }

    let before = diff::snapshot(kb.as_introspect(), solid);
    let handle = kb.chamfer_edges(solid, edges, kind)?;
    kb.delete_solid(solid)?;

    let after = diff::snapshot(kb.as_introspect(), &handle);
    let diff_result = diff::diff(&before, &after);

    let role_assignments = diff_result
        .created
        .iter()
        .filter(|e| e.kind == TopoKind::Face)
        .enumerate()
        .map(|(index, e)| (e.kernel_id, Role::ChamferFace { index }))
        .collect();

    Ok(OpResult::single(
        handle,
        Provenance::reshaped(diff_result, RewriteReason::Trimmed, role_assignments),
    ))
}
