use nnws_kernel::{KernelId, KernelSolidHandle};
use nnws_types::{Role, TopoKind};
use tracing::{debug, instrument};

use crate::diff;
use crate::kernel_ext::KernelBundle;
use crate::types::{OpError, OpResult, Provenance, RewriteReason};

/// Which half of a split to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSide {
    /// Material opposite the plane normal.
    Below,
    /// Material on the side the plane normal points to.
    Above,
}

/// Split a solid with a plane and keep one side; the other side is deleted.
/// The new face on the cutting plane gets `SplitFace`.
#[instrument(skip(kb, solid), fields(solid = solid.raw()))]
pub fn execute_split(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    plane_origin: [f64; 3],
    plane_normal: [f64; 3],
    keep: SplitSide,
) -> Result<OpResult, OpError> {
    let before = diff::snapshot(kb.as_introspect(), solid);
    let split = kb.split_solid(solid, plane_origin, plane_normal)?;
    let (kept, discarded) = match keep {
        SplitSide::Below => (split.below, split.above),
        SplitSide::Above => (split.above, split.below),
    };
    if let Some(other) = discarded {
        kb.delete_solid(&other)?;
    }
    let handle = kept.ok_or(OpError::NoOutput)?;

    let after = diff::snapshot(kb.as_introspect(), &handle);
    let diff_result = diff::diff(&before, &after);

    let len = (plane_normal[0].powi(2) + plane_normal[1].powi(2) + plane_normal[2].powi(2)).sqrt();
    let unit = plane_normal.map(|c| c / len.max(1e-12));
    let role_assignments: Vec<(KernelId, Role)> = diff_result
        .created
        .iter()
        .filter(|e| e.kind == TopoKind::Face)
        .filter(|e| {
            let on_plane = e
                .signature
                .plane_distance(plane_origin, unit)
                .map(|d| d.abs() < 1e-6)
                .unwrap_or(false);
            let parallel = e
                .signature
                .normal
                .map(|n| (n[0] * unit[0] + n[1] * unit[1] + n[2] * unit[2]).abs() > 1.0 - 1e-6)
                .unwrap_or(false);
            on_plane && parallel
        })
        .map(|e| (e.kernel_id, Role::SplitFace))
        .collect();
    debug!(split_faces = role_assignments.len(), ?keep, "split solid");

    Ok(OpResult::single(
        handle,
        Provenance::reshaped(diff_result, RewriteReason::Split, role_assignments),
    ))
}
