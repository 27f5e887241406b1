use nnws_kernel::{KernelId, KernelIntrospect, KernelSolidHandle};
use nnws_types::{Role, TopoKind, TopoSignature};
use tracing::{debug, instrument};

use crate::diff::{self, TopoSnapshot};
use crate::kernel_ext::KernelBundle;
use crate::types::{OpError, OpResult, Provenance, RewriteReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanKind {
    Union,
    Subtract,
    Intersect,
}

/// Combine two solids. Both inputs are consumed.
///
/// `carried` holds roles previously assigned to entities of either input; each one is
/// moved onto the matching entity of the result, so tags such as thread seams survive
/// the join.
#[instrument(skip(kb, body_a, body_b, carried), fields(a = body_a.raw(), b = body_b.raw()))]
pub fn execute_boolean(
    kb: &mut dyn KernelBundle,
    body_a: &KernelSolidHandle,
    body_b: &KernelSolidHandle,
    kind: BooleanKind,
    carried: &[(KernelId, Role)],
) -> Result<OpResult, OpError> {
    let snap_a = diff::snapshot(kb.as_introspect(), body_a);
    let snap_b = diff::snapshot(kb.as_introspect(), body_b);
    let before = snap_a.merged(&snap_b);

    let handle = match kind {
        BooleanKind::Union => kb.boolean_union(body_a, body_b)?,
        BooleanKind::Subtract => kb.boolean_subtract(body_a, body_b)?,
        BooleanKind::Intersect => kb.boolean_intersect(body_a, body_b)?,
    };
    kb.delete_solid(body_a)?;
    kb.delete_solid(body_b)?;

    let after = diff::snapshot(kb.as_introspect(), &handle);
    let diff_result = diff::diff(&before, &after);

    let mut role_assignments = assign_boolean_roles(kb.as_introspect(), &handle, &snap_a, &snap_b);
    let carried_roles = diff_result.carry_roles(carried);
    debug!(
        carried = carried_roles.len(),
        requested = carried.len(),
        "carried input roles"
    );
    role_assignments.extend(carried_roles);

    let reason = match kind {
        BooleanKind::Union => RewriteReason::Merged,
        BooleanKind::Subtract | BooleanKind::Intersect => RewriteReason::Trimmed,
    };

    Ok(OpResult::single(
        handle,
        Provenance::reshaped(diff_result, reason, role_assignments),
    ))
}

/// Tag each result face with the input it most resembles; ties go to `a`.
fn assign_boolean_roles(
    introspect: &dyn KernelIntrospect,
    result: &KernelSolidHandle,
    snap_a: &TopoSnapshot,
    snap_b: &TopoSnapshot,
) -> Vec<(KernelId, Role)> {
    let closest = |snap: &TopoSnapshot, sig: &TopoSignature| {
        snap.faces
            .iter()
            .map(|(_, s)| diff::signature_similarity(sig, s))
            .fold(0.0_f64, f64::max)
    };
    let (mut from_a, mut from_b) = (0, 0);
    introspect
        .list_faces(result)
        .into_iter()
        .map(|face| {
            let sig = introspect.compute_signature(face, TopoKind::Face);
            let role = if closest(snap_a, &sig) >= closest(snap_b, &sig) {
                from_a += 1;
                Role::BooleanBodyAFace { index: from_a - 1 }
            } else {
                from_b += 1;
                Role::BooleanBodyBFace { index: from_b - 1 }
            };
            (face, role)
        })
        .collect()
}
