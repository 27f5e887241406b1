use std::f64::consts::TAU;

use nnws_kernel::{KernelId, KernelIntrospect, KernelSolidHandle};
use nnws_types::{Profile, Role, SketchPlane, TopoKind, Vec3};
use tracing::instrument;

use crate::diff::{self, TopoSnapshot};
use crate::kernel_ext::KernelBundle;
use crate::types::{OpError, OpResult, Provenance};

/// Revolve a sketched face about an axis by `angle` radians.
#[instrument(skip(kb))]
pub fn execute_revolve(
    kb: &mut dyn KernelBundle,
    face_id: KernelId,
    axis_origin: [f64; 3],
    axis_direction: [f64; 3],
    angle: f64,
) -> Result<OpResult, OpError> {
    if angle.abs() < 1e-12 || angle.abs() > TAU + 1e-9 {
        return Err(OpError::InvalidParameter {
            reason: format!("revolve angle {} outside (0, 2π]", angle),
        });
    }
    let handle = kb.revolve_face(face_id, axis_origin, axis_direction, angle)?;

    let after = diff::snapshot(kb.as_introspect(), &handle);
    let diff_result = diff::diff(&TopoSnapshot::empty(), &after);
    let role_assignments =
        assign_revolve_roles(kb.as_introspect(), &handle, &axis_direction, angle);

    Ok(OpResult::single(
        handle,
        Provenance::fresh(diff_result, role_assignments),
    ))
}

/// Sketch a profile and revolve it a full turn around an axis.
pub fn execute_revolve_profile(
    kb: &mut dyn KernelBundle,
    profile: &Profile,
    plane: &SketchPlane,
    axis_origin: [f64; 3],
    axis_direction: [f64; 3],
) -> Result<OpResult, OpError> {
    let face = crate::sketch::profile_face(kb, profile, plane)?;
    execute_revolve(kb, face, axis_origin, axis_direction, TAU)
}

/// A full turn has only surfaces of revolution; a partial one also has two planar caps,
/// the first at the sketch position.
fn assign_revolve_roles(
    introspect: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    axis_direction: &[f64; 3],
    angle: f64,
) -> Vec<(KernelId, Role)> {
    let partial = angle.abs() < TAU - 1e-6;
    let axis = Vec3::from_array(*axis_direction)
        .normalized()
        .unwrap_or(Vec3::Z);
    // caps are planar with a normal across the axis
    let is_cap = |face: KernelId| {
        partial
            && introspect
                .compute_signature(face, TopoKind::Face)
                .normal
                .is_some_and(|n| Vec3::from_array(n).dot(&axis).abs() < 0.5)
    };

    let mut caps = [Role::EndCapNegative, Role::EndCapPositive].into_iter();
    let mut revolved = 0;
    introspect
        .list_faces(solid)
        .into_iter()
        .map(|face| {
            let role = match is_cap(face).then(|| caps.next()).flatten() {
                Some(cap) => cap,
                None => {
                    revolved += 1;
                    Role::RevolvedFace { index: revolved - 1 }
                }
            };
            (face, role)
        })
        .collect()
}
