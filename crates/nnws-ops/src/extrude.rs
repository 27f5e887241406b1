use std::time::Instant;

use nnws_kernel::{KernelId, KernelIntrospect, KernelSolidHandle};
use nnws_types::{Profile, Role, SketchPlane, TopoKind, Vec3};
use tracing::{debug, instrument};

use crate::diff::{self, TopoSnapshot};
use crate::kernel_ext::KernelBundle;
use crate::types::{OpError, OpResult, Provenance};

/// Extrude a sketched face into a new solid, tagging its caps and side walls.
#[instrument(skip(kb))]
pub fn execute_extrude(
    kb: &mut dyn KernelBundle,
    face_id: KernelId,
    direction: [f64; 3],
    depth: f64,
) -> Result<OpResult, OpError> {
    let started = Instant::now();
    let handle = kb.extrude_face(face_id, direction, depth)?;
    let kernel_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    let after = diff::snapshot(kb.as_introspect(), &handle);
    let diff_result = diff::diff(&TopoSnapshot::empty(), &after);

    // A negative depth runs against `direction`; caps follow the material.
    let sign = if depth < 0.0 { -1.0 } else { 1.0 };
    let effective = (Vec3::from_array(direction) * sign).to_array();
    let role_assignments = assign_extrude_roles(kb.as_introspect(), &handle, &effective);
    debug!(faces = after.faces.len(), edges = after.edges.len(), "extruded");

    let mut result = OpResult::single(handle, Provenance::fresh(diff_result, role_assignments));
    result.diagnostics.kernel_time_ms = kernel_time_ms;
    Ok(result)
}

/// Sketch one closed profile on `plane` and extrude it along the plane normal.
pub fn execute_extrude_profile(
    kb: &mut dyn KernelBundle,
    profile: &Profile,
    plane: &SketchPlane,
    depth: f64,
) -> Result<OpResult, OpError> {
    let face = crate::sketch::profile_face(kb, profile, plane)?;
    execute_extrude(kb, face, plane.normal().to_array(), depth)
}

/// Caps are the faces most aligned with and against the extrude direction; every other
/// face is a side wall, numbered in kernel order.
fn assign_extrude_roles(
    introspect: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    direction: &[f64; 3],
) -> Vec<(KernelId, Role)> {
    let axis = Vec3::from_array(*direction).normalized().unwrap_or(Vec3::Z);
    let mut ranked: Vec<(KernelId, f64)> = introspect
        .list_faces(solid)
        .into_iter()
        .map(|face| {
            let alignment = introspect
                .compute_signature(face, TopoKind::Face)
                .normal
                .map_or(0.0, |n| Vec3::from_array(n).dot(&axis));
            (face, alignment)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let Some(last) = ranked.len().checked_sub(1) else {
        return Vec::new();
    };
    let cap_edges = |face: KernelId, role: fn(usize) -> Role| {
        introspect
            .face_edges(face)
            .into_iter()
            .enumerate()
            .map(move |(index, edge)| (edge, role(index)))
    };

    let mut roles = Vec::with_capacity(ranked.len());
    let mut sides = 0;
    for (i, &(face, alignment)) in ranked.iter().enumerate() {
        if i == 0 && alignment > 0.5 {
            roles.push((face, Role::EndCapPositive));
            roles.extend(cap_edges(face, |index| Role::EndCapPositiveEdge { index }));
        } else if i == last && alignment < -0.5 {
            roles.push((face, Role::EndCapNegative));
            roles.extend(cap_edges(face, |index| Role::EndCapNegativeEdge { index }));
        } else {
            roles.push((face, Role::SideFace { index: sides }));
            sides += 1;
        }
    }
    roles
}
