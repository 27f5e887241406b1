use std::collections::HashSet;

use nnws_kernel::{KernelId, KernelIntrospect, KernelSolidHandle};
use nnws_types::{Role, TopoKind};
use tracing::{debug, instrument};

use crate::diff::{self, TopoSnapshot};
use crate::kernel_ext::KernelBundle;
use crate::types::{OpError, OpResult, Provenance};

/// Fit a spline through `path` and sweep a profile face along it.
///
/// Edges are tagged while the body is fresh: the boundary of the start cap gets
/// `SweepSeamStart`, the boundary of the end cap `SweepSeamEnd`, everything running
/// between the caps `SweepLateral`.
#[instrument(skip(kb, path), fields(points = path.len()))]
pub fn execute_sweep(
    kb: &mut dyn KernelBundle,
    face_id: KernelId,
    path: &[[f64; 3]],
) -> Result<OpResult, OpError> {
    if path.len() < 2 {
        return Err(OpError::InvalidParameter {
            reason: format!("sweep path needs at least 2 points, got {}", path.len()),
        });
    }
    let spline = kb.fit_spline(path)?;
    let handle = kb.sweep_face(face_id, spline)?;

    let after = diff::snapshot(kb.as_introspect(), &handle);
    let diff_result = diff::diff(&TopoSnapshot::empty(), &after);
    let start = path[0];
    let end = path[path.len() - 1];
    let role_assignments = assign_sweep_roles(kb.as_introspect(), &handle, start, end);
    debug!(roles = role_assignments.len(), "swept profile");

    Ok(OpResult::single(
        handle,
        Provenance::fresh(diff_result, role_assignments),
    ))
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}

/// The face whose centroid lies nearest to `point`.
pub(crate) fn nearest_face(
    introspect: &dyn KernelIntrospect,
    faces: &[KernelId],
    point: [f64; 3],
    skip: Option<KernelId>,
) -> Option<KernelId> {
    faces
        .iter()
        .filter(|f| Some(**f) != skip)
        .filter_map(|&f| {
            introspect
                .compute_signature(f, TopoKind::Face)
                .centroid
                .map(|c| (f, distance(c, point)))
        })
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(f, _)| f)
}

fn assign_sweep_roles(
    introspect: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    start: [f64; 3],
    end: [f64; 3],
) -> Vec<(KernelId, Role)> {
    let faces = introspect.list_faces(solid);
    let start_cap = nearest_face(introspect, &faces, start, None);
    let end_cap = nearest_face(introspect, &faces, end, start_cap);

    let mut assignments = Vec::new();
    let mut side_index = 0;
    for &face in &faces {
        if Some(face) == start_cap {
            assignments.push((face, Role::SweepStartCap));
        } else if Some(face) == end_cap {
            assignments.push((face, Role::SweepEndCap));
        } else {
            assignments.push((face, Role::SideFace { index: side_index }));
            side_index += 1;
        }
    }

    let start_edges: Vec<KernelId> = start_cap
        .map(|f| introspect.face_edges(f))
        .unwrap_or_default();
    let end_edges: Vec<KernelId> = end_cap.map(|f| introspect.face_edges(f)).unwrap_or_default();
    let seams: HashSet<KernelId> = start_edges.iter().chain(end_edges.iter()).copied().collect();

    for (index, edge) in start_edges.iter().enumerate() {
        assignments.push((*edge, Role::SweepSeamStart { index }));
    }
    for (index, edge) in end_edges.iter().enumerate() {
        assignments.push((*edge, Role::SweepSeamEnd { index }));
    }
    let laterals = introspect
        .list_edges(solid)
        .into_iter()
        .filter(|e| !seams.contains(e));
    for (index, edge) in laterals.enumerate() {
        assignments.push((edge, Role::SweepLateral { index }));
    }

    assignments
}
