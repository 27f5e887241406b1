//! Edge and face selection by geometric criteria.
//!
//! Role-based selection (see [`crate::OpResult::with_role`]) is preferred; these queries
//! cover finishing steps on bodies whose roles did not survive earlier operations.

use std::collections::HashSet;
use std::f64::consts::TAU;

use nnws_kernel::{KernelId, KernelIntrospect, KernelSolidHandle};
use nnws_types::{TopoKind, TopoSignature};

const TOL: f64 = 1e-6;

/// Edges of `solid` whose signature satisfies `pred`, in kernel order.
pub fn edges_where(
    introspect: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    pred: impl Fn(&TopoSignature) -> bool,
) -> Vec<KernelId> {
    introspect
        .compute_all_signatures(solid, TopoKind::Edge)
        .into_iter()
        .filter(|(_, sig)| pred(sig))
        .map(|(id, _)| id)
        .collect()
}

/// Faces of `solid` whose signature satisfies `pred`, in kernel order.
pub fn faces_where(
    introspect: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    pred: impl Fn(&TopoSignature) -> bool,
) -> Vec<KernelId> {
    introspect
        .compute_all_signatures(solid, TopoKind::Face)
        .into_iter()
        .filter(|(_, sig)| pred(sig))
        .map(|(id, _)| id)
        .collect()
}

/// All edges bounding any of `faces`, each once, in first-seen order.
pub fn edges_of_faces(introspect: &dyn KernelIntrospect, faces: &[KernelId]) -> Vec<KernelId> {
    let mut seen = HashSet::new();
    faces
        .iter()
        .flat_map(|f| introspect.face_edges(*f))
        .filter(|e| seen.insert(*e))
        .collect()
}

/// Full circular edges of the given radius centered on the Z axis at height `z`.
pub fn circle_edges(
    introspect: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    radius: f64,
    z: f64,
    tol: f64,
) -> Vec<KernelId> {
    edges_where(introspect, solid, |sig| {
        sig.surface_type.as_deref() == Some("circle")
            && sig
                .length
                .map(|l| (l - TAU * radius).abs() <= TAU * tol)
                .unwrap_or(false)
            && sig
                .centroid
                .map(|c| (c[2] - z).abs() <= tol && c[0].hypot(c[1]) <= tol)
                .unwrap_or(false)
    })
}

/// Planar faces whose normal matches `normal` and whose centroid lies on the plane
/// through `origin`.
pub fn planar_faces_on(
    introspect: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    origin: [f64; 3],
    normal: [f64; 3],
) -> Vec<KernelId> {
    faces_where(introspect, solid, |sig| {
        let facing = sig
            .normal
            .map(|n| n[0] * normal[0] + n[1] * normal[1] + n[2] * normal[2] > 1.0 - 1e-6)
            .unwrap_or(false);
        let on_plane = sig
            .plane_distance(origin, normal)
            .map(|d| d.abs() <= TOL)
            .unwrap_or(false);
        sig.surface_type.as_deref() == Some("planar") && facing && on_plane
    })
}

/// Edges of the faces lying on the horizontal plane `z` and facing `+Z` (`up`) or `−Z`.
pub fn horizontal_face_edges(
    introspect: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    z: f64,
    up: bool,
) -> Vec<KernelId> {
    let normal = if up { [0.0, 0.0, 1.0] } else { [0.0, 0.0, -1.0] };
    let faces = planar_faces_on(introspect, solid, [0.0, 0.0, z], normal);
    edges_of_faces(introspect, &faces)
}

/// Edges running between two heights with a straight, Z-parallel curve.
pub fn vertical_edges(
    introspect: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    min_length: f64,
) -> Vec<KernelId> {
    let ids = edges_where(introspect, solid, |sig| {
        sig.surface_type.as_deref() == Some("line") && sig.length.unwrap_or(0.0) >= min_length
    });
    ids.into_iter()
        .filter(|e| {
            introspect
                .edge_vertices(*e)
                .and_then(|(a, b)| Some((introspect.vertex_position(a)?, introspect.vertex_position(b)?)))
                .map(|(a, b)| (a[0] - b[0]).abs() <= TOL && (a[1] - b[1]).abs() <= TOL)
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nnws_kernel::{Kernel, MockKernel};
    use nnws_types::{Point2, Profile, SketchPlane};

    fn cylinder(kernel: &mut MockKernel) -> KernelSolidHandle {
        let face = kernel
            .make_faces_from_profiles(&[Profile::circle(Point2::ORIGIN, 1.2)], &SketchPlane::xy())
            .unwrap()[0];
        kernel.extrude_face(face, [0.0, 0.0, 1.0], 0.4).unwrap()
    }

    #[test]
    fn test_circle_edges_by_height() {
        let mut kernel = MockKernel::new();
        let solid = cylinder(&mut kernel);
        assert_eq!(circle_edges(&kernel, &solid, 1.2, 0.4, 1e-6).len(), 1);
        assert_eq!(circle_edges(&kernel, &solid, 1.2, 0.0, 1e-6).len(), 1);
        assert!(circle_edges(&kernel, &solid, 1.0, 0.4, 1e-6).is_empty());
    }

    #[test]
    fn test_top_face_edges() {
        let mut kernel = MockKernel::new();
        let face = kernel
            .make_faces_from_profiles(
                &[Profile::rect(Point2::new(0.0, 0.0), Point2::new(2.0, 1.0))],
                &SketchPlane::xy(),
            )
            .unwrap()[0];
        let solid = kernel.extrude_face(face, [0.0, 0.0, 1.0], 0.5).unwrap();
        assert_eq!(horizontal_face_edges(&kernel, &solid, 0.5, true).len(), 4);
        assert!(horizontal_face_edges(&kernel, &solid, 0.5, false).is_empty());
        assert_eq!(vertical_edges(&kernel, &solid, 0.4).len(), 4);
    }
}
