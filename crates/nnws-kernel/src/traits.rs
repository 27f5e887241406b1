use crate::types::*;

/// Solid construction surface. Every NNWS part is built only through these calls, so a
/// host CAD session that implements them can produce the parts.
pub trait Kernel {
    /// Create planar faces from closed sketch profiles, one face per profile.
    fn make_faces_from_profiles(
        &mut self,
        profiles: &[Profile],
        plane: &SketchPlane,
    ) -> Result<Vec<KernelId>, KernelError>;

    /// Sweep a planar face straight along `direction` for `depth`.
    fn extrude_face(
        &mut self,
        face: KernelId,
        direction: [f64; 3],
        depth: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Revolve a planar face around an axis by `angle` radians.
    fn revolve_face(
        &mut self,
        face: KernelId,
        axis_origin: [f64; 3],
        axis_direction: [f64; 3],
        angle: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Fit a smooth spline through the points, in order. Returns a path id for sweeping.
    fn fit_spline(&mut self, points: &[[f64; 3]]) -> Result<KernelId, KernelError>;

    /// Sweep a planar face along a path created by [`Kernel::fit_spline`].
    fn sweep_face(&mut self, face: KernelId, path: KernelId)
        -> Result<KernelSolidHandle, KernelError>;

    /// Loft through two or more faces, in order.
    fn loft_faces(&mut self, faces: &[KernelId]) -> Result<KernelSolidHandle, KernelError>;

    /// `a ∪ b` as a new solid.
    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// `a` with `b` cut away.
    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Material common to `a` and `b`.
    fn boolean_intersect(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Round `edges` with a constant `radius`. The input stays valid.
    fn fillet_edges(
        &mut self,
        solid: &KernelSolidHandle,
        edges: &[KernelId],
        radius: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Bevel `edges`.
    fn chamfer_edges(
        &mut self,
        solid: &KernelSolidHandle,
        edges: &[KernelId],
        kind: ChamferKind,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Copies of `solid` at `spacing`, `2·spacing`, … along `direction`.
    /// Returns the `count − 1` new solids; the input is instance 0.
    fn pattern_rectangular(
        &mut self,
        solid: &KernelSolidHandle,
        direction: [f64; 3],
        count: usize,
        spacing: f64,
    ) -> Result<Vec<KernelSolidHandle>, KernelError>;

    /// Copies of `solid` rotated about an axis. A `total_angle` of a full turn spaces
    /// instances evenly around it; any other angle places the last instance at `total_angle`.
    /// Returns the `count − 1` new solids.
    fn pattern_circular(
        &mut self,
        solid: &KernelSolidHandle,
        axis_origin: [f64; 3],
        axis_direction: [f64; 3],
        count: usize,
        total_angle: f64,
    ) -> Result<Vec<KernelSolidHandle>, KernelError>;

    /// A translated copy of `solid`. The input is left in place.
    fn copy_translated(
        &mut self,
        solid: &KernelSolidHandle,
        translation: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Split a solid with a plane. The input is consumed.
    fn split_solid(
        &mut self,
        solid: &KernelSolidHandle,
        plane_origin: [f64; 3],
        plane_normal: [f64; 3],
    ) -> Result<SplitResult, KernelError>;

    /// Drill a simple or countersunk hole.
    fn make_hole(
        &mut self,
        solid: &KernelSolidHandle,
        hole: &HoleSpec,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Raise (positive `depth`) or engrave (negative `depth`) text on a face lying in `plane`.
    fn emboss_text(
        &mut self,
        solid: &KernelSolidHandle,
        text: &str,
        plane: &SketchPlane,
        position: [f64; 2],
        height: f64,
        depth: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    fn set_solid_name(&mut self, solid: &KernelSolidHandle, name: &str) -> Result<(), KernelError>;

    /// Remove a solid from the session. Its handle is invalid afterwards.
    fn delete_solid(&mut self, solid: &KernelSolidHandle) -> Result<(), KernelError>;

    /// Serialize the solids as an ISO 10303-21 (STEP) document.
    fn export_step(&self, solids: &[KernelSolidHandle]) -> Result<String, KernelError>;

    /// Serialize the solids as an ASCII STL document.
    fn export_stl(&self, solids: &[KernelSolidHandle]) -> Result<String, KernelError>;
}

/// Read-only view of the topology and placement of solids in a session.
pub trait KernelIntrospect {
    /// Faces of `solid`, in creation order.
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    fn list_edges(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    fn list_vertices(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    /// Boundary edges of `face`.
    fn face_edges(&self, face: KernelId) -> Vec<KernelId>;

    /// The one or two faces that meet at `edge`.
    fn edge_faces(&self, edge: KernelId) -> Vec<KernelId>;

    /// Start and end vertex.
    fn edge_vertices(&self, edge: KernelId) -> Option<(KernelId, KernelId)>;

    fn vertex_position(&self, vertex: KernelId) -> Option<[f64; 3]>;

    /// Geometric fingerprint used to match entities across an operation.
    fn compute_signature(&self, entity: KernelId, kind: TopoKind) -> TopoSignature;

    fn compute_all_signatures(
        &self,
        solid: &KernelSolidHandle,
        kind: TopoKind,
    ) -> Vec<(KernelId, TopoSignature)>;

    /// Axis-aligned bounds of a solid, `None` for an unknown handle.
    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<BoundingBox>;

    fn solid_name(&self, solid: &KernelSolidHandle) -> Option<String>;
}
