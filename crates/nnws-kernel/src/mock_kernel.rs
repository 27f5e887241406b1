//! Deterministic test double implementing Kernel and KernelIntrospect.
//!
//! Builds synthetic topology from the real profile outlines: every boundary curve of a
//! profile contributes edges and a side face, and every solid carries an axis-aligned
//! bounding box that booleans, patterns and splits keep up to date. Ids are allocated
//! sequentially, so identical call sequences produce identical ids.
//! Any operation kind can be made to fail with [`MockKernel::fail_on`].

use std::collections::{HashMap, HashSet};
use std::f64::consts::{PI, SQRT_2, TAU};

use nnws_types::{Point2, Segment, Vec3};

use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;

const TOL: f64 = 1e-6;

/// Kernel operation kinds, for call counting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    MakeFaces,
    Extrude,
    Revolve,
    Spline,
    Sweep,
    Loft,
    Union,
    Subtract,
    Intersect,
    Fillet,
    Chamfer,
    PatternRectangular,
    PatternCircular,
    Copy,
    Split,
    Hole,
    Emboss,
    Export,
}

/// A mock vertex with known position.
#[derive(Debug, Clone)]
struct MockVertex {
    id: KernelId,
    position: [f64; 3],
}

/// A mock edge. Closed curves (circles) start and end on the same vertex.
#[derive(Debug, Clone)]
struct MockEdge {
    id: KernelId,
    start: KernelId,
    end: KernelId,
    length: f64,
    centroid: [f64; 3],
    curve: &'static str,
}

/// A mock face with known properties.
#[derive(Debug, Clone)]
struct MockFace {
    id: KernelId,
    edges: Vec<KernelId>,
    normal: Option<[f64; 3]>,
    centroid: [f64; 3],
    area: f64,
    surface_type: &'static str,
}

/// A synthetic solid with deterministic topology.
#[derive(Debug, Clone)]
struct MockSolid {
    name: Option<String>,
    bbox: BoundingBox,
    vertices: Vec<MockVertex>,
    edges: Vec<MockEdge>,
    faces: Vec<MockFace>,
}

/// One boundary curve of a planar sheet, in world coordinates.
#[derive(Debug, Clone)]
struct CurveDef {
    kind: &'static str,
    start: [f64; 3],
    centroid: [f64; 3],
    length: f64,
}

/// A planar face made by `make_faces_from_profiles`, waiting to be extruded,
/// revolved, swept or lofted.
#[derive(Debug, Clone)]
struct MockSheet {
    normal: [f64; 3],
    centroid: [f64; 3],
    area: f64,
    curves: Vec<CurveDef>,
    outline: Vec<[f64; 3]>,
}

impl MockSheet {
    fn translated(&self, t: [f64; 3]) -> MockSheet {
        MockSheet {
            normal: self.normal,
            centroid: add3(self.centroid, t),
            area: self.area,
            curves: self
                .curves
                .iter()
                .map(|c| CurveDef {
                    kind: c.kind,
                    start: add3(c.start, t),
                    centroid: add3(c.centroid, t),
                    length: c.length,
                })
                .collect(),
            outline: self.outline.iter().map(|p| add3(*p, t)).collect(),
        }
    }

    /// Largest distance from the centroid to the outline.
    fn reach(&self) -> f64 {
        self.outline
            .iter()
            .map(|p| len3(sub3(*p, self.centroid)))
            .fold(0.0, f64::max)
    }
}

/// Deterministic test double for the geometry kernel.
/// Implements both Kernel and KernelIntrospect.
pub struct MockKernel {
    next_id: u64,
    next_handle: u64,
    solids: HashMap<u64, MockSolid>,
    /// Faces created by make_faces_from_profiles, consumed by the first feature that uses them.
    sheets: HashMap<u64, MockSheet>,
    /// Spline paths from fit_spline, reusable.
    paths: HashMap<u64, Vec<[f64; 3]>>,
    failing: HashSet<MockOp>,
    calls: HashMap<MockOp, usize>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_handle: 1,
            solids: HashMap::new(),
            sheets: HashMap::new(),
            paths: HashMap::new(),
            failing: HashSet::new(),
            calls: HashMap::new(),
        }
    }

    /// Make every later call of `op` fail with a kernel error.
    pub fn fail_on(&mut self, op: MockOp) {
        self.failing.insert(op);
    }

    pub fn clear_failures(&mut self) {
        self.failing.clear();
    }

    /// Number of calls of `op` so far, failed ones included.
    pub fn call_count(&self, op: MockOp) -> usize {
        self.calls.get(&op).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.values().sum()
    }

    /// Number of live solids in the session.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    /// Number of sketch faces not yet consumed by a feature.
    pub fn pending_face_count(&self) -> usize {
        self.sheets.len()
    }

    fn alloc_id(&mut self) -> KernelId {
        let id = KernelId(self.next_id);
        self.next_id += 1;
        id
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    fn record(&mut self, op: MockOp) -> Result<(), KernelError> {
        *self.calls.entry(op).or_insert(0) += 1;
        self.check_failure(op)
    }

    fn check_failure(&self, op: MockOp) -> Result<(), KernelError> {
        if !self.failing.contains(&op) {
            return Ok(());
        }
        let reason = format!("injected failure for {:?}", op);
        Err(match op {
            MockOp::Union | MockOp::Subtract | MockOp::Intersect => {
                KernelError::BooleanFailed { reason }
            }
            MockOp::Fillet => KernelError::FilletFailed { reason },
            MockOp::Chamfer => KernelError::ChamferFailed { reason },
            MockOp::Sweep => KernelError::SweepFailed { reason },
            MockOp::Split => KernelError::SplitFailed { reason },
            _ => KernelError::Other { message: reason },
        })
    }

    fn solid(&self, handle: &KernelSolidHandle) -> Result<&MockSolid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or(KernelError::EntityNotFound {
                id: KernelId(handle.id()),
            })
    }

    fn take_sheet(&mut self, face: KernelId) -> Result<MockSheet, KernelError> {
        self.sheets
            .remove(&face.0)
            .ok_or(KernelError::EntityNotFound { id: face })
    }

    fn insert_solid(&mut self, solid: MockSolid) -> KernelSolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    /// Copy a solid with fresh ids for every entity. Returns the copy and the old → new map.
    fn clone_fresh(&mut self, source: &MockSolid) -> (MockSolid, HashMap<KernelId, KernelId>) {
        let mut id_map: HashMap<KernelId, KernelId> = HashMap::new();

        let mut vertices = Vec::with_capacity(source.vertices.len());
        for v in &source.vertices {
            let new_id = self.alloc_id();
            id_map.insert(v.id, new_id);
            vertices.push(MockVertex {
                id: new_id,
                position: v.position,
            });
        }

        let mut edges = Vec::with_capacity(source.edges.len());
        for e in &source.edges {
            let new_id = self.alloc_id();
            id_map.insert(e.id, new_id);
            edges.push(MockEdge {
                id: new_id,
                start: id_map.get(&e.start).copied().unwrap_or(e.start),
                end: id_map.get(&e.end).copied().unwrap_or(e.end),
                ..e.clone()
            });
        }

        let mut faces = Vec::with_capacity(source.faces.len());
        for f in &source.faces {
            let new_id = self.alloc_id();
            id_map.insert(f.id, new_id);
            faces.push(MockFace {
                id: new_id,
                edges: f.edges.iter().filter_map(|e| id_map.get(e).copied()).collect(),
                ..f.clone()
            });
        }

        let solid = MockSolid {
            name: source.name.clone(),
            bbox: source.bbox,
            vertices,
            edges,
            faces,
        };
        (solid, id_map)
    }

    /// Concatenate fresh copies of several solids into one.
    fn merge_solids(&mut self, parts: &[&MockSolid]) -> MockSolid {
        let mut merged = MockSolid {
            name: parts.first().and_then(|p| p.name.clone()),
            bbox: BoundingBox::empty(),
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
        };
        for part in parts {
            let (copy, _) = self.clone_fresh(part);
            merged.bbox = merged.bbox.union(&copy.bbox);
            merged.vertices.extend(copy.vertices);
            merged.edges.extend(copy.edges);
            merged.faces.extend(copy.faces);
        }
        merged
    }

    /// Build a prism-like solid between two sheets whose curves correspond index by index.
    /// Faces: bottom cap, top cap, then one side face per curve.
    /// Edges: bottom curves, top curves, then one lateral edge per curve.
    fn build_between(
        &mut self,
        bottom: &MockSheet,
        top: &MockSheet,
        lateral: Lateral,
        bottom_normal: [f64; 3],
        top_normal: [f64; 3],
    ) -> MockSolid {
        let n = bottom.curves.len();
        let vb: Vec<MockVertex> = bottom
            .curves
            .iter()
            .map(|c| MockVertex {
                id: self.alloc_id(),
                position: c.start,
            })
            .collect();
        let vt: Vec<MockVertex> = top
            .curves
            .iter()
            .map(|c| MockVertex {
                id: self.alloc_id(),
                position: c.start,
            })
            .collect();

        let mut edges = Vec::with_capacity(3 * n);
        for (ring, verts) in [(&bottom.curves, &vb), (&top.curves, &vt)] {
            for (i, c) in ring.iter().enumerate() {
                edges.push(MockEdge {
                    id: self.alloc_id(),
                    start: verts[i].id,
                    end: verts[(i + 1) % n].id,
                    length: c.length,
                    centroid: c.centroid,
                    curve: c.kind,
                });
            }
        }
        for i in 0..n {
            let centroid = match lateral.centroid_shift {
                Some(shift) => add3(vb[i].position, shift),
                None => mid3(vb[i].position, vt[i].position),
            };
            edges.push(MockEdge {
                id: self.alloc_id(),
                start: vb[i].id,
                end: vt[i].id,
                length: lateral.length,
                centroid,
                curve: lateral.curve,
            });
        }

        let axis = norm3(sub3(top.centroid, bottom.centroid));
        let axis_mid = mid3(bottom.centroid, top.centroid);
        let mut faces = Vec::with_capacity(n + 2);
        faces.push(MockFace {
            id: self.alloc_id(),
            edges: edges[0..n].iter().map(|e| e.id).collect(),
            normal: Some(bottom_normal),
            centroid: bottom.centroid,
            area: bottom.area,
            surface_type: "planar",
        });
        faces.push(MockFace {
            id: self.alloc_id(),
            edges: edges[n..2 * n].iter().map(|e| e.id).collect(),
            normal: Some(top_normal),
            centroid: top.centroid,
            area: top.area,
            surface_type: "planar",
        });
        for i in 0..n {
            let centroid = mid3(bottom.curves[i].centroid, top.curves[i].centroid);
            let mut outward = sub3(centroid, axis_mid);
            if let Some(a) = axis {
                outward = sub3(outward, scale3(a, dot3(outward, a)));
            }
            let surface_type = if bottom.curves[i].kind == "line" {
                "planar"
            } else {
                lateral.surface
            };
            faces.push(MockFace {
                id: self.alloc_id(),
                edges: vec![
                    edges[i].id,
                    edges[2 * n + i].id,
                    edges[n + i].id,
                    edges[2 * n + (i + 1) % n].id,
                ],
                normal: norm3(outward),
                centroid,
                area: bottom.curves[i].length * lateral.length,
                surface_type,
            });
        }

        let bbox = BoundingBox::from_points(bottom.outline.iter().chain(top.outline.iter()));
        let mut vertices = vb;
        vertices.extend(vt);
        MockSolid {
            name: None,
            bbox,
            vertices,
            edges,
            faces,
        }
    }

    fn build_revolution(
        &mut self,
        sheet: &MockSheet,
        origin: [f64; 3],
        axis: Vec3,
        angle: f64,
    ) -> MockSolid {
        let full = (angle.abs() - TAU).abs() < 1e-9;
        let n = sheet.curves.len();
        let rot = |p: [f64; 3], a: f64| rotate_point(p, origin, axis, a);

        let v0: Vec<MockVertex> = sheet
            .curves
            .iter()
            .map(|c| MockVertex {
                id: self.alloc_id(),
                position: c.start,
            })
            .collect();
        let v1: Vec<MockVertex> = if full {
            v0.clone()
        } else {
            sheet
                .curves
                .iter()
                .map(|c| MockVertex {
                    id: self.alloc_id(),
                    position: rot(c.start, angle),
                })
                .collect()
        };

        let mut edges = Vec::new();
        // profile curves at the start angle (the seam when the revolution is closed)
        let mut start_edges = Vec::with_capacity(n);
        for (i, c) in sheet.curves.iter().enumerate() {
            let e = MockEdge {
                id: self.alloc_id(),
                start: v0[i].id,
                end: v0[(i + 1) % n].id,
                length: c.length,
                centroid: c.centroid,
                curve: c.kind,
            };
            start_edges.push(e.id);
            edges.push(e);
        }
        let mut end_edges = Vec::with_capacity(n);
        if !full {
            for (i, c) in sheet.curves.iter().enumerate() {
                let e = MockEdge {
                    id: self.alloc_id(),
                    start: v1[i].id,
                    end: v1[(i + 1) % n].id,
                    length: c.length,
                    centroid: rot(c.centroid, angle),
                    curve: c.kind,
                };
                end_edges.push(e.id);
                edges.push(e);
            }
        }
        // circles traced by each profile vertex; vertices on the axis trace nothing
        let mut traced: Vec<Option<KernelId>> = Vec::with_capacity(n);
        for (i, c) in sheet.curves.iter().enumerate() {
            let (foot, radius) = axis_foot(c.start, origin, axis);
            if radius < TOL {
                traced.push(None);
                continue;
            }
            let e = MockEdge {
                id: self.alloc_id(),
                start: v0[i].id,
                end: v1[i].id,
                length: radius * angle.abs(),
                centroid: if full { foot } else { rot(c.start, angle / 2.0) },
                curve: if full { "circle" } else { "arc" },
            };
            traced.push(Some(e.id));
            edges.push(e);
        }

        let mut faces = Vec::with_capacity(n + 2);
        for (i, c) in sheet.curves.iter().enumerate() {
            let (foot, radius) = axis_foot(c.centroid, origin, axis);
            let mut face_edges = vec![start_edges[i]];
            if let Some(&e) = end_edges.get(i) {
                face_edges.push(e);
            }
            face_edges.extend(traced[i]);
            face_edges.extend(traced[(i + 1) % n]);
            faces.push(MockFace {
                id: self.alloc_id(),
                edges: face_edges,
                normal: None,
                centroid: if full { foot } else { rot(c.centroid, angle / 2.0) },
                area: c.length * radius * angle.abs(),
                surface_type: if c.kind == "line" && radius < TOL {
                    "planar"
                } else {
                    "revolved"
                },
            });
        }
        if !full {
            faces.push(MockFace {
                id: self.alloc_id(),
                edges: start_edges.clone(),
                normal: Some(scale3(sheet.normal, -1.0)),
                centroid: sheet.centroid,
                area: sheet.area,
                surface_type: "planar",
            });
            faces.push(MockFace {
                id: self.alloc_id(),
                edges: end_edges.clone(),
                normal: Some(rot_vec(sheet.normal, axis, angle)),
                centroid: rot(sheet.centroid, angle),
                area: sheet.area,
                surface_type: "planar",
            });
        }

        let steps = ((angle.abs() / TAU) * 64.0).ceil().max(2.0) as usize;
        let mut bbox = BoundingBox::empty();
        for p in &sheet.outline {
            for k in 0..=steps {
                bbox.include(rot(*p, angle * k as f64 / steps as f64));
            }
        }

        let mut vertices = v0;
        if !full {
            vertices.extend(v1);
        }
        MockSolid {
            name: None,
            bbox,
            vertices,
            edges,
            faces,
        }
    }

    /// Replace each selected edge by a blend face bounded by two new edges.
    /// Adjacent faces swap the old edge for one of the new boundaries.
    fn blend_edges(
        &mut self,
        solid: &KernelSolidHandle,
        edges: &[KernelId],
        setback: f64,
        surface: fn(&str) -> &'static str,
        fail: fn(String) -> KernelError,
    ) -> Result<KernelSolidHandle, KernelError> {
        if edges.is_empty() {
            return Err(fail("no edges selected".to_string()));
        }
        let source = self.solid(solid)?.clone();
        for eid in edges {
            let edge = source
                .edges
                .iter()
                .find(|e| e.id == *eid)
                .ok_or_else(|| fail(format!("edge {:?} not found in solid", eid)))?;
            if setback >= edge.length {
                return Err(fail(format!(
                    "size {} does not fit on edge {:?} of length {}",
                    setback, eid, edge.length
                )));
            }
        }

        let (mut out, id_map) = self.clone_fresh(&source);
        let selected: HashSet<KernelId> = edges.iter().filter_map(|e| id_map.get(e).copied()).collect();
        let originals: Vec<MockEdge> = out
            .edges
            .iter()
            .filter(|e| selected.contains(&e.id))
            .cloned()
            .collect();
        out.edges.retain(|e| !selected.contains(&e.id));

        for old in originals {
            let bounds = [self.alloc_id(), self.alloc_id()];
            for &id in &bounds {
                out.edges.push(MockEdge {
                    id,
                    start: old.start,
                    end: old.end,
                    length: old.length,
                    centroid: old.centroid,
                    curve: old.curve,
                });
            }
            let mut next = 0;
            for f in out.faces.iter_mut() {
                for e in f.edges.iter_mut() {
                    if *e == old.id && next < 2 {
                        *e = bounds[next];
                        next += 1;
                    }
                }
            }
            let face_id = self.alloc_id();
            out.faces.push(MockFace {
                id: face_id,
                edges: bounds.to_vec(),
                normal: None,
                centroid: old.centroid,
                area: old.length * setback,
                surface_type: surface(old.curve),
            });
        }
        // faces that lost a selected edge without a replacement keep only surviving edges
        let live: HashSet<KernelId> = out.edges.iter().map(|e| e.id).collect();
        for f in out.faces.iter_mut() {
            f.edges.retain(|e| live.contains(e));
        }

        out.name = source.name;
        Ok(self.insert_solid(out))
    }
}

/// How the connecting edges of a swept solid look.
#[derive(Debug, Clone, Copy)]
struct Lateral {
    curve: &'static str,
    length: f64,
    surface: &'static str,
    /// When set, lateral edge centroids are the start vertex plus this shift.
    centroid_shift: Option<[f64; 3]>,
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for MockKernel {
    fn make_faces_from_profiles(
        &mut self,
        profiles: &[Profile],
        plane: &SketchPlane,
    ) -> Result<Vec<KernelId>, KernelError> {
        self.record(MockOp::MakeFaces)?;
        let normal = plane.normal().to_array();
        let to_world = |p: Point2| plane.to_world(p).to_array();

        let mut face_ids = Vec::with_capacity(profiles.len());
        for profile in profiles {
            if !profile.is_closed(TOL) {
                return Err(KernelError::Other {
                    message: "profile is not closed".to_string(),
                });
            }
            let area = profile.area();
            if area < 1e-12 {
                return Err(KernelError::Other {
                    message: "profile encloses no area".to_string(),
                });
            }
            let curves = match profile {
                Profile::Circle { center, radius } => vec![CurveDef {
                    kind: "circle",
                    start: to_world(center.polar(*radius, 0.0)),
                    centroid: to_world(*center),
                    length: TAU * radius,
                }],
                Profile::Loop { segments } => segments
                    .iter()
                    .map(|s| match s {
                        Segment::Line { start, end } => CurveDef {
                            kind: "line",
                            start: to_world(*start),
                            centroid: to_world(Point2::new(
                                (start.x + end.x) / 2.0,
                                (start.y + end.y) / 2.0,
                            )),
                            length: s.length(),
                        },
                        Segment::Arc {
                            center,
                            radius,
                            start_angle,
                            sweep,
                        } => CurveDef {
                            kind: "arc",
                            start: to_world(s.start()),
                            centroid: to_world(center.polar(*radius, start_angle + sweep / 2.0)),
                            length: s.length(),
                        },
                    })
                    .collect(),
            };
            let sheet = MockSheet {
                normal,
                centroid: to_world(profile.centroid()),
                area,
                curves,
                outline: profile.outline().into_iter().map(to_world).collect(),
            };
            let face_id = self.alloc_id();
            self.sheets.insert(face_id.0, sheet);
            face_ids.push(face_id);
        }

        Ok(face_ids)
    }

    fn extrude_face(
        &mut self,
        face: KernelId,
        direction: [f64; 3],
        depth: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(MockOp::Extrude)?;
        let dir = norm3(direction).ok_or(KernelError::Other {
            message: "extrude direction is zero".to_string(),
        })?;
        if depth.abs() < 1e-12 {
            return Err(KernelError::Other {
                message: "extrude depth is zero".to_string(),
            });
        }
        let bottom = self.take_sheet(face)?;
        let offset = scale3(dir, depth);
        let top = bottom.translated(offset);
        let forward = scale3(dir, depth.signum());
        let solid = self.build_between(
            &bottom,
            &top,
            Lateral {
                curve: "line",
                length: depth.abs(),
                surface: "cylindrical",
                centroid_shift: None,
            },
            scale3(forward, -1.0),
            forward,
        );
        Ok(self.insert_solid(solid))
    }

    fn revolve_face(
        &mut self,
        face: KernelId,
        axis_origin: [f64; 3],
        axis_direction: [f64; 3],
        angle: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(MockOp::Revolve)?;
        let axis = Vec3::from_array(axis_direction)
            .normalized()
            .ok_or(KernelError::Other {
                message: "revolve axis is zero".to_string(),
            })?;
        if angle.abs() < 1e-12 || angle.abs() > TAU + 1e-9 {
            return Err(KernelError::Other {
                message: format!("revolve angle {} out of range", angle),
            });
        }
        let sheet = self.take_sheet(face)?;
        let solid = self.build_revolution(&sheet, axis_origin, axis, angle);
        Ok(self.insert_solid(solid))
    }

    fn fit_spline(&mut self, points: &[[f64; 3]]) -> Result<KernelId, KernelError> {
        self.record(MockOp::Spline)?;
        if points.len() < 2 {
            return Err(KernelError::Other {
                message: "a spline needs at least two points".to_string(),
            });
        }
        let id = self.alloc_id();
        self.paths.insert(id.0, points.to_vec());
        Ok(id)
    }

    fn sweep_face(
        &mut self,
        face: KernelId,
        path: KernelId,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(MockOp::Sweep)?;
        let points = self
            .paths
            .get(&path.0)
            .cloned()
            .ok_or(KernelError::EntityNotFound { id: path })?;
        if !self.sheets.contains_key(&face.0) {
            return Err(KernelError::EntityNotFound { id: face });
        }
        let first = points[0];
        let last = points[points.len() - 1];
        let reach = self.sheets.get(&face.0).map(MockSheet::reach).unwrap_or(0.0);
        let gap = self
            .sheets
            .get(&face.0)
            .map(|s| len3(sub3(s.centroid, first)))
            .unwrap_or(f64::MAX);
        if gap > reach + TOL {
            return Err(KernelError::SweepFailed {
                reason: "profile does not touch the start of the path".to_string(),
            });
        }
        let bottom = self.take_sheet(face)?;

        let path_length: f64 = points.windows(2).map(|w| len3(sub3(w[1], w[0]))).sum();
        let count = points.len() as f64;
        let mean = points
            .iter()
            .fold([0.0; 3], |acc, p| add3(acc, scale3(*p, 1.0 / count)));
        let top = bottom.translated(sub3(last, first));
        let start_tangent = norm3(sub3(points[1], first)).unwrap_or(bottom.normal);
        let end_tangent = norm3(sub3(last, points[points.len() - 2])).unwrap_or(bottom.normal);

        let mut solid = self.build_between(
            &bottom,
            &top,
            Lateral {
                curve: "spline",
                length: path_length,
                surface: "swept",
                centroid_shift: Some(sub3(mean, bottom.centroid)),
            },
            scale3(start_tangent, -1.0),
            end_tangent,
        );
        let mut bbox = BoundingBox::from_points(points.iter());
        bbox.min = add3(bbox.min, [-reach; 3]);
        bbox.max = add3(bbox.max, [reach; 3]);
        solid.bbox = bbox;
        Ok(self.insert_solid(solid))
    }

    fn loft_faces(&mut self, faces: &[KernelId]) -> Result<KernelSolidHandle, KernelError> {
        self.record(MockOp::Loft)?;
        if faces.len() < 2 {
            return Err(KernelError::Other {
                message: "a loft needs at least two sections".to_string(),
            });
        }
        for f in faces {
            if !self.sheets.contains_key(&f.0) {
                return Err(KernelError::EntityNotFound { id: *f });
            }
        }
        let sections: Vec<MockSheet> = faces
            .iter()
            .filter_map(|f| self.sheets.remove(&f.0))
            .collect();
        let curve_count = sections[0].curves.len();
        if sections.iter().any(|s| s.curves.len() != curve_count) {
            return Err(KernelError::Other {
                message: "loft sections must have matching curve counts".to_string(),
            });
        }
        let bottom = &sections[0];
        let top = &sections[sections.len() - 1];
        let length: f64 = sections
            .windows(2)
            .map(|w| len3(sub3(w[1].centroid, w[0].centroid)))
            .sum();
        let axis = norm3(sub3(top.centroid, bottom.centroid)).unwrap_or(bottom.normal);
        let mut solid = self.build_between(
            bottom,
            top,
            Lateral {
                curve: "line",
                length,
                surface: "lofted",
                centroid_shift: None,
            },
            scale3(axis, -1.0),
            axis,
        );
        solid.bbox = BoundingBox::from_points(sections.iter().flat_map(|s| s.outline.iter()));
        Ok(self.insert_solid(solid))
    }

    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(MockOp::Union)?;
        let solid_a = self.solid(a)?.clone();
        let solid_b = self.solid(b)?.clone();
        let merged = self.merge_solids(&[&solid_a, &solid_b]);
        Ok(self.insert_solid(merged))
    }

    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(MockOp::Subtract)?;
        let target = self.solid(a)?.clone();
        let tool = self.solid(b)?.clone();

        if contains(&tool.bbox, &target.bbox) {
            return Err(KernelError::BooleanFailed {
                reason: "tool body consumes the whole target".to_string(),
            });
        }
        if !target.bbox.overlaps(&tool.bbox, 0.0) {
            let (copy, _) = self.clone_fresh(&target);
            return Ok(self.insert_solid(copy));
        }

        let bbox = clip_slab(&target.bbox, &tool.bbox);
        let kept = filter_solid(&target, |c| inside(&bbox, c));
        let mut imprint = filter_solid(&tool, |c| inside(&bbox, c));
        for f in imprint.faces.iter_mut() {
            f.normal = f.normal.map(|n| scale3(n, -1.0));
        }
        let mut result = self.merge_solids(&[&kept, &imprint]);
        result.bbox = bbox;
        result.name = target.name;
        Ok(self.insert_solid(result))
    }

    fn boolean_intersect(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(MockOp::Intersect)?;
        let solid_a = self.solid(a)?.clone();
        let solid_b = self.solid(b)?.clone();
        if !solid_a.bbox.overlaps(&solid_b.bbox, 0.0) {
            return Err(KernelError::BooleanFailed {
                reason: "solids do not overlap".to_string(),
            });
        }
        let bbox = solid_a.bbox.intersection(&solid_b.bbox);
        let part_a = filter_solid(&solid_a, |c| inside(&bbox, c));
        let part_b = filter_solid(&solid_b, |c| inside(&bbox, c));
        let mut result = self.merge_solids(&[&part_a, &part_b]);
        result.bbox = bbox;
        result.name = solid_a.name;
        Ok(self.insert_solid(result))
    }

    fn fillet_edges(
        &mut self,
        solid: &KernelSolidHandle,
        edges: &[KernelId],
        radius: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(MockOp::Fillet)?;
        if radius <= 0.0 {
            return Err(KernelError::FilletFailed {
                reason: "radius must be positive".to_string(),
            });
        }
        self.blend_edges(
            solid,
            edges,
            radius,
            |_| "cylindrical",
            |reason| KernelError::FilletFailed { reason },
        )
    }

    fn chamfer_edges(
        &mut self,
        solid: &KernelSolidHandle,
        edges: &[KernelId],
        kind: ChamferKind,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(MockOp::Chamfer)?;
        let setback = match kind {
            ChamferKind::EqualDistance { distance } if distance > 0.0 => distance * SQRT_2,
            ChamferKind::DistanceAngle {
                distance,
                angle_deg,
                ..
            } if distance > 0.0 && angle_deg > 0.0 && angle_deg < 90.0 => {
                distance / angle_deg.to_radians().cos()
            }
            _ => {
                return Err(KernelError::ChamferFailed {
                    reason: format!("invalid chamfer {:?}", kind),
                })
            }
        };
        self.blend_edges(
            solid,
            edges,
            setback,
            |curve| if curve == "line" { "planar" } else { "conical" },
            |reason| KernelError::ChamferFailed { reason },
        )
    }

    fn pattern_rectangular(
        &mut self,
        solid: &KernelSolidHandle,
        direction: [f64; 3],
        count: usize,
        spacing: f64,
    ) -> Result<Vec<KernelSolidHandle>, KernelError> {
        self.record(MockOp::PatternRectangular)?;
        if count == 0 || spacing <= 0.0 {
            return Err(KernelError::Other {
                message: format!("invalid pattern: count {} spacing {}", count, spacing),
            });
        }
        let dir = norm3(direction).ok_or(KernelError::Other {
            message: "pattern direction is zero".to_string(),
        })?;
        let source = self.solid(solid)?.clone();
        let mut handles = Vec::with_capacity(count - 1);
        for i in 1..count {
            let (mut copy, _) = self.clone_fresh(&source);
            copy.name = None;
            translate_solid(&mut copy, scale3(dir, spacing * i as f64));
            handles.push(self.insert_solid(copy));
        }
        Ok(handles)
    }

    fn pattern_circular(
        &mut self,
        solid: &KernelSolidHandle,
        axis_origin: [f64; 3],
        axis_direction: [f64; 3],
        count: usize,
        total_angle: f64,
    ) -> Result<Vec<KernelSolidHandle>, KernelError> {
        self.record(MockOp::PatternCircular)?;
        if count == 0 || total_angle.abs() < 1e-12 {
            return Err(KernelError::Other {
                message: format!("invalid pattern: count {} angle {}", count, total_angle),
            });
        }
        let axis = Vec3::from_array(axis_direction)
            .normalized()
            .ok_or(KernelError::Other {
                message: "pattern axis is zero".to_string(),
            })?;
        let step = if (total_angle.abs() - TAU).abs() < 1e-9 || count == 1 {
            total_angle / count as f64
        } else {
            total_angle / (count - 1) as f64
        };
        let source = self.solid(solid)?.clone();
        let mut handles = Vec::with_capacity(count - 1);
        for i in 1..count {
            let (mut copy, _) = self.clone_fresh(&source);
            copy.name = None;
            rotate_solid(&mut copy, axis_origin, axis, step * i as f64);
            handles.push(self.insert_solid(copy));
        }
        Ok(handles)
    }

    fn copy_translated(
        &mut self,
        solid: &KernelSolidHandle,
        translation: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(MockOp::Copy)?;
        let source = self.solid(solid)?.clone();
        let (mut copy, _) = self.clone_fresh(&source);
        copy.name = None;
        translate_solid(&mut copy, translation);
        Ok(self.insert_solid(copy))
    }

    fn split_solid(
        &mut self,
        solid: &KernelSolidHandle,
        plane_origin: [f64; 3],
        plane_normal: [f64; 3],
    ) -> Result<SplitResult, KernelError> {
        self.record(MockOp::Split)?;
        let n = norm3(plane_normal).ok_or(KernelError::SplitFailed {
            reason: "plane normal is zero".to_string(),
        })?;
        let source = self.solid(solid)?.clone();
        let side = |p: [f64; 3]| dot3(sub3(p, plane_origin), n);
        let distances: Vec<f64> = source.bbox.corners().iter().map(|c| side(*c)).collect();
        let lowest = distances.iter().copied().fold(f64::MAX, f64::min);
        let highest = distances.iter().copied().fold(f64::MIN, f64::max);

        self.solids.remove(&solid.id());
        if lowest >= -TOL || highest <= TOL {
            let (copy, _) = self.clone_fresh(&source);
            let handle = self.insert_solid(copy);
            return Ok(if lowest >= -TOL {
                SplitResult {
                    below: None,
                    above: Some(handle),
                }
            } else {
                SplitResult {
                    below: Some(handle),
                    above: None,
                }
            });
        }

        let axis = (0..3).find(|&i| n[i].abs() > 1.0 - 1e-9);
        let mut halves = Vec::with_capacity(2);
        for sign in [-1.0, 1.0] {
            let mut half = filter_solid(&source, |c| sign * side(c) >= -TOL);
            if let Some(i) = axis {
                let cut = plane_origin[i];
                if sign * n[i] > 0.0 {
                    half.bbox.min[i] = cut;
                } else {
                    half.bbox.max[i] = cut;
                }
            }
            let (mut half, _) = self.clone_fresh(&half);

            let center = half.bbox.center();
            let on_plane = sub3(center, scale3(n, side(center)));
            let size = half.bbox.size();
            let (area, perimeter) = match axis {
                Some(i) => {
                    let others: Vec<f64> = (0..3).filter(|&j| j != i).map(|j| size[j]).collect();
                    (others[0] * others[1], 2.0 * (others[0] + others[1]))
                }
                None => (0.0, 0.0),
            };
            let vertex = MockVertex {
                id: self.alloc_id(),
                position: on_plane,
            };
            let section = MockEdge {
                id: self.alloc_id(),
                start: vertex.id,
                end: vertex.id,
                length: perimeter,
                centroid: on_plane,
                curve: "section",
            };
            let mut face_edges = vec![section.id];
            face_edges.extend(
                half.edges
                    .iter()
                    .filter(|e| side(e.centroid).abs() <= TOL)
                    .map(|e| e.id),
            );
            let face = MockFace {
                id: self.alloc_id(),
                edges: face_edges,
                normal: Some(scale3(n, -sign)),
                centroid: on_plane,
                area,
                surface_type: "planar",
            };
            half.vertices.push(vertex);
            half.edges.push(section);
            half.faces.push(face);
            halves.push(self.insert_solid(half));
        }
        let above = halves.pop();
        let below = halves.pop();
        Ok(SplitResult { below, above })
    }

    fn make_hole(
        &mut self,
        solid: &KernelSolidHandle,
        hole: &HoleSpec,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(MockOp::Hole)?;
        if hole.diameter <= 0.0 || hole.depth <= 0.0 {
            return Err(KernelError::Other {
                message: "hole diameter and depth must be positive".to_string(),
            });
        }
        let dir = norm3(hole.direction).ok_or(KernelError::Other {
            message: "hole direction is zero".to_string(),
        })?;
        if let Some(cs) = hole.countersink {
            if cs.diameter <= hole.diameter || cs.angle_deg <= 0.0 || cs.angle_deg >= 180.0 {
                return Err(KernelError::Other {
                    message: format!("invalid countersink {:?}", cs),
                });
            }
        }
        let source = self.solid(solid)?.clone();
        let mut grown = source.bbox;
        grown.min = add3(grown.min, [-TOL; 3]);
        grown.max = add3(grown.max, [TOL; 3]);
        if !inside(&grown, hole.position) {
            return Err(KernelError::Other {
                message: "hole starts outside the solid".to_string(),
            });
        }

        let (mut out, _) = self.clone_fresh(&source);
        let r = hole.diameter / 2.0;
        let cone_depth = hole
            .countersink
            .map(|cs| (cs.diameter - hole.diameter) / 2.0 / (cs.angle_deg.to_radians() / 2.0).tan())
            .unwrap_or(0.0)
            .min(hole.depth);
        let entry = add3(hole.position, scale3(dir, cone_depth));
        let exit = add3(hole.position, scale3(dir, hole.depth));

        let v_entry = MockVertex {
            id: self.alloc_id(),
            position: entry,
        };
        let v_exit = MockVertex {
            id: self.alloc_id(),
            position: exit,
        };
        let e_entry = MockEdge {
            id: self.alloc_id(),
            start: v_entry.id,
            end: v_entry.id,
            length: TAU * r,
            centroid: entry,
            curve: "circle",
        };
        let e_exit = MockEdge {
            id: self.alloc_id(),
            start: v_exit.id,
            end: v_exit.id,
            length: TAU * r,
            centroid: exit,
            curve: "circle",
        };
        let wall = MockFace {
            id: self.alloc_id(),
            edges: vec![e_entry.id, e_exit.id],
            normal: None,
            centroid: mid3(entry, exit),
            area: TAU * r * (hole.depth - cone_depth),
            surface_type: "cylindrical",
        };

        if let Some(cs) = hole.countersink {
            let v_rim = MockVertex {
                id: self.alloc_id(),
                position: hole.position,
            };
            let e_rim = MockEdge {
                id: self.alloc_id(),
                start: v_rim.id,
                end: v_rim.id,
                length: PI * cs.diameter,
                centroid: hole.position,
                curve: "circle",
            };
            let slant = ((cs.diameter / 2.0 - r).powi(2) + cone_depth.powi(2)).sqrt();
            let cone = MockFace {
                id: self.alloc_id(),
                edges: vec![e_rim.id, e_entry.id],
                normal: None,
                centroid: mid3(hole.position, entry),
                area: PI * (cs.diameter / 2.0 + r) * slant,
                surface_type: "conical",
            };
            out.vertices.push(v_rim);
            out.edges.push(e_rim);
            out.faces.push(cone);
        }

        out.vertices.push(v_entry);
        out.vertices.push(v_exit);
        out.edges.push(e_entry);
        out.edges.push(e_exit);
        out.faces.push(wall);
        Ok(self.insert_solid(out))
    }

    fn emboss_text(
        &mut self,
        solid: &KernelSolidHandle,
        text: &str,
        plane: &SketchPlane,
        position: [f64; 2],
        height: f64,
        depth: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(MockOp::Emboss)?;
        if text.trim().is_empty() {
            return Err(KernelError::Other {
                message: "nothing to emboss".to_string(),
            });
        }
        if height <= 0.0 || depth.abs() < 1e-12 {
            return Err(KernelError::Other {
                message: "text height and depth must be non-zero".to_string(),
            });
        }
        let source = self.solid(solid)?.clone();
        let (mut out, _) = self.clone_fresh(&source);
        let normal = plane.normal().to_array();
        let advance = 0.6 * height;

        for (k, _) in text.chars().enumerate().filter(|(_, c)| !c.is_whitespace()) {
            let local = Point2::new(
                position[0] + advance * (k as f64 + 0.5),
                position[1] + height / 2.0,
            );
            let centroid = add3(plane.to_world(local).to_array(), scale3(normal, depth));
            let vertex = MockVertex {
                id: self.alloc_id(),
                position: centroid,
            };
            let edge = MockEdge {
                id: self.alloc_id(),
                start: vertex.id,
                end: vertex.id,
                length: 2.0 * height,
                centroid,
                curve: "glyph",
            };
            let face = MockFace {
                id: self.alloc_id(),
                edges: vec![edge.id],
                normal: Some(scale3(normal, depth.signum())),
                centroid,
                area: advance * height / 2.0,
                surface_type: "planar",
            };
            if depth > 0.0 {
                out.bbox.include(centroid);
            }
            out.vertices.push(vertex);
            out.edges.push(edge);
            out.faces.push(face);
        }
        Ok(self.insert_solid(out))
    }

    fn set_solid_name(&mut self, solid: &KernelSolidHandle, name: &str) -> Result<(), KernelError> {
        let s = self
            .solids
            .get_mut(&solid.id())
            .ok_or(KernelError::EntityNotFound {
                id: KernelId(solid.id()),
            })?;
        s.name = Some(name.to_string());
        Ok(())
    }

    fn delete_solid(&mut self, solid: &KernelSolidHandle) -> Result<(), KernelError> {
        self.solids
            .remove(&solid.id())
            .map(|_| ())
            .ok_or(KernelError::EntityNotFound {
                id: KernelId(solid.id()),
            })
    }

    fn export_step(&self, solids: &[KernelSolidHandle]) -> Result<String, KernelError> {
        self.check_failure(MockOp::Export)?;
        if solids.is_empty() {
            return Err(KernelError::Other {
                message: "nothing to export".to_string(),
            });
        }
        let mut out = String::new();
        out.push_str("ISO-10303-21;\nHEADER;\n");
        out.push_str("FILE_DESCRIPTION(('NNWS solid model'),'2;1');\n");
        out.push_str("FILE_NAME('nnws.step','',(''),(''),'nnws-kernel','','');\n");
        out.push_str("FILE_SCHEMA(('AUTOMOTIVE_DESIGN { 1 0 10303 214 1 1 1 1 }'));\n");
        out.push_str("ENDSEC;\nDATA;\n");

        let mut next = 1usize;
        for handle in solids {
            let s = self.solid(handle)?;
            let name = display_name(s, handle);
            let brep = next;
            let shell = next + 1;
            let lo = next + 2;
            let hi = next + 3;
            let first_face = next + 4;
            let face_refs: Vec<String> = (0..s.faces.len())
                .map(|i| format!("#{}", first_face + i))
                .collect();
            out.push_str(&format!("#{}=MANIFOLD_SOLID_BREP('{}',#{});\n", brep, name, shell));
            out.push_str(&format!("#{}=CLOSED_SHELL('',({}));\n", shell, face_refs.join(",")));
            out.push_str(&format!(
                "#{}=CARTESIAN_POINT('bbox-min',({:.6},{:.6},{:.6}));\n",
                lo, s.bbox.min[0], s.bbox.min[1], s.bbox.min[2]
            ));
            out.push_str(&format!(
                "#{}=CARTESIAN_POINT('bbox-max',({:.6},{:.6},{:.6}));\n",
                hi, s.bbox.max[0], s.bbox.max[1], s.bbox.max[2]
            ));
            for (i, f) in s.faces.iter().enumerate() {
                out.push_str(&format!(
                    "#{}=ADVANCED_FACE('{}',(),$,.T.);\n",
                    first_face + i,
                    f.surface_type
                ));
            }
            next = first_face + s.faces.len();
        }
        out.push_str("ENDSEC;\nEND-ISO-10303-21;\n");
        Ok(out)
    }

    fn export_stl(&self, solids: &[KernelSolidHandle]) -> Result<String, KernelError> {
        self.check_failure(MockOp::Export)?;
        if solids.is_empty() {
            return Err(KernelError::Other {
                message: "nothing to export".to_string(),
            });
        }
        // Box faces as corner-index quads (see BoundingBox::corners), with outward normals.
        const QUADS: [([usize; 4], [f64; 3]); 6] = [
            ([0, 3, 2, 1], [0.0, 0.0, -1.0]),
            ([4, 5, 6, 7], [0.0, 0.0, 1.0]),
            ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
            ([2, 3, 7, 6], [0.0, 1.0, 0.0]),
            ([0, 4, 7, 3], [-1.0, 0.0, 0.0]),
            ([1, 2, 6, 5], [1.0, 0.0, 0.0]),
        ];
        let mut out = String::new();
        for handle in solids {
            let s = self.solid(handle)?;
            let name = display_name(s, handle);
            let c = s.bbox.corners();
            out.push_str(&format!("solid {}\n", name));
            for (q, n) in QUADS.iter() {
                for tri in [[q[0], q[1], q[2]], [q[0], q[2], q[3]]] {
                    out.push_str(&format!("  facet normal {:e} {:e} {:e}\n", n[0], n[1], n[2]));
                    out.push_str("    outer loop\n");
                    for &v in &tri {
                        out.push_str(&format!(
                            "      vertex {:e} {:e} {:e}\n",
                            c[v][0], c[v][1], c[v][2]
                        ));
                    }
                    out.push_str("    endloop\n  endfacet\n");
                }
            }
            out.push_str(&format!("endsolid {}\n", name));
        }
        Ok(out)
    }
}

impl KernelIntrospect for MockKernel {
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.solids
            .get(&solid.id())
            .map(|s| s.faces.iter().map(|f| f.id).collect())
            .unwrap_or_default()
    }

    fn list_edges(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.solids
            .get(&solid.id())
            .map(|s| s.edges.iter().map(|e| e.id).collect())
            .unwrap_or_default()
    }

    fn list_vertices(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.solids
            .get(&solid.id())
            .map(|s| s.vertices.iter().map(|v| v.id).collect())
            .unwrap_or_default()
    }

    fn face_edges(&self, face: KernelId) -> Vec<KernelId> {
        self.solids
            .values()
            .flat_map(|s| s.faces.iter())
            .find(|f| f.id == face)
            .map(|f| f.edges.clone())
            .unwrap_or_default()
    }

    fn edge_faces(&self, edge: KernelId) -> Vec<KernelId> {
        self.solids
            .values()
            .flat_map(|s| s.faces.iter())
            .filter(|f| f.edges.contains(&edge))
            .map(|f| f.id)
            .collect()
    }

    fn edge_vertices(&self, edge: KernelId) -> Option<(KernelId, KernelId)> {
        self.solids
            .values()
            .flat_map(|s| s.edges.iter())
            .find(|e| e.id == edge)
            .map(|e| (e.start, e.end))
    }

    fn vertex_position(&self, vertex: KernelId) -> Option<[f64; 3]> {
        self.solids
            .values()
            .flat_map(|s| s.vertices.iter())
            .find(|v| v.id == vertex)
            .map(|v| v.position)
    }

    fn compute_signature(&self, entity: KernelId, kind: TopoKind) -> TopoSignature {
        for solid in self.solids.values() {
            match kind {
                TopoKind::Face => {
                    if let Some(f) = solid.faces.iter().find(|f| f.id == entity) {
                        return TopoSignature {
                            surface_type: Some(f.surface_type.to_string()),
                            area: Some(f.area),
                            centroid: Some(f.centroid),
                            normal: f.normal,
                            length: None,
                        };
                    }
                }
                TopoKind::Edge => {
                    if let Some(e) = solid.edges.iter().find(|e| e.id == entity) {
                        return TopoSignature {
                            surface_type: Some(e.curve.to_string()),
                            area: None,
                            centroid: Some(e.centroid),
                            normal: None,
                            length: Some(e.length),
                        };
                    }
                }
                TopoKind::Vertex => {
                    if let Some(v) = solid.vertices.iter().find(|v| v.id == entity) {
                        return TopoSignature {
                            surface_type: Some("point".to_string()),
                            centroid: Some(v.position),
                            ..TopoSignature::default()
                        };
                    }
                }
            }
        }
        TopoSignature::empty()
    }

    fn compute_all_signatures(
        &self,
        solid: &KernelSolidHandle,
        kind: TopoKind,
    ) -> Vec<(KernelId, TopoSignature)> {
        let ids = match kind {
            TopoKind::Face => self.list_faces(solid),
            TopoKind::Edge => self.list_edges(solid),
            TopoKind::Vertex => self.list_vertices(solid),
        };
        ids.into_iter()
            .map(|id| {
                let sig = self.compute_signature(id, kind);
                (id, sig)
            })
            .collect()
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<BoundingBox> {
        self.solids.get(&solid.id()).map(|s| s.bbox)
    }

    fn solid_name(&self, solid: &KernelSolidHandle) -> Option<String> {
        self.solids.get(&solid.id()).and_then(|s| s.name.clone())
    }
}

fn display_name(solid: &MockSolid, handle: &KernelSolidHandle) -> String {
    solid
        .name
        .clone()
        .unwrap_or_else(|| format!("Body{}", handle.id()))
}

/// Keep entities whose centroid passes `keep`, plus the vertices their edges use.
/// Ids are unchanged; callers re-id through `clone_fresh`.
fn filter_solid(source: &MockSolid, keep: impl Fn([f64; 3]) -> bool) -> MockSolid {
    let edges: Vec<MockEdge> = source
        .edges
        .iter()
        .filter(|e| keep(e.centroid))
        .cloned()
        .collect();
    let edge_ids: HashSet<KernelId> = edges.iter().map(|e| e.id).collect();
    let used: HashSet<KernelId> = edges.iter().flat_map(|e| [e.start, e.end]).collect();
    let vertices = source
        .vertices
        .iter()
        .filter(|v| used.contains(&v.id))
        .cloned()
        .collect();
    let faces = source
        .faces
        .iter()
        .filter(|f| keep(f.centroid))
        .map(|f| MockFace {
            edges: f.edges.iter().copied().filter(|e| edge_ids.contains(e)).collect(),
            ..f.clone()
        })
        .collect();
    MockSolid {
        name: source.name.clone(),
        bbox: source.bbox,
        vertices,
        edges,
        faces,
    }
}

fn translate_solid(solid: &mut MockSolid, t: [f64; 3]) {
    solid.bbox = solid.bbox.translated(t);
    for v in solid.vertices.iter_mut() {
        v.position = add3(v.position, t);
    }
    for e in solid.edges.iter_mut() {
        e.centroid = add3(e.centroid, t);
    }
    for f in solid.faces.iter_mut() {
        f.centroid = add3(f.centroid, t);
    }
}

fn rotate_solid(solid: &mut MockSolid, origin: [f64; 3], axis: Vec3, angle: f64) {
    let corners = solid.bbox.corners().map(|c| rotate_point(c, origin, axis, angle));
    solid.bbox = BoundingBox::from_points(corners.iter());
    for v in solid.vertices.iter_mut() {
        v.position = rotate_point(v.position, origin, axis, angle);
    }
    for e in solid.edges.iter_mut() {
        e.centroid = rotate_point(e.centroid, origin, axis, angle);
    }
    for f in solid.faces.iter_mut() {
        f.centroid = rotate_point(f.centroid, origin, axis, angle);
        f.normal = f.normal.map(|n| rot_vec(n, axis, angle));
    }
}

/// `outer` contains `inner` on every axis.
fn contains(outer: &BoundingBox, inner: &BoundingBox) -> bool {
    (0..3).all(|i| outer.min[i] <= inner.min[i] + TOL && outer.max[i] >= inner.max[i] - TOL)
}

fn inside(bbox: &BoundingBox, p: [f64; 3]) -> bool {
    (0..3).all(|i| p[i] >= bbox.min[i] - TOL && p[i] <= bbox.max[i] + TOL)
}

/// Bounds of `target` after removing `tool`. Only a tool that spans the target on two
/// axes and bites in from one side on the third shrinks the box.
fn clip_slab(target: &BoundingBox, tool: &BoundingBox) -> BoundingBox {
    let mut out = *target;
    for i in 0..3 {
        let spans_others = (0..3).filter(|&j| j != i).all(|j| {
            tool.min[j] <= target.min[j] + TOL && tool.max[j] >= target.max[j] - TOL
        });
        if !spans_others {
            continue;
        }
        if tool.min[i] <= target.min[i] + TOL && tool.max[i] < target.max[i] {
            out.min[i] = out.min[i].max(tool.max[i]);
        }
        if tool.max[i] >= target.max[i] - TOL && tool.min[i] > target.min[i] {
            out.max[i] = out.max[i].min(tool.min[i]);
        }
    }
    out
}

/// Foot of the perpendicular from `p` onto the axis, and the distance to it.
fn axis_foot(p: [f64; 3], origin: [f64; 3], axis: Vec3) -> ([f64; 3], f64) {
    let a = axis.to_array();
    let rel = sub3(p, origin);
    let foot = add3(origin, scale3(a, dot3(rel, a)));
    (foot, len3(sub3(p, foot)))
}

fn rotate_point(p: [f64; 3], origin: [f64; 3], axis: Vec3, angle: f64) -> [f64; 3] {
    add3(origin, rot_vec(sub3(p, origin), axis, angle))
}

fn rot_vec(v: [f64; 3], axis: Vec3, angle: f64) -> [f64; 3] {
    Vec3::from_array(v).rotated_about(&axis, angle).to_array()
}

fn add3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn sub3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale3(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn dot3(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn len3(a: [f64; 3]) -> f64 {
    dot3(a, a).sqrt()
}

fn mid3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    scale3(add3(a, b), 0.5)
}

fn norm3(a: [f64; 3]) -> Option<[f64; 3]> {
    let l = len3(a);
    (l > 1e-12).then(|| scale3(a, 1.0 / l))
}
