use serde::{Deserialize, Serialize};

/// The kind of topological entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TopoKind {
    Vertex,
    Edge,
    Face,
}

/// Geometric signature of a topological entity, used for matching and selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopoSignature {
    /// Surface type for faces (planar, cylindrical, conical, revolved, swept),
    /// curve type for edges (line, circle, arc, spline).
    pub surface_type: Option<String>,
    /// Surface area (faces).
    pub area: Option<f64>,
    /// Centroid position [x, y, z]. For closed circular edges this is the circle center.
    pub centroid: Option<[f64; 3]>,
    /// Outward normal at the centroid (faces).
    pub normal: Option<[f64; 3]>,
    /// Curve length (edges).
    pub length: Option<f64>,
}

impl TopoSignature {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Distance from the centroid to the plane through `origin` with unit `normal`.
    /// `None` when the signature has no centroid.
    pub fn plane_distance(&self, origin: [f64; 3], normal: [f64; 3]) -> Option<f64> {
        self.centroid.map(|c| {
            (c[0] - origin[0]) * normal[0]
                + (c[1] - origin[1]) * normal[1]
                + (c[2] - origin[2]) * normal[2]
        })
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            min: [f64::MAX; 3],
            max: [f64::MIN; 3],
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a [f64; 3]>) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.include(*p);
        }
        bb
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    pub fn include(&mut self, p: [f64; 3]) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.include(other.min);
        out.include(other.max);
        out
    }

    /// Overlap volume region; empty when the boxes are disjoint.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut out = Self::empty();
        for i in 0..3 {
            out.min[i] = self.min[i].max(other.min[i]);
            out.max[i] = self.max[i].min(other.max[i]);
        }
        out
    }

    /// True when the interiors overlap by more than `tol` on every axis.
    pub fn overlaps(&self, other: &Self, tol: f64) -> bool {
        (0..3).all(|i| self.min[i] + tol < other.max[i] && other.min[i] + tol < self.max[i])
    }

    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn translated(&self, d: [f64; 3]) -> Self {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] += d[i];
            out.max[i] += d[i];
        }
        out
    }

    pub fn corners(&self) -> [[f64; 3]; 8] {
        let (a, b) = (self.min, self.max);
        [
            [a[0], a[1], a[2]],
            [b[0], a[1], a[2]],
            [b[0], b[1], a[2]],
            [a[0], b[1], a[2]],
            [a[0], a[1], b[2]],
            [b[0], a[1], b[2]],
            [b[0], b[1], b[2]],
            [a[0], b[1], b[2]],
        ]
    }
}
