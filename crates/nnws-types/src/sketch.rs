use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::point::{Point2, Point3};
use crate::vector::Vec3;

/// Samples used when a full circle is flattened to a polyline.
pub const CIRCLE_SAMPLES: usize = 32;

/// A sketch plane: an origin and two orthonormal in-plane axes.
/// The plane normal is `x_axis × y_axis`; positive extrusions follow it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchPlane {
    pub origin: Point3,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
}

impl SketchPlane {
    /// World XY plane, normal +Z.
    pub fn xy() -> Self {
        Self {
            origin: Point3::ORIGIN,
            x_axis: Vec3::X,
            y_axis: Vec3::Y,
        }
    }

    /// World XZ plane. Sketch +y maps to world −Z so the normal is +Y.
    pub fn xz() -> Self {
        Self {
            origin: Point3::ORIGIN,
            x_axis: Vec3::X,
            y_axis: -Vec3::Z,
        }
    }

    /// World YZ plane, normal +X.
    pub fn yz() -> Self {
        Self {
            origin: Point3::ORIGIN,
            x_axis: Vec3::Y,
            y_axis: Vec3::Z,
        }
    }

    /// Plane through `origin` perpendicular to `normal`, with an arbitrary but
    /// deterministic in-plane frame. `None` for a zero normal.
    pub fn from_normal(origin: Point3, normal: Vec3) -> Option<Self> {
        let n = normal.normalized()?;
        let helper = if n.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
        let x_axis = helper.cross(&n).normalized()?;
        let y_axis = n.cross(&x_axis);
        Some(Self {
            origin,
            x_axis,
            y_axis,
        })
    }

    pub fn normal(&self) -> Vec3 {
        self.x_axis.cross(&self.y_axis)
    }

    /// The same plane moved `distance` along its normal.
    pub fn offset(&self, distance: f64) -> Self {
        Self {
            origin: self.origin + self.normal() * distance,
            ..*self
        }
    }

    pub fn to_world(&self, p: Point2) -> Point3 {
        self.origin + self.x_axis * p.x + self.y_axis * p.y
    }
}

/// One boundary piece of a closed sketch loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Segment {
    Line {
        start: Point2,
        end: Point2,
    },
    /// Arc from `start_angle` sweeping `sweep` radians (positive is CCW).
    Arc {
        center: Point2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
}

impl Segment {
    pub fn line(start: Point2, end: Point2) -> Self {
        Segment::Line { start, end }
    }

    pub fn start(&self) -> Point2 {
        match self {
            Segment::Line { start, .. } => *start,
            Segment::Arc {
                center,
                radius,
                start_angle,
                ..
            } => center.polar(*radius, *start_angle),
        }
    }

    pub fn end(&self) -> Point2 {
        match self {
            Segment::Line { end, .. } => *end,
            Segment::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => center.polar(*radius, start_angle + sweep),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Segment::Line { start, end } => start.distance_to(end),
            Segment::Arc { radius, sweep, .. } => radius * sweep.abs(),
        }
    }

    /// Points along the segment, start included, end excluded.
    fn flatten_into(&self, out: &mut Vec<Point2>) {
        match self {
            Segment::Line { start, .. } => out.push(*start),
            Segment::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => {
                let steps = ((sweep.abs() / TAU) * CIRCLE_SAMPLES as f64).ceil().max(2.0) as usize;
                for i in 0..steps {
                    let a = start_angle + sweep * i as f64 / steps as f64;
                    out.push(center.polar(*radius, a));
                }
            }
        }
    }
}

/// A closed planar region boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Profile {
    Circle { center: Point2, radius: f64 },
    Loop { segments: Vec<Segment> },
}

impl Profile {
    pub fn circle(center: Point2, radius: f64) -> Self {
        Profile::Circle { center, radius }
    }

    /// Closed polygon through `points` (last point joins back to the first).
    pub fn polygon(points: &[Point2]) -> Self {
        let n = points.len();
        let segments = (0..n)
            .map(|i| Segment::line(points[i], points[(i + 1) % n]))
            .collect();
        Profile::Loop { segments }
    }

    /// Axis-aligned rectangle from two opposite corners.
    pub fn rect(a: Point2, b: Point2) -> Self {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        Self::polygon(&[
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
    }

    /// Number of boundary curves (a circle counts as one).
    pub fn curve_count(&self) -> usize {
        match self {
            Profile::Circle { .. } => 1,
            Profile::Loop { segments } => segments.len(),
        }
    }

    /// True when consecutive segments meet within `tol`.
    pub fn is_closed(&self, tol: f64) -> bool {
        match self {
            Profile::Circle { radius, .. } => *radius > 0.0,
            Profile::Loop { segments } => {
                !segments.is_empty()
                    && segments
                        .iter()
                        .zip(segments.iter().cycle().skip(1))
                        .all(|(a, b)| a.end().distance_to(&b.start()) <= tol)
            }
        }
    }

    /// Polyline approximation of the boundary.
    pub fn outline(&self) -> Vec<Point2> {
        match self {
            Profile::Circle { center, radius } => (0..CIRCLE_SAMPLES)
                .map(|i| center.polar(*radius, TAU * i as f64 / CIRCLE_SAMPLES as f64))
                .collect(),
            Profile::Loop { segments } => {
                let mut out = Vec::new();
                for s in segments {
                    s.flatten_into(&mut out);
                }
                out
            }
        }
    }

    pub fn perimeter(&self) -> f64 {
        match self {
            Profile::Circle { radius, .. } => TAU * radius,
            Profile::Loop { segments } => segments.iter().map(Segment::length).sum(),
        }
    }

    /// Enclosed area (exact for circles, polyline approximation for loops).
    pub fn area(&self) -> f64 {
        match self {
            Profile::Circle { radius, .. } => std::f64::consts::PI * radius * radius,
            Profile::Loop { .. } => shoelace(&self.outline()).abs(),
        }
    }

    pub fn centroid(&self) -> Point2 {
        match self {
            Profile::Circle { center, .. } => *center,
            Profile::Loop { .. } => {
                let pts = self.outline();
                let a = shoelace(&pts);
                if a.abs() < 1e-15 {
                    let n = pts.len().max(1) as f64;
                    let (sx, sy) = pts.iter().fold((0.0, 0.0), |acc, p| (acc.0 + p.x, acc.1 + p.y));
                    return Point2::new(sx / n, sy / n);
                }
                let mut cx = 0.0;
                let mut cy = 0.0;
                for (p, q) in pts.iter().zip(pts.iter().cycle().skip(1)) {
                    let cross = p.x * q.y - q.x * p.y;
                    cx += (p.x + q.x) * cross;
                    cy += (p.y + q.y) * cross;
                }
                Point2::new(cx / (6.0 * a), cy / (6.0 * a))
            }
        }
    }

    /// Sketch-space bounds as (min, max).
    pub fn bounds(&self) -> (Point2, Point2) {
        match self {
            Profile::Circle { center, radius } => (
                Point2::new(center.x - radius, center.y - radius),
                Point2::new(center.x + radius, center.y + radius),
            ),
            Profile::Loop { .. } => {
                let pts = self.outline();
                let mut min = Point2::new(f64::MAX, f64::MAX);
                let mut max = Point2::new(f64::MIN, f64::MIN);
                for p in &pts {
                    min.x = min.x.min(p.x);
                    min.y = min.y.min(p.y);
                    max.x = max.x.max(p.x);
                    max.y = max.y.max(p.y);
                }
                (min, max)
            }
        }
    }
}

/// Signed polygon area (positive for CCW).
fn shoelace(pts: &[Point2]) -> f64 {
    pts.iter()
        .zip(pts.iter().cycle().skip(1))
        .map(|(p, q)| p.x * q.y - q.x * p.y)
        .sum::<f64>()
        / 2.0
}
