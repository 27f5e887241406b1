use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use nnws_types::Point3;

/// Helix samples per full turn (one every 15°).
pub const SAMPLES_PER_TURN: usize = 24;

/// Geometry of one swept thread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreadSpec {
    /// Height of the first helix point above the base plane.
    pub start_offset: f64,
    /// Helix radius (distance from the axis to the profile center).
    pub radius: f64,
    /// Axial length covered by the helix.
    pub height: f64,
    pub pitch: f64,
    /// Radius of the circular profile swept along the helix.
    pub profile_radius: f64,
}

impl ThreadSpec {
    pub fn revolutions(&self) -> f64 {
        self.height / self.pitch
    }

    /// Number of helix samples after the prepended start point:
    /// `floor(samples_per_turn · height / pitch)`.
    pub fn sample_count(&self, samples_per_turn: usize) -> usize {
        // guards against 95.99999 style truncation on exact multiples
        (samples_per_turn as f64 * self.revolutions() + 1e-9).floor() as usize
    }

    /// Checks that the thread can produce a sweep path.
    pub fn is_well_formed(&self) -> bool {
        self.radius > 0.0
            && self.height > 0.0
            && self.pitch > 0.0
            && self.profile_radius > 0.0
            && self.profile_radius < self.radius
    }
}

/// Sample `index` of a helix: `(r·cos(2πi/n), r·sin(2πi/n), pitch·i/n + z_offset)`.
pub fn helix_point(z_offset: f64, radius: f64, pitch: f64, samples_per_turn: usize, index: usize) -> Point3 {
    let t = index as f64 / samples_per_turn as f64;
    let angle = TAU * t;
    Point3::new(radius * angle.cos(), radius * angle.sin(), pitch * t + z_offset)
}

/// The ordered spline control points of a thread: the exact start point on the nominal
/// radius at `start_offset`, followed by helix samples `1..=sample_count`.
pub fn helix_path(thread: &ThreadSpec, samples_per_turn: usize) -> Vec<Point3> {
    let count = thread.sample_count(samples_per_turn);
    let mut points = Vec::with_capacity(count + 1);
    points.push(Point3::new(thread.radius, 0.0, thread.start_offset));
    points.extend((1..=count).map(|i| {
        helix_point(thread.start_offset, thread.radius, thread.pitch, samples_per_turn, i)
    }));
    points
}
