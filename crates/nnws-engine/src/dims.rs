//! Sizes derived from the fixed constants and the configured clearance.

use nnws_geometry::chamfer_width;

use crate::constants::*;

/// Derived dimensions for one clearance, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Clearance in centimeters.
    pub clearance: f64,
}

impl Dimensions {
    pub fn new(clearance_cm: f64) -> Self {
        Self {
            clearance: clearance_cm,
        }
    }

    pub fn screw_outer_radius(&self) -> f64 {
        (THREAD_MAJOR_DIAMETER - THREAD_DEPTH_CORRECTION - self.clearance) / 2.0
    }

    pub fn screw_inner_radius(&self) -> f64 {
        self.screw_outer_radius() - SCREW_HEAD_THICKNESS / 2.0
    }

    /// Base cylinder of every insert; always strictly inside the screw cavity.
    pub fn insert_outer_radius(&self) -> f64 {
        self.screw_inner_radius() - self.clearance - EXTERNAL_TOLERANCE
    }

    pub fn anchor_radius(&self) -> f64 {
        (HALF_CELL - OUTER_WALL_THICKNESS - INNER_WALL_OFFSET - INNER_WALL_OFFSET)
            + chamfer_width(
                INTERNAL_CHAMFER_ANGLE,
                WALL_THICKNESS - INNER_SECTION_OFFSET - 0.1,
            )
            - self.clearance / 2.0
    }

    pub fn anchor_height(&self) -> f64 {
        WALL_THICKNESS - INNER_SECTION_OFFSET - self.clearance
    }

    /// Corner radius shared by the shelf ledge and the shelf insert that sits on it.
    pub fn shelf_ledge_radius(&self) -> f64 {
        SHELF_WIDTH - LEDGER_WIDTH + INTERNAL_SKETCH_RADIUS
    }

    /// Radius of the locking bosses on inserts and shelf inserts.
    pub fn notch_boss_radius(&self) -> f64 {
        NOTCH_RADIUS - self.clearance
    }

    /// Width of the inner section chamfer every anchor mirrors.
    pub fn wall_chamfer_width(&self) -> f64 {
        chamfer_width(INTERNAL_CHAMFER_ANGLE, INNER_SECTION_OFFSET - 0.1)
    }
}
