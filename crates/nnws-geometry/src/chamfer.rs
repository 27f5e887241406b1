use serde::{Deserialize, Serialize};

/// Horizontal width of a chamfer that rises `height` at `angle_deg` from the base.
///
/// `height / tan(angle)`. Undefined at 0° and 180°; callers validate the open
/// interval before asking.
pub fn chamfer_width(angle_deg: f64, height: f64) -> f64 {
    height / angle_deg.to_radians().tan()
}

/// Angle + height pair shared by every part that mates with the wall's inner chamfer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChamferSpec {
    pub angle_deg: f64,
    pub height: f64,
}

impl ChamferSpec {
    pub fn new(angle_deg: f64, height: f64) -> Self {
        Self { angle_deg, height }
    }

    pub fn width(&self) -> f64 {
        chamfer_width(self.angle_deg, self.height)
    }

    pub fn is_valid(&self) -> bool {
        self.angle_deg > 0.0 && self.angle_deg < 180.0 && self.height > 0.0
    }
}
