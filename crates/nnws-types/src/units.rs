//! Unit conversion. The model works in centimeters; user-facing clearance is in millimeters.

pub fn mm_to_cm(value: f64) -> f64 {
    value / 10.0
}

pub fn cm_to_mm(value: f64) -> f64 {
    value * 10.0
}
