use nnws_geometry::SAMPLES_PER_TURN;
use nnws_types::mm_to_cm;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

pub const DEFAULT_CLEARANCE_MM: f64 = 0.1;
pub const MAX_CLEARANCE_MM: f64 = 0.25;
pub const MIN_SAMPLES_PER_TURN: usize = 3;

/// Settings shared by every generator call.
///
/// Clearance is the gap left between two printed parts that must mate. It is passed
/// explicitly to each generation so that parts built with different clearances never
/// share hidden state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub clearance_mm: f64,
    /// Helix samples per thread turn.
    pub samples_per_turn: usize,
}

impl GeneratorConfig {
    pub fn with_clearance_mm(clearance_mm: f64) -> Self {
        Self {
            clearance_mm,
            ..Self::default()
        }
    }

    pub fn clearance_cm(&self) -> f64 {
        mm_to_cm(self.clearance_mm)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(0.0..=MAX_CLEARANCE_MM).contains(&self.clearance_mm) {
            return Err(ConfigurationError::ClearanceOutOfRange {
                value: self.clearance_mm,
                max: MAX_CLEARANCE_MM,
            });
        }
        if self.samples_per_turn < MIN_SAMPLES_PER_TURN {
            return Err(ConfigurationError::TooFewSamples {
                value: self.samples_per_turn,
                min: MIN_SAMPLES_PER_TURN,
            });
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            clearance_mm: DEFAULT_CLEARANCE_MM,
            samples_per_turn: SAMPLES_PER_TURN,
        }
    }
}
