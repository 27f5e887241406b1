use std::fmt;

use nnws_ops::ConstructionError;
use serde::{Deserialize, Serialize};

/// Errors surfaced by [`crate::Generator::generate`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("inputs invalid: {0}")]
    Validation(#[from] ValidationError),

    #[error("construction failed: {0}")]
    Construction(#[from] ConstructionError),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// One out-of-range parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in one request, so the caller can fix them together.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        f.write_str(&parts.join("; "))
    }
}

/// Accumulates violations while a parameter set is checked.
#[derive(Debug, Default)]
pub(crate) struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok` holds.
    pub(crate) fn require(&mut self, ok: bool, field: &str, message: impl Into<String>) {
        if !ok {
            self.violations.push(Violation::new(field, message));
        }
    }

    /// Record a violation unless `value` is a finite number.
    pub(crate) fn require_finite(&mut self, value: f64, field: &str) {
        self.require(value.is_finite(), field, "must be a finite number");
    }

    /// Fold in the violations of a nested parameter set.
    pub(crate) fn merge(&mut self, other: Result<(), ValidationError>) {
        if let Err(e) = other {
            self.violations.extend(e.violations);
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }
}

/// Settings that cannot describe a buildable design, independent of any one part's
/// dimensions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("wall pattern has no rows")]
    EmptyPattern,

    #[error("wall pattern is missing row {row} (rows must run 0..{rows} without gaps)")]
    MissingRow { row: usize, rows: usize },

    #[error("wall pattern row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("clearance {value} mm is outside 0..={max} mm")]
    ClearanceOutOfRange { value: f64, max: f64 },

    #[error("samples per turn must be at least {min}, got {value}")]
    TooFewSamples { value: usize, min: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checker_collects_every_violation() {
        let mut checker = Checker::new();
        checker.require(false, "trim_top", "must be positive");
        checker.require(true, "trim_bottom", "must be positive");
        checker.require(false, "extra_spacing", "must not be negative");
        let err = checker.finish().unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert!(err.has_field("trim_top"));
        assert!(!err.has_field("trim_bottom"));
        assert_eq!(
            err.to_string(),
            "trim_top: must be positive; extra_spacing: must not be negative"
        );
    }

    #[test]
    fn test_engine_error_wraps_validation() {
        let err: EngineError = ValidationError {
            violations: vec![Violation::new("size", "too large")],
        }
        .into();
        assert_eq!(err.to_string(), "inputs invalid: size: too large");
    }

    #[test]
    fn test_checker_merges_nested_violations() {
        let mut nested = Checker::new();
        nested.require_finite(f64::NAN, "trim_top");
        let mut checker = Checker::new();
        checker.merge(nested.finish());
        checker.merge(Ok(()));
        checker.require_finite(1.5, "length");
        let err = checker.finish().unwrap_err();
        assert_eq!(err.violations, vec![Violation::new("trim_top", "must be a finite number")]);
    }
}
