//! Staged construction with two failure policies.
//!
//! Structural steps define the solid (base bodies, mating cuts, booleans); any failure
//! aborts the component with a [`ConstructionError`]. Cosmetic steps only change
//! appearance (seam fillets, labels); a failure is logged and recorded as a warning and
//! construction continues with the unmodified body.

use std::fmt;

use nnws_kernel::{KernelId, KernelSolidHandle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::fillet::execute_fillet;
use crate::kernel_ext::KernelBundle;
use crate::types::{ConstructionError, OpError, OpResult};

/// Generation stages, in the order a component passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Validate,
    BaseGeometry,
    Notch,
    Trims,
    Repetition,
    ScrewHole,
    Finishing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validate => "validate",
            Stage::BaseGeometry => "base geometry",
            Stage::Notch => "notch",
            Stage::Trims => "trims",
            Stage::Repetition => "repetition",
            Stage::ScrewHole => "screw hole",
            Stage::Finishing => "finishing",
        };
        f.write_str(name)
    }
}

/// Outcome of a cosmetic step: the body to continue with, plus the operation result
/// when the step was applied.
#[derive(Debug, Clone)]
pub struct Cosmetic {
    pub handle: KernelSolidHandle,
    pub applied: Option<OpResult>,
}

impl Cosmetic {
    /// Where an entity of the input body ended up.
    pub fn follow(&self, id: KernelId) -> Option<KernelId> {
        match &self.applied {
            Some(result) => result.follow(id),
            None => Some(id),
        }
    }

    pub fn follow_all(&self, ids: &[KernelId]) -> Vec<KernelId> {
        ids.iter().filter_map(|id| self.follow(*id)).collect()
    }
}

/// What a finished pipeline reports.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub component: String,
    pub stages_completed: Vec<Stage>,
    pub steps: usize,
    pub warnings: Vec<String>,
}

/// Tracks one component's construction: current stage, steps done, warnings.
#[derive(Debug, Clone)]
pub struct Pipeline {
    component: String,
    stage: Stage,
    completed: Vec<Stage>,
    steps: usize,
    warnings: Vec<String>,
}

impl Pipeline {
    /// A pipeline that has passed validation.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            stage: Stage::Validate,
            completed: Vec::new(),
            steps: 0,
            warnings: Vec::new(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Move on to `stage`, marking the current one complete.
    pub fn enter(&mut self, stage: Stage) {
        if stage == self.stage {
            return;
        }
        self.completed.push(self.stage);
        self.stage = stage;
        debug!(component = %self.component, %stage, steps = self.steps, "entering stage");
    }

    /// Run a step that must succeed.
    pub fn structural<T>(
        &mut self,
        feature: &str,
        op: impl FnOnce() -> Result<T, OpError>,
    ) -> Result<T, ConstructionError> {
        match op() {
            Ok(value) => {
                self.steps += 1;
                Ok(value)
            }
            Err(source) => {
                warn!(
                    component = %self.component,
                    stage = %self.stage,
                    feature,
                    steps = self.steps,
                    error = %source,
                    "structural step failed, aborting"
                );
                Err(ConstructionError {
                    component: self.component.clone(),
                    stage: self.stage,
                    feature: feature.to_string(),
                    steps_completed: self.steps,
                    source,
                })
            }
        }
    }

    /// Run a step that may fail without harming the part. On failure the warning is
    /// recorded and `solid` is handed back unchanged.
    pub fn cosmetic(
        &mut self,
        feature: &str,
        criterion: &str,
        solid: KernelSolidHandle,
        op: impl FnOnce(&KernelSolidHandle) -> Result<OpResult, OpError>,
    ) -> Cosmetic {
        match op(&solid).and_then(|result| Ok((result.main()?, result))) {
            Ok((handle, result)) => {
                self.steps += 1;
                Cosmetic {
                    handle,
                    applied: Some(result),
                }
            }
            Err(error) => {
                warn!(
                    component = %self.component,
                    stage = %self.stage,
                    feature,
                    criterion,
                    error = %error,
                    "cosmetic step skipped"
                );
                self.warnings.push(format!(
                    "{} skipped ({}): {}",
                    feature, criterion, error
                ));
                Cosmetic {
                    handle: solid,
                    applied: None,
                }
            }
        }
    }

    /// Cosmetic fillet. An empty selection is a logged no-op.
    pub fn cosmetic_fillet(
        &mut self,
        kb: &mut dyn KernelBundle,
        feature: &str,
        criterion: &str,
        solid: KernelSolidHandle,
        edges: &[KernelId],
        radius: f64,
    ) -> Cosmetic {
        if edges.is_empty() {
            warn!(
                component = %self.component,
                feature,
                criterion,
                "no edges matched, fillet skipped"
            );
            self.warnings
                .push(format!("{} skipped ({}): no edges matched", feature, criterion));
            return Cosmetic {
                handle: solid,
                applied: None,
            };
        }
        self.cosmetic(feature, criterion, solid, |s| {
            execute_fillet(kb, s, edges, radius)
        })
    }

    /// Close the pipeline, marking the current stage complete.
    pub fn finish(mut self) -> PipelineReport {
        self.completed.push(self.stage);
        info!(
            component = %self.component,
            steps = self.steps,
            warnings = self.warnings.len(),
            "component built"
        );
        PipelineReport {
            component: self.component,
            stages_completed: self.completed,
            steps: self.steps,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nnws_kernel::KernelError;

    #[test]
    fn test_stages_recorded_in_order() {
        let mut pipeline = Pipeline::new("Insert");
        pipeline.enter(Stage::BaseGeometry);
        pipeline.enter(Stage::Trims);
        pipeline.enter(Stage::Trims);
        let report = pipeline.finish();
        assert_eq!(
            report.stages_completed,
            vec![Stage::Validate, Stage::BaseGeometry, Stage::Trims]
        );
    }

    #[test]
    fn test_structural_failure_carries_context() {
        let mut pipeline = Pipeline::new("WallSection");
        pipeline.enter(Stage::BaseGeometry);
        let ok: Result<u32, ConstructionError> = pipeline.structural("prism", || Ok(1));
        assert!(ok.is_ok());
        let err = pipeline
            .structural::<()>("bore cut", || {
                Err(OpError::Kernel(KernelError::BooleanFailed {
                    reason: "tool misses".to_string(),
                }))
            })
            .unwrap_err();
        assert_eq!(err.component, "WallSection");
        assert_eq!(err.stage, Stage::BaseGeometry);
        assert_eq!(err.feature, "bore cut");
        assert_eq!(err.steps_completed, 1);
        let message = err.to_string();
        assert!(message.contains("bore cut"), "{}", message);
        assert!(message.contains("base geometry"), "{}", message);
    }
}
