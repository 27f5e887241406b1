//! Assertion helpers with diagnostic output.
//!
//! Failures list what was expected, what was found, and the warnings of the run.

use nnws_engine::GeneratedDesign;
use nnws_kernel::KernelIntrospect;
use nnws_ops::Stage;

use crate::helpers::{body_boxes, distance, HarnessError};

fn context(design: &GeneratedDesign) -> String {
    if design.warnings.is_empty() {
        format!("{} (no warnings)", design.component)
    } else {
        format!("{} (warnings: {})", design.component, design.warnings.join(" | "))
    }
}

pub fn assert_body_count(design: &GeneratedDesign, expected: usize) -> Result<(), HarnessError> {
    if design.bodies.len() == expected {
        return Ok(());
    }
    let names: Vec<&str> = design.bodies.iter().map(|b| b.name.as_str()).collect();
    Err(HarnessError::AssertionFailed {
        detail: format!(
            "[{}] expected {} bodies, got {}: {:?}",
            context(design),
            expected,
            names.len(),
            names
        ),
    })
}

pub fn assert_body_names(design: &GeneratedDesign, expected: &[&str]) -> Result<(), HarnessError> {
    let actual: Vec<&str> = design.bodies.iter().map(|b| b.name.as_str()).collect();
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected names {:?}, got {:?}",
                context(design),
                expected,
                actual
            ),
        })
    }
}

pub fn assert_no_warnings(design: &GeneratedDesign) -> Result<(), HarnessError> {
    if design.warnings.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: context(design),
        })
    }
}

pub fn assert_stage_completed(design: &GeneratedDesign, stage: Stage) -> Result<(), HarnessError> {
    if design.stages_completed.contains(&stage) {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] stage {} not completed, got {:?}",
                context(design),
                stage,
                design.stages_completed
            ),
        })
    }
}

/// Every pair of body centers is at least `min` apart.
pub fn assert_center_spacing(
    introspect: &dyn KernelIntrospect,
    design: &GeneratedDesign,
    min: f64,
    tol: f64,
) -> Result<(), HarnessError> {
    let boxes = body_boxes(introspect, design)?;
    for (i, (name_a, a)) in boxes.iter().enumerate() {
        for (name_b, b) in &boxes[i + 1..] {
            let d = distance(a.center(), b.center());
            if d + tol < min {
                return Err(HarnessError::AssertionFailed {
                    detail: format!(
                        "[{}] \"{}\" and \"{}\" are {:.4} apart, expected >= {:.4}",
                        context(design),
                        name_a,
                        name_b,
                        d,
                        min
                    ),
                });
            }
        }
    }
    Ok(())
}
