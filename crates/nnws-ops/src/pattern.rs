use nnws_kernel::{KernelId, KernelSolidHandle};
use nnws_types::Role;
use tracing::instrument;

use crate::diff::{self, TopoSnapshot};
use crate::kernel_ext::KernelBundle;
use crate::types::{Diagnostics, OpError, OpResult, Provenance};

/// Rectangular pattern: `count` instances along `direction`, `spacing` apart.
/// Outputs are the seed followed by the `count − 1` new instances.
#[instrument(skip(kb, solid), fields(solid = solid.raw()))]
pub fn execute_pattern_rectangular(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    direction: [f64; 3],
    count: usize,
    spacing: f64,
) -> Result<OpResult, OpError> {
    if count == 0 {
        return Err(OpError::InvalidParameter {
            reason: "pattern count must be at least 1".to_string(),
        });
    }
    if spacing <= 0.0 {
        return Err(OpError::InvalidParameter {
            reason: "pattern spacing must be positive".to_string(),
        });
    }
    let copies = if count > 1 {
        kb.pattern_rectangular(solid, direction, count, spacing)?
    } else {
        Vec::new()
    };
    Ok(pattern_result(kb, solid, copies))
}

/// Circular pattern of `count` instances about an axis. A full-turn `total_angle`
/// spaces them evenly; any other angle puts the last instance at `total_angle`.
#[instrument(skip(kb, solid), fields(solid = solid.raw()))]
pub fn execute_pattern_circular(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    axis_origin: [f64; 3],
    axis_direction: [f64; 3],
    count: usize,
    total_angle: f64,
) -> Result<OpResult, OpError> {
    if count == 0 {
        return Err(OpError::InvalidParameter {
            reason: "pattern count must be at least 1".to_string(),
        });
    }
    let copies = if count > 1 {
        kb.pattern_circular(solid, axis_origin, axis_direction, count, total_angle)?
    } else {
        Vec::new()
    };
    Ok(pattern_result(kb, solid, copies))
}

/// Every face of instance `i` gets `PatternInstance { index: i }`; the seed is 0.
fn pattern_result(
    kb: &dyn KernelBundle,
    seed: &KernelSolidHandle,
    copies: Vec<KernelSolidHandle>,
) -> OpResult {
    let introspect = kb.as_introspect();
    let mut outputs = Vec::with_capacity(copies.len() + 1);
    outputs.push(seed.clone());
    outputs.extend(copies);

    let mut created = Vec::new();
    let mut role_assignments: Vec<(KernelId, Role)> = Vec::new();
    for (index, instance) in outputs.iter().enumerate() {
        for face in introspect.list_faces(instance) {
            role_assignments.push((face, Role::PatternInstance { index }));
        }
        if index > 0 {
            let snap = diff::snapshot(introspect, instance);
            created.extend(diff::diff(&TopoSnapshot::empty(), &snap).created);
        }
    }

    OpResult {
        outputs,
        provenance: Provenance {
            created,
            role_assignments,
            ..Provenance::default()
        },
        diagnostics: Diagnostics::default(),
    }
}
