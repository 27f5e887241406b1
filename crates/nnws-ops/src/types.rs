use nnws_kernel::{KernelError, KernelId, KernelSolidHandle};
use nnws_types::{Role, TopoKind, TopoSignature};

use crate::diff::DiffResult;
use crate::pipeline::Stage;

/// What one op produced: bodies to chain into the next step, plus enough topology history
/// to pick faces and edges by where they came from.
#[derive(Debug, Clone)]
pub struct OpResult {
    /// First entry is the main body.
    pub outputs: Vec<KernelSolidHandle>,
    pub provenance: Provenance,
    pub diagnostics: Diagnostics,
}

impl OpResult {
    /// One output body, no warnings.
    pub fn single(handle: KernelSolidHandle, provenance: Provenance) -> Self {
        Self {
            outputs: vec![handle],
            provenance,
            diagnostics: Diagnostics::default(),
        }
    }

    /// The main output body.
    pub fn main(&self) -> Result<KernelSolidHandle, OpError> {
        self.outputs.first().cloned().ok_or(OpError::NoOutput)
    }

    /// Entities carrying a role that satisfies `pred`, in assignment order.
    pub fn with_role(&self, pred: impl Fn(&Role) -> bool) -> Vec<KernelId> {
        self.provenance
            .role_assignments
            .iter()
            .filter(|(_, role)| pred(role))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Where an input entity ended up. `None` if the operation deleted it.
    pub fn follow(&self, id: KernelId) -> Option<KernelId> {
        if let Some(rw) = self.provenance.modified.iter().find(|rw| rw.before == id) {
            return Some(rw.after);
        }
        if self.provenance.deleted.iter().any(|e| e.kernel_id == id) {
            return None;
        }
        Some(id)
    }
}

/// Topology before vs after one op.
#[derive(Debug, Clone, Default)]
pub struct Provenance {
    /// New in the result.
    pub created: Vec<EntityRecord>,
    /// Gone from the result.
    pub deleted: Vec<EntityRecord>,
    /// Entities that carried over into the result under a new id.
    pub modified: Vec<Rewrite>,
    pub role_assignments: Vec<(KernelId, Role)>,
}

impl Provenance {
    /// A solid built from nothing: everything in it is new.
    pub fn fresh(diff: DiffResult, role_assignments: Vec<(KernelId, Role)>) -> Self {
        Self {
            created: diff.created,
            deleted: diff.deleted,
            modified: Vec::new(),
            role_assignments,
        }
    }

    /// An existing solid changed in place. Survivors that came back under a new id are
    /// recorded as rewrites tagged `reason`.
    pub fn reshaped(
        diff: DiffResult,
        reason: RewriteReason,
        role_assignments: Vec<(KernelId, Role)>,
    ) -> Self {
        Self {
            modified: diff.rewrites(reason),
            created: diff.created,
            deleted: diff.deleted,
            role_assignments,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub kernel_id: KernelId,
    pub kind: TopoKind,
    pub signature: TopoSignature,
}

/// An entity that survived an operation under a different id.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub before: KernelId,
    pub after: KernelId,
    pub reason: RewriteReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum RewriteReason {
    /// Cut back by a subtract, fillet or chamfer.
    Trimmed,
    /// The body was cut in two by a plane.
    Split,
    /// Two bodies were merged into one.
    Merged,
    /// Copied or moved, same shape.
    Moved,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub warnings: Vec<String>,
    /// Wall time inside the kernel call.
    pub kernel_time_ms: f64,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum OpError {
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("no closed profile to build from")]
    NoProfiles,

    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("operation produced no body")]
    NoOutput,
}

/// A fatal failure while building a component, with enough context to tell how far
/// generation got.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{component}: {feature} failed during {stage} after {steps_completed} steps: {source}")]
pub struct ConstructionError {
    pub component: String,
    pub stage: Stage,
    pub feature: String,
    pub steps_completed: usize,
    #[source]
    pub source: OpError,
}
