use serde::{Deserialize, Serialize};

pub use nnws_types::{BoundingBox, Profile, SketchPlane, TopoKind, TopoSignature};

/// A solid living in one kernel session. Not serializable; meaningless after the session ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelSolidHandle(pub(crate) u64);

impl KernelSolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }

    /// Raw session-local number, for log fields only.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Face, edge or vertex id inside a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KernelId(pub u64);

#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("fillet failed: {reason}")]
    FilletFailed { reason: String },

    #[error("chamfer failed: {reason}")]
    ChamferFailed { reason: String },

    #[error("sweep failed: {reason}")]
    SweepFailed { reason: String },

    #[error("split failed: {reason}")]
    SplitFailed { reason: String },

    #[error("entity not found: {id:?}")]
    EntityNotFound { id: KernelId },

    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },

    #[error("kernel error: {message}")]
    Other { message: String },
}

/// How a chamfer is dimensioned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChamferKind {
    /// Same setback on both adjacent faces.
    EqualDistance { distance: f64 },
    /// Setback on one face plus the bevel angle in degrees.
    /// `flipped` swaps which adjacent face the distance is measured on.
    DistanceAngle {
        distance: f64,
        angle_deg: f64,
        flipped: bool,
    },
}

impl ChamferKind {
    /// Setback measured on the reference face.
    pub fn distance(&self) -> f64 {
        match self {
            ChamferKind::EqualDistance { distance } => *distance,
            ChamferKind::DistanceAngle { distance, .. } => *distance,
        }
    }
}

/// Cone-shaped entry of a countersunk hole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countersink {
    pub diameter: f64,
    pub angle_deg: f64,
}

/// A drilled hole starting at `position` and running `depth` along `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoleSpec {
    pub position: [f64; 3],
    pub direction: [f64; 3],
    pub diameter: f64,
    pub depth: f64,
    pub countersink: Option<Countersink>,
}

/// The two halves of a solid split by a plane. A side with no material is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitResult {
    /// Material on the side opposite the plane normal.
    pub below: Option<KernelSolidHandle>,
    /// Material on the side the plane normal points to.
    pub above: Option<KernelSolidHandle>,
}

// plain number in JSON
impl Serialize for KernelId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KernelId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(KernelId)
    }
}
