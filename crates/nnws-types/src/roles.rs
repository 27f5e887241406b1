use serde::{Deserialize, Serialize};

/// Semantic role assigned to topological entities by the operation that created them.
/// Roles let later steps select geometry by origin instead of by measured size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Role {
    /// The face on the positive extrusion direction end.
    EndCapPositive,
    /// The face on the sketch plane end of an extrusion.
    EndCapNegative,
    /// A lateral face created by sweeping a profile curve.
    SideFace { index: usize },
    /// A boundary edge of the positive end cap.
    EndCapPositiveEdge { index: usize },
    /// A boundary edge of the negative end cap.
    EndCapNegativeEdge { index: usize },
    /// The surface of revolution produced by a revolve.
    RevolvedFace { index: usize },
    /// Cap face at the start of a sweep path.
    SweepStartCap,
    /// Cap face at the end of a sweep path.
    SweepEndCap,
    /// Edge where the swept profile meets the start of the path.
    SweepSeamStart { index: usize },
    /// Edge where the swept profile meets the end of the path.
    SweepSeamEnd { index: usize },
    /// Edge running along the sweep path.
    SweepLateral { index: usize },
    /// A face created by a fillet operation.
    FilletFace { index: usize },
    /// A face created by a chamfer operation.
    ChamferFace { index: usize },
    /// Face created on the cutting plane of a split.
    SplitFace,
    /// An instance in a pattern operation (0 is the seed).
    PatternInstance { index: usize },
    /// A face from the first body in a boolean operation.
    BooleanBodyAFace { index: usize },
    /// A face from the second body in a boolean operation.
    BooleanBodyBFace { index: usize },
    /// Wall of a drilled hole.
    HoleWall,
    /// Conical countersink face of a hole.
    CountersinkFace,
}

impl Role {
    /// Seam edges of a swept thread, at either end of the path.
    pub fn is_sweep_seam(&self) -> bool {
        matches!(self, Role::SweepSeamStart { .. } | Role::SweepSeamEnd { .. })
    }

    pub fn is_sweep_lateral(&self) -> bool {
        matches!(self, Role::SweepLateral { .. })
    }

    pub fn is_end_cap_edge(&self, positive: bool) -> bool {
        match self {
            Role::EndCapPositiveEdge { .. } => positive,
            Role::EndCapNegativeEdge { .. } => !positive,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_predicates() {
        assert!(Role::SweepSeamStart { index: 0 }.is_sweep_seam());
        assert!(Role::SweepSeamEnd { index: 2 }.is_sweep_seam());
        assert!(!Role::SweepLateral { index: 0 }.is_sweep_seam());
        assert!(Role::SweepLateral { index: 0 }.is_sweep_lateral());
        assert!(Role::EndCapPositiveEdge { index: 0 }.is_end_cap_edge(true));
        assert!(!Role::EndCapPositiveEdge { index: 0 }.is_end_cap_edge(false));
    }

    #[test]
    fn test_role_serializes_tagged() {
        let json = serde_json::to_string(&Role::SweepLateral { index: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"SweepLateral","index":3}"#);
    }
}
