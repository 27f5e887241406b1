//! Plain-text summary of one generated design.

use std::fmt;

use nnws_engine::GeneratedDesign;
use nnws_kernel::KernelIntrospect;
use serde::Serialize;
use uuid::Uuid;

use crate::oracle::OracleVerdict;

/// One body line of the report.
#[derive(Debug, Clone, Serialize)]
pub struct BodyEntry {
    pub name: String,
    pub faces: usize,
    pub edges: usize,
    pub bbox: Option<([f64; 3], [f64; 3])>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerdictEntry {
    pub oracle: String,
    pub passed: bool,
    pub detail: String,
}

/// Everything worth knowing about one generation, readable at a glance.
#[derive(Debug, Clone, Serialize)]
pub struct DesignReport {
    pub id: Uuid,
    pub component: String,
    pub stages: Vec<String>,
    pub bodies: Vec<BodyEntry>,
    pub warnings: Vec<String>,
    pub verdicts: Vec<VerdictEntry>,
}

impl DesignReport {
    pub fn build(
        introspect: &dyn KernelIntrospect,
        design: &GeneratedDesign,
        verdicts: Vec<OracleVerdict>,
    ) -> Self {
        let bodies = design
            .bodies
            .iter()
            .map(|b| BodyEntry {
                name: b.name.clone(),
                faces: introspect.list_faces(&b.handle).len(),
                edges: introspect.list_edges(&b.handle).len(),
                bbox: introspect.bounding_box(&b.handle).map(|bb| (bb.min, bb.max)),
            })
            .collect();
        Self {
            id: design.id,
            component: design.component.clone(),
            stages: design
                .stages_completed
                .iter()
                .map(|s| s.to_string())
                .collect(),
            bodies,
            warnings: design.warnings.clone(),
            verdicts: verdicts
                .into_iter()
                .map(|v| VerdictEntry {
                    oracle: v.oracle_name,
                    passed: v.passed,
                    detail: v.detail,
                })
                .collect(),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.verdicts.iter().all(|v| v.passed)
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}

impl fmt::Display for DesignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== NNWS Design Report: {} ===", self.component)?;
        writeln!(f, "Stages: {}", self.stages.join(" -> "))?;
        writeln!(f)?;
        writeln!(f, "Bodies ({}):", self.bodies.len())?;
        for body in &self.bodies {
            write!(f, "  \"{}\" F={} E={}", body.name, body.faces, body.edges)?;
            match body.bbox {
                Some((lo, hi)) => writeln!(
                    f,
                    " | bbox ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
                    lo[0], lo[1], lo[2], hi[0], hi[1], hi[2]
                )?,
                None => writeln!(f, " | bbox none")?,
            }
        }
        writeln!(f)?;
        if self.warnings.is_empty() {
            writeln!(f, "Warnings: none")?;
        } else {
            writeln!(f, "Warnings ({}):", self.warnings.len())?;
            for w in &self.warnings {
                writeln!(f, "  - {}", w)?;
            }
        }
        if !self.verdicts.is_empty() {
            writeln!(f)?;
            writeln!(f, "Oracles:")?;
            for v in &self.verdicts {
                let mark = if v.passed { "PASS" } else { "FAIL" };
                writeln!(f, "  [{}] {}: {}", mark, v.oracle, v.detail)?;
            }
        }
        Ok(())
    }
}
