//! Feature operations for the NNWS generators.
//!
//! Each `execute_*` function issues one kernel operation, diffs topology before and
//! after, and returns an [`OpResult`] with provenance and semantic roles. The
//! [`Pipeline`] wraps operations with the structural / cosmetic failure policies, and
//! [`thread::build_thread`] composes them into a helical screw thread.

pub mod boolean;
pub mod chamfer;
pub mod diff;
pub mod emboss;
pub mod extrude;
pub mod fillet;
pub mod hole;
pub mod kernel_ext;
pub mod loft;
pub mod pattern;
pub mod pipeline;
pub mod revolve;
pub mod select;
pub mod sketch;
pub mod split;
pub mod sweep;
pub mod thread;
pub mod transform;
pub mod types;

pub use boolean::{execute_boolean, BooleanKind};
pub use chamfer::execute_chamfer;
pub use diff::{signature_similarity, snapshot, DiffResult, TopoSnapshot};
pub use emboss::execute_emboss;
pub use extrude::{execute_extrude, execute_extrude_profile};
pub use fillet::execute_fillet;
pub use hole::execute_hole;
pub use kernel_ext::KernelBundle;
pub use loft::execute_loft;
pub use pattern::{execute_pattern_circular, execute_pattern_rectangular};
pub use pipeline::{Cosmetic, Pipeline, PipelineReport, Stage};
pub use revolve::{execute_revolve, execute_revolve_profile};
pub use sketch::{profile_face, profile_faces};
pub use split::{execute_split, SplitSide};
pub use sweep::execute_sweep;
pub use thread::{build_thread, ThreadKind};
pub use transform::execute_copy_translated;
pub use types::*;
