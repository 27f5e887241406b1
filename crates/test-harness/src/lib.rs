//! Test harness for NNWS part generation.
//!
//! Drives the real [`nnws_engine::Generator`] against [`nnws_kernel::MockKernel`] and
//! checks the result at the level a printed part cares about: how many bodies, where
//! they sit, what they are called, and which cosmetic steps were skipped.
//!
//! # Key Components
//!
//! - [`Workbench`]: generate designs and look up bodies by name
//! - [`oracle`]: verification functions returning pass/fail verdicts
//! - [`report`]: plain-text summary of a generated design
//! - [`assertions`]: assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod workbench;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::DesignReport;
pub use workbench::Workbench;
