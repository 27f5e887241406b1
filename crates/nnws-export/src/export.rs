//! Writing generated bodies to STEP or STL through the kernel.

use std::fs;
use std::path::Path;

use nnws_engine::GeneratedDesign;
use nnws_ops::KernelBundle;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::errors::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Step,
    Stl,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Step => "step",
            ExportFormat::Stl => "stl",
        }
    }

    /// Pick the format from a file extension (`.step`, `.stp`, `.stl`).
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "step" | "stp" => Ok(ExportFormat::Step),
            "stl" => Ok(ExportFormat::Stl),
            _ => Err(ExportError::UnknownExtension(ext)),
        }
    }
}

/// Serialize every body of `design` into one document and write it to `path`.
/// Parent directories are created as needed. Returns the bytes written.
#[instrument(skip(kb, design), fields(component = %design.component, path = %path.display()))]
pub fn export_design(
    kb: &dyn KernelBundle,
    design: &GeneratedDesign,
    path: &Path,
    format: ExportFormat,
) -> Result<usize, ExportError> {
    let handles = design.handles();
    if handles.is_empty() {
        return Err(ExportError::NoBodies);
    }
    let document = match format {
        ExportFormat::Step => kb.export_step(&handles)?,
        ExportFormat::Stl => kb.export_stl(&handles)?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
    }
    fs::write(path, &document).map_err(|e| ExportError::io(path, e))?;
    info!(bytes = document.len(), bodies = handles.len(), "design exported");
    Ok(document.len())
}
