//! Versioned JSON design files: the request, the clearance it was made for, and
//! who/when metadata.

use std::fs;
use std::path::Path;

use nnws_engine::{Design, GeneratorConfig};
use serde::{Deserialize, Serialize};

use crate::errors::{ExportError, LoadError};
use crate::metadata::DesignMetadata;
use crate::migrate::migrate;

/// Format identifier written into every file.
pub const FORMAT_NAME: &str = "nnws-design";
/// Current file format version.
pub const FORMAT_VERSION: u32 = 1;

/// A saved design request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignFile {
    pub format: String,
    pub format_version: u32,
    pub metadata: DesignMetadata,
    pub config: GeneratorConfig,
    pub design: Design,
}

impl DesignFile {
    pub fn new(metadata: DesignMetadata, config: GeneratorConfig, design: Design) -> Self {
        Self {
            format: FORMAT_NAME.to_string(),
            format_version: FORMAT_VERSION,
            metadata,
            config,
            design,
        }
    }
}

/// Envelope read before the body is trusted: the design stays untyped until the
/// version has been checked and migrated.
#[derive(Debug, Deserialize)]
struct RawDesignFile {
    format: String,
    format_version: u32,
    metadata: DesignMetadata,
    config: GeneratorConfig,
    design: serde_json::Value,
}

pub fn save_design(file: &DesignFile) -> Result<String, ExportError> {
    serde_json::to_string_pretty(file).map_err(|e| ExportError::Serialize {
        what: "design file",
        reason: e.to_string(),
    })
}

pub fn load_design(json: &str) -> Result<DesignFile, LoadError> {
    let raw: RawDesignFile =
        serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))?;

    if raw.format != FORMAT_NAME {
        return Err(LoadError::UnknownFormat(raw.format));
    }
    if raw.format_version > FORMAT_VERSION {
        return Err(LoadError::FutureVersion {
            file_version: raw.format_version,
            supported_version: FORMAT_VERSION,
        });
    }

    let value = migrate(raw.design, raw.format_version, FORMAT_VERSION)?;
    let design: Design =
        serde_json::from_value(value).map_err(|e| LoadError::Parse(e.to_string()))?;
    raw.config.validate()?;

    Ok(DesignFile {
        format: raw.format,
        format_version: FORMAT_VERSION,
        metadata: raw.metadata,
        config: raw.config,
        design,
    })
}

pub fn write_design_file(path: &Path, file: &DesignFile) -> Result<(), ExportError> {
    let json = save_design(file)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
    }
    fs::write(path, json).map_err(|e| ExportError::io(path, e))
}

pub fn read_design_file(path: &Path) -> Result<DesignFile, LoadError> {
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_design(&json)
}
