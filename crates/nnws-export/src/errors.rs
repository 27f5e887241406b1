use std::path::PathBuf;

use nnws_engine::{ConfigurationError, EngineError};
use nnws_kernel::KernelError;

/// Errors while writing generated parts or batch output.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("generation failed: {0}")]
    Generation(#[from] EngineError),

    #[error("kernel export failed: {0}")]
    Kernel(#[from] KernelError),

    #[error("no bodies to export")]
    NoBodies,

    #[error("unsupported export extension: {0}")]
    UnknownExtension(String),

    #[error("failed to serialize {what}: {reason}")]
    Serialize { what: &'static str, reason: String },

    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors while reading a design file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse design file: {0}")]
    Parse(String),

    #[error("unknown file format: {0}")]
    UnknownFormat(String),

    #[error("file version {file_version} is newer than supported version {supported_version}")]
    FutureVersion {
        file_version: u32,
        supported_version: u32,
    },

    #[error("migration failed from version {from} to {to}: {reason}")]
    MigrationFailed { from: u32, to: u32, reason: String },

    #[error("stored configuration rejected: {0}")]
    Config(#[from] ConfigurationError),

    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
