//! Getting NNWS parts out of the kernel: STEP/STL export, saved design files, and the
//! batch sweep used to regenerate the wall catalogue.

pub mod batch;
pub mod design_file;
pub mod errors;
pub mod export;
pub mod metadata;
pub mod migrate;
pub mod trigger;

pub use batch::{BatchConfig, BatchDriver, BatchEntry, BatchReport, MANIFEST_FILE};
pub use design_file::{
    load_design, read_design_file, save_design, write_design_file, DesignFile, FORMAT_NAME,
    FORMAT_VERSION,
};
pub use errors::{ExportError, LoadError};
pub use export::{export_design, ExportFormat};
pub use metadata::DesignMetadata;
pub use trigger::{run_triggers, spawn_batch_trigger, BatchTrigger};
