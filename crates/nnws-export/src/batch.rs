//! Batch sweep over wall sizes, exporting one file per panel.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use nnws_engine::{Design, Generator, GeneratorConfig, WallParams};
use nnws_ops::KernelBundle;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::ExportError;
use crate::export::{export_design, ExportFormat};

pub const MANIFEST_FILE: &str = "manifest.json";
const NOTCHED_DIR: &str = "notched";

/// Which walls to generate and where to put them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub export_dir: PathBuf,
    pub widths: Vec<usize>,
    pub heights: Vec<usize>,
    /// Notch settings to sweep, in order.
    pub notch_variants: Vec<bool>,
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl BatchConfig {
    /// Every wall from 1×1 to 8×8, notched then plain.
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
            widths: (1..=8).collect(),
            heights: (1..=8).collect(),
            notch_variants: vec![true, false],
            format: ExportFormat::Step,
            generator: GeneratorConfig::default(),
        }
    }

    pub fn run_count(&self) -> usize {
        self.widths.len() * self.heights.len() * self.notch_variants.len()
    }

    /// Path of one panel relative to the export directory.
    pub fn relative_path(&self, width: usize, height: usize, notch: bool) -> PathBuf {
        let ext = self.format.extension();
        if notch {
            Path::new(NOTCHED_DIR).join(format!("wall_{}x{}_notched.{}", width, height, ext))
        } else {
            PathBuf::from(format!("wall_{}x{}.{}", width, height, ext))
        }
    }
}

/// One exported panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub width: usize,
    pub height: usize,
    pub notch: bool,
    /// Relative to the export directory.
    pub path: PathBuf,
    pub bodies: usize,
    pub bytes: usize,
    pub warnings: Vec<String>,
}

/// Summary of one sweep; written as the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub id: Uuid,
    pub started: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub files: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn warning_count(&self) -> usize {
        self.files.iter().map(|f| f.warnings.len()).sum()
    }

    /// Write `manifest.json` into `dir`.
    pub fn write_manifest(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ExportError::Serialize {
            what: "batch manifest",
            reason: e.to_string(),
        })?;
        fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;
        let path = dir.join(MANIFEST_FILE);
        fs::write(&path, json).map_err(|e| ExportError::io(&path, e))?;
        Ok(path)
    }
}

/// Runs a [`BatchConfig`] against one kernel session.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    config: BatchConfig,
    generator: Generator,
}

impl BatchDriver {
    pub fn new(config: BatchConfig) -> Result<Self, ExportError> {
        let generator = Generator::new(config.generator).map_err(nnws_engine::EngineError::from)?;
        Ok(Self { config, generator })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Generate and export every panel. Bodies of each run are deleted before the next
    /// so the session does not accumulate geometry. The manifest is written last.
    #[instrument(skip(self, kb), fields(runs = self.config.run_count(), dir = %self.config.export_dir.display()))]
    pub fn run(&self, kb: &mut dyn KernelBundle) -> Result<BatchReport, ExportError> {
        let started = Utc::now();
        let clock = Instant::now();
        let mut files = Vec::with_capacity(self.config.run_count());

        for &notch in &self.config.notch_variants {
            for &height in &self.config.heights {
                for &width in &self.config.widths {
                    files.push(self.run_one(kb, width, height, notch)?);
                }
            }
        }

        let report = BatchReport {
            id: Uuid::new_v4(),
            started,
            elapsed_ms: clock.elapsed().as_millis() as u64,
            files,
        };
        report.write_manifest(&self.config.export_dir)?;
        info!(
            files = report.files.len(),
            warnings = report.warning_count(),
            elapsed_ms = report.elapsed_ms,
            "batch complete"
        );
        Ok(report)
    }

    fn run_one(
        &self,
        kb: &mut dyn KernelBundle,
        width: usize,
        height: usize,
        notch: bool,
    ) -> Result<BatchEntry, ExportError> {
        let design = Design::Wall(WallParams::standard(width, height, notch));
        let generated = self.generator.generate(kb, &design)?;
        let relative = self.config.relative_path(width, height, notch);
        let exported = export_design(
            &*kb,
            &generated,
            &self.config.export_dir.join(&relative),
            self.config.format,
        );

        // clean up before surfacing an export failure
        for body in &generated.bodies {
            if let Err(e) = kb.delete_solid(&body.handle) {
                warn!(body = %body.name, error = %e, "failed to delete body after export");
            }
        }
        let bytes = exported?;

        for warning in &generated.warnings {
            warn!(width, height, notch, %warning, "cosmetic step skipped");
        }
        Ok(BatchEntry {
            width,
            height,
            notch,
            path: relative,
            bodies: generated.bodies.len(),
            bytes,
            warnings: generated.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sweep() {
        let config = BatchConfig::new("out");
        assert_eq!(config.run_count(), 128);
        assert_eq!(config.notch_variants, vec![true, false]);
    }

    #[test]
    fn test_relative_paths() {
        let config = BatchConfig::new("out");
        assert_eq!(
            config.relative_path(3, 2, false),
            PathBuf::from("wall_3x2.step")
        );
        assert_eq!(
            config.relative_path(3, 2, true),
            Path::new("notched").join("wall_3x2_notched.step")
        );
        let stl = BatchConfig {
            format: ExportFormat::Stl,
            ..BatchConfig::new("out")
        };
        assert_eq!(stl.relative_path(1, 1, false), PathBuf::from("wall_1x1.stl"));
    }

    #[test]
    fn test_bad_clearance_rejected() {
        let config = BatchConfig {
            generator: GeneratorConfig::with_clearance_mm(1.0),
            ..BatchConfig::new("out")
        };
        assert!(matches!(
            BatchDriver::new(config),
            Err(ExportError::Generation(_))
        ));
    }
}
