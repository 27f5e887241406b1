//! Workbench: one kernel session plus a generator, with name-based body lookup.

use std::path::Path;

use nnws_engine::{Design, GeneratedDesign, Generator, GeneratorConfig, NamedBody};
use nnws_export::{export_design, ExportFormat};
use nnws_kernel::{BoundingBox, KernelIntrospect, MockKernel, MockOp};
use nnws_ops::KernelBundle;

use crate::helpers::{body_boxes, HarnessError};
use crate::oracle::{self, OracleVerdict};
use crate::report::DesignReport;

/// Generates designs into a [`MockKernel`] and keeps the latest result around for
/// inspection.
pub struct Workbench {
    kernel: MockKernel,
    generator: Generator,
    last: Option<GeneratedDesign>,
}

impl Workbench {
    /// Default clearance.
    pub fn mock() -> Self {
        Self {
            kernel: MockKernel::new(),
            generator: Generator::new(GeneratorConfig::default())
                .unwrap_or_else(|e| panic!("default config rejected: {}", e)),
            last: None,
        }
    }

    pub fn with_clearance_mm(clearance_mm: f64) -> Result<Self, HarnessError> {
        let generator = Generator::new(GeneratorConfig::with_clearance_mm(clearance_mm))
            .map_err(nnws_engine::EngineError::from)?;
        Ok(Self {
            kernel: MockKernel::new(),
            generator,
            last: None,
        })
    }

    /// Make the next call of `op` (and every later one) fail.
    pub fn fail_on(&mut self, op: MockOp) -> &mut Self {
        self.kernel.fail_on(op);
        self
    }

    pub fn generate(&mut self, design: &Design) -> Result<&GeneratedDesign, HarnessError> {
        let generated = self.generator.generate(&mut self.kernel, design)?;
        Ok(&*self.last.insert(generated))
    }

    pub fn kernel(&self) -> &MockKernel {
        &self.kernel
    }

    pub fn kernel_bundle(&self) -> &dyn KernelBundle {
        &self.kernel
    }

    pub fn last(&self) -> Result<&GeneratedDesign, HarnessError> {
        self.last.as_ref().ok_or(HarnessError::NothingGenerated)
    }

    pub fn body(&self, name: &str) -> Result<&NamedBody, HarnessError> {
        self.last()?
            .body(name)
            .ok_or_else(|| HarnessError::BodyNotFound {
                name: name.to_string(),
            })
    }

    pub fn bounding_box(&self, name: &str) -> Result<BoundingBox, HarnessError> {
        let body = self.body(name)?;
        self.kernel
            .bounding_box(&body.handle)
            .ok_or_else(|| HarnessError::NoBoundingBox {
                name: name.to_string(),
            })
    }

    /// Body bounding boxes of the latest design, in output order.
    pub fn boxes(&self) -> Result<Vec<(String, BoundingBox)>, HarnessError> {
        body_boxes(&self.kernel, self.last()?)
    }

    /// Run the standard oracles over the latest design.
    pub fn verify(&self) -> Result<Vec<OracleVerdict>, HarnessError> {
        let design = self.last()?;
        let mut verdicts = vec![
            oracle::check_bodies_named(&self.kernel, design),
            oracle::check_bodies_have_faces(&self.kernel, design),
        ];
        if design.component == "Wall" {
            verdicts.push(oracle::check_cell_spacing(&self.kernel, design));
        }
        Ok(verdicts)
    }

    /// Fail with every failed verdict listed.
    pub fn assert_verified(&self) -> Result<(), HarnessError> {
        let failed: Vec<String> = self
            .verify()?
            .into_iter()
            .filter(|v| !v.passed)
            .map(|v| format!("{}: {}", v.oracle_name, v.detail))
            .collect();
        if failed.is_empty() {
            Ok(())
        } else {
            Err(HarnessError::OracleFailure {
                oracle: "verify".to_string(),
                detail: failed.join("; "),
            })
        }
    }

    pub fn report(&self) -> Result<DesignReport, HarnessError> {
        let design = self.last()?;
        Ok(DesignReport::build(&self.kernel, design, self.verify()?))
    }

    /// Write the latest design to `path`, format taken from the extension.
    pub fn export(&self, path: &Path) -> Result<usize, HarnessError> {
        let format = ExportFormat::from_path(path)?;
        Ok(export_design(&self.kernel, self.last()?, path, format)?)
    }
}
