//! Design dispatch: validate a request, build it, name the bodies.

use nnws_kernel::KernelSolidHandle;
use nnws_ops::{KernelBundle, OpError, Pipeline, Stage};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::accessories::anchor::build_anchor;
use crate::accessories::hook::build_hook;
use crate::accessories::insert::build_insert;
use crate::accessories::screw::build_main_screw;
use crate::accessories::shelf::build_shelf;
use crate::accessories::shelf_insert::build_shelf_insert;
use crate::config::GeneratorConfig;
use crate::dims::Dimensions;
use crate::errors::{ConfigurationError, EngineError, ValidationError};
use crate::params::{
    AnchorParams, HookParams, InsertParams, MainScrewParams, ShelfInsertParams, ShelfParams,
    WallParams,
};
use crate::tiling::plan;
use crate::wall::build_wall;

/// Everything the generator can build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Design {
    Wall(WallParams),
    Insert(InsertParams),
    Shelf(ShelfParams),
    ShelfInsert(ShelfInsertParams),
    Hook(HookParams),
    Anchor(AnchorParams),
    OffsetAnchor(AnchorParams),
    MainScrew(MainScrewParams),
}

impl Design {
    /// Name of the component the bodies belong to.
    pub fn component(&self) -> &'static str {
        match self {
            Design::Wall(_) => "Wall",
            Design::Insert(_) => "Insert",
            Design::Shelf(_) => "Shelf",
            Design::ShelfInsert(_) => "ShelfInsert",
            Design::Hook(_) => "Hook",
            Design::Anchor(_) | Design::OffsetAnchor(_) => "Anchor",
            Design::MainScrew(_) => "MainScrew",
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Design::Wall(p) => p.validate(),
            Design::Insert(p) => p.validate(),
            Design::Shelf(p) => p.validate(),
            Design::ShelfInsert(p) => p.validate(),
            Design::Hook(p) => p.validate(),
            Design::Anchor(p) | Design::OffsetAnchor(p) => p.validate(),
            Design::MainScrew(p) => p.validate(),
        }
    }
}

/// A built body and the name it was given in the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedBody {
    pub name: String,
    pub handle: KernelSolidHandle,
}

/// Result of one generation.
#[derive(Debug, Clone)]
pub struct GeneratedDesign {
    pub id: Uuid,
    pub component: String,
    pub bodies: Vec<NamedBody>,
    /// Cosmetic steps that were skipped.
    pub warnings: Vec<String>,
    pub stages_completed: Vec<Stage>,
}

impl GeneratedDesign {
    pub fn handles(&self) -> Vec<KernelSolidHandle> {
        self.bodies.iter().map(|b| b.handle.clone()).collect()
    }

    pub fn body(&self, name: &str) -> Option<&NamedBody> {
        self.bodies.iter().find(|b| b.name == name)
    }
}

/// `base`, then `base (2)`, `base (3)`, ...
pub fn body_name(base: &str, index: usize) -> String {
    if index == 0 {
        base.to_string()
    } else {
        format!("{} ({})", base, index + 1)
    }
}

/// Builds designs with one clearance setting.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.config.clearance_cm())
    }

    /// Validate `design` and build it. Nothing reaches the kernel when validation fails.
    #[instrument(skip(self, kb), fields(component = design.component()))]
    pub fn generate(
        &self,
        kb: &mut dyn KernelBundle,
        design: &Design,
    ) -> Result<GeneratedDesign, EngineError> {
        design.validate()?;
        let dims = self.dimensions();
        let spt = self.config.samples_per_turn;
        let component = design.component();
        let mut pipeline = Pipeline::new(component);

        let named: Vec<(String, KernelSolidHandle)> = match design {
            Design::Wall(p) => {
                let placements = plan(&p.pattern())?;
                let cells = build_wall(kb, &mut pipeline, &placements, p.notch, spt)?;
                numbered(component, cells)
            }
            Design::Insert(p) => numbered(component, build_insert(kb, &mut pipeline, &dims, p)?),
            Design::Shelf(p) => vec![(
                component.to_string(),
                build_shelf(kb, &mut pipeline, &dims, p)?,
            )],
            Design::ShelfInsert(p) => vec![(
                component.to_string(),
                build_shelf_insert(kb, &mut pipeline, &dims, p)?,
            )],
            Design::Hook(p) => vec![(
                component.to_string(),
                build_hook(kb, &mut pipeline, &dims, p)?,
            )],
            Design::Anchor(p) | Design::OffsetAnchor(p) => {
                let offset = matches!(design, Design::OffsetAnchor(_));
                build_anchor(kb, &mut pipeline, &dims, p, offset)?
                    .named()
                    .into_iter()
                    .map(|(name, handle)| (name.to_string(), handle))
                    .collect()
            }
            Design::MainScrew(p) => vec![(
                component.to_string(),
                build_main_screw(kb, &mut pipeline, &dims, p, spt)?,
            )],
        };

        pipeline.enter(Stage::Finishing);
        let mut bodies = Vec::with_capacity(named.len());
        for (name, handle) in named {
            pipeline.structural("body naming", || {
                kb.set_solid_name(&handle, &name).map_err(OpError::from)
            })?;
            bodies.push(NamedBody { name, handle });
        }

        let report = pipeline.finish();
        let generated = GeneratedDesign {
            id: Uuid::new_v4(),
            component: report.component,
            bodies,
            warnings: report.warnings,
            stages_completed: report.stages_completed,
        };
        info!(
            id = %generated.id,
            bodies = generated.bodies.len(),
            warnings = generated.warnings.len(),
            "design generated"
        );
        Ok(generated)
    }
}

fn numbered(base: &str, handles: Vec<KernelSolidHandle>) -> Vec<(String, KernelSolidHandle)> {
    handles
        .into_iter()
        .enumerate()
        .map(|(i, h)| (body_name(base, i), h))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nnws_kernel::{KernelIntrospect, MockKernel};

    #[test]
    fn test_body_names() {
        assert_eq!(body_name("Insert", 0), "Insert");
        assert_eq!(body_name("Insert", 2), "Insert (3)");
    }

    #[test]
    fn test_design_round_trips_as_json() {
        let design = Design::Hook(HookParams::default());
        let json = serde_json::to_string(&design).unwrap();
        assert!(json.contains("\"kind\":\"hook\""));
        let back: Design = serde_json::from_str(&json).unwrap();
        assert_eq!(back, design);
    }

    #[test]
    fn test_invalid_design_touches_nothing() {
        let generator = Generator::new(GeneratorConfig::default()).unwrap();
        let mut kernel = MockKernel::new();
        let design = Design::Wall(WallParams::standard(0, 2, true));
        let err = generator.generate(&mut kernel, &design).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert_eq!(kernel.total_calls(), 0);
    }

    #[test]
    fn test_offset_anchor_names() {
        let generator = Generator::new(GeneratorConfig::default()).unwrap();
        let mut kernel = MockKernel::new();
        let generated = generator
            .generate(&mut kernel, &Design::OffsetAnchor(AnchorParams::default()))
            .unwrap();
        let names: Vec<_> = generated.bodies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["AnchorBase", "AnchorOffsetInsert"]);
        let insert = generated.body("AnchorOffsetInsert").unwrap();
        assert_eq!(
            kernel.solid_name(&insert.handle).as_deref(),
            Some("AnchorOffsetInsert")
        );
        assert_eq!(generated.component, "Anchor");
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = GeneratorConfig::with_clearance_mm(0.5);
        assert!(Generator::new(config).is_err());
    }
}
