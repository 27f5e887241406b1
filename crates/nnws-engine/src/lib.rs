//! NNWS part generators.
//!
//! A [`Generator`] takes a [`Design`] (wall panel, insert, shelf, shelf insert, hook,
//! anchor or main screw), validates its parameters, and drives the geometry kernel
//! through a staged [`nnws_ops::Pipeline`]. Every mating size is derived from the fixed
//! constants in [`constants`] plus the configured clearance, see [`dims::Dimensions`].

pub mod accessories;
pub mod config;
pub mod constants;
pub mod design;
pub mod dims;
pub mod errors;
pub mod params;
pub mod shapes;
pub mod tiling;
pub mod wall;

pub use config::GeneratorConfig;
pub use design::{body_name, Design, GeneratedDesign, Generator, NamedBody};
pub use dims::Dimensions;
pub use errors::{ConfigurationError, EngineError, ValidationError, Violation};
pub use params::{
    AnchorParams, HookParams, InsertBaseParams, InsertParams, MainScrewParams, ScrewDims,
    ScrewStandard, ShelfInsertParams, ShelfParams, WallParams,
};
pub use tiling::{plan, RowPlacement, WallPatternDefinition, WallRowSpec};
