//! Plain inserts, optionally tiled on the lattice.

use nnws_kernel::KernelSolidHandle;
use nnws_ops::{KernelBundle, Pipeline, Stage};
use tracing::{info, instrument};

use crate::accessories::build_insert_base;
use crate::dims::Dimensions;
use crate::errors::EngineError;
use crate::params::InsertParams;
use crate::tiling::{plan, replicate, LatticeFrame, WallPatternDefinition};

/// Build the inserts. One body per lattice position, seed first.
#[instrument(skip(kb, pipeline, dims), fields(component = pipeline.component()))]
pub fn build_insert(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    dims: &Dimensions,
    params: &InsertParams,
) -> Result<Vec<KernelSolidHandle>, EngineError> {
    let seed = build_insert_base(kb, pipeline, dims, &params.base)?;
    if params.x_count == 1 && params.y_count == 1 {
        return Ok(vec![seed]);
    }
    pipeline.enter(Stage::Repetition);
    let placements = plan(&WallPatternDefinition::standard(params.x_count, params.y_count))?;
    let bodies = replicate(kb, pipeline, &seed, &placements, LatticeFrame::Accessory)?;
    info!(inserts = bodies.len(), "inserts tiled");
    Ok(bodies)
}
