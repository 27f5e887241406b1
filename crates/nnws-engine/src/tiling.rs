//! Hexagonal tiling of a seed body.
//!
//! Tiling is planned as a pure fold over the row table: each row step moves a cursor by
//! the lattice row translation and records where the row starts and how many cells it
//! holds. Execution then copies the seed to each row cursor and patterns it along +X.

use std::collections::BTreeMap;

use nnws_geometry::HexLattice;
use nnws_kernel::KernelSolidHandle;
use nnws_ops::{
    execute_copy_translated, execute_pattern_rectangular, ConstructionError, KernelBundle,
    Pipeline,
};
use nnws_types::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::constants::CELL_SIZE;
use crate::errors::ConfigurationError;

/// Largest row table the wall accepts.
pub const MAX_TABLE_ROWS: usize = 100;
/// Largest lateral shift of a row, in cells.
pub const MAX_ROW_OFFSET: i32 = 50;

/// One row of a wall pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallRowSpec {
    pub count: usize,
    /// Lateral shift in cells. Ignored on row 0.
    pub offset: i32,
}

impl WallRowSpec {
    pub fn new(count: usize, offset: i32) -> Self {
        Self { count, offset }
    }
}

/// Row index → row spec, ordered top row first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallPatternDefinition {
    rows: BTreeMap<usize, WallRowSpec>,
}

impl WallPatternDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// `height` rows of `width` cells, no offsets.
    pub fn standard(width: usize, height: usize) -> Self {
        (0..height).map(|row| (row, WallRowSpec::new(width, 0))).collect()
    }

    pub fn insert(&mut self, row: usize, spec: WallRowSpec) -> Option<WallRowSpec> {
        self.rows.insert(row, spec)
    }

    pub fn with_row(mut self, row: usize, count: usize, offset: i32) -> Self {
        self.insert(row, WallRowSpec::new(count, offset));
        self
    }

    pub fn get(&self, row: usize) -> Option<&WallRowSpec> {
        self.rows.get(&row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &WallRowSpec)> {
        self.rows.iter().map(|(row, spec)| (*row, spec))
    }

    /// Total cells over all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.count).sum()
    }

    /// Every row from 0 to the last one must be present, each with at least one cell.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.rows.is_empty() {
            return Err(ConfigurationError::EmptyPattern);
        }
        let rows = self.rows.len();
        for (expected, (row, spec)) in self.rows.iter().enumerate() {
            if *row != expected {
                return Err(ConfigurationError::MissingRow {
                    row: expected,
                    rows: rows.max(*row + 1),
                });
            }
            if spec.count == 0 {
                return Err(ConfigurationError::InvalidRow {
                    row: *row,
                    reason: "count must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(usize, WallRowSpec)> for WallPatternDefinition {
    fn from_iter<I: IntoIterator<Item = (usize, WallRowSpec)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Where one row starts and how many cells it holds. `origin` is in lattice
/// coordinates: X along the row, Y down the wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPlacement {
    pub row: usize,
    pub origin: Vec3,
    pub count: usize,
}

impl RowPlacement {
    /// Lattice position of cell `index` in this row.
    pub fn cell(&self, index: usize) -> Vec3 {
        self.origin + Vec3::X * (CELL_SIZE * index as f64)
    }
}

/// Fold state: the row cursor plus the rows placed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct TilingState {
    pub cursor: Vec3,
    pub placements: Vec<RowPlacement>,
}

impl Default for TilingState {
    fn default() -> Self {
        Self {
            cursor: Vec3::ZERO,
            placements: Vec::new(),
        }
    }
}

/// Place one row. Row 0 stays at the cursor; later rows first move it by the row
/// translation for their offset.
pub fn step(lattice: &HexLattice, state: TilingState, row: usize, spec: &WallRowSpec) -> TilingState {
    let cursor = if row == 0 {
        state.cursor
    } else {
        state.cursor + lattice.row_translation(row, spec.offset)
    };
    let mut placements = state.placements;
    placements.push(RowPlacement {
        row,
        origin: cursor,
        count: spec.count,
    });
    TilingState { cursor, placements }
}

/// Row placements for a validated pattern.
pub fn plan(pattern: &WallPatternDefinition) -> Result<Vec<RowPlacement>, ConfigurationError> {
    pattern.validate()?;
    let lattice = HexLattice::new(CELL_SIZE);
    let state = pattern
        .iter()
        .fold(TilingState::default(), |state, (row, spec)| {
            step(&lattice, state, row, spec)
        });
    Ok(state.placements)
}

/// How lattice coordinates land in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeFrame {
    /// The wall lies in XY, rows running down −Y.
    Wall,
    /// Accessories face +Y; their lattice lies in XZ, rows running down −Z.
    Accessory,
}

impl LatticeFrame {
    pub fn to_world(self, v: Vec3) -> Vec3 {
        match self {
            LatticeFrame::Wall => v,
            LatticeFrame::Accessory => Vec3::new(v.x, 0.0, v.y),
        }
    }
}

/// Replicate `seed` over `placements`: the seed stays as the first cell of row 0, every
/// other row starts from a translated copy of it. Bodies come back row by row.
#[instrument(skip(kb, pipeline, seed, placements), fields(component = pipeline.component(), rows = placements.len()))]
pub fn replicate(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    seed: &KernelSolidHandle,
    placements: &[RowPlacement],
    frame: LatticeFrame,
) -> Result<Vec<KernelSolidHandle>, ConstructionError> {
    let mut bodies = Vec::with_capacity(placements.iter().map(|p| p.count).sum());
    for placement in placements {
        let offset = frame.to_world(placement.origin);
        let first = if offset.length() < 1e-12 {
            seed.clone()
        } else {
            let copied = pipeline.structural("row copy", || {
                execute_copy_translated(kb, seed, offset.to_array())
            })?;
            pipeline.structural("row copy", || copied.main())?
        };
        let row = pipeline.structural("row pattern", || {
            execute_pattern_rectangular(
                kb,
                &first,
                Vec3::X.to_array(),
                placement.count,
                CELL_SIZE,
            )
        })?;
        debug!(row = placement.row, cells = row.outputs.len(), "row placed");
        bodies.extend(row.outputs);
    }
    Ok(bodies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_standard_definition() {
        let pattern = WallPatternDefinition::standard(3, 2);
        assert_eq!(pattern.len(), 2);
        assert_eq!(pattern.get(1), Some(&WallRowSpec::new(3, 0)));
        assert_eq!(pattern.cell_count(), 6);
        assert!(pattern.validate().is_ok());
    }

    #[test]
    fn test_missing_row_rejected() {
        let pattern = WallPatternDefinition::new()
            .with_row(0, 2, 0)
            .with_row(2, 2, 0);
        assert_eq!(
            pattern.validate(),
            Err(ConfigurationError::MissingRow { row: 1, rows: 3 })
        );
        assert_eq!(
            WallPatternDefinition::new().validate(),
            Err(ConfigurationError::EmptyPattern)
        );
    }

    #[test]
    fn test_row_zero_offset_ignored() {
        let shifted = WallPatternDefinition::new().with_row(0, 2, 5);
        let placements = plan(&shifted).unwrap();
        assert_eq!(placements[0].origin, Vec3::ZERO);
    }

    #[test]
    fn test_rows_stagger() {
        let placements = plan(&WallPatternDefinition::standard(2, 3)).unwrap();
        // row 1 shifts right, row 2 comes back under row 0
        assert_abs_diff_eq!(placements[1].origin.x, 2.1, epsilon = 1e-9);
        assert_abs_diff_eq!(placements[2].origin.x, 0.0, epsilon = 1e-9);
        let row_pitch = 4.2 * 3f64.sqrt() / 2.0;
        assert_abs_diff_eq!(placements[1].origin.y, -row_pitch, epsilon = 1e-9);
        assert_abs_diff_eq!(placements[2].origin.y, -2.0 * row_pitch, epsilon = 1e-9);
    }

    #[test]
    fn test_cells_along_x() {
        let placement = RowPlacement {
            row: 0,
            origin: Vec3::ZERO,
            count: 3,
        };
        assert_abs_diff_eq!(placement.cell(2).x, 8.4, epsilon = 1e-12);
    }

    #[test]
    fn test_accessory_frame_maps_rows_to_z() {
        let world = LatticeFrame::Accessory.to_world(Vec3::new(2.1, -3.6, 0.0));
        assert_eq!(world, Vec3::new(2.1, 0.0, -3.6));
    }
}
