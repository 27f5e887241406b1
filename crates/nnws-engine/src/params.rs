//! Typed parameter sets, one per design kind, with their input bounds.
//!
//! Validation runs before any kernel call; every violation of a request is reported
//! together.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::dims::Dimensions;
use crate::errors::{Checker, ValidationError};
use crate::tiling::{WallPatternDefinition, MAX_ROW_OFFSET, MAX_TABLE_ROWS};

pub const MAX_WALL_CELLS: usize = 99;
/// Upper bound on an insert's X/Y repetition and a shelf's insert count.
pub const MAX_INSERT_COUNT: usize = 5;
/// Tallest main screw body, in cm. Keeps the helix sample count bounded.
pub const MAX_SCREW_BODY_HEIGHT: f64 = 10.0;

/// Wall panel: a lattice of hexagonal cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallParams {
    /// Cells per row in standard mode.
    pub width: usize,
    /// Rows in standard mode.
    pub height: usize,
    pub notch: bool,
    /// When false, `rows` describes every row explicitly.
    pub standard_pattern: bool,
    #[serde(default)]
    pub rows: WallPatternDefinition,
}

impl WallParams {
    pub fn standard(width: usize, height: usize, notch: bool) -> Self {
        Self {
            width,
            height,
            notch,
            standard_pattern: true,
            rows: WallPatternDefinition::default(),
        }
    }

    pub fn custom(rows: WallPatternDefinition, notch: bool) -> Self {
        Self {
            width: 1,
            height: rows.len().max(1),
            notch,
            standard_pattern: false,
            rows,
        }
    }

    /// The row table this wall is tiled from.
    pub fn pattern(&self) -> WallPatternDefinition {
        if self.standard_pattern {
            WallPatternDefinition::standard(self.width, self.height)
        } else {
            self.rows.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::new();
        if self.standard_pattern {
            check.require(
                (1..=MAX_WALL_CELLS).contains(&self.width),
                "width",
                format!("must be between 1 and {}", MAX_WALL_CELLS),
            );
            check.require(
                (1..=MAX_WALL_CELLS).contains(&self.height),
                "height",
                format!("must be between 1 and {}", MAX_WALL_CELLS),
            );
        } else {
            check.require(
                self.rows.len() <= MAX_TABLE_ROWS,
                "rows",
                format!("at most {} rows", MAX_TABLE_ROWS),
            );
            for (row, spec) in self.rows.iter() {
                check.require(
                    (1..=MAX_WALL_CELLS).contains(&spec.count),
                    &format!("rows[{}].count", row),
                    format!("must be between 1 and {}", MAX_WALL_CELLS),
                );
                check.require(
                    spec.offset.abs() <= MAX_ROW_OFFSET,
                    &format!("rows[{}].offset", row),
                    format!("must be between -{0} and {0}", MAX_ROW_OFFSET),
                );
            }
        }
        check.finish()
    }
}

impl Default for WallParams {
    fn default() -> Self {
        Self::standard(2, 2, true)
    }
}

/// Trim, notch and spacing options shared by everything that plugs into a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsertBaseParams {
    /// Distance from the axis kept on the top (or right) side.
    pub trim_top: f64,
    /// Distance from the axis kept on the bottom (or left) side.
    pub trim_bottom: f64,
    /// Length of the block between the insert and the accessory it carries.
    pub extra_spacing: f64,
    pub notch: bool,
    /// Trim top/bottom (true) instead of right/left.
    pub invert_axis: bool,
}

impl InsertBaseParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::new();
        check.require_finite(self.trim_top, "trim_top");
        check.require_finite(self.trim_bottom, "trim_bottom");
        check.require_finite(self.extra_spacing, "extra_spacing");
        check.require(self.trim_top > 0.0, "trim_top", "must be positive");
        check.require(self.trim_bottom > 0.0, "trim_bottom", "must be positive");
        check.require(
            self.extra_spacing >= 0.0,
            "extra_spacing",
            "must not be negative",
        );
        check.finish()
    }
}

fn check_count(check: &mut Checker, count: usize, field: &str) {
    check.require(
        (1..=MAX_INSERT_COUNT).contains(&count),
        field,
        format!("must be between 1 and {}", MAX_INSERT_COUNT),
    );
}

impl Default for InsertBaseParams {
    fn default() -> Self {
        Self {
            trim_top: Dimensions::new(crate::config::GeneratorConfig::default().clearance_cm())
                .screw_inner_radius(),
            trim_bottom: BASE_HEIGHT / 2.0,
            extra_spacing: EXTRA_SPACING_DEFAULT,
            notch: true,
            invert_axis: true,
        }
    }
}

/// A plain insert, optionally repeated on the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsertParams {
    pub base: InsertBaseParams,
    pub x_count: usize,
    pub y_count: usize,
}

impl InsertParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::new();
        check.merge(self.base.validate());
        check_count(&mut check, self.x_count, "x_count");
        check_count(&mut check, self.y_count, "y_count");
        check.finish()
    }
}

impl Default for InsertParams {
    fn default() -> Self {
        Self {
            base: InsertBaseParams::default(),
            x_count: 1,
            y_count: 1,
        }
    }
}

/// A shelf tray carried by a row of inserts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShelfParams {
    pub base: InsertBaseParams,
    pub x_count: usize,
    pub length: f64,
    pub depth: f64,
}

impl ShelfParams {
    /// Whole cells the shelf length spans.
    pub fn num_fits(&self) -> usize {
        (self.length / CELL_SIZE).floor().max(0.0) as usize
    }

    /// Cells the tray is laid out over: the inserts or the spanned cells, whichever
    /// reaches further.
    pub fn spanned_cells(&self) -> usize {
        self.x_count.max(self.num_fits()).max(1)
    }

    /// Margin between the outermost insert axis and the tray's side.
    pub fn side_width(&self) -> f64 {
        (self.length - (self.spanned_cells() - 1) as f64 * CELL_SIZE) / 2.0
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::new();
        check.merge(self.base.validate());
        check_count(&mut check, self.x_count, "x_count");
        check.require_finite(self.length, "length");
        check.require_finite(self.depth, "depth");
        check.require(
            self.length >= MIN_SHELF_SIZE,
            "length",
            format!("must be at least {}", MIN_SHELF_SIZE),
        );
        check.require(
            self.depth >= MIN_SHELF_SIZE,
            "depth",
            format!("must be at least {}", MIN_SHELF_SIZE),
        );
        check.require(
            self.side_width() >= MIN_SIDE_WIDTH - 1e-9,
            "length",
            format!(
                "too small for {} inserts: side width {:.3} is below {}",
                self.x_count,
                self.side_width(),
                MIN_SIDE_WIDTH
            ),
        );
        check.finish()
    }
}

impl Default for ShelfParams {
    fn default() -> Self {
        Self {
            base: InsertBaseParams::default(),
            x_count: 2,
            length: 2.0 * CELL_SIZE,
            depth: 2.0 * CELL_SIZE,
        }
    }
}

/// The plate that snaps into a shelf's ledge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShelfInsertParams {
    pub thickness: f64,
    pub length: f64,
    pub depth: f64,
    pub notch: bool,
}

impl ShelfInsertParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::new();
        check.require_finite(self.thickness, "thickness");
        check.require_finite(self.length, "length");
        check.require_finite(self.depth, "depth");
        check.require(
            self.thickness >= MIN_SHELF_THICKNESS,
            "thickness",
            format!("must be at least {}", MIN_SHELF_THICKNESS),
        );
        check.require(
            self.length >= MIN_SHELF_SIZE,
            "length",
            format!("must be at least {}", MIN_SHELF_SIZE),
        );
        check.require(
            self.depth >= MIN_SHELF_SIZE,
            "depth",
            format!("must be at least {}", MIN_SHELF_SIZE),
        );
        check.finish()
    }
}

impl Default for ShelfInsertParams {
    fn default() -> Self {
        Self {
            thickness: MIN_SHELF_THICKNESS,
            length: 2.0 * (CELL_SIZE - LEDGER_WIDTH),
            depth: 2.0 * (CELL_SIZE - LEDGER_WIDTH),
            notch: true,
        }
    }
}

/// An octagonal hook arm on an insert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HookParams {
    pub trim_top: f64,
    pub trim_bottom: f64,
    /// Arm length measured from the insert's front face.
    pub length: f64,
    /// Arm thickness; the arm always sits on the bottom trim line.
    pub size: f64,
    pub notch: bool,
    pub stopper: bool,
    pub stopper_height: f64,
}

impl HookParams {
    pub fn base(&self) -> InsertBaseParams {
        InsertBaseParams {
            trim_top: self.trim_top,
            trim_bottom: self.trim_bottom,
            extra_spacing: 0.0,
            notch: self.notch,
            invert_axis: true,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::new();
        check.merge(self.base().validate());
        check.require_finite(self.length, "length");
        check.require_finite(self.size, "size");
        check.require_finite(self.stopper_height, "stopper_height");
        check.require(self.length >= 0.0, "length", "must not be negative");
        check.require(self.size >= 0.75, "size", "must be at least 0.75");
        check.require(
            self.size <= self.trim_top + self.trim_bottom,
            "size",
            "must fit between the top and bottom trims",
        );
        check.require(
            !self.stopper || self.stopper_height > 0.0,
            "stopper_height",
            "must be positive when the stopper is enabled",
        );
        check.finish()
    }
}

impl Default for HookParams {
    fn default() -> Self {
        let base = InsertBaseParams::default();
        Self {
            trim_top: base.trim_top,
            trim_bottom: base.trim_bottom,
            length: 7.5,
            size: EXTENSION_HEIGHT,
            notch: true,
            stopper: true,
            stopper_height: 0.5,
        }
    }
}

/// Countersunk screw dimensions: head diameter, hole diameter (cm), countersink angle
/// (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrewDims {
    pub head_diameter: f64,
    pub hole_diameter: f64,
    pub countersink_angle: f64,
}

/// Named screw presets for anchors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "standard")]
pub enum ScrewStandard {
    M3,
    M4,
    #[default]
    M5,
    Stove316,
    Custom(ScrewDims),
}

impl ScrewStandard {
    pub const PRESETS: [ScrewStandard; 4] = [
        ScrewStandard::M3,
        ScrewStandard::M4,
        ScrewStandard::M5,
        ScrewStandard::Stove316,
    ];

    pub fn dims(&self) -> ScrewDims {
        let (head_diameter, hole_diameter, countersink_angle) = match self {
            ScrewStandard::M3 => (0.6, 0.32, 90.0),
            ScrewStandard::M4 => (0.8, 0.42, 90.0),
            ScrewStandard::M5 => (1.0, 0.52, 90.0),
            ScrewStandard::Stove316 => (1.0, 0.52, 82.0),
            ScrewStandard::Custom(dims) => return *dims,
        };
        ScrewDims {
            head_diameter,
            hole_diameter,
            countersink_angle,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScrewStandard::M3 => "M3",
            ScrewStandard::M4 => "M4",
            ScrewStandard::M5 => "M5",
            ScrewStandard::Stove316 => "3/16\" stove",
            ScrewStandard::Custom(_) => "Custom",
        }
    }
}

/// Screw anchor that plugs into a cell's inner section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorParams {
    pub screw: ScrewStandard,
    /// Depth of the counterbore above the countersink.
    pub top_offset: f64,
}

impl AnchorParams {
    pub fn max_top_offset() -> f64 {
        WALL_THICKNESS - INNER_SECTION_OFFSET - ANCHOR_TOP_OFFSET
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let screw = self.screw.dims();
        let mut check = Checker::new();
        check.require_finite(screw.head_diameter, "head_diameter");
        check.require_finite(screw.hole_diameter, "hole_diameter");
        check.require_finite(self.top_offset, "top_offset");
        check.require(screw.head_diameter > 0.0, "head_diameter", "must be positive");
        check.require(
            screw.countersink_angle > 0.0 && screw.countersink_angle < 180.0,
            "countersink_angle",
            "must be between 0 and 180 degrees",
        );
        check.require(screw.hole_diameter > 0.0, "hole_diameter", "must be positive");
        check.require(
            screw.hole_diameter < screw.head_diameter,
            "hole_diameter",
            "must be smaller than the head diameter",
        );
        check.require(self.top_offset >= 0.0, "top_offset", "must not be negative");
        check.require(
            self.top_offset < Self::max_top_offset(),
            "top_offset",
            format!("must be below {:.2}", Self::max_top_offset()),
        );
        check.finish()
    }
}

impl Default for AnchorParams {
    fn default() -> Self {
        Self {
            screw: ScrewStandard::default(),
            top_offset: ANCHOR_TOP_OFFSET,
        }
    }
}

/// The threaded screw that holds a wall panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MainScrewParams {
    pub body_height: f64,
}

impl MainScrewParams {
    pub fn min_body_height() -> f64 {
        SCREW_HEIGHT - SCREW_BODY_END_CLEARANCE
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::new();
        check.require_finite(self.body_height, "body_height");
        check.require(
            self.body_height >= Self::min_body_height() - 1e-9,
            "body_height",
            format!("must be at least {:.2}", Self::min_body_height()),
        );
        check.require(
            self.body_height <= MAX_SCREW_BODY_HEIGHT,
            "body_height",
            format!("must be at most {}", MAX_SCREW_BODY_HEIGHT),
        );
        check.finish()
    }
}

impl Default for MainScrewParams {
    fn default() -> Self {
        Self {
            body_height: SCREW_HEIGHT,
        }
    }
}
