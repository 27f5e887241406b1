//! Fixed NNWS dimensions, in centimeters.
//!
//! Every part that mates with another derives its sizes from these, so they are
//! shared rather than restated per accessory.

/// Flat-to-flat size of one hexagonal wall cell; also the lattice pitch.
pub const CELL_SIZE: f64 = 4.2;

pub const THREAD_MAJOR_DIAMETER: f64 = 3.8;
pub const THREAD_DEPTH_CORRECTION: f64 = 0.140625;
pub const THREAD_PITCH: f64 = 0.25;
pub const THREAD_PROFILE_RADIUS: f64 = 0.06875;

pub const WALL_THICKNESS: f64 = 0.8;
pub const WALL_BOTTOM_THICKNESS: f64 = 0.15;
pub const OUTER_WALL_THICKNESS: f64 = 0.2;
pub const INNER_WALL_OFFSET: f64 = 0.35;
pub const INNER_SECTION_OFFSET: f64 = 0.4;
pub const NOTCH_RADIUS: f64 = 0.075;
pub const INTERNAL_CHAMFER_ANGLE: f64 = 75.0;

/// Gap between the wall face and an accessory's base.
pub const BASE_Z_OFFSET: f64 = 0.05;
pub const BASE_HEIGHT: f64 = 1.09;

pub const SCREW_HEAD_THICKNESS: f64 = 0.4;
pub const SCREW_HEIGHT: f64 = 1.05;
pub const SCREW_BODY_END_CLEARANCE: f64 = 0.05;
pub const THREAD_BODY_THICKNESS: f64 = 0.2;
pub const SCREW_HEAD_INTERNAL_DIAMETER: f64 = 2.6;

/// Fixed margin between printed parts on top of the configured clearance.
pub const EXTERNAL_TOLERANCE: f64 = 0.05;
/// Radial room left around the screw head inside a cell.
pub const HEAD_OFFSET: f64 = 0.35;

pub const EXTRA_SPACING_DEFAULT: f64 = 0.75;
pub const MIN_SHELF_THICKNESS: f64 = 0.3;
pub const MIN_SHELF_SIZE: f64 = 1.2;
pub const EXTENSION_WIDTH: f64 = 1.09;
pub const EXTENSION_HEIGHT: f64 = 1.09;
pub const INTERNAL_SKETCH_RADIUS: f64 = 0.1;
pub const SHELF_WIDTH: f64 = 0.65;
pub const LEDGER_WIDTH: f64 = 0.4;
pub const ANCHOR_TOP_OFFSET: f64 = 0.05;

/// Smallest side margin a shelf tray can carry its corner fillets with.
pub const MIN_SIDE_WIDTH: f64 = 0.75;

/// Half the cell size: accessories are centered this far along +X.
pub const HALF_CELL: f64 = CELL_SIZE / 2.0;

/// Wall cell radius at the bore: the hexagon's inscribed radius minus its outer wall.
pub const WALL_BORE_RADIUS: f64 = HALF_CELL - OUTER_WALL_THICKNESS;
/// Inner edge of the bottom ring, where the inner section starts.
pub const WALL_RING_RADIUS: f64 = WALL_BORE_RADIUS - INNER_WALL_OFFSET;
/// Inner edge of the inner section ring.
pub const WALL_INNER_RADIUS: f64 = WALL_RING_RADIUS - INNER_WALL_OFFSET;

/// Radius of the neck behind an insert's chamfer ring.
pub const INSERT_NECK_RADIUS: f64 = SCREW_HEAD_INTERNAL_DIAMETER / 2.0 - EXTERNAL_TOLERANCE;
