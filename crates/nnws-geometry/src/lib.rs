//! Pure geometry for the NNWS generator: hexagonal lattice points, helix sampling,
//! chamfer trigonometry and sketch profile construction. No kernel calls here.

pub mod chamfer;
pub mod helix;
pub mod hex;
pub mod profiles;

pub use chamfer::{chamfer_width, ChamferSpec};
pub use helix::{helix_path, helix_point, ThreadSpec, SAMPLES_PER_TURN};
pub use hex::{cell_radius, hex_point, offset_angle, HexLattice, HexPointIndex, WALL_SIDES};
pub use profiles::{arc_slot, hexagon, rect_with_fillet, rect_with_fillets, regular_polygon};
