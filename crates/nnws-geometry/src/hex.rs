use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use nnws_types::{Point3, Vec3};

/// The wall lattice is hexagonal. Other side counts only exist for the helpers below.
pub const WALL_SIDES: usize = 6;

/// Rotation that puts vertex 0 at the top of the circumscribed circle.
///
/// Even side counts get `π/2`; odd counts get `π/n + π/2`. Either way the polygon ends up
/// with vertical side walls, which the tiling code relies on.
pub fn offset_angle(sides: usize) -> f64 {
    if sides % 2 == 0 {
        PI / 2.0
    } else {
        PI / sides as f64 + PI / 2.0
    }
}

/// Circumradius of a regular polygon whose inscribed diameter is `size`.
pub fn cell_radius(size: f64, sides: usize) -> f64 {
    size / 2.0 / (PI / sides as f64).cos()
}

/// Vertex positions around one hexagonal cell.
///
/// The order assumes the hexagon is built counter-clockwise starting at the top,
/// which is what [`HexLattice::vertices`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexPointIndex {
    Top = 0,
    TopLeft = 1,
    BottomLeft = 2,
    Bottom = 3,
    BottomRight = 4,
    TopRight = 5,
}

impl HexPointIndex {
    pub const ALL: [HexPointIndex; 6] = [
        HexPointIndex::Top,
        HexPointIndex::TopLeft,
        HexPointIndex::BottomLeft,
        HexPointIndex::Bottom,
        HexPointIndex::BottomRight,
        HexPointIndex::TopRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Vertex `index` of a hexagon with circumradius `radius`, rotated by `offset_angle`.
///
/// `lateral` is a sideways shift in model units (lattice offset × cell size). When it
/// is non-zero the point is moved along X, then its angle is re-derived from
/// `asin(y / hypot(y, x + lateral))` and the X coordinate rebuilt at `radius` from the
/// shifted origin. Y never changes. This re-projection is an approximation: it keeps
/// the post-offset radius rather than the Cartesian position and only lands on the
/// neighbouring cell's vertex when the hypotenuse equals the intended fit distance.
pub fn hex_point(radius: f64, index: usize, offset_angle: f64, lateral: f64) -> Point3 {
    let angle = 2.0 * PI * index as f64 / WALL_SIDES as f64 + offset_angle;
    let mut x = angle.cos() * radius;
    let y = angle.sin() * radius;

    if lateral != 0.0 {
        let shifted_x = x + lateral;
        let hyp = y.hypot(shifted_x);
        // asin is odd and cos is even, so the sign of the offset does not change x.
        let reprojected = if hyp > 1e-12 { (y / hyp).asin() } else { 0.0 };
        x = reprojected.cos() * radius + lateral;
    }

    Point3::new(x, y, 0.0)
}

/// The hexagonal lattice used by the wall and by repeated accessories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexLattice {
    pub sides: usize,
    /// Distance between opposite flat sides of one cell.
    pub cell_size: f64,
    pub cell_radius: f64,
    pub offset_angle: f64,
}

impl HexLattice {
    pub fn new(cell_size: f64) -> Self {
        Self {
            sides: WALL_SIDES,
            cell_size,
            cell_radius: cell_radius(cell_size, WALL_SIDES),
            offset_angle: offset_angle(WALL_SIDES),
        }
    }

    /// Lattice point `index` of the cell at the origin, shifted by `lateral_cells`.
    pub fn point(&self, index: HexPointIndex, lateral_cells: i32) -> Point3 {
        hex_point(
            self.cell_radius,
            index.index(),
            self.offset_angle,
            lateral_cells as f64 * self.cell_size,
        )
    }

    /// The six cell vertices, counter-clockwise from the top.
    pub fn vertices(&self) -> [Point3; 6] {
        HexPointIndex::ALL.map(|i| self.point(i, 0))
    }

    /// Translation from one row to row `row` (which must be ≥ 1).
    ///
    /// Measured from the cell's `Top` vertex to the `BottomLeft` vertex on even rows and
    /// the `BottomRight` vertex on odd rows, so consecutive rows stagger left and right.
    pub fn row_translation(&self, row: usize, lateral_cells: i32) -> Vec3 {
        let start = self.point(HexPointIndex::Top, 0);
        let target = if row % 2 == 0 {
            HexPointIndex::BottomLeft
        } else {
            HexPointIndex::BottomRight
        };
        start.delta_to(&self.point(target, lateral_cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const CELL: f64 = 4.2;

    #[test]
    fn test_vertex_zero_on_top() {
        let lattice = HexLattice::new(CELL);
        let top = lattice.point(HexPointIndex::Top, 0);
        assert_abs_diff_eq!(top.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(top.y, lattice.cell_radius, epsilon = 1e-12);
    }

    #[test]
    fn test_vertices_are_counter_clockwise() {
        let v = HexLattice::new(CELL).vertices();
        let mut signed = 0.0;
        for i in 0..6 {
            let (a, b) = (v[i], v[(i + 1) % 6]);
            signed += a.x * b.y - b.x * a.y;
        }
        assert!(signed > 0.0, "hexagon must wind counter-clockwise");
        assert!(v[HexPointIndex::TopLeft.index()].x < 0.0);
        assert!(v[HexPointIndex::TopRight.index()].x > 0.0);
    }

    #[test]
    fn test_side_walls_vertical() {
        let v = HexLattice::new(CELL).vertices();
        let tl = v[HexPointIndex::TopLeft.index()];
        let bl = v[HexPointIndex::BottomLeft.index()];
        assert_abs_diff_eq!(tl.x, bl.x, epsilon = 1e-12);
        assert_abs_diff_eq!(tl.x, -CELL / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_row_translation_staggers() {
        let lattice = HexLattice::new(CELL);
        let odd = lattice.row_translation(1, 0);
        let even = lattice.row_translation(2, 0);
        assert_abs_diff_eq!(odd.x, CELL / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(even.x, -CELL / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(odd.y, -1.5 * lattice.cell_radius, epsilon = 1e-12);
        assert_abs_diff_eq!(odd.y, even.y, epsilon = 1e-12);
    }

    #[test]
    fn test_lateral_offset_keeps_y() {
        let lattice = HexLattice::new(CELL);
        for idx in HexPointIndex::ALL {
            let base = lattice.point(idx, 0);
            let moved = lattice.point(idx, 2);
            assert_abs_diff_eq!(base.y, moved.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_odd_offset_angle() {
        assert_abs_diff_eq!(offset_angle(5), PI / 5.0 + PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(offset_angle(8), PI / 2.0, epsilon = 1e-12);
    }
}
