//! The flat plate that snaps into a shelf's ledge.

use std::f64::consts::TAU;

use nnws_geometry::rect_with_fillet;
use nnws_kernel::KernelSolidHandle;
use nnws_ops::select::horizontal_face_edges;
use nnws_ops::{
    execute_extrude_profile, execute_pattern_circular, ConstructionError, KernelBundle,
    Pipeline, Stage,
};
use nnws_types::{Point2, Point3, SketchPlane, Vec3};
use tracing::instrument;

use crate::constants::*;
use crate::dims::Dimensions;
use crate::params::ShelfInsertParams;
use crate::shapes::{cylinder_x, cylinder_y, union_all};

const TOP_FILLET: f64 = 0.1;
/// Boss positions measured from each end of a side.
const BOSS_NEAR: f64 = 0.5;
const BOSS_FAR: f64 = 0.65;

/// Plate size after clearance: (length, depth).
pub fn plate_size(dims: &Dimensions, params: &ShelfInsertParams) -> (f64, f64) {
    let shrink = EXTERNAL_TOLERANCE + dims.clearance;
    (params.length - shrink, params.depth - shrink)
}

#[instrument(skip(kb, pipeline, dims), fields(component = pipeline.component()))]
pub fn build_shelf_insert(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    dims: &Dimensions,
    params: &ShelfInsertParams,
) -> Result<KernelSolidHandle, ConstructionError> {
    let (length, depth) = plate_size(dims, params);

    pipeline.enter(Stage::BaseGeometry);
    let mut plate = pipeline.structural("plate", || {
        execute_extrude_profile(
            kb,
            &rect_with_fillet(
                Point2::ORIGIN,
                Point2::new(length, depth),
                dims.shelf_ledge_radius(),
            ),
            &SketchPlane::xy(),
            params.thickness,
        )?
        .main()
    })?;

    if params.notch {
        pipeline.enter(Stage::Notch);
        let r = dims.notch_boss_radius();
        let center = [length / 2.0, depth / 2.0, 0.0];
        let bosses = pipeline.structural("side bosses", || {
            let mut seeds = Vec::with_capacity(4);
            for y in [BOSS_NEAR, depth - BOSS_FAR] {
                seeds.push(cylinder_y(kb, Point3::new(0.0, y, r), r, 2.0 * NOTCH_RADIUS)?.main()?);
            }
            for x in [BOSS_NEAR, length - BOSS_FAR] {
                seeds.push(cylinder_x(kb, Point3::new(x, 0.0, r), r, 2.0 * NOTCH_RADIUS)?.main()?);
            }
            let mut all = Vec::with_capacity(8);
            for seed in &seeds {
                all.extend(
                    execute_pattern_circular(kb, seed, center, Vec3::Z.to_array(), 2, TAU)?
                        .outputs,
                );
            }
            Ok(all)
        })?;
        plate = pipeline.structural("boss join", || union_all(kb, &plate, &bosses))?;
    }

    pipeline.enter(Stage::Finishing);
    let edges = horizontal_face_edges(kb.as_introspect(), &plate, params.thickness, true);
    Ok(pipeline
        .cosmetic_fillet(kb, "top fillet", "top face edges", plate, &edges, TOP_FILLET)
        .handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nnws_kernel::{KernelIntrospect, MockKernel, MockOp};

    #[test]
    fn test_plate_shrinks_by_clearance() {
        let (l, d) = plate_size(&Dimensions::new(0.01), &ShelfInsertParams::default());
        assert_abs_diff_eq!(l, 7.6 - 0.06, epsilon = 1e-12);
        assert_abs_diff_eq!(d, 7.6 - 0.06, epsilon = 1e-12);
    }

    #[test]
    fn test_eight_bosses() {
        let mut kernel = MockKernel::new();
        let mut pipeline = Pipeline::new("ShelfInsert");
        let body = build_shelf_insert(
            &mut kernel,
            &mut pipeline,
            &Dimensions::new(0.01),
            &ShelfInsertParams::default(),
        )
        .unwrap();
        assert_eq!(kernel.call_count(MockOp::PatternCircular), 4);
        assert_eq!(kernel.call_count(MockOp::Union), 8);
        assert_eq!(kernel.solid_count(), 1);
        let bbox = kernel.bounding_box(&body).unwrap();
        assert_abs_diff_eq!(bbox.max[2], 0.3, epsilon = 1e-9);
        assert!(pipeline.warnings().is_empty(), "{:?}", pipeline.warnings());
    }

    #[test]
    fn test_plain_plate() {
        let mut kernel = MockKernel::new();
        let mut pipeline = Pipeline::new("ShelfInsert");
        let params = ShelfInsertParams {
            notch: false,
            thickness: 0.5,
            ..ShelfInsertParams::default()
        };
        build_shelf_insert(&mut kernel, &mut pipeline, &Dimensions::new(0.0), &params).unwrap();
        assert_eq!(kernel.call_count(MockOp::Union), 0);
        assert_eq!(kernel.call_count(MockOp::Fillet), 1);
    }
}
