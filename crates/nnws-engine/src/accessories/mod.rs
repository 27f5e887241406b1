//! Accessories: parts that plug into a wall cell, plus the main screw.
//!
//! Every accessory that hangs off a cell starts from the same insert base. The base
//! lies along the Y axis in front of the wall: its back face sits inside the cell at
//! `-(INSERT_DEPTH + extra_spacing)` and its front at `y = 0`, where the accessory
//! itself begins.

pub mod anchor;
pub mod hook;
pub mod insert;
pub mod screw;
pub mod shelf;
pub mod shelf_insert;

use std::f64::consts::TAU;

use nnws_kernel::{ChamferKind, KernelId, KernelSolidHandle};
use nnws_ops::{
    execute_chamfer, execute_pattern_circular, ConstructionError, KernelBundle, OpError,
    OpResult, Pipeline, Stage,
};
use nnws_types::{Point3, Role, Vec3};
use tracing::{debug, instrument};

use crate::constants::*;
use crate::dims::Dimensions;
use crate::params::InsertBaseParams;
use crate::shapes::{block, cylinder_x, cylinder_y, cylinder_z, subtract, union, union_all};

/// Insert axis height below the wall's front face.
pub const AXIS_Z: f64 = -(BASE_HEIGHT / 2.0 + BASE_Z_OFFSET);
/// Insert axis position along X: the middle of the first cell.
pub const AXIS_X: f64 = HALF_CELL;

/// Length of the base cylinder at the back of the insert.
const BASE_LENGTH: f64 = SCREW_HEAD_THICKNESS;
/// Length of the chamfered ring in front of the base.
const CHAMFER_RING_LENGTH: f64 = THREAD_BODY_THICKNESS;
/// Neck length, which reaches out to the wall face plus the base gap.
const NECK_LENGTH: f64 = THREAD_BODY_THICKNESS + BASE_Z_OFFSET;
/// Depth of the insert proper, without extra spacing.
pub const INSERT_DEPTH: f64 = BASE_LENGTH + CHAMFER_RING_LENGTH + NECK_LENGTH;

/// Locking boss length, and where it starts measured from the insert axis.
const BOSS_LENGTH: f64 = 2.0 * NOTCH_RADIUS;
const BOSS_RADIAL_START: f64 = WALL_INNER_RADIUS;

/// A point on the insert axis at `y`.
pub fn axis_point(y: f64) -> Point3 {
    Point3::new(AXIS_X, y, AXIS_Z)
}

/// Y of the insert's back face.
pub fn insert_back(extra_spacing: f64) -> f64 {
    -(INSERT_DEPTH + extra_spacing)
}

/// Build one insert base: body, locking bosses and trims.
#[instrument(skip(kb, pipeline, dims), fields(component = pipeline.component()))]
pub fn build_insert_base(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    dims: &Dimensions,
    base: &InsertBaseParams,
) -> Result<KernelSolidHandle, ConstructionError> {
    pipeline.enter(Stage::BaseGeometry);
    let radius = dims.insert_outer_radius();
    let back = insert_back(base.extra_spacing);

    let cylinder = pipeline.structural("insert base", || {
        cylinder_y(kb, axis_point(back), radius, BASE_LENGTH)?.main()
    })?;
    let ring = pipeline.structural("insert chamfer ring", || {
        let ring = cylinder_y(
            kb,
            axis_point(back + BASE_LENGTH),
            radius - INTERNAL_SKETCH_RADIUS,
            CHAMFER_RING_LENGTH,
        )?;
        let edges = cap_edges(&ring, true, "chamfer ring")?;
        execute_chamfer(
            kb,
            &ring.main()?,
            &edges,
            ChamferKind::EqualDistance {
                distance: CHAMFER_RING_LENGTH,
            },
        )?
        .main()
    })?;
    let neck = pipeline.structural("insert neck", || {
        cylinder_y(
            kb,
            axis_point(back + BASE_LENGTH + CHAMFER_RING_LENGTH),
            INSERT_NECK_RADIUS,
            NECK_LENGTH,
        )?
        .main()
    })?;
    let mut body = pipeline.structural("insert join", || {
        union_all(kb, &cylinder, &[ring, neck])
    })?;

    if base.extra_spacing > 0.0 {
        let half = BASE_HEIGHT / 2.0;
        body = pipeline.structural("extra spacing", || {
            let spacer = block(
                kb,
                Point3::new(AXIS_X - half, -base.extra_spacing, AXIS_Z - half),
                Point3::new(AXIS_X + half, 0.0, AXIS_Z + half),
            )?
            .main()?;
            union(kb, &body, &spacer)
        })?;
    }

    if base.notch {
        pipeline.enter(Stage::Notch);
        body = add_locking_bosses(kb, pipeline, dims, &body, back, base.invert_axis)?;
    }

    pipeline.enter(Stage::Trims);
    trim(kb, pipeline, dims, body, base)
}

/// Two radial bosses on the back face, opposite each other, on the sides the trims
/// leave untouched.
fn add_locking_bosses(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    dims: &Dimensions,
    body: &KernelSolidHandle,
    back: f64,
    invert_axis: bool,
) -> Result<KernelSolidHandle, ConstructionError> {
    let boss_radius = dims.notch_boss_radius();
    let bosses = pipeline.structural("locking bosses", || {
        let seed = if invert_axis {
            cylinder_x(
                kb,
                Point3::new(AXIS_X + BOSS_RADIAL_START, back, AXIS_Z),
                boss_radius,
                BOSS_LENGTH,
            )?
        } else {
            cylinder_z(
                kb,
                Point3::new(AXIS_X, back, AXIS_Z + BOSS_RADIAL_START),
                boss_radius,
                BOSS_LENGTH,
            )?
        };
        Ok(execute_pattern_circular(
            kb,
            &seed.main()?,
            axis_point(0.0).to_array(),
            Vec3::Y.to_array(),
            2,
            TAU,
        )?
        .outputs)
    })?;
    pipeline.structural("locking boss join", || union_all(kb, body, &bosses))
}

/// Cut the insert flat on both sides of the axis. A trim reaching past the insert
/// radius leaves that side round.
fn trim(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    dims: &Dimensions,
    mut body: KernelSolidHandle,
    base: &InsertBaseParams,
) -> Result<KernelSolidHandle, ConstructionError> {
    let radius = dims.insert_outer_radius();
    let reach = dims.screw_inner_radius();
    let back = insert_back(base.extra_spacing) - BOSS_LENGTH;

    for (feature, keep, positive) in [
        ("top trim", base.trim_top, true),
        ("bottom trim", base.trim_bottom, false),
    ] {
        if keep >= radius {
            debug!(feature, keep, radius, "trim clears the insert, skipped");
            continue;
        }
        let (near, far) = if positive { (keep, reach) } else { (-reach, -keep) };
        let (min, max) = if base.invert_axis {
            (
                Point3::new(AXIS_X - reach, back, AXIS_Z + near),
                Point3::new(AXIS_X + reach, 0.0, AXIS_Z + far),
            )
        } else {
            (
                Point3::new(AXIS_X + near, back, AXIS_Z - reach),
                Point3::new(AXIS_X + far, 0.0, AXIS_Z + reach),
            )
        };
        body = pipeline.structural(feature, || {
            let tool = block(kb, min, max)?.main()?;
            subtract(kb, &body, &tool)
        })?;
    }
    Ok(body)
}

/// Edges around one end cap of a fresh extrusion, or an error naming the part.
pub(crate) fn cap_edges(
    result: &OpResult,
    positive: bool,
    what: &str,
) -> Result<Vec<KernelId>, OpError> {
    let edges = result.with_role(|r: &Role| r.is_end_cap_edge(positive));
    if edges.is_empty() {
        return Err(OpError::InvalidParameter {
            reason: format!("{} has no cap edge", what),
        });
    }
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nnws_kernel::{KernelIntrospect, MockKernel, MockOp};

    fn dims() -> Dimensions {
        Dimensions::new(0.01)
    }

    #[test]
    fn test_insert_depth() {
        assert_abs_diff_eq!(INSERT_DEPTH, 0.85, epsilon = 1e-12);
        assert_abs_diff_eq!(AXIS_Z, -0.595, epsilon = 1e-12);
    }

    #[test]
    fn test_default_base_spans_spacing() {
        let mut kernel = MockKernel::new();
        let mut pipeline = Pipeline::new("Insert");
        let params = InsertBaseParams::default();
        let body = build_insert_base(&mut kernel, &mut pipeline, &dims(), &params).unwrap();
        assert_eq!(kernel.solid_count(), 1);
        let bbox = kernel.bounding_box(&body).unwrap();
        assert_abs_diff_eq!(bbox.max[1], 0.0, epsilon = 1e-9);
        assert!(bbox.min[1] <= -(0.85 + 0.75) + 1e-9);
        // default top trim clears the insert; only the bottom is cut
        assert_eq!(kernel.call_count(MockOp::Subtract), 1);
    }

    #[test]
    fn test_bosses_follow_axis_choice() {
        let mut kernel = MockKernel::new();
        let mut pipeline = Pipeline::new("Insert");
        let params = InsertBaseParams {
            invert_axis: false,
            ..InsertBaseParams::default()
        };
        build_insert_base(&mut kernel, &mut pipeline, &dims(), &params).unwrap();
        assert_eq!(kernel.call_count(MockOp::PatternCircular), 1);
        assert_eq!(kernel.solid_count(), 1);
    }

    #[test]
    fn test_no_notch_skips_bosses() {
        let mut kernel = MockKernel::new();
        let mut pipeline = Pipeline::new("Insert");
        let params = InsertBaseParams {
            notch: false,
            extra_spacing: 0.0,
            ..InsertBaseParams::default()
        };
        build_insert_base(&mut kernel, &mut pipeline, &dims(), &params).unwrap();
        assert_eq!(kernel.call_count(MockOp::PatternCircular), 0);
        let report = pipeline.finish();
        assert!(!report.stages_completed.contains(&Stage::Notch));
    }

    #[test]
    fn test_thin_trims_flatten_both_sides() {
        let mut kernel = MockKernel::new();
        let mut pipeline = Pipeline::new("Insert");
        let params = InsertBaseParams {
            trim_top: 0.1,
            trim_bottom: 0.1,
            ..InsertBaseParams::default()
        };
        build_insert_base(&mut kernel, &mut pipeline, &dims(), &params).unwrap();
        assert_eq!(kernel.call_count(MockOp::Subtract), 2);
        assert_eq!(kernel.solid_count(), 1);
    }
}
