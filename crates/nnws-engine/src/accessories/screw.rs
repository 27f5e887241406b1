//! The main screw that fastens a wall panel: hollow threaded body with a slotted head.

use std::f64::consts::{PI, TAU};

use nnws_geometry::{arc_slot, ThreadSpec};
use nnws_kernel::KernelSolidHandle;
use nnws_ops::select::{circle_edges, edges_where};
use nnws_ops::{
    build_thread, execute_loft, execute_pattern_circular, execute_revolve_profile, execute_split,
    ConstructionError, KernelBundle, Pipeline, SplitSide, Stage, ThreadKind,
};
use nnws_types::{Point2, Profile, SketchPlane, Vec3};
use tracing::{debug, instrument};

use crate::constants::*;
use crate::dims::Dimensions;
use crate::params::MainScrewParams;
use crate::shapes::{ring_z, subtract_all, union};

pub const HEAD_RADIUS: f64 = (CELL_SIZE - HEAD_OFFSET) / 2.0;
pub const SLOT_COUNT: usize = 8;
const TOP_SLOT_WIDTH: f64 = 0.275;
const BOTTOM_SLOT_WIDTH: f64 = 0.15;
/// Pushes the slots slightly past the head rim.
const SLOT_OVERSHOOT: f64 = 0.015;
const TOP_FILLET: f64 = 0.05;
const SLOT_FILLET: f64 = 0.04;

/// External thread along the body, starting halfway up the head.
pub fn screw_thread(dims: &Dimensions, body_height: f64) -> ThreadSpec {
    ThreadSpec {
        start_offset: SCREW_HEAD_THICKNESS / 2.0,
        radius: dims.screw_outer_radius(),
        height: body_height,
        pitch: THREAD_PITCH,
        profile_radius: THREAD_PROFILE_RADIUS,
    }
}

/// Half-section of the head as (radius, height) pairs, revolved about Z.
fn head_section() -> Vec<Point2> {
    let bore = SCREW_HEAD_INTERNAL_DIAMETER / 2.0;
    [
        (bore, THREAD_BODY_THICKNESS),
        (bore, 0.0),
        (HEAD_RADIUS, 0.0),
        (HEAD_RADIUS, SCREW_HEAD_THICKNESS),
        (bore + THREAD_BODY_THICKNESS, SCREW_HEAD_THICKNESS),
    ]
    .iter()
    // XZ sketch y runs along −Z
    .map(|&(r, z)| Point2::new(r, -z))
    .collect()
}

/// The top and bottom outlines of one grip slot.
pub fn slot_sections() -> (Profile, Profile) {
    let angular = PI / SLOT_COUNT as f64 - TOP_SLOT_WIDTH / HEAD_RADIUS;
    let top = arc_slot(
        SLOT_OVERSHOOT + HEAD_RADIUS - TOP_SLOT_WIDTH,
        angular,
        TOP_SLOT_WIDTH,
        0.0,
    );
    let bottom = arc_slot(
        SLOT_OVERSHOOT + HEAD_RADIUS - BOTTOM_SLOT_WIDTH + 0.01,
        angular * 3.0 / 4.0,
        BOTTOM_SLOT_WIDTH,
        0.0,
    );
    (top, bottom)
}

#[instrument(skip(kb, pipeline, dims), fields(component = pipeline.component()))]
pub fn build_main_screw(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    dims: &Dimensions,
    params: &MainScrewParams,
    samples_per_turn: usize,
) -> Result<KernelSolidHandle, ConstructionError> {
    let height = params.body_height;
    let outer = dims.screw_outer_radius();

    pipeline.enter(Stage::BaseGeometry);
    let mut body = pipeline.structural("screw body", || {
        ring_z(kb, dims.screw_inner_radius(), outer, height)?.main()
    })?;
    body = build_thread(
        kb,
        pipeline,
        &body,
        &screw_thread(dims, height),
        ThreadKind::External,
        samples_per_turn,
    )?;
    body = pipeline.structural("body top split", || {
        execute_split(
            kb,
            &body,
            [0.0, 0.0, height],
            Vec3::Z.to_array(),
            SplitSide::Below,
        )?
        .main()
    })?;

    body = pipeline.structural("head", || {
        let head = execute_revolve_profile(
            kb,
            &Profile::polygon(&head_section()),
            &SketchPlane::xz(),
            [0.0; 3],
            Vec3::Z.to_array(),
        )?
        .main()?;
        union(kb, &body, &head)
    })?;

    let (top, bottom) = slot_sections();
    let slots = pipeline.structural("grip slots", || {
        let seed = execute_loft(
            kb,
            &[
                (top.clone(), SketchPlane::xy()),
                (bottom.clone(), SketchPlane::xy().offset(THREAD_BODY_THICKNESS)),
            ],
        )?
        .main()?;
        Ok(execute_pattern_circular(
            kb,
            &seed,
            [0.0; 3],
            Vec3::Z.to_array(),
            SLOT_COUNT,
            TAU,
        )?
        .outputs)
    })?;
    body = pipeline.structural("grip slot cut", || subtract_all(kb, &body, &slots))?;
    debug!(slots = slots.len(), "head slotted");

    pipeline.enter(Stage::Finishing);
    let rim = circle_edges(kb.as_introspect(), &body, outer, height, 1e-6);
    body = pipeline
        .cosmetic_fillet(kb, "top fillet", "body top outer edge", body, &rim, TOP_FILLET)
        .handle;

    let slot_edges = edges_where(kb.as_introspect(), &body, |sig| {
        matches!(sig.surface_type.as_deref(), Some("arc") | Some("line"))
            && sig
                .centroid
                .map(|c| {
                    let radial = c[0].hypot(c[1]);
                    c[2] >= -1e-6
                        && c[2] <= THREAD_BODY_THICKNESS + 1e-6
                        && radial >= HEAD_RADIUS - TOP_SLOT_WIDTH - 1e-6
                        && radial <= HEAD_RADIUS + SLOT_OVERSHOOT + 1e-6
                })
                .unwrap_or(false)
    });
    Ok(pipeline
        .cosmetic_fillet(kb, "slot fillet", "grip slot edges", body, &slot_edges, SLOT_FILLET)
        .handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nnws_kernel::{KernelIntrospect, MockKernel, MockOp};

    #[test]
    fn test_head_radius() {
        assert_abs_diff_eq!(HEAD_RADIUS, 1.925, epsilon = 1e-12);
        let section = head_section();
        assert_eq!(section.len(), 5);
        assert_abs_diff_eq!(section[3].y, -0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_slots_stay_on_the_rim() {
        let (top, bottom) = slot_sections();
        let (min, max) = top.bounds();
        assert!(max.x > HEAD_RADIUS);
        assert!(min.x > SCREW_HEAD_INTERNAL_DIAMETER / 2.0);
        assert_eq!(top.curve_count(), bottom.curve_count());
    }

    #[test]
    fn test_main_screw_builds() {
        let mut kernel = MockKernel::new();
        let mut pipeline = Pipeline::new("MainScrew");
        let body = build_main_screw(
            &mut kernel,
            &mut pipeline,
            &Dimensions::new(0.01),
            &MainScrewParams::default(),
            24,
        )
        .unwrap();
        assert_eq!(kernel.solid_count(), 1);
        assert_eq!(kernel.call_count(MockOp::Loft), 1);
        // eight slots plus nothing else
        assert_eq!(kernel.call_count(MockOp::Subtract), SLOT_COUNT);
        let bbox = kernel.bounding_box(&body).unwrap();
        assert_abs_diff_eq!(bbox.max[2], 1.05, epsilon = 1e-9);
    }

    #[test]
    fn test_failed_split_names_feature() {
        let mut kernel = MockKernel::new();
        let mut pipeline = Pipeline::new("MainScrew");
        kernel.fail_on(MockOp::Split);
        let err = build_main_screw(
            &mut kernel,
            &mut pipeline,
            &Dimensions::new(0.01),
            &MainScrewParams::default(),
            24,
        )
        .unwrap_err();
        assert_eq!(err.feature, "body top split");
    }
}
