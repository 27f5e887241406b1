//! One hexagonal wall cell and the tiled wall panel.

use std::f64::consts::TAU;

use nnws_geometry::{hexagon, ThreadSpec};
use nnws_kernel::{ChamferKind, KernelSolidHandle};
use nnws_ops::select::{circle_edges, horizontal_face_edges};
use nnws_ops::{
    build_thread, execute_chamfer, execute_extrude_profile, execute_pattern_circular,
    execute_split, ConstructionError, KernelBundle, OpError, Pipeline, SplitSide, Stage,
    ThreadKind,
};
use nnws_types::{Point2, Point3, Profile, SketchPlane, Vec3};
use tracing::{info, instrument};

use crate::constants::*;
use crate::shapes::{cylinder_y, ring_z, subtract, subtract_all, union};
use crate::tiling::{replicate, LatticeFrame, RowPlacement};

/// Fillet on the cell's top face edges.
pub const TOP_FILLET: f64 = 0.05;
/// Notches cut around the inner section.
pub const NOTCH_COUNT: usize = 8;

const EDGE_TOL: f64 = 1e-6;

/// The internal thread every cell bore carries.
pub fn wall_thread() -> ThreadSpec {
    ThreadSpec {
        start_offset: WALL_BOTTOM_THICKNESS + THREAD_PITCH,
        radius: WALL_BORE_RADIUS,
        height: WALL_THICKNESS,
        pitch: THREAD_PITCH,
        profile_radius: THREAD_PROFILE_RADIUS,
    }
}

/// Build a single wall cell centered on the origin, standing on z = 0.
#[instrument(skip(kb, pipeline), fields(component = pipeline.component()))]
pub fn build_wall_section(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    notch: bool,
    samples_per_turn: usize,
) -> Result<KernelSolidHandle, ConstructionError> {
    pipeline.enter(Stage::BaseGeometry);

    let prism = pipeline.structural("hex prism", || {
        execute_extrude_profile(
            kb,
            &hexagon(Point2::ORIGIN, HALF_CELL),
            &SketchPlane::xy(),
            WALL_THICKNESS,
        )?
        .main()
    })?;
    let mut body = pipeline.structural("bore cut", || {
        let bore = execute_extrude_profile(
            kb,
            &Profile::circle(Point2::ORIGIN, WALL_BORE_RADIUS),
            &SketchPlane::xy(),
            WALL_THICKNESS,
        )?
        .main()?;
        subtract(kb, &prism, &bore)
    })?;

    body = pipeline.structural("bottom ring", || {
        let ring = ring_z(kb, WALL_RING_RADIUS, WALL_BORE_RADIUS, WALL_BOTTOM_THICKNESS)?.main()?;
        union(kb, &body, &ring)
    })?;

    let inner = pipeline.structural("inner section", || {
        ring_z(kb, WALL_INNER_RADIUS, WALL_RING_RADIUS, INNER_SECTION_OFFSET)?.main()
    })?;
    let chamfered = pipeline.structural("inner section chamfer", || {
        let edges = circle_edges(
            kb.as_introspect(),
            &inner,
            WALL_INNER_RADIUS,
            INNER_SECTION_OFFSET,
            EDGE_TOL,
        );
        if edges.is_empty() {
            return Err(OpError::InvalidParameter {
                reason: "inner section has no top inner edge".to_string(),
            });
        }
        let height = INNER_SECTION_OFFSET - 0.1;
        execute_chamfer(
            kb,
            &inner,
            &edges,
            ChamferKind::DistanceAngle {
                distance: nnws_geometry::chamfer_width(INTERNAL_CHAMFER_ANGLE, height),
                angle_deg: INTERNAL_CHAMFER_ANGLE,
                flipped: false,
            },
        )?
        .main()
    })?;
    body = pipeline.structural("inner section join", || union(kb, &body, &chamfered))?;

    body = build_thread(
        kb,
        pipeline,
        &body,
        &wall_thread(),
        ThreadKind::Internal,
        samples_per_turn,
    )?;

    body = pipeline.structural("top split", || {
        execute_split(
            kb,
            &body,
            [0.0, 0.0, WALL_THICKNESS],
            Vec3::Z.to_array(),
            SplitSide::Below,
        )?
        .main()
    })?;

    if notch {
        pipeline.enter(Stage::Notch);
        body = cut_notches(kb, pipeline, &body)?;
    }

    pipeline.enter(Stage::Finishing);
    let edges = horizontal_face_edges(kb.as_introspect(), &body, WALL_THICKNESS, true);
    let finished =
        pipeline.cosmetic_fillet(kb, "top fillet", "top face edges", body, &edges, TOP_FILLET);
    Ok(finished.handle)
}

/// Eight small radial cuts just above the inner section that lock accessories in.
fn cut_notches(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    body: &KernelSolidHandle,
) -> Result<KernelSolidHandle, ConstructionError> {
    let tools = pipeline.structural("notch pattern", || {
        let seed = cylinder_y(
            kb,
            Point3::new(0.0, 0.0, INNER_SECTION_OFFSET + NOTCH_RADIUS / 2.0),
            NOTCH_RADIUS,
            WALL_RING_RADIUS,
        )?
        .main()?;
        Ok(execute_pattern_circular(
            kb,
            &seed,
            [0.0; 3],
            Vec3::Z.to_array(),
            NOTCH_COUNT,
            TAU,
        )?
        .outputs)
    })?;
    pipeline.structural("notch cut", || subtract_all(kb, body, &tools))
}

/// Tile `placements` with cells. The first body is the seed cell.
#[instrument(skip(kb, pipeline, placements), fields(component = pipeline.component()))]
pub fn build_wall(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    placements: &[RowPlacement],
    notch: bool,
    samples_per_turn: usize,
) -> Result<Vec<KernelSolidHandle>, ConstructionError> {
    let seed = build_wall_section(kb, pipeline, notch, samples_per_turn)?;
    pipeline.enter(Stage::Repetition);
    let bodies = replicate(kb, pipeline, &seed, placements, LatticeFrame::Wall)?;
    info!(cells = bodies.len(), "wall tiled");
    Ok(bodies)
}
