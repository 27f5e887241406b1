//! Hook: an octagonal arm on an insert, with an optional stopper at the tip.

use std::f64::consts::PI;

use nnws_geometry::regular_polygon;
use nnws_kernel::KernelSolidHandle;
use nnws_ops::select::edges_where;
use nnws_ops::{execute_extrude_profile, ConstructionError, KernelBundle, Pipeline, Stage};
use nnws_types::{Point2, Point3, SketchPlane};
use tracing::{debug, instrument};

use crate::accessories::{build_insert_base, cap_edges, AXIS_X, AXIS_Z};
use crate::dims::Dimensions;
use crate::params::HookParams;
use crate::shapes::{cylinder_z, union};

const ARM_SIDES: usize = 8;
const ARM_FILLET: f64 = 0.1;
/// Stopper setback from the arm's tip.
const STOPPER_INSET: f64 = 0.05;
const STOPPER_WALL: f64 = 0.15;

/// Height of the arm's axis: the arm sits on the bottom trim line.
pub fn arm_axis_z(params: &HookParams) -> f64 {
    AXIS_Z - params.trim_bottom + params.size / 2.0
}

pub fn stopper_radius(params: &HookParams) -> f64 {
    (params.size / 2.0 - STOPPER_WALL) / 2.0
}

fn stopper_fillet(params: &HookParams) -> f64 {
    if params.size > 8.0 {
        0.2
    } else {
        0.1
    }
}

#[instrument(skip(kb, pipeline, dims), fields(component = pipeline.component()))]
pub fn build_hook(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    dims: &Dimensions,
    params: &HookParams,
) -> Result<KernelSolidHandle, ConstructionError> {
    pipeline.enter(Stage::BaseGeometry);
    let arm = if params.length > 0.0 {
        Some(build_arm(kb, pipeline, params)?)
    } else {
        debug!("zero length hook, arm skipped");
        None
    };

    let base = build_insert_base(kb, pipeline, dims, &params.base())?;
    match arm {
        Some(arm) => pipeline.structural("hook join", || union(kb, &base, &arm)),
        None => Ok(base),
    }
}

fn build_arm(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    params: &HookParams,
) -> Result<KernelSolidHandle, ConstructionError> {
    let axis_z = arm_axis_z(params);
    let circumradius = params.size / 2.0;

    // XZ sketch y runs along −Z
    let section = regular_polygon(
        Point2::new(AXIS_X, -axis_z),
        circumradius,
        ARM_SIDES,
        PI / ARM_SIDES as f64,
    );
    let (extruded, mut arm) = pipeline.structural("arm", || {
        let extruded = execute_extrude_profile(kb, &section, &SketchPlane::xz(), params.length)?;
        let arm = extruded.main()?;
        Ok((extruded, arm))
    })?;

    let mut edges = edges_where(kb.as_introspect(), &arm, |sig| {
        sig.surface_type.as_deref() == Some("line")
            && sig
                .length
                .map(|l| (l - params.length).abs() < 1e-6)
                .unwrap_or(false)
    });
    edges.extend(extruded.with_role(|r| r.is_end_cap_edge(true)));
    arm = pipeline
        .cosmetic_fillet(kb, "arm fillet", "arm sides and tip", arm, &edges, ARM_FILLET)
        .handle;

    if params.stopper {
        let radius = stopper_radius(params);
        let flat_top = axis_z + circumradius * (PI / ARM_SIDES as f64).cos();
        let center_y = params.length - radius - STOPPER_INSET;
        let (stopper_body, top_edges) = pipeline.structural("stopper", || {
            let stopper = cylinder_z(
                kb,
                Point3::new(AXIS_X, center_y, flat_top),
                radius,
                params.stopper_height,
            )?;
            Ok((stopper.main()?, cap_edges(&stopper, true, "stopper")?))
        })?;
        let rounded = pipeline
            .cosmetic_fillet(
                kb,
                "stopper fillet",
                "stopper top edge",
                stopper_body,
                &top_edges,
                stopper_fillet(params),
            )
            .handle;
        arm = pipeline.structural("stopper join", || union(kb, &arm, &rounded))?;
    }
    Ok(arm)
}
