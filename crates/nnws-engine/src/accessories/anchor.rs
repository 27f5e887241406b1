//! Screw anchors that sit in a cell's inner section, plain or with an offset insert.

use nnws_geometry::chamfer_width;
use nnws_kernel::{ChamferKind, Countersink, HoleSpec, KernelSolidHandle};
use nnws_ops::{execute_chamfer, execute_hole, ConstructionError, KernelBundle, Pipeline, Stage};
use nnws_types::Point3;
use tracing::{debug, instrument};

use crate::accessories::cap_edges;
use crate::constants::*;
use crate::dims::Dimensions;
use crate::params::AnchorParams;
use crate::shapes::{cylinder_z, subtract};

/// Radius of the offset insert.
pub const OFFSET_INSERT_RADIUS: f64 = SCREW_HEAD_INTERNAL_DIAMETER / 2.0 * 0.65 + EXTERNAL_TOLERANCE;
/// Depth the screw hole is drilled to.
const HOLE_DEPTH: f64 = WALL_THICKNESS - INNER_SECTION_OFFSET;

/// Bodies of one anchor build.
#[derive(Debug, Clone)]
pub struct AnchorBodies {
    pub base: KernelSolidHandle,
    /// Present for the offset variant; it carries the screw hole.
    pub offset_insert: Option<KernelSolidHandle>,
}

impl AnchorBodies {
    /// (name, body) in output order.
    pub fn named(self) -> Vec<(&'static str, KernelSolidHandle)> {
        let mut out = vec![("AnchorBase", self.base)];
        if let Some(insert) = self.offset_insert {
            out.push(("AnchorOffsetInsert", insert));
        }
        out
    }
}

/// Center of the offset insert along X.
pub fn offset_insert_x(dims: &Dimensions) -> f64 {
    OFFSET_INSERT_RADIUS / 2.0 - chamfer_width(INTERNAL_CHAMFER_ANGLE, dims.anchor_height())
}

/// Upright cylinder with the wall's 75° chamfer around its bottom, so it seats on the
/// inner section.
fn seated_cylinder(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    feature: &str,
    center: Point3,
    radius: f64,
    height: f64,
) -> Result<KernelSolidHandle, ConstructionError> {
    pipeline.structural(feature, || {
        let cylinder = cylinder_z(kb, center, radius, height)?;
        let edges = cap_edges(&cylinder, false, feature)?;
        execute_chamfer(
            kb,
            &cylinder.main()?,
            &edges,
            ChamferKind::DistanceAngle {
                distance: chamfer_width(INTERNAL_CHAMFER_ANGLE, height),
                angle_deg: INTERNAL_CHAMFER_ANGLE,
                flipped: true,
            },
        )?
        .main()
    })
}

#[instrument(skip(kb, pipeline, dims), fields(component = pipeline.component()))]
pub fn build_anchor(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    dims: &Dimensions,
    params: &AnchorParams,
    offset: bool,
) -> Result<AnchorBodies, ConstructionError> {
    let height = dims.anchor_height();
    pipeline.enter(Stage::BaseGeometry);
    let mut base = seated_cylinder(
        kb,
        pipeline,
        "anchor base",
        Point3::ORIGIN,
        dims.anchor_radius(),
        height,
    )?;

    let mut offset_insert = None;
    if offset {
        let center = Point3::new(offset_insert_x(dims), 0.0, 0.0);
        let tool = seated_cylinder(
            kb,
            pipeline,
            "offset cut tool",
            center,
            OFFSET_INSERT_RADIUS,
            height,
        )?;
        base = pipeline.structural("offset cut", || subtract(kb, &base, &tool))?;
        offset_insert = Some(seated_cylinder(
            kb,
            pipeline,
            "offset insert",
            center,
            OFFSET_INSERT_RADIUS,
            height,
        )?);
    }

    pipeline.enter(Stage::ScrewHole);
    // with an offset insert, the screw goes through the insert
    let bodies = match offset_insert {
        Some(insert) => AnchorBodies {
            base,
            offset_insert: Some(drill_screw_hole(kb, pipeline, insert, params, height)?),
        },
        None => AnchorBodies {
            base: drill_screw_hole(kb, pipeline, base, params, height)?,
            offset_insert: None,
        },
    };
    Ok(bodies)
}

fn drill_screw_hole(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    mut body: KernelSolidHandle,
    params: &AnchorParams,
    height: f64,
) -> Result<KernelSolidHandle, ConstructionError> {
    let screw = params.screw.dims();
    let seat = height - params.top_offset;
    debug!(screw = params.screw.label(), seat, "drilling screw hole");

    if params.top_offset > 0.0 {
        body = pipeline.structural("counterbore", || {
            let tool = cylinder_z(
                kb,
                Point3::new(0.0, 0.0, seat),
                screw.head_diameter / 2.0,
                params.top_offset,
            )?
            .main()?;
            subtract(kb, &body, &tool)
        })?;
    }
    pipeline.structural("screw hole", || {
        execute_hole(
            kb,
            &body,
            &HoleSpec {
                position: [0.0, 0.0, seat],
                direction: [0.0, 0.0, -1.0],
                diameter: screw.hole_diameter,
                depth: HOLE_DEPTH,
                countersink: Some(Countersink {
                    diameter: screw.head_diameter,
                    angle_deg: screw.countersink_angle,
                }),
            },
        )?
        .main()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nnws_kernel::{KernelIntrospect, MockKernel, MockOp};

    use crate::params::ScrewStandard;

    #[test]
    fn test_offset_insert_position() {
        let dims = Dimensions::new(0.01);
        assert_abs_diff_eq!(OFFSET_INSERT_RADIUS, 0.895, epsilon = 1e-12);
        let width = 0.39 / 75f64.to_radians().tan();
        assert_abs_diff_eq!(offset_insert_x(&dims), 0.4475 - width, epsilon = 1e-12);
    }

    #[test]
    fn test_plain_anchor() {
        let mut kernel = MockKernel::new();
        let mut pipeline = Pipeline::new("Anchor");
        let bodies = build_anchor(
            &mut kernel,
            &mut pipeline,
            &Dimensions::new(0.01),
            &AnchorParams::default(),
            false,
        )
        .unwrap();
        assert!(bodies.offset_insert.is_none());
        assert_eq!(kernel.call_count(MockOp::Hole), 1);
        // counterbore for the default top offset
        assert_eq!(kernel.call_count(MockOp::Subtract), 1);
        let bbox = kernel.bounding_box(&bodies.base).unwrap();
        assert_abs_diff_eq!(bbox.max[2], 0.39, epsilon = 1e-9);
    }

    #[test]
    fn test_flush_anchor_has_no_counterbore() {
        let mut kernel = MockKernel::new();
        let mut pipeline = Pipeline::new("Anchor");
        let params = AnchorParams {
            screw: ScrewStandard::M3,
            top_offset: 0.0,
        };
        build_anchor(&mut kernel, &mut pipeline, &Dimensions::new(0.01), &params, false).unwrap();
        assert_eq!(kernel.call_count(MockOp::Subtract), 0);
    }

    #[test]
    fn test_offset_anchor_two_bodies() {
        let mut kernel = MockKernel::new();
        let mut pipeline = Pipeline::new("Anchor");
        let bodies = build_anchor(
            &mut kernel,
            &mut pipeline,
            &Dimensions::new(0.01),
            &AnchorParams::default(),
            true,
        )
        .unwrap();
        assert_eq!(kernel.solid_count(), 2);
        assert_eq!(kernel.call_count(MockOp::Chamfer), 3);
        let names: Vec<_> = bodies.named().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["AnchorBase", "AnchorOffsetInsert"]);
    }
}
