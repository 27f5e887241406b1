//! Shelf: a tray with a ledge for a shelf insert, carried by a row of inserts.

use nnws_geometry::{rect_with_fillet, rect_with_fillets};
use nnws_kernel::KernelSolidHandle;
use nnws_ops::select::horizontal_face_edges;
use nnws_ops::{
    execute_emboss, execute_extrude_profile, execute_sweep, profile_face, ConstructionError,
    KernelBundle, OpError, Pipeline, Stage,
};
use nnws_types::{Point2, Point3, Profile, SketchPlane, Vec3};
use tracing::{debug, instrument};

use crate::accessories::{build_insert_base, AXIS_X, AXIS_Z};
use crate::constants::*;
use crate::dims::Dimensions;
use crate::errors::EngineError;
use crate::params::ShelfParams;
use crate::shapes::{subtract, union_all};
use crate::tiling::{plan, replicate, LatticeFrame, WallPatternDefinition};

/// Corner radius on the tray's free corners.
const OUTER_CORNER_RADIUS: f64 = INTERNAL_SKETCH_RADIUS + SHELF_WIDTH;
const EDGE_FILLET: f64 = 0.1;
const LABEL_HEIGHT: f64 = 0.35;
const LABEL_DEPTH: f64 = -0.05;
const LABEL_MARGIN: f64 = 0.525;

/// Tray outline in plan view: X from `x1` to `x2`, Y from the wall face to `depth`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrayLayout {
    pub x1: f64,
    pub x2: f64,
    pub depth: f64,
    /// Height of the tray's bottom face.
    pub bottom: f64,
    pub side_width: f64,
}

impl TrayLayout {
    pub fn new(params: &ShelfParams) -> Self {
        let side_width = params.side_width();
        Self {
            x1: AXIS_X - side_width,
            x2: AXIS_X + (params.spanned_cells() - 1) as f64 * CELL_SIZE + side_width,
            depth: params.depth,
            bottom: AXIS_Z - params.base.trim_bottom,
            side_width,
        }
    }

    pub fn top(&self) -> f64 {
        self.bottom + EXTENSION_HEIGHT
    }

    /// Wall-side corners stay clear of the extra spacing block.
    fn wall_corner_radius(&self) -> f64 {
        OUTER_CORNER_RADIUS.min((self.side_width - EXTENSION_WIDTH / 2.0).max(0.0))
    }

    pub fn outline(&self) -> Profile {
        let wall = self.wall_corner_radius();
        rect_with_fillets(
            Point2::new(self.x1, 0.0),
            Point2::new(self.x2, self.depth),
            [wall, wall, OUTER_CORNER_RADIUS, OUTER_CORNER_RADIUS],
        )
    }

    /// The outline shrunk by `inset` on every side, or `None` when nothing is left.
    pub fn inset(&self, inset: f64, radius: f64) -> Option<Profile> {
        let a = Point2::new(self.x1 + inset, inset);
        let b = Point2::new(self.x2 - inset, self.depth - inset);
        if b.x - a.x <= 2.0 * radius || b.y - a.y <= 2.0 * radius {
            return None;
        }
        Some(rect_with_fillet(a, b, radius))
    }
}

/// Size of the shelf insert that fits a shelf dimension, in millimeters.
pub fn insert_size_mm(dimension: f64) -> f64 {
    (dimension - 2.0 * LEDGER_WIDTH - EXTERNAL_TOLERANCE) * 10.0
}

/// Engraved labels: the shelf insert length and depth this shelf takes.
pub fn size_labels(params: &ShelfParams) -> (String, String) {
    (
        format!("L {:06.2} mm", insert_size_mm(params.length)),
        format!("D {:06.2} mm", insert_size_mm(params.depth)),
    )
}

/// Build the shelf as one body.
#[instrument(skip(kb, pipeline, dims), fields(component = pipeline.component()))]
pub fn build_shelf(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    dims: &Dimensions,
    params: &ShelfParams,
) -> Result<KernelSolidHandle, EngineError> {
    let layout = TrayLayout::new(params);
    debug!(?layout, spanned = params.spanned_cells(), "tray layout");

    pipeline.enter(Stage::BaseGeometry);
    let tray = build_tray(kb, pipeline, dims, &layout)?;

    let seed = build_insert_base(kb, pipeline, dims, &params.base)?;
    let inserts = if params.x_count > 1 {
        pipeline.enter(Stage::Repetition);
        let placements = plan(&WallPatternDefinition::standard(params.x_count, 1))?;
        replicate(kb, pipeline, &seed, &placements, LatticeFrame::Accessory)?
    } else {
        vec![seed]
    };
    let body = pipeline.structural("tray join", || union_all(kb, &tray, &inserts))?;

    pipeline.enter(Stage::Finishing);
    Ok(finish_tray(kb, pipeline, body, &layout, params))
}

fn build_tray(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    dims: &Dimensions,
    layout: &TrayLayout,
) -> Result<KernelSolidHandle, ConstructionError> {
    let floor = SketchPlane::xy().offset(layout.bottom);
    let mut tray = pipeline.structural("tray", || {
        execute_extrude_profile(kb, &layout.outline(), &floor, EXTENSION_HEIGHT)?.main()
    })?;

    if let Some(hole) = layout.inset(SHELF_WIDTH, INTERNAL_SKETCH_RADIUS) {
        tray = pipeline.structural("tray hole", || {
            let tool = execute_extrude_profile(kb, &hole, &floor, EXTENSION_HEIGHT)?.main()?;
            subtract(kb, &tray, &tool)
        })?;
    } else {
        debug!("tray too shallow for a center hole");
    }

    let ledge_radius = dims.shelf_ledge_radius();
    let ledge_floor = layout.bottom + EXTENSION_HEIGHT / 2.0;
    let ledge = layout
        .inset(LEDGER_WIDTH, ledge_radius)
        .or_else(|| layout.inset(LEDGER_WIDTH, 0.0))
        .ok_or_else(|| ConstructionError {
            component: pipeline.component().to_string(),
            stage: pipeline.stage(),
            feature: "ledge".to_string(),
            steps_completed: pipeline.steps(),
            source: OpError::InvalidParameter {
                reason: "tray leaves no room for a ledge".to_string(),
            },
        })?;
    tray = pipeline.structural("ledge", || {
        let tool = execute_extrude_profile(
            kb,
            &ledge,
            &SketchPlane::xy().offset(ledge_floor),
            EXTENSION_HEIGHT / 2.0,
        )?
        .main()?;
        subtract(kb, &tray, &tool)
    })?;

    pipeline.structural("ledge notch", || {
        let groove = ledge_groove(kb, &ledge, ledge_floor + NOTCH_RADIUS)?;
        subtract(kb, &tray, &groove)
    })
}

/// Round groove running around the ledge wall, where the shelf insert bosses click in.
fn ledge_groove(
    kb: &mut dyn KernelBundle,
    ledge: &Profile,
    z: f64,
) -> Result<KernelSolidHandle, OpError> {
    let mut path: Vec<[f64; 3]> = Vec::new();
    for p in ledge.outline() {
        let point = [p.x, p.y, z];
        let fresh = path
            .last()
            .map(|last: &[f64; 3]| (last[0] - p.x).hypot(last[1] - p.y) > 1e-9)
            .unwrap_or(true);
        if fresh {
            path.push(point);
        }
    }
    let first = *path.first().ok_or(OpError::NoProfiles)?;
    path.push(first);
    if path.len() < 3 {
        return Err(OpError::InvalidParameter {
            reason: "ledge outline is degenerate".to_string(),
        });
    }
    let start = Point3::from_array(path[0]);
    let heading = Point3::from_array(path[1]).to_vec3() - start.to_vec3();
    let plane = SketchPlane::from_normal(start, heading).ok_or(OpError::InvalidParameter {
        reason: "ledge groove has no direction".to_string(),
    })?;
    let face = profile_face(kb, &Profile::circle(Point2::ORIGIN, NOTCH_RADIUS), &plane)?;
    execute_sweep(kb, face, &path)?.main()
}

fn finish_tray(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    body: KernelSolidHandle,
    layout: &TrayLayout,
    params: &ShelfParams,
) -> KernelSolidHandle {
    let mut edges = horizontal_face_edges(kb.as_introspect(), &body, layout.top(), true);
    for e in horizontal_face_edges(kb.as_introspect(), &body, layout.bottom, false) {
        if !edges.contains(&e) {
            edges.push(e);
        }
    }
    let mut body = pipeline
        .cosmetic_fillet(kb, "tray fillet", "top and bottom face edges", body, &edges, EDGE_FILLET)
        .handle;

    // Labels read from below.
    let underside = SketchPlane {
        origin: Point3::new(0.0, 0.0, layout.bottom),
        x_axis: Vec3::X,
        y_axis: -Vec3::Y,
    };
    let (length_label, depth_label) = size_labels(params);
    let placements = [
        (
            "length label",
            length_label,
            [layout.x1 + LABEL_MARGIN, -(LABEL_MARGIN + LABEL_HEIGHT)],
        ),
        (
            "depth label",
            depth_label,
            [layout.x1 + LABEL_MARGIN, -(layout.depth / 2.0)],
        ),
    ];
    for (feature, text, position) in placements {
        body = pipeline
            .cosmetic(feature, "tray underside", body, |solid| {
                execute_emboss(
                    kb,
                    solid,
                    &text,
                    &underside,
                    position,
                    LABEL_HEIGHT,
                    LABEL_DEPTH,
                )
            })
            .handle;
    }
    body
}
