//! Helical screw threads: a circular profile swept along a spline fitted through
//! sampled helix points, joined into the target body and finished with seam fillets.

use nnws_geometry::{helix_path, ThreadSpec};
use nnws_kernel::KernelSolidHandle;
use nnws_types::{Point2, Point3, Profile, Role, SketchPlane, Vec3};
use tracing::{info, instrument};

use crate::boolean::{execute_boolean, BooleanKind};
use crate::kernel_ext::KernelBundle;
use crate::pipeline::Pipeline;
use crate::sweep::execute_sweep;
use crate::types::{ConstructionError, OpError};

/// Fillet on the helical run of a thread.
pub const LATERAL_FILLET: f64 = 0.075;
/// Fillet where an internal thread starts and ends.
pub const SEAM_FILLET: f64 = 0.05;

/// Whether the thread stands out of a screw or is part of a wall bore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadKind {
    External,
    Internal,
}

/// Sweep a thread and join it into `target`. Returns the joined body.
///
/// Finishing is cosmetic: external threads get their lateral edges rounded, internal
/// threads additionally get their seam edges rounded first. Both edge sets come from
/// the roles assigned when the sweep was built.
#[instrument(skip(kb, pipeline, target), fields(component = pipeline.component()))]
pub fn build_thread(
    kb: &mut dyn KernelBundle,
    pipeline: &mut Pipeline,
    target: &KernelSolidHandle,
    thread: &ThreadSpec,
    kind: ThreadKind,
    samples_per_turn: usize,
) -> Result<KernelSolidHandle, ConstructionError> {
    let points: Vec<[f64; 3]> = pipeline.structural("thread path", || {
        if !thread.is_well_formed() {
            return Err(OpError::InvalidParameter {
                reason: format!("thread {:?} cannot be swept", thread),
            });
        }
        let path = helix_path(thread, samples_per_turn);
        if path.len() < 2 {
            return Err(OpError::InvalidParameter {
                reason: "thread shorter than one sample".to_string(),
            });
        }
        Ok(path.iter().map(|p| p.to_array()).collect())
    })?;
    info!(points = points.len(), ?kind, "sweeping thread");

    let swept = pipeline.structural("thread sweep", || {
        let plane = profile_plane(&points)?;
        let face = crate::sketch::profile_face(
            kb,
            &Profile::circle(Point2::ORIGIN, thread.profile_radius),
            &plane,
        )?;
        execute_sweep(kb, face, &points)
    })?;
    let sweep_body = pipeline.structural("thread sweep", || swept.main())?;

    let tagged: Vec<_> = swept
        .provenance
        .role_assignments
        .iter()
        .filter(|(_, role)| role.is_sweep_seam() || role.is_sweep_lateral())
        .cloned()
        .collect();
    let joined = pipeline.structural("thread join", || {
        execute_boolean(kb, target, &sweep_body, BooleanKind::Union, &tagged)
    })?;
    let body = pipeline.structural("thread join", || joined.main())?;

    let mut laterals = joined.with_role(Role::is_sweep_lateral);
    let mut current = body;
    if kind == ThreadKind::Internal {
        let seams = joined.with_role(Role::is_sweep_seam);
        let seamed = pipeline.cosmetic_fillet(
            kb,
            "thread seam fillet",
            "sweep seam edges",
            current,
            &seams,
            SEAM_FILLET,
        );
        laterals = seamed.follow_all(&laterals);
        current = seamed.handle;
    }

    let finished = pipeline.cosmetic_fillet(
        kb,
        "thread lateral fillet",
        "sweep lateral edges",
        current,
        &laterals,
        LATERAL_FILLET,
    );
    Ok(finished.handle)
}

/// Plane for the thread profile: at the first path point, facing along the path.
fn profile_plane(points: &[[f64; 3]]) -> Result<SketchPlane, OpError> {
    let first = Vec3::from_array(points[0]);
    let second = Vec3::from_array(points[1]);
    SketchPlane::from_normal(Point3::from_array(points[0]), second - first).ok_or(
        OpError::InvalidParameter {
            reason: "thread path starts with repeated points".to_string(),
        },
    )
}
