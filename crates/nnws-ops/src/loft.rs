use nnws_kernel::{KernelId, KernelSolidHandle};
use nnws_types::{Profile, Role, SketchPlane};
use tracing::instrument;

use crate::diff::{self, TopoSnapshot};
use crate::kernel_ext::KernelBundle;
use crate::sweep::nearest_face;
use crate::types::{OpError, OpResult, Provenance};

/// Loft through closed sections, each sketched on its own plane, in order.
/// The first section's cap is `EndCapNegative`, the last one's `EndCapPositive`.
#[instrument(skip(kb, sections), fields(sections = sections.len()))]
pub fn execute_loft(
    kb: &mut dyn KernelBundle,
    sections: &[(Profile, SketchPlane)],
) -> Result<OpResult, OpError> {
    if sections.len() < 2 {
        return Err(OpError::InvalidParameter {
            reason: "a loft needs at least two sections".to_string(),
        });
    }
    let mut faces = Vec::with_capacity(sections.len());
    for (profile, plane) in sections {
        faces.push(crate::sketch::profile_face(kb, profile, plane)?);
    }
    let handle = kb.loft_faces(&faces)?;

    let after = diff::snapshot(kb.as_introspect(), &handle);
    let diff_result = diff::diff(&TopoSnapshot::empty(), &after);

    let centroid_of = |(profile, plane): &(Profile, SketchPlane)| {
        plane.to_world(profile.centroid()).to_array()
    };
    let first = centroid_of(&sections[0]);
    let last = centroid_of(&sections[sections.len() - 1]);
    let role_assignments = assign_loft_roles(kb, &handle, first, last);

    Ok(OpResult::single(
        handle,
        Provenance::fresh(diff_result, role_assignments),
    ))
}

fn assign_loft_roles(
    kb: &dyn KernelBundle,
    solid: &KernelSolidHandle,
    first: [f64; 3],
    last: [f64; 3],
) -> Vec<(KernelId, Role)> {
    let introspect = kb.as_introspect();
    let faces = introspect.list_faces(solid);
    let start_cap = nearest_face(introspect, &faces, first, None);
    let end_cap = nearest_face(introspect, &faces, last, start_cap);

    let mut side_index = 0;
    faces
        .into_iter()
        .map(|face| {
            let role = if Some(face) == start_cap {
                Role::EndCapNegative
            } else if Some(face) == end_cap {
                Role::EndCapPositive
            } else {
                side_index += 1;
                Role::SideFace {
                    index: side_index - 1,
                }
            };
            (face, role)
        })
        .collect()
}
