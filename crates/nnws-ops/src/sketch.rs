//! Turning sketch profiles into kernel faces.

use nnws_kernel::KernelId;
use nnws_types::{Profile, SketchPlane};

use crate::kernel_ext::KernelBundle;
use crate::types::OpError;

/// Faces for several closed profiles on one plane, in profile order.
pub fn profile_faces(
    kb: &mut dyn KernelBundle,
    profiles: &[Profile],
    plane: &SketchPlane,
) -> Result<Vec<KernelId>, OpError> {
    if profiles.is_empty() {
        return Err(OpError::NoProfiles);
    }
    Ok(kb.make_faces_from_profiles(profiles, plane)?)
}

/// The face of a single closed profile.
pub fn profile_face(
    kb: &mut dyn KernelBundle,
    profile: &Profile,
    plane: &SketchPlane,
) -> Result<KernelId, OpError> {
    profile_faces(kb, std::slice::from_ref(profile), plane)?
        .into_iter()
        .next()
        .ok_or(OpError::NoProfiles)
}
