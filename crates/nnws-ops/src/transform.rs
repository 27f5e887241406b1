use nnws_kernel::KernelSolidHandle;
use tracing::instrument;

use crate::diff;
use crate::kernel_ext::KernelBundle;
use crate::types::{OpError, OpResult, Provenance, Rewrite, RewriteReason};

/// Copy a solid by `translation`. The input stays in place; the copy's entities are
/// reported as rewrites of the originals so roles can be followed onto it.
#[instrument(skip(kb, solid), fields(solid = solid.raw()))]
pub fn execute_copy_translated(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    translation: [f64; 3],
) -> Result<OpResult, OpError> {
    let before = diff::snapshot(kb.as_introspect(), solid);
    let handle = kb.copy_translated(solid, translation)?;
    let after = diff::snapshot(kb.as_introspect(), &handle);

    // Positions moved, so pair by order instead of by signature.
    let mut modified = Vec::new();
    for (b, a) in [
        (&before.faces, &after.faces),
        (&before.edges, &after.edges),
        (&before.vertices, &after.vertices),
    ] {
        modified.extend(b.iter().zip(a.iter()).map(|((before, _), (after, _))| Rewrite {
            before: *before,
            after: *after,
            reason: RewriteReason::Moved,
        }));
    }

    Ok(OpResult::single(
        handle,
        Provenance {
            modified,
            ..Provenance::default()
        },
    ))
}
