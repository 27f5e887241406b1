use std::collections::{HashMap, HashSet};

use nnws_kernel::{KernelId, KernelIntrospect, KernelSolidHandle};
use nnws_types::{Role, TopoKind, TopoSignature};

use crate::types::{EntityRecord, Rewrite, RewriteReason};

/// Signatures scoring above this are treated as the same entity.
const MATCH_THRESHOLD: f64 = 0.7;

/// A snapshot of the topology of a solid at a point in time.
#[derive(Debug, Clone, Default)]
pub struct TopoSnapshot {
    pub faces: Vec<(KernelId, TopoSignature)>,
    pub edges: Vec<(KernelId, TopoSignature)>,
    pub vertices: Vec<(KernelId, TopoSignature)>,
}

impl TopoSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Both snapshots as one, `self` first.
    pub fn merged(&self, other: &TopoSnapshot) -> TopoSnapshot {
        let join = |a: &[(KernelId, TopoSignature)], b: &[(KernelId, TopoSignature)]| {
            a.iter().chain(b.iter()).cloned().collect::<Vec<_>>()
        };
        TopoSnapshot {
            faces: join(&self.faces, &other.faces),
            edges: join(&self.edges, &other.edges),
            vertices: join(&self.vertices, &other.vertices),
        }
    }

    /// Signature of an entity in this snapshot.
    pub fn signature(&self, id: KernelId) -> Option<(TopoKind, &TopoSignature)> {
        let find = |list: &[(KernelId, TopoSignature)]| {
            list.iter().position(|(eid, _)| *eid == id)
        };
        if let Some(i) = find(&self.faces) {
            return Some((TopoKind::Face, &self.faces[i].1));
        }
        if let Some(i) = find(&self.edges) {
            return Some((TopoKind::Edge, &self.edges[i].1));
        }
        find(&self.vertices).map(|i| (TopoKind::Vertex, &self.vertices[i].1))
    }
}

/// Take a topology snapshot of a solid for diffing.
pub fn snapshot(introspect: &dyn KernelIntrospect, solid: &KernelSolidHandle) -> TopoSnapshot {
    TopoSnapshot {
        faces: introspect.compute_all_signatures(solid, TopoKind::Face),
        edges: introspect.compute_all_signatures(solid, TopoKind::Edge),
        vertices: introspect.compute_all_signatures(solid, TopoKind::Vertex),
    }
}

/// Result of diffing two topology snapshots.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// Entities present in `after` but not in `before`.
    pub created: Vec<EntityRecord>,
    /// Entities present in `before` but not in `after`.
    pub deleted: Vec<EntityRecord>,
    /// Entities that likely correspond between before and after (by signature similarity).
    pub survived: Vec<(KernelId, KernelId)>,
}

impl DiffResult {
    /// Survivors whose id changed, as rewrites tagged with `reason`.
    pub fn rewrites(&self, reason: RewriteReason) -> Vec<Rewrite> {
        self.survived
            .iter()
            .filter(|(before, after)| before != after)
            .map(|&(before, after)| Rewrite {
                before,
                after,
                reason,
            })
            .collect()
    }

    /// Move roles attached to input entities onto their surviving counterparts.
    /// Roles of deleted entities are dropped.
    pub fn carry_roles(&self, roles: &[(KernelId, Role)]) -> Vec<(KernelId, Role)> {
        let map: HashMap<KernelId, KernelId> = self.survived.iter().copied().collect();
        roles
            .iter()
            .filter_map(|(id, role)| map.get(id).map(|after| (*after, role.clone())))
            .collect()
    }
}

/// Diff two topology snapshots to find created, deleted, and surviving entities.
/// For a body built from scratch, pass an empty snapshot as `before`.
pub fn diff(before: &TopoSnapshot, after: &TopoSnapshot) -> DiffResult {
    let mut result = DiffResult::default();
    diff_kind(&before.faces, &after.faces, TopoKind::Face, &mut result);
    diff_kind(&before.edges, &after.edges, TopoKind::Edge, &mut result);
    diff_kind(&before.vertices, &after.vertices, TopoKind::Vertex, &mut result);
    result
}

/// Diff a single kind of topology entity. Output order follows the snapshots, so the
/// same inputs always give the same provenance.
fn diff_kind(
    before: &[(KernelId, TopoSignature)],
    after: &[(KernelId, TopoSignature)],
    kind: TopoKind,
    result: &mut DiffResult,
) {
    let before_ids: HashSet<KernelId> = before.iter().map(|(id, _)| *id).collect();
    let after_ids: HashSet<KernelId> = after.iter().map(|(id, _)| *id).collect();

    // Entities with the same ID survived
    for (id, _) in before.iter().filter(|(id, _)| after_ids.contains(id)) {
        result.survived.push((*id, *id));
    }

    let gone: Vec<&(KernelId, TopoSignature)> =
        before.iter().filter(|(id, _)| !after_ids.contains(id)).collect();
    let new: Vec<&(KernelId, TopoSignature)> =
        after.iter().filter(|(id, _)| !before_ids.contains(id)).collect();

    let mut matched_before: HashSet<KernelId> = HashSet::new();
    let mut matched_after: HashSet<KernelId> = HashSet::new();

    // Greedy matching: for each gone entity, find the best-matching new entity
    for (gone_id, gone_sig) in &gone {
        let mut best_match: Option<(KernelId, f64)> = None;
        for (new_id, new_sig) in &new {
            if matched_after.contains(new_id) {
                continue;
            }
            let similarity = signature_similarity(gone_sig, new_sig);
            if similarity > MATCH_THRESHOLD
                && best_match.map_or(true, |(_, best)| similarity > best)
            {
                best_match = Some((*new_id, similarity));
            }
        }

        if let Some((matched_id, _)) = best_match {
            result.survived.push((*gone_id, matched_id));
            matched_before.insert(*gone_id);
            matched_after.insert(matched_id);
        }
    }

    for (gone_id, sig) in gone {
        if !matched_before.contains(gone_id) {
            result.deleted.push(EntityRecord {
                kernel_id: *gone_id,
                kind,
                signature: sig.clone(),
            });
        }
    }

    for (new_id, sig) in new {
        if !matched_after.contains(new_id) {
            result.created.push(EntityRecord {
                kernel_id: *new_id,
                kind,
                signature: sig.clone(),
            });
        }
    }
}

/// Compute similarity between two topology signatures (0.0 to 1.0).
/// Higher means more similar. Used for signature-based matching.
pub fn signature_similarity(a: &TopoSignature, b: &TopoSignature) -> f64 {
    let mut score = 0.0;
    let mut weight = 0.0;

    // Surface type match (high weight)
    if let (Some(st_a), Some(st_b)) = (&a.surface_type, &b.surface_type) {
        weight += 3.0;
        if st_a == st_b {
            score += 3.0;
        }
    }

    if let (Some(area_a), Some(area_b)) = (a.area, b.area) {
        weight += 2.0;
        score += 2.0 * relative_closeness(area_a, area_b);
    }

    // Centroid proximity, falls off linearly to zero at 10 units
    if let (Some(c_a), Some(c_b)) = (a.centroid, b.centroid) {
        weight += 2.0;
        let dist =
            ((c_a[0] - c_b[0]).powi(2) + (c_a[1] - c_b[1]).powi(2) + (c_a[2] - c_b[2]).powi(2))
                .sqrt();
        score += 2.0 * (1.0 - (dist / 10.0).min(1.0));
    }

    // Normal alignment: 1.0 parallel, 0.0 anti-parallel
    if let (Some(n_a), Some(n_b)) = (a.normal, b.normal) {
        weight += 2.0;
        let dot = n_a[0] * n_b[0] + n_a[1] * n_b[1] + n_a[2] * n_b[2];
        score += 2.0 * ((dot + 1.0) / 2.0).max(0.0);
    }

    if let (Some(len_a), Some(len_b)) = (a.length, b.length) {
        weight += 2.0;
        score += 2.0 * relative_closeness(len_a, len_b);
    }

    if weight > 0.0 {
        score / weight
    } else {
        0.0
    }
}

fn relative_closeness(a: f64, b: f64) -> f64 {
    let max = a.abs().max(b.abs());
    if max > 1e-12 {
        1.0 - ((a - b).abs() / max).min(1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(length: f64, centroid: [f64; 3]) -> TopoSignature {
        TopoSignature {
            surface_type: Some("line".to_string()),
            centroid: Some(centroid),
            length: Some(length),
            ..TopoSignature::default()
        }
    }

    #[test]
    fn test_rewrites_skip_unchanged_ids() {
        let before = TopoSnapshot {
            edges: vec![
                (KernelId(1), edge(1.0, [0.0; 3])),
                (KernelId(2), edge(2.0, [1.0, 0.0, 0.0])),
            ],
            ..TopoSnapshot::default()
        };
        let after = TopoSnapshot {
            edges: vec![
                (KernelId(1), edge(1.0, [0.0; 3])),
                (KernelId(7), edge(2.0, [1.0, 0.0, 0.0])),
            ],
            ..TopoSnapshot::default()
        };
        let result = diff(&before, &after);
        let rewrites = result.rewrites(RewriteReason::Trimmed);
        assert_eq!(rewrites.len(), 1);
        assert_eq!(rewrites[0].before, KernelId(2));
        assert_eq!(rewrites[0].after, KernelId(7));
    }

    #[test]
    fn test_carry_roles_follows_survivors() {
        let before = TopoSnapshot {
            edges: vec![(KernelId(3), edge(5.0, [0.0, 0.0, 1.0]))],
            ..TopoSnapshot::default()
        };
        let after = TopoSnapshot {
            edges: vec![(KernelId(9), edge(5.0, [0.0, 0.0, 1.0]))],
            ..TopoSnapshot::default()
        };
        let carried = diff(&before, &after)
            .carry_roles(&[(KernelId(3), Role::SweepLateral { index: 0 })]);
        assert_eq!(carried, vec![(KernelId(9), Role::SweepLateral { index: 0 })]);
    }

    #[test]
    fn test_snapshot_signature_lookup() {
        let snap = TopoSnapshot {
            edges: vec![(KernelId(4), edge(1.0, [0.0; 3]))],
            ..TopoSnapshot::default()
        };
        assert!(matches!(snap.signature(KernelId(4)), Some((TopoKind::Edge, _))));
        assert!(snap.signature(KernelId(5)).is_none());
    }
}
