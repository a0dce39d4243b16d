//! Position cache shared across recomputes.
//!
//! The one piece of state that outlives a single pipeline pass. The planner
//! replaces it whenever the topology fingerprint changes, the rendering
//! collaborator writes live positions back into it every animation step, and
//! loading an unrelated snapshot clears it so positions never leak between
//! sessions.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use crate::graph::NormalizedEdge;
use crate::layout::types::NodePosition;

#[derive(Debug, Clone, Default)]
pub struct PositionCache {
    positions: BTreeMap<String, (f64, f64)>,
    fingerprint: Option<u64>,
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.fingerprint = None;
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn get(&self, id: &str) -> Option<(f64, f64)> {
        self.positions.get(id).copied()
    }

    /// Live position report from the renderer. Only ids the planner placed
    /// are accepted; anything else is a stale callback.
    pub fn report(&mut self, id: &str, x: f64, y: f64) {
        if let Some(entry) = self.positions.get_mut(id) {
            *entry = (x, y);
        }
    }

    /// Whether the cached coordinates were produced for this topology.
    pub fn matches(&self, fingerprint: u64) -> bool {
        self.fingerprint == Some(fingerprint)
    }

    /// Replace the cache with a freshly planned layout.
    pub fn adopt(
        &mut self,
        positions: &BTreeMap<String, NodePosition>,
        fingerprint: u64,
    ) {
        self.positions = positions
            .iter()
            .map(|(id, p)| (id.clone(), (p.x, p.y)))
            .collect();
        self.fingerprint = Some(fingerprint);
    }
}

/// Fingerprint of the node/edge set the planner last saw. Both collections
/// iterate in key order, so equal topologies hash equally regardless of how
/// the input was ordered upstream.
pub fn topology_fingerprint<'a, I>(ids: I, edges: &[NormalizedEdge]) -> u64
where
    I: IntoIterator<Item = &'a String>,
{
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for id in ids {
        id.hash(&mut hasher);
    }
    let mut keys: Vec<(String, String)> = edges.iter().map(NormalizedEdge::key).collect();
    keys.sort();
    for key in keys {
        key.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: &str, b: &str) -> NormalizedEdge {
        NormalizedEdge::new(a, b, false)
    }

    #[test]
    fn fingerprint_ignores_edge_order() {
        let ids: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let forward = vec![edge("a", "b"), edge("b", "c")];
        let backward = vec![edge("c", "b"), edge("b", "a")];
        assert_eq!(
            topology_fingerprint(ids.iter(), &forward),
            topology_fingerprint(ids.iter(), &backward)
        );
    }

    #[test]
    fn fingerprint_tracks_topology_change() {
        let ids: Vec<String> = vec!["a".into(), "b".into()];
        let one = vec![edge("a", "b")];
        assert_ne!(
            topology_fingerprint(ids.iter(), &one),
            topology_fingerprint(ids.iter(), &[])
        );
    }

    #[test]
    fn report_ignores_unknown_ids() {
        let mut cache = PositionCache::new();
        let mut positions = BTreeMap::new();
        positions.insert("a".to_string(), NodePosition::free(1.0, 2.0));
        cache.adopt(&positions, 7);
        cache.report("a", 3.0, 4.0);
        cache.report("ghost", 9.0, 9.0);
        assert_eq!(cache.get("a"), Some((3.0, 4.0)));
        assert_eq!(cache.get("ghost"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_resets_fingerprint() {
        let mut cache = PositionCache::new();
        let mut positions = BTreeMap::new();
        positions.insert("a".to_string(), NodePosition::free(0.0, 0.0));
        cache.adopt(&positions, 7);
        assert!(cache.matches(7));
        cache.clear();
        assert!(!cache.matches(7));
        assert!(cache.is_empty());
    }
}
