//! Per-node clique membership and dominant-clique resolution.

use std::collections::BTreeMap;

use crate::graph::Clique;

/// Node id → clique memberships, derived once per recompute.
#[derive(Debug, Clone, Default)]
pub struct MembershipIndex {
    /// All cliques containing the node, in discovery order.
    pub by_node: BTreeMap<String, Vec<usize>>,
    /// The largest clique containing the node. Absent for nodes outside
    /// every clique. Ties break toward the earliest-discovered clique.
    pub dominant: BTreeMap<String, usize>,
}

impl MembershipIndex {
    pub fn resolve(cliques: &[Clique]) -> Self {
        let mut by_node: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for clique in cliques {
            for member in &clique.members {
                by_node.entry(member.clone()).or_default().push(clique.id);
            }
        }

        let mut dominant: BTreeMap<String, usize> = BTreeMap::new();
        for (node, ids) in &by_node {
            let mut best: Option<&Clique> = None;
            for id in ids {
                let clique = &cliques[*id];
                // strictly-greater keeps the first-discovered on ties
                if best.map_or(true, |b| clique.len() > b.len()) {
                    best = Some(clique);
                }
            }
            if let Some(best) = best {
                dominant.insert(node.clone(), best.id);
            }
        }

        Self { by_node, dominant }
    }

    pub fn cliques_of(&self, id: &str) -> &[usize] {
        self.by_node.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dominant_of(&self, id: &str) -> Option<usize> {
        self.dominant.get(id).copied()
    }

    /// True when both nodes belong to a clique and it is the same one.
    pub fn share_dominant(&self, a: &str, b: &str) -> bool {
        match (self.dominant_of(a), self.dominant_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clique(id: usize, members: &[&str]) -> Clique {
        Clique {
            id,
            members: members.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn memberships_follow_discovery_order() {
        let cliques = vec![
            clique(0, &["a", "b", "c"]),
            clique(1, &["a", "c", "d", "e"]),
        ];
        let index = MembershipIndex::resolve(&cliques);
        assert_eq!(index.cliques_of("a"), &[0, 1]);
        assert_eq!(index.cliques_of("b"), &[0]);
        assert_eq!(index.cliques_of("zzz"), &[] as &[usize]);
    }

    #[test]
    fn dominant_is_largest() {
        let cliques = vec![
            clique(0, &["a", "b", "c"]),
            clique(1, &["a", "c", "d", "e"]),
        ];
        let index = MembershipIndex::resolve(&cliques);
        assert_eq!(index.dominant_of("a"), Some(1));
        assert_eq!(index.dominant_of("b"), Some(0));
        assert_eq!(index.dominant_of("zzz"), None);
    }

    #[test]
    fn ties_break_to_first_discovered() {
        let cliques = vec![
            clique(0, &["a", "b", "c"]),
            clique(1, &["a", "c", "d"]),
        ];
        let index = MembershipIndex::resolve(&cliques);
        assert_eq!(index.dominant_of("a"), Some(0));
    }

    #[test]
    fn share_dominant_needs_both_sides() {
        let cliques = vec![clique(0, &["a", "b", "c"])];
        let index = MembershipIndex::resolve(&cliques);
        assert!(index.share_dominant("a", "b"));
        assert!(!index.share_dominant("a", "zzz"));
    }
}
