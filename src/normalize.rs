//! Edge normalization: directed relationship edges collapse into one
//! undirected edge per unordered pair, flagged mutual when both directions
//! were present in the raw input.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::{ordered_pair, Node, NormalizedEdge, RawEdge, RelationshipKind};

/// Collapse raw directed edges into a canonical undirected edge set.
///
/// Edges referencing an id missing from `nodes` are skipped; the acquisition
/// step routinely reports accounts it never crawled. Pure function; the
/// output never exceeds the input in size and holds no duplicate pairs.
pub fn normalize_edges(
    nodes: &BTreeMap<String, Node>,
    raw: &[RawEdge],
) -> Vec<NormalizedEdge> {
    let mut directed: BTreeSet<(String, String)> = BTreeSet::new();
    let mut declared_mutual: BTreeSet<(String, String)> = BTreeSet::new();
    for edge in raw {
        if !nodes.contains_key(&edge.source) || !nodes.contains_key(&edge.target) {
            continue;
        }
        if edge.source == edge.target {
            continue;
        }
        directed.insert((edge.source.clone(), edge.target.clone()));
        if edge.kind == RelationshipKind::Mutual {
            let (a, b) = ordered_pair(&edge.source, &edge.target);
            declared_mutual.insert((a.to_string(), b.to_string()));
        }
    }

    let mut normalized: BTreeMap<(String, String), bool> = BTreeMap::new();
    for (source, target) in &directed {
        let (a, b) = ordered_pair(source, target);
        let key = (a.to_string(), b.to_string());
        let reciprocal = directed.contains(&(target.clone(), source.clone()));
        let mutual = reciprocal || declared_mutual.contains(&key);
        let entry = normalized.entry(key).or_insert(false);
        *entry = *entry || mutual;
    }

    normalized
        .into_iter()
        .map(|((a, b), mutual)| NormalizedEdge { a, b, mutual })
        .collect()
}

/// Unique-neighbor count per node over a normalized edge set.
pub fn degrees(edges: &[NormalizedEdge]) -> BTreeMap<String, usize> {
    let mut neighbors: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for edge in edges {
        neighbors.entry(&edge.a).or_default().insert(&edge.b);
        neighbors.entry(&edge.b).or_default().insert(&edge.a);
    }
    neighbors
        .into_iter()
        .map(|(id, set)| (id.to_string(), set.len()))
        .collect()
}
