//! Leaf condensation: nodes hanging off the graph by at most one neighbor
//! collapse into a single placeholder wired to the root.

use std::collections::BTreeMap;

use crate::graph::{Node, NormalizedEdge, PLACEHOLDER_ID};
use crate::normalize::degrees;

/// Collapse low-degree nodes into one synthetic placeholder.
///
/// A node is a leaf when its unique-neighbor count is at most 1 and it is
/// neither the root nor an earlier pass's placeholder; the placeholder
/// exemption is what makes condensation idempotent. When no leaves exist the
/// input passes through untouched. Pure function of (nodes, edges, root).
pub fn condense_leaves(
    nodes: &BTreeMap<String, Node>,
    edges: &[NormalizedEdge],
    root: Option<&str>,
) -> (BTreeMap<String, Node>, Vec<NormalizedEdge>) {
    let degree = degrees(edges);
    let leaves: Vec<&str> = nodes
        .keys()
        .filter(|id| {
            id.as_str() != PLACEHOLDER_ID
                && Some(id.as_str()) != root
                && degree.get(id.as_str()).copied().unwrap_or(0) <= 1
        })
        .map(String::as_str)
        .collect();

    if leaves.is_empty() {
        return (nodes.clone(), edges.to_vec());
    }

    let is_leaf = |id: &str| leaves.binary_search(&id).is_ok();

    let mut kept: BTreeMap<String, Node> = nodes
        .iter()
        .filter(|(id, _)| !is_leaf(id))
        .map(|(id, node)| (id.clone(), node.clone()))
        .collect();
    let mut kept_edges: Vec<NormalizedEdge> = edges
        .iter()
        .filter(|edge| !is_leaf(&edge.a) && !is_leaf(&edge.b))
        .cloned()
        .collect();

    kept.insert(
        PLACEHOLDER_ID.to_string(),
        Node {
            id: PLACEHOLDER_ID.to_string(),
            name: format!("{} hidden", leaves.len()),
            follower_count: 0,
            following_count: 0,
        },
    );
    if let Some(root) = root {
        if kept.contains_key(root) {
            kept_edges.push(NormalizedEdge::new(root, PLACEHOLDER_ID, false));
        }
    }

    (kept, kept_edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn fixture(ids: &[&str], pairs: &[(&str, &str)]) -> (BTreeMap<String, Node>, Vec<NormalizedEdge>) {
        let mut graph = Graph::new();
        for id in ids {
            graph.ensure_node(id, None);
        }
        let edges = pairs
            .iter()
            .map(|(a, b)| NormalizedEdge::new(a, b, false))
            .collect();
        (graph.nodes, edges)
    }

    #[test]
    fn pendant_collapses_into_placeholder() {
        let (nodes, edges) = fixture(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("a", "d")],
        );
        let (nodes, edges) = condense_leaves(&nodes, &edges, Some("a"));
        assert!(nodes.contains_key(PLACEHOLDER_ID));
        assert!(!nodes.contains_key("d"));
        assert_eq!(nodes.len(), 4);
        assert_eq!(edges.len(), 4);
        assert!(edges
            .iter()
            .any(|e| e.touches("a") && e.touches(PLACEHOLDER_ID)));
        assert_eq!(nodes[PLACEHOLDER_ID].name, "1 hidden");
    }

    #[test]
    fn no_leaves_passes_through() {
        let (nodes, edges) = fixture(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let (out_nodes, out_edges) = condense_leaves(&nodes, &edges, Some("a"));
        assert_eq!(out_nodes.len(), nodes.len());
        assert_eq!(out_edges.len(), edges.len());
        assert!(!out_nodes.contains_key(PLACEHOLDER_ID));
    }

    #[test]
    fn root_is_never_condensed() {
        let (nodes, edges) = fixture(&["a", "b"], &[("a", "b")]);
        let (nodes, _) = condense_leaves(&nodes, &edges, Some("a"));
        assert!(nodes.contains_key("a"));
        assert!(!nodes.contains_key("b"));
    }

    #[test]
    fn condensation_is_idempotent() {
        let (nodes, edges) = fixture(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("a", "d"), ("b", "e")],
        );
        let (once_nodes, once_edges) = condense_leaves(&nodes, &edges, Some("a"));
        let (twice_nodes, twice_edges) = condense_leaves(&once_nodes, &once_edges, Some("a"));
        assert_eq!(once_nodes.len(), twice_nodes.len());
        assert_eq!(once_edges.len(), twice_edges.len());
        assert_eq!(
            twice_nodes.keys().collect::<Vec<_>>(),
            once_nodes.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn missing_root_condenses_without_placeholder_edge() {
        let (nodes, edges) = fixture(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a"), ]);
        // all of a triangle has degree 2; add a pendant with no root set
        let mut nodes = nodes;
        let mut edges = edges;
        nodes.insert(
            "d".to_string(),
            Node {
                id: "d".to_string(),
                name: "d".to_string(),
                follower_count: 0,
                following_count: 0,
            },
        );
        edges.push(NormalizedEdge::new("a", "d", false));
        let (nodes, edges) = condense_leaves(&nodes, &edges, None);
        assert!(nodes.contains_key(PLACEHOLDER_ID));
        assert!(!edges.iter().any(|e| e.touches(PLACEHOLDER_ID)));
    }
}
