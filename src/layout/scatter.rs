use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::graph::Node;
use crate::layout::types::NodePosition;
use crate::layout::{jitter, TAU};

/// Scatter mode: the root pinned at the canvas center, every other node on
/// a ring around it with a bounded radial perturbation so ties don't stack.
pub(super) fn place_scatter(
    nodes: &BTreeMap<String, Node>,
    root: Option<&str>,
    config: &LayoutConfig,
) -> BTreeMap<String, NodePosition> {
    let (cx, cy) = config.center();
    let ring = config.min_dimension() * config.scatter_radius_factor;

    let mut positions = BTreeMap::new();
    if let Some(root) = root {
        if nodes.contains_key(root) {
            positions.insert(root.to_string(), NodePosition::pinned(cx, cy));
        }
    }

    let others: Vec<&str> = nodes
        .keys()
        .map(String::as_str)
        .filter(|id| Some(*id) != root)
        .collect();
    let total = others.len();
    for (index, id) in others.into_iter().enumerate() {
        let angle = index as f64 / total as f64 * TAU;
        let radius = ring + jitter(id, 0, config.scatter_jitter);
        positions.insert(
            id.to_string(),
            NodePosition::free(cx + radius * angle.cos(), cy + radius * angle.sin()),
        );
    }
    positions
}
