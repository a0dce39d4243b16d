use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::graph::Node;
use crate::layout::types::NodePosition;
use crate::layout::{jitter, TAU};
use crate::membership::MembershipIndex;

/// Cluster mode: one angular slot per dominant-clique group on an inner
/// ring, group members fanned out on a sub-circle sized by group count, and
/// clique-less nodes pushed to an outer ring. The root stays pinned at the
/// center no matter what clique it belongs to.
pub(super) fn place_clusters(
    nodes: &BTreeMap<String, Node>,
    root: Option<&str>,
    membership: &MembershipIndex,
    config: &LayoutConfig,
) -> BTreeMap<String, NodePosition> {
    let (cx, cy) = config.center();
    let group_ring = config.min_dimension() * config.cluster_radius_factor;

    let mut positions = BTreeMap::new();
    if let Some(root) = root {
        if nodes.contains_key(root) {
            positions.insert(root.to_string(), NodePosition::pinned(cx, cy));
        }
    }

    let mut groups: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    let mut unclustered: Vec<&str> = Vec::new();
    for id in nodes.keys() {
        if Some(id.as_str()) == root {
            continue;
        }
        match membership.dominant_of(id) {
            Some(clique_id) => groups.entry(clique_id).or_default().push(id),
            None => unclustered.push(id),
        }
    }

    let group_count = groups.len();
    for (slot, (_, members)) in groups.iter().enumerate() {
        let angle = slot as f64 / group_count as f64 * TAU;
        let gx = cx + group_ring * angle.cos();
        let gy = cy + group_ring * angle.sin();

        if members.len() == 1 {
            positions.insert(members[0].to_string(), NodePosition::free(gx, gy));
            continue;
        }

        let sub_radius = config
            .cluster_min_radius
            .max((members.len() as f64).sqrt() * config.cluster_member_spread);
        for (index, id) in members.iter().enumerate() {
            let member_angle = index as f64 / members.len() as f64 * TAU;
            positions.insert(
                id.to_string(),
                NodePosition::free(
                    gx + sub_radius * member_angle.cos() + jitter(id, 1, config.cluster_jitter),
                    gy + sub_radius * member_angle.sin() + jitter(id, 2, config.cluster_jitter),
                ),
            );
        }
    }

    let outer_ring = group_ring * config.unclustered_ring_factor;
    let total = unclustered.len();
    for (index, id) in unclustered.into_iter().enumerate() {
        let angle = index as f64 / total as f64 * TAU;
        positions.insert(
            id.to_string(),
            NodePosition::free(
                cx + outer_ring * angle.cos() + jitter(id, 3, config.unclustered_jitter),
                cy + outer_ring * angle.sin() + jitter(id, 4, config.unclustered_jitter),
            ),
        );
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Clique, Graph};

    fn nodes(ids: &[&str]) -> BTreeMap<String, Node> {
        let mut graph = Graph::new();
        for id in ids {
            graph.ensure_node(id, None);
        }
        graph.nodes
    }

    fn membership(cliques: &[(usize, &[&str])]) -> MembershipIndex {
        let cliques: Vec<Clique> = cliques
            .iter()
            .map(|(id, members)| Clique {
                id: *id,
                members: members.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        MembershipIndex::resolve(&cliques)
    }

    #[test]
    fn root_is_pinned_at_center_even_when_in_a_clique() {
        let config = LayoutConfig::default();
        let index = membership(&[(0, &["root", "b", "c"])]);
        let positions = place_clusters(
            &nodes(&["root", "b", "c"]),
            Some("root"),
            &index,
            &config,
        );
        let root = &positions["root"];
        assert_eq!((root.x, root.y), config.center());
        assert!(root.pinned);
    }

    #[test]
    fn group_members_gather_around_their_slot() {
        let config = LayoutConfig::default();
        let (cx, cy) = config.center();
        let index = membership(&[(0, &["b", "c", "d"])]);
        let positions = place_clusters(
            &nodes(&["root", "b", "c", "d"]),
            Some("root"),
            &index,
            &config,
        );
        let ring = config.min_dimension() * config.cluster_radius_factor;
        let sub = config
            .cluster_min_radius
            .max(3f64.sqrt() * config.cluster_member_spread);
        let slack = sub + config.cluster_jitter * 2.0;
        for id in ["b", "c", "d"] {
            let p = &positions[id];
            let dist = ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt();
            assert!((dist - ring).abs() <= slack, "{id} at distance {dist}");
        }
    }

    #[test]
    fn singleton_group_sits_on_its_slot_center() {
        let config = LayoutConfig::default();
        let (cx, cy) = config.center();
        let index = membership(&[(0, &["b"])]);
        let positions =
            place_clusters(&nodes(&["root", "b"]), Some("root"), &index, &config);
        let ring = config.min_dimension() * config.cluster_radius_factor;
        let p = &positions["b"];
        let dist = ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt();
        assert!((dist - ring).abs() < 1e-9);
    }

    #[test]
    fn unclustered_nodes_land_on_the_outer_ring() {
        let config = LayoutConfig::default();
        let (cx, cy) = config.center();
        let index = membership(&[(0, &["b", "c", "d"])]);
        let positions = place_clusters(
            &nodes(&["root", "b", "c", "d", "x", "y"]),
            Some("root"),
            &index,
            &config,
        );
        let outer =
            config.min_dimension() * config.cluster_radius_factor * config.unclustered_ring_factor;
        for id in ["x", "y"] {
            let p = &positions[id];
            let dist = ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt();
            assert!(
                (dist - outer).abs() <= config.unclustered_jitter * 2.0,
                "{id} at distance {dist}"
            );
        }
    }
}
