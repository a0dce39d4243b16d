//! Ingestion of graph snapshots produced by the data-acquisition step.
//!
//! Two wire formats are accepted: the scraper's `network.json` (a `users`
//! array with per-user follower/following lists) and an already-flattened
//! snapshot (`nodes` + `edges`). Both decode into [`Graph`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::graph::{Graph, Node, RawEdge, RelationshipKind};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid network snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot has no recognizable top-level key (expected \"users\" or \"nodes\")")]
    UnknownFormat,
}

/// Raw scraper output: one record per crawled account.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkData {
    pub users: Vec<UserRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub followers: Vec<AccountRef>,
    #[serde(default)]
    pub following: Vec<AccountRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountRef {
    pub id: String,
    pub name: String,
}

/// Flattened snapshot: the generic input contract (nodes plus raw directed
/// edges), also the shape this crate's own bundle output uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<RawEdge>,
}

/// Which crawl pass produced a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceTag {
    Following,
    Follower,
}

/// Decode either accepted wire format and build a [`Graph`].
///
/// `root` overrides the designated root account; otherwise the first main
/// user record (or first node) is the root.
pub fn load_snapshot(input: &str, root: Option<&str>) -> Result<Graph, SnapshotError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    if value.get("users").is_some() {
        let network: NetworkData = serde_json::from_value(value)?;
        return Ok(build_graph(&network, root));
    }
    if value.get("nodes").is_some() {
        let snapshot: GraphSnapshot = serde_json::from_value(value)?;
        return Ok(from_flat(&snapshot, root));
    }
    Err(SnapshotError::UnknownFormat)
}

fn from_flat(snapshot: &GraphSnapshot, root: Option<&str>) -> Graph {
    let mut graph = Graph::new();
    for node in &snapshot.nodes {
        let entry = graph.ensure_node(&node.id, Some(&node.name));
        entry.follower_count = node.follower_count;
        entry.following_count = node.following_count;
    }
    graph.edges = snapshot.edges.clone();
    graph.root = root
        .map(str::to_string)
        .or_else(|| snapshot.nodes.first().map(|n| n.id.clone()));
    graph
}

/// Flatten the scraper's per-user follower/following lists into a node table
/// and labeled raw edges, then drop accounts that ended up isolated.
pub fn build_graph(network: &NetworkData, root: Option<&str>) -> Graph {
    let root_id = root
        .map(str::to_string)
        .or_else(|| network.users.first().map(|u| u.user_id.clone()));

    // Potential nodes: main records first, then referenced accounts that are
    // not already known (those carry no counters of their own).
    let mut nodes: BTreeMap<String, Node> = BTreeMap::new();
    for user in &network.users {
        nodes.insert(
            user.user_id.clone(),
            Node {
                id: user.user_id.clone(),
                name: user.username.clone(),
                follower_count: user.follower_count,
                following_count: user.following_count,
            },
        );
    }
    for user in &network.users {
        for account in user.followers.iter().chain(user.following.iter()) {
            nodes.entry(account.id.clone()).or_insert_with(|| Node {
                id: account.id.clone(),
                name: account.name.clone(),
                follower_count: 0,
                following_count: 0,
            });
        }
    }

    // Directed edges, tagged by the crawl pass that saw them. The following
    // pass wins when both passes report the same directed pair.
    let mut directed: BTreeMap<(String, String), SourceTag> = BTreeMap::new();
    for user in &network.users {
        for account in &user.following {
            directed.insert(
                (user.user_id.clone(), account.id.clone()),
                SourceTag::Following,
            );
        }
    }
    for user in &network.users {
        let key = |account: &AccountRef| (account.id.clone(), user.user_id.clone());
        for account in &user.followers {
            directed.entry(key(account)).or_insert(SourceTag::Follower);
        }
    }

    // Fold each unordered pair into labeled raw edges. A pair seen by both
    // passes in opposite directions is one mutual relationship; anything
    // else stays directional with a root-relative kind.
    let mut edges: Vec<RawEdge> = Vec::new();
    let mut processed: BTreeSet<(String, String)> = BTreeSet::new();
    for ((source, target), tag) in &directed {
        let pair = pair_key(source, target);
        if processed.contains(&pair) {
            continue;
        }
        let reverse = directed.get(&(target.clone(), source.clone()));
        match reverse {
            Some(reverse_tag) if reverse_tag != tag => {
                edges.push(RawEdge {
                    source: source.clone(),
                    target: target.clone(),
                    kind: RelationshipKind::Mutual,
                });
            }
            Some(_) => {
                edges.push(RawEdge {
                    source: source.clone(),
                    target: target.clone(),
                    kind: relative_kind(*tag, source, target, root_id.as_deref()),
                });
                edges.push(RawEdge {
                    source: target.clone(),
                    target: source.clone(),
                    kind: relative_kind(*tag, target, source, root_id.as_deref()),
                });
            }
            None => {
                edges.push(RawEdge {
                    source: source.clone(),
                    target: target.clone(),
                    kind: relative_kind(*tag, source, target, root_id.as_deref()),
                });
            }
        }
        processed.insert(pair);
    }

    // Keep only accounts that participate in at least one relationship.
    let mut connected: BTreeSet<&str> = BTreeSet::new();
    for edge in &edges {
        connected.insert(edge.source.as_str());
        connected.insert(edge.target.as_str());
    }
    nodes.retain(|id, _| connected.contains(id.as_str()));

    Graph {
        nodes,
        edges,
        root: root_id,
    }
}

fn pair_key(x: &str, y: &str) -> (String, String) {
    let (a, b) = crate::graph::ordered_pair(x, y);
    (a.to_string(), b.to_string())
}

/// Kind of a one-way edge as seen from the root account: edges leaving the
/// root are "following", edges arriving at it are "follower", and edges
/// between third parties keep the crawl tag's natural reading.
fn relative_kind(
    tag: SourceTag,
    source: &str,
    target: &str,
    root: Option<&str>,
) -> RelationshipKind {
    match tag {
        SourceTag::Follower => RelationshipKind::Follower,
        SourceTag::Following => {
            if root == Some(source) {
                RelationshipKind::Following
            } else if root == Some(target) {
                RelationshipKind::Follower
            } else {
                RelationshipKind::Following
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(json: &str) -> NetworkData {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn mutual_requires_both_passes() {
        let data = network(
            r#"{"users": [{
                "user_id": "root",
                "username": "Root",
                "follower_count": 1,
                "following_count": 1,
                "followers": [{"id": "b", "name": "B"}],
                "following": [{"id": "b", "name": "B"}]
            }]}"#,
        );
        let graph = build_graph(&data, None);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].kind, RelationshipKind::Mutual);
    }

    #[test]
    fn one_way_edges_are_root_relative() {
        let data = network(
            r#"{"users": [{
                "user_id": "root",
                "username": "Root",
                "followers": [],
                "following": [{"id": "b", "name": "B"}]
            }]}"#,
        );
        let graph = build_graph(&data, None);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source, "root");
        assert_eq!(graph.edges[0].kind, RelationshipKind::Following);
    }

    #[test]
    fn isolated_accounts_are_dropped() {
        let data = network(
            r#"{"users": [
                {"user_id": "root", "username": "Root",
                 "followers": [], "following": [{"id": "b", "name": "B"}]},
                {"user_id": "ghost", "username": "Ghost",
                 "followers": [], "following": []}
            ]}"#,
        );
        let graph = build_graph(&data, None);
        assert!(graph.nodes.contains_key("root"));
        assert!(graph.nodes.contains_key("b"));
        assert!(!graph.nodes.contains_key("ghost"));
    }

    #[test]
    fn referenced_accounts_do_not_overwrite_main_records() {
        let data = network(
            r#"{"users": [
                {"user_id": "root", "username": "Root",
                 "followers": [], "following": [{"id": "b", "name": "Stale Name"}]},
                {"user_id": "b", "username": "Fresh Name",
                 "follower_count": 10, "following_count": 5,
                 "followers": [{"id": "root", "name": "Root"}], "following": []}
            ]}"#,
        );
        let graph = build_graph(&data, None);
        assert_eq!(graph.nodes["b"].name, "Fresh Name");
        assert_eq!(graph.nodes["b"].follower_count, 10);
    }

    #[test]
    fn flat_snapshot_round_trips() {
        let input = r#"{"nodes": [
            {"id": "a", "name": "A", "follower_count": 0, "following_count": 1},
            {"id": "b", "name": "B", "follower_count": 1, "following_count": 0}
        ], "edges": [
            {"source": "a", "target": "b", "kind": "following"}
        ]}"#;
        let graph = load_snapshot(input, None).unwrap();
        assert_eq!(graph.root.as_deref(), Some("a"));
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = load_snapshot(r#"{"accounts": []}"#, None).unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownFormat));
    }
}
