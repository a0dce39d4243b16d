//! The render bundle: everything the force-simulation collaborator needs to
//! draw one recompute pass, in one serializable value.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::color::CliqueColors;
use crate::graph::{Clique, Node, NormalizedEdge};
use crate::layout::Layout;
use crate::membership::MembershipIndex;
use crate::pipeline::DisplayOptions;

#[derive(Debug, Serialize)]
pub struct RenderBundle {
    pub nodes: Vec<NodeBundle>,
    pub edges: Vec<EdgeBundle>,
    pub cliques: Vec<CliqueBundle>,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize)]
pub struct NodeBundle {
    pub id: String,
    pub name: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub x: f64,
    pub y: f64,
    pub pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clique: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct EdgeBundle {
    pub source: String,
    pub target: String,
    pub mutual: bool,
    /// Suggested rest length for the force simulation's link force.
    pub distance: f64,
    /// Suggested attraction strength, higher inside a shared clique.
    pub strength: f64,
}

#[derive(Debug, Serialize)]
pub struct CliqueBundle {
    pub id: usize,
    pub members: Vec<String>,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub total_users: usize,
    pub total_connections: usize,
    pub mutual_connections: usize,
    pub following_connections: usize,
    pub follower_connections: usize,
    pub clique_count: usize,
    pub hide_leaves: bool,
    pub show_cliques: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_from: Option<String>,
}

impl RenderBundle {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        nodes: &BTreeMap<String, Node>,
        edges: &[NormalizedEdge],
        hints: &[(f64, f64)],
        cliques: &[Clique],
        membership: &MembershipIndex,
        layout: &Layout,
        colors: &CliqueColors,
        options: DisplayOptions,
        kind_counts: (usize, usize),
        processed_from: Option<&str>,
    ) -> Self {
        debug_assert_eq!(edges.len(), hints.len());
        let nodes: Vec<NodeBundle> = nodes
            .values()
            .map(|node| {
                let position = layout.get(&node.id);
                NodeBundle {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    follower_count: node.follower_count,
                    following_count: node.following_count,
                    x: position.map(|p| p.x).unwrap_or(0.0),
                    y: position.map(|p| p.y).unwrap_or(0.0),
                    pinned: position.map(|p| p.pinned).unwrap_or(false),
                    clique: membership.dominant_of(&node.id),
                }
            })
            .collect();

        let edges: Vec<EdgeBundle> = edges
            .iter()
            .zip(hints)
            .map(|(edge, (distance, strength))| EdgeBundle {
                source: edge.a.clone(),
                target: edge.b.clone(),
                mutual: edge.mutual,
                distance: *distance,
                strength: *strength,
            })
            .collect();

        let clique_bundles: Vec<CliqueBundle> = cliques
            .iter()
            .map(|clique| CliqueBundle {
                id: clique.id,
                members: clique.members.clone(),
                color: colors.get(&clique.id).cloned().unwrap_or_default(),
            })
            .collect();

        let metadata = Metadata {
            total_users: nodes.len(),
            total_connections: edges.len(),
            mutual_connections: edges.iter().filter(|e| e.mutual).count(),
            following_connections: kind_counts.0,
            follower_connections: kind_counts.1,
            clique_count: clique_bundles.len(),
            hide_leaves: options.hide_leaves,
            show_cliques: options.show_cliques,
            processed_from: processed_from.map(str::to_string),
        };

        Self {
            nodes,
            edges,
            cliques: clique_bundles,
            metadata,
        }
    }

    pub fn node(&self, id: &str) -> Option<&NodeBundle> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

pub fn write_bundle(path: &Path, bundle: &RenderBundle, pretty: bool) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(writer, bundle)?;
    } else {
        serde_json::to_writer(writer, bundle)?;
    }
    Ok(())
}
