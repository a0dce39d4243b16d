//! The full-recompute pipeline and the session state it runs against.
//!
//! One synchronous pass per trigger: normalize edges, optionally condense
//! leaves, enumerate cliques, resolve memberships, plan the layout, colorize
//! the cliques, assemble the bundle. Nothing partial is ever observable from
//! the outside; the only state that survives a pass is the position cache.

use log::{debug, info};

use crate::bundle::RenderBundle;
use crate::cliques::{build_adjacency, find_cliques};
use crate::color::assign_clique_colors;
use crate::condense::condense_leaves;
use crate::config::Config;
use crate::graph::{Graph, RelationshipKind};
use crate::layout::{compute_layout, LayoutMode, PositionCache};
use crate::membership::MembershipIndex;
use crate::normalize::normalize_edges;

/// The two user-facing toggles. Each change triggers a full recompute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Collapse degree <= 1 nodes into one placeholder.
    pub hide_leaves: bool,
    /// Enumerate and color cliques, and lay nodes out by clique group.
    pub show_cliques: bool,
}

/// One loaded graph snapshot plus the cross-recompute position cache.
#[derive(Debug, Default)]
pub struct Pipeline {
    graph: Graph,
    config: Config,
    cache: PositionCache,
    source: Option<String>,
}

impl Pipeline {
    pub fn new(graph: Graph, config: Config) -> Self {
        Self {
            graph,
            config,
            cache: PositionCache::new(),
            source: None,
        }
    }

    /// Record where the snapshot came from; surfaced in bundle metadata.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Swap in a new snapshot. The position cache is cleared; cached
    /// coordinates must never leak between unrelated graphs.
    pub fn load(&mut self, graph: Graph, source: Option<String>) {
        self.graph = graph;
        self.source = source;
        self.cache.clear();
    }

    /// Renderer write-back: one node's live position after a simulation
    /// step.
    pub fn apply_position(&mut self, id: &str, x: f64, y: f64) {
        self.cache.report(id, x, y);
    }

    /// Run the whole pipeline once and hand back a renderable bundle.
    pub fn recompute(&mut self, options: DisplayOptions) -> RenderBundle {
        let root = self.graph.root.clone();
        let root = root.as_deref();

        let normalized = normalize_edges(&self.graph.nodes, &self.graph.edges);
        debug!(
            "normalized {} raw edges into {} undirected",
            self.graph.edges.len(),
            normalized.len()
        );

        let (nodes, edges) = if options.hide_leaves {
            condense_leaves(&self.graph.nodes, &normalized, root)
        } else {
            (self.graph.nodes.clone(), normalized)
        };

        let cliques = if options.show_cliques {
            find_cliques(&build_adjacency(nodes.keys(), &edges))
        } else {
            Vec::new()
        };
        let membership = MembershipIndex::resolve(&cliques);

        let mode = if options.show_cliques {
            LayoutMode::Cluster
        } else {
            LayoutMode::Scatter
        };
        let layout = compute_layout(
            &nodes,
            &edges,
            root,
            &membership,
            mode,
            &self.config.layout,
            &mut self.cache,
        );

        let colors = assign_clique_colors(
            &cliques,
            Some(&layout),
            self.config.layout.center(),
            &self.config.color,
        );

        let hints: Vec<(f64, f64)> = edges
            .iter()
            .map(|edge| {
                if options.show_cliques && membership.share_dominant(&edge.a, &edge.b) {
                    (
                        self.config.hints.clique_distance,
                        self.config.hints.clique_strength,
                    )
                } else {
                    (
                        self.config.hints.default_distance,
                        self.config.hints.default_strength,
                    )
                }
            })
            .collect();

        let kind_counts = (
            self.count_kind(RelationshipKind::Following),
            self.count_kind(RelationshipKind::Follower),
        );

        info!(
            "recompute: {} nodes, {} edges, {} cliques (hide_leaves={}, show_cliques={})",
            nodes.len(),
            edges.len(),
            cliques.len(),
            options.hide_leaves,
            options.show_cliques
        );

        RenderBundle::assemble(
            &nodes,
            &edges,
            &hints,
            &cliques,
            &membership,
            &layout,
            &colors,
            options,
            kind_counts,
            self.source.as_deref(),
        )
    }

    fn count_kind(&self, kind: RelationshipKind) -> usize {
        self.graph.edges.iter().filter(|e| e.kind == kind).count()
    }
}
