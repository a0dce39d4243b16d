use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Everything on one ring around the pinned root.
    Scatter,
    /// One angular slot per dominant-clique group, unclustered nodes on an
    /// outer ring.
    Cluster,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
    /// Pinned positions (the root) must not be moved by the force engine.
    pub pinned: bool,
}

impl NodePosition {
    pub fn free(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pinned: false,
        }
    }

    pub fn pinned(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pinned: true,
        }
    }
}

/// Initial coordinates for every node of one recompute pass.
#[derive(Debug, Clone)]
pub struct Layout {
    pub mode: LayoutMode,
    pub positions: BTreeMap<String, NodePosition>,
}

impl Layout {
    pub fn get(&self, id: &str) -> Option<&NodePosition> {
        self.positions.get(id)
    }
}
