use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of the synthetic node that stands in for condensed leaves.
pub const PLACEHOLDER_ID: &str = "__hidden_leaves__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Follower,
    Following,
    Mutual,
}

impl RelationshipKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "follower" => Some(Self::Follower),
            "following" => Some(Self::Following),
            "mutual" => Some(Self::Mutual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Follower => "follower",
            Self::Following => "following",
            Self::Mutual => "mutual",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub follower_count: u64,
    pub following_count: u64,
}

/// Directed relationship as produced by the acquisition step. Immutable input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEdge {
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
}

/// Undirected edge after normalization. Endpoints are stored in key order
/// (lexicographically smaller id first) so no two edges can describe the
/// same pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEdge {
    pub a: String,
    pub b: String,
    pub mutual: bool,
}

impl NormalizedEdge {
    pub fn new(x: &str, y: &str, mutual: bool) -> Self {
        let (a, b) = ordered_pair(x, y);
        Self {
            a: a.to_string(),
            b: b.to_string(),
            mutual,
        }
    }

    pub fn key(&self) -> (String, String) {
        (self.a.clone(), self.b.clone())
    }

    pub fn touches(&self, id: &str) -> bool {
        self.a == id || self.b == id
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint at all.
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.a == id {
            Some(&self.b)
        } else if self.b == id {
            Some(&self.a)
        } else {
            None
        }
    }
}

/// Canonical unordered form of a node-id pair.
pub fn ordered_pair<'a>(x: &'a str, y: &'a str) -> (&'a str, &'a str) {
    if x <= y {
        (x, y)
    } else {
        (y, x)
    }
}

/// A maximal set of pairwise-connected nodes, size >= 3. Ids are assigned in
/// discovery order; see `cliques::find_cliques`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clique {
    pub id: usize,
    pub members: Vec<String>,
}

impl Clique {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }
}

/// One loaded graph snapshot: the node table, the raw directed edges, and
/// the designated root account the network is centered on.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: BTreeMap<String, Node>,
    pub edges: Vec<RawEdge>,
    pub root: Option<String>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_node(&mut self, id: &str, name: Option<&str>) -> &mut Node {
        let entry = self.nodes.entry(id.to_string()).or_insert(Node {
            id: id.to_string(),
            name: id.to_string(),
            follower_count: 0,
            following_count: 0,
        });
        if let Some(name) = name {
            entry.name = name.to_string();
        }
        entry
    }

    pub fn root_node(&self) -> Option<&Node> {
        self.root.as_deref().and_then(|id| self.nodes.get(id))
    }
}
