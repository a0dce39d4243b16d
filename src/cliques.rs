//! Maximal-clique enumeration over the normalized undirected graph.
//!
//! Bron–Kerbosch with pivoting. Each recursive call owns its working sets
//! (R, P, X are cloned per branch), so backtracking can never leak state
//! into a sibling branch. Cliques below size 3 are not reported; a plain
//! edge is not a clique.
//!
//! Clique ids follow discovery order. Iteration runs over ordered
//! collections, so ids are a deterministic function of the input node-id
//! ordering — but not a canonical invariant across differently-ordered
//! but equivalent graphs.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::{Clique, NormalizedEdge};

pub const MIN_CLIQUE_SIZE: usize = 3;

pub type Adjacency = BTreeMap<String, BTreeSet<String>>;

/// Neighbor sets for every node id, including isolated nodes.
pub fn build_adjacency<'a, I>(ids: I, edges: &[NormalizedEdge]) -> Adjacency
where
    I: IntoIterator<Item = &'a String>,
{
    let mut adjacency: Adjacency = ids
        .into_iter()
        .map(|id| (id.clone(), BTreeSet::new()))
        .collect();
    for edge in edges {
        if !adjacency.contains_key(&edge.a) || !adjacency.contains_key(&edge.b) {
            continue;
        }
        if let Some(set) = adjacency.get_mut(&edge.a) {
            set.insert(edge.b.clone());
        }
        if let Some(set) = adjacency.get_mut(&edge.b) {
            set.insert(edge.a.clone());
        }
    }
    adjacency
}

/// Enumerate all maximal cliques of size >= 3.
pub fn find_cliques(adjacency: &Adjacency) -> Vec<Clique> {
    let mut found: Vec<Clique> = Vec::new();
    let r: BTreeSet<String> = BTreeSet::new();
    let p: BTreeSet<String> = adjacency.keys().cloned().collect();
    let x: BTreeSet<String> = BTreeSet::new();
    expand(adjacency, r, p, x, &mut found);
    found
}

fn expand(
    adjacency: &Adjacency,
    r: BTreeSet<String>,
    mut p: BTreeSet<String>,
    mut x: BTreeSet<String>,
    found: &mut Vec<Clique>,
) {
    if p.is_empty() && x.is_empty() {
        if r.len() >= MIN_CLIQUE_SIZE {
            found.push(Clique {
                id: found.len(),
                members: r.into_iter().collect(),
            });
        }
        return;
    }

    // Branch only on candidates outside the pivot's neighborhood; maximal
    // cliques through the pivot's neighbors are found via the pivot branch.
    let pivot = p.iter().chain(x.iter()).next().cloned();
    let pivot_neighbors = pivot
        .as_deref()
        .and_then(|id| adjacency.get(id))
        .cloned()
        .unwrap_or_default();

    let candidates: Vec<String> = p
        .iter()
        .filter(|id| !pivot_neighbors.contains(*id))
        .cloned()
        .collect();

    for candidate in candidates {
        let neighbors = adjacency
            .get(&candidate)
            .cloned()
            .unwrap_or_default();

        let mut next_r = r.clone();
        next_r.insert(candidate.clone());
        let next_p: BTreeSet<String> = p.intersection(&neighbors).cloned().collect();
        let next_x: BTreeSet<String> = x.intersection(&neighbors).cloned().collect();
        expand(adjacency, next_r, next_p, next_x, found);

        p.remove(&candidate);
        x.insert(candidate);
    }
}
