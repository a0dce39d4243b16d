use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use followgraph::graph::{Graph, RawEdge, RelationshipKind};
use followgraph::{Config, DisplayOptions, Pipeline};

/// A ring of overlapping friend groups: `groups` cliques of `size` members,
/// each sharing one member with the next, all tied back to the root.
fn clustered_network(groups: usize, size: usize) -> Graph {
    let mut graph = Graph::new();
    graph.ensure_node("root", None);
    graph.root = Some("root".to_string());

    let mut push = |a: &str, b: &str| {
        graph_edge(&mut graph, a, b);
    };
    for g in 0..groups {
        let members: Vec<String> = (0..size).map(|m| format!("g{}m{}", g, m)).collect();
        for i in 0..members.len() {
            for j in i + 1..members.len() {
                push(&members[i], &members[j]);
            }
        }
        push("root", &members[0]);
        if g > 0 {
            push(&format!("g{}m0", g - 1), &members[0]);
        }
    }
    graph
}

fn graph_edge(graph: &mut Graph, a: &str, b: &str) {
    graph.ensure_node(a, None);
    graph.ensure_node(b, None);
    graph.edges.push(RawEdge {
        source: a.to_string(),
        target: b.to_string(),
        kind: RelationshipKind::Mutual,
    });
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute");
    for (groups, size) in [(8usize, 5usize), (16, 6), (24, 8)] {
        let graph = clustered_network(groups, size);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", groups, size)),
            &graph,
            |b, graph| {
                b.iter(|| {
                    let mut pipeline = Pipeline::new(graph.clone(), Config::default());
                    let bundle = pipeline.recompute(DisplayOptions {
                        hide_leaves: true,
                        show_cliques: true,
                    });
                    black_box(bundle.cliques.len())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_recompute);
criterion_main!(benches);
