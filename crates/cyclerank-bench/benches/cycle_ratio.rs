//! Cycle ratio benchmarks: full run, triangle pass, and shortest-path
//! enumeration around a removed edge.
#![allow(clippy::expect_used)]

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use cyclerank_bench::{GeneratorConfig, SizeTier, generate_graph};
use cyclerank_core::{
    CycleRatioConfig, CycleRatioEngine, EdgeRemoval, PredecessorTree, SearchState, SimpleGraph,
    UndirectedGraph, all_shortest_paths, detect_triangles,
};

const TIERS: [(&str, SizeTier); 3] = [
    ("S", SizeTier::Small),
    ("M", SizeTier::Medium),
    ("L", SizeTier::Large),
];

fn topologies(tier: SizeTier) -> [(&'static str, GeneratorConfig); 2] {
    [("er", tier.config(42)), ("lattice", tier.lattice_config(42))]
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");
    group.sample_size(10);

    for (name, tier) in TIERS {
        for (topology, config) in topologies(tier) {
            let graph = generate_graph(&config).expect("generates");
            for (mode, engine_config) in [
                ("exact", CycleRatioConfig::default()),
                (
                    "unverified",
                    CycleRatioConfig {
                        verify_restoration: false,
                        ..CycleRatioConfig::default()
                    },
                ),
            ] {
                let engine = CycleRatioEngine::new(engine_config);
                group.bench_function(
                    BenchmarkId::new(format!("{topology}/{mode}"), name),
                    |b| {
                        b.iter_batched(
                            || graph.clone(),
                            |mut g| engine.run(&mut g).expect("runs"),
                            BatchSize::LargeInput,
                        );
                    },
                );
            }
        }
    }

    group.finish();
}

fn bench_triangle_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangle_pass");

    for (name, tier) in TIERS {
        for (topology, config) in topologies(tier) {
            let graph = generate_graph(&config).expect("generates");
            group.bench_function(BenchmarkId::new(topology, name), |b| {
                b.iter(|| {
                    let mut state = SearchState::new(graph.nodes());
                    detect_triangles(&graph, &mut state).expect("detects")
                });
            });
        }
    }

    group.finish();
}

/// Removes the first edge of `graph` whose endpoints stay connected and
/// counts the shortest paths between them.
fn enumerate_around_first_cycle_edge(graph: &mut SimpleGraph<u32>) -> usize {
    let mut edges = graph.edges();
    edges.sort_unstable();
    for (a, b) in edges {
        let guard = EdgeRemoval::remove(graph, &a, &b).expect("edge exists");
        if guard.graph().is_connected(&a, &b) {
            let tree = PredecessorTree::build(guard.graph(), &a).expect("builds");
            let count = all_shortest_paths(&tree, &b).expect("reachable").count();
            guard.restore().expect("restores");
            return count;
        }
        guard.restore().expect("restores");
    }
    0
}

fn bench_path_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_enumeration");

    for (name, tier) in TIERS {
        let graph = generate_graph(&tier.config(42)).expect("generates");
        group.bench_function(BenchmarkId::new("er", name), |b| {
            b.iter_batched(
                || graph.clone(),
                |mut g| enumerate_around_first_cycle_edge(&mut g),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_full_run,
    bench_triangle_pass,
    bench_path_enumeration
);
criterion_main!(benches);
