//! Tests that generated graphs are simple, deterministic and sized per tier.
#![allow(clippy::expect_used)]

use cyclerank_bench::{GeneratorConfig, SizeTier, Topology, generate_graph};
use cyclerank_core::UndirectedGraph;

fn assert_simple(config: &GeneratorConfig, label: &str) {
    let g = generate_graph(config).expect("generates");
    assert_eq!(g.number_of_nodes(), config.num_nodes, "{label}: node count");
    let edges = g.edges();
    assert_eq!(edges.len(), g.number_of_edges(), "{label}: edge list");
    for (a, b) in &edges {
        assert!(a < b, "{label}: edge ({a}, {b}) not ordered");
    }
}

#[test]
fn erdos_renyi_tiers_are_simple() {
    for seed in [42, 123, 999] {
        for tier in [SizeTier::Small, SizeTier::Medium] {
            assert_simple(&tier.config(seed), &format!("{tier:?}/seed={seed}"));
        }
    }
}

#[test]
fn lattice_tiers_are_simple() {
    for seed in [42, 7777] {
        for tier in [SizeTier::Small, SizeTier::Medium, SizeTier::Large] {
            assert_simple(&tier.lattice_config(seed), &format!("{tier:?}/seed={seed}"));
        }
    }
}

#[test]
fn lattice_edge_count_is_n_times_k() {
    let g = generate_graph(&SizeTier::Medium.lattice_config(5)).expect("generates");
    assert_eq!(g.number_of_edges(), 600);
}

#[test]
fn erdos_renyi_mean_degree_is_near_three() {
    let g = generate_graph(&SizeTier::Large.config(42)).expect("generates");
    let mean = 2.0 * g.number_of_edges() as f64 / g.number_of_nodes() as f64;
    assert!((2.5..3.5).contains(&mean), "mean degree {mean}");
}

#[test]
fn different_seeds_differ() {
    let a = generate_graph(&SizeTier::Small.config(1)).expect("generates");
    let b = generate_graph(&SizeTier::Small.config(2)).expect("generates");
    assert_ne!(a.edges(), b.edges());
}

#[test]
fn explicit_config_is_honoured() {
    let config = GeneratorConfig {
        seed: 0,
        num_nodes: 6,
        topology: Topology::RingLattice {
            neighbours: 1,
            rewire_probability: 0.0,
        },
    };
    let g = generate_graph(&config).expect("generates");
    assert_eq!(g.number_of_edges(), 6);
}
