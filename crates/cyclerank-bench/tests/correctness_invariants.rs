//! Runs the engine on generated graphs and checks every invariant.
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use cyclerank_bench::correctness::{check_all, oracle_girth};
use cyclerank_bench::{GeneratorConfig, SizeTier, Topology, generate_graph};
use cyclerank_core::{CycleRatioConfig, CycleRatioEngine, Girth, UndirectedGraph};
use proptest::prelude::*;

fn run_and_check(config: &GeneratorConfig, label: &str) {
    let mut graph = generate_graph(config).expect("generates");
    let before = graph.edges();
    let report = CycleRatioEngine::default().run(&mut graph).expect("runs");
    if let Err(violation) = check_all(&before, &graph, &report) {
        panic!("{label}: {violation}");
    }
}

#[test]
fn small_tiers_satisfy_invariants() {
    for seed in [42, 123, 999, 7777, 54321] {
        run_and_check(&SizeTier::Small.config(seed), &format!("ER Small/seed={seed}"));
        run_and_check(
            &SizeTier::Small.lattice_config(seed),
            &format!("lattice Small/seed={seed}"),
        );
    }
}

#[test]
fn medium_tier_satisfies_invariants() {
    run_and_check(&SizeTier::Medium.config(42), "ER Medium/seed=42");
    run_and_check(&SizeTier::Medium.lattice_config(42), "lattice Medium/seed=42");
}

#[test]
fn oracle_agrees_on_known_graphs() {
    let pentagon_with_square = cyclerank_core::SimpleGraph::from_edges([
        (1u32, 2u32),
        (2, 3),
        (3, 4),
        (4, 5),
        (5, 1),
        (1, 6),
        (6, 7),
        (7, 8),
        (8, 1),
        (8, 9),
    ])
    .expect("builds");
    let girth = oracle_girth(&pentagon_with_square);
    assert_eq!(girth.get(&1), Some(&Girth::Length(4)));
    assert_eq!(girth.get(&3), Some(&Girth::Length(5)));
    assert_eq!(girth.get(&9), Some(&Girth::Unresolved));
}

#[test]
fn pruned_runs_never_invent_cycles() {
    // Core pruning may leave nodes unresolved or overestimate their girth,
    // but every cycle it reports is still a chordless cycle of the graph and
    // never shorter than the true girth of its members.
    let config = CycleRatioConfig {
        core_pruning: true,
        ..CycleRatioConfig::default()
    };
    for seed in [1, 2, 3] {
        let mut graph = generate_graph(&SizeTier::Small.config(seed)).expect("generates");
        let oracle = oracle_girth(&graph);
        let report = CycleRatioEngine::new(config).run(&mut graph).expect("runs");
        for cycle in report.cycles() {
            assert!(cycle.closes_in(&graph) && cycle.is_chordless_in(&graph));
            for member in cycle.members() {
                let exact = oracle.get(member).copied().unwrap_or(Girth::Unresolved);
                assert!(exact <= Girth::Length(cycle.len()), "seed={seed} node={member}");
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn random_small_graphs_satisfy_invariants(
        seed in any::<u64>(),
        num_nodes in 3usize..24,
        density in 0.05f64..0.5,
    ) {
        let config = GeneratorConfig {
            seed,
            num_nodes,
            topology: Topology::ErdosRenyi { edge_probability: density },
        };
        let mut graph = generate_graph(&config).expect("generates");
        let before = graph.edges();
        let report = CycleRatioEngine::default().run(&mut graph).expect("runs");
        prop_assert_eq!(check_all(&before, &graph, &report), Ok(()));
    }
}
