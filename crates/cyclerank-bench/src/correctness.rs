//! Post-run invariant checkers for correctness validation.
//!
//! Each checker returns `Err` with a description of the first violation.
//! The girth oracle is computed independently on a `petgraph` copy of the
//! graph so it shares no code with the engine's own traversal.

use std::collections::{BTreeMap, BTreeSet};

use cyclerank_core::{CycleRatioReport, Girth, NodeKey, UndirectedGraph};
use petgraph::graph::{NodeIndex, UnGraph};

/// Verifies that `graph` has exactly the edges in `before`.
pub fn check_edges_preserved<G>(before: &[(G::Node, G::Node)], graph: &G) -> Result<(), String>
where
    G: UndirectedGraph,
{
    let expected: BTreeSet<&(G::Node, G::Node)> = before.iter().collect();
    let after = graph.edges();
    let actual: BTreeSet<&(G::Node, G::Node)> = after.iter().collect();
    if expected != actual {
        return Err(format!(
            "edge set changed: {} edges before, {} after",
            expected.len(),
            actual.len()
        ));
    }
    Ok(())
}

/// Verifies that every reported cycle is a closed, chordless walk of `graph`.
pub fn check_cycles_are_simple<G>(graph: &G, report: &CycleRatioReport<G::Node>) -> Result<(), String>
where
    G: UndirectedGraph,
{
    for cycle in report.cycles() {
        if cycle.len() < 3 {
            return Err(format!("cycle {:?} has fewer than 3 nodes", cycle.walk()));
        }
        if !cycle.closes_in(graph) {
            return Err(format!("cycle {:?} is not a closed walk", cycle.walk()));
        }
        if !cycle.is_chordless_in(graph) {
            return Err(format!("cycle {:?} has a chord", cycle.walk()));
        }
    }
    Ok(())
}

/// Verifies the aggregation: the histogram sums to the cycle count, the
/// scored nodes are exactly the cycle members, and every score is at
/// least 1.
pub fn check_scores<N: NodeKey>(report: &CycleRatioReport<N>) -> Result<(), String> {
    let histogram_total: usize = report.length_histogram().values().sum();
    if histogram_total != report.num_smallest_cycles() {
        return Err(format!(
            "histogram counts {histogram_total} cycles, report has {}",
            report.num_smallest_cycles()
        ));
    }

    let members: BTreeSet<&N> = report.cycles().iter().flat_map(|c| c.members()).collect();
    let scored: BTreeSet<&N> = report.cycle_ratio().keys().collect();
    if members != scored {
        return Err(format!(
            "{} nodes lie on cycles but {} are scored",
            members.len(),
            scored.len()
        ));
    }

    for (node, score) in report.cycle_ratio() {
        if score.is_nan() || *score < 1.0 {
            return Err(format!("node {node:?} has score {score} below 1"));
        }
        if report.cycles_of(node).is_empty() {
            return Err(format!("scored node {node:?} has no cycles"));
        }
    }
    Ok(())
}

/// Girth of every node of `graph`, computed on a `petgraph` copy.
///
/// For a node `x` and each neighbour `y`, the edge `(x, y)` is removed and
/// the shortest `x → y` distance `d` measured; `d + 1` is the length of the
/// smallest cycle through that edge. Nodes on no cycle map to
/// [`Girth::Unresolved`].
pub fn oracle_girth<G>(graph: &G) -> BTreeMap<G::Node, Girth>
where
    G: UndirectedGraph,
{
    let mut nodes = graph.nodes();
    nodes.sort();
    let mut copy: UnGraph<(), ()> = UnGraph::default();
    let index: BTreeMap<G::Node, NodeIndex> =
        nodes.iter().map(|n| (n.clone(), copy.add_node(()))).collect();
    for (a, b) in graph.edges() {
        if let (Some(&ia), Some(&ib)) = (index.get(&a), index.get(&b)) {
            copy.add_edge(ia, ib, ());
        }
    }

    let mut girth = BTreeMap::new();
    for (node, &x) in &index {
        let mut best = Girth::Unresolved;
        let neighbours: Vec<NodeIndex> = copy.neighbors(x).collect();
        for y in neighbours {
            let Some(edge) = copy.find_edge(x, y) else {
                continue;
            };
            let mut without = copy.clone();
            without.remove_edge(edge);
            let distances = petgraph::algo::dijkstra(&without, x, Some(y), |_| 1usize);
            if let Some(&d) = distances.get(&y) {
                best.refine(d + 1);
            }
        }
        girth.insert(node.clone(), best);
    }
    girth
}

/// Verifies that the reported girth of every node matches [`oracle_girth`].
pub fn check_girth<G>(graph: &G, report: &CycleRatioReport<G::Node>) -> Result<(), String>
where
    G: UndirectedGraph,
{
    for (node, expected) in oracle_girth(graph) {
        let actual = report.girth(&node).unwrap_or(Girth::Unresolved);
        if actual != expected {
            return Err(format!(
                "node {node:?}: reported girth {actual:?}, expected {expected:?}"
            ));
        }
    }
    Ok(())
}

/// Runs every checker.
pub fn check_all<G>(
    before: &[(G::Node, G::Node)],
    graph: &G,
    report: &CycleRatioReport<G::Node>,
) -> Result<(), String>
where
    G: UndirectedGraph,
{
    check_edges_preserved(before, graph)?;
    check_cycles_are_simple(graph, report)?;
    check_scores(report)?;
    check_girth(graph, report)
}
