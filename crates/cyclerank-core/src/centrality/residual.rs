//! Second pass: smallest cycles through nodes that lie on no triangle.
//!
//! Each incident edge `(u, v)` of an unresolved node is removed under an
//! [`EdgeRemoval`] guard. If `u` still reaches `v`, every shortest `u → v`
//! path closes into a smallest cycle through that edge. The guard re-inserts
//! the edge on every exit path, including errors and cancellation.
use std::collections::{HashMap, HashSet};

use crate::cancel::CancelFlag;
use crate::centrality::{CycleRatioConfig, RunStats, SearchState};
use crate::cycle::SimpleCycle;
use crate::error::CycleRatioError;
use crate::graph::coreness::core_number;
use crate::graph::mutation::EdgeRemoval;
use crate::graph::queries::{PredecessorTree, all_shortest_paths};
use crate::graph::{NodeKey, UndirectedGraph, render};

/// Probes the edges around every node still unresolved after the triangle
/// pass and records the cycles found in `state`.
///
/// Nodes and their neighbours are visited in sorted order. Each undirected
/// edge is probed at most once. The cancel flag is polled before each node,
/// before each probe, and between enumerated paths.
///
/// # Errors
///
/// - [`CycleRatioError::Cancelled`] once `cancel` is set.
/// - [`CycleRatioError::EdgeNotFound`] / [`CycleRatioError::Graph`] if the
///   graph rejects the removal or re-insertion of a probed edge.
/// - [`CycleRatioError::InvariantViolation`] if a shortest path does not
///   close into a simple cycle.
pub fn find_residual_cycles<G>(
    graph: &mut G,
    state: &mut SearchState<G::Node>,
    config: &CycleRatioConfig,
    cancel: &CancelFlag,
    stats: &mut RunStats,
) -> Result<(), CycleRatioError>
where
    G: UndirectedGraph,
{
    let mut pending = graph.nodes();
    pending.retain(|n| !state.girth_of(n).is_resolved());
    pending.sort();
    stats.unresolved_after_triangles = pending.len();

    if pending.is_empty() {
        tracing::debug!("every node lies on a triangle; residual pass skipped");
        return Ok(());
    }

    let coreness = config.core_pruning.then(|| core_number(graph));
    let mut probed: HashSet<(G::Node, G::Node)> = HashSet::new();

    for u in &pending {
        cancel.check()?;

        if let Some(core) = &coreness {
            if is_prunable(core, state, u) {
                continue;
            }
        }

        let mut neighbours = graph.neighbors(u);
        neighbours.sort();

        for v in neighbours {
            let key = if *u < v {
                (u.clone(), v.clone())
            } else {
                (v.clone(), u.clone())
            };
            if !probed.insert(key) {
                continue;
            }

            if let Some(core) = &coreness {
                if is_prunable(core, state, &v) {
                    stats.pruned_edges += 1;
                    continue;
                }
            }

            cancel.check()?;
            stats.probed_edges += 1;
            stats.paths += probe_edge(graph, state, u, &v, cancel)?;
        }
    }

    tracing::debug!(
        unresolved = stats.unresolved_after_triangles,
        probed = stats.probed_edges,
        pruned = stats.pruned_edges,
        paths = stats.paths,
        "residual pass complete"
    );
    Ok(())
}

fn is_prunable<N: NodeKey>(core: &HashMap<N, usize>, state: &SearchState<N>, node: &N) -> bool {
    core.get(node) == Some(&2) && state.girth_of(node).is_resolved()
}

/// Removes `(u, v)`, records every cycle closed by a shortest `u → v` path,
/// and restores the edge. Returns the number of paths enumerated.
fn probe_edge<G>(
    graph: &mut G,
    state: &mut SearchState<G::Node>,
    u: &G::Node,
    v: &G::Node,
    cancel: &CancelFlag,
) -> Result<usize, CycleRatioError>
where
    G: UndirectedGraph,
{
    let guard = EdgeRemoval::remove(graph, u, v)?;

    let mut paths = 0;
    if guard.graph().is_connected(u, v) {
        let tree = PredecessorTree::build(guard.graph(), u)?;
        for path in all_shortest_paths(&tree, v)? {
            cancel.check()?;
            let cycle = SimpleCycle::from_walk(path).ok_or_else(|| {
                CycleRatioError::InvariantViolation(format!(
                    "shortest path from {} to {} does not close into a simple cycle",
                    render(u),
                    render(v)
                ))
            })?;
            state.record(cycle);
            paths += 1;
        }
    }

    guard.restore()?;
    tracing::trace!(u = ?u, v = ?v, paths, "probed edge");
    Ok(paths)
}
