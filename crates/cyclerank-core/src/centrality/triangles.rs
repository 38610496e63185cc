//! First pass: every triangle, straight from adjacency.
use crate::centrality::SearchState;
use crate::cycle::SimpleCycle;
use crate::error::CycleRatioError;
use crate::graph::{UndirectedGraph, render};

/// Records every 3-cycle of `graph` in `state` and returns how many were new.
///
/// Triples `i < j < k` are taken in sorted node order. Only neighbours of
/// `i` above `i` are paired, which visits exactly the triples a full cubic
/// scan would accept. Nodes with a resolved girth are not skipped, so a node
/// on several triangles contributes all of them.
///
/// # Errors
///
/// [`CycleRatioError::InvariantViolation`] if a triple fails to form a
/// simple cycle.
pub fn detect_triangles<G>(
    graph: &G,
    state: &mut SearchState<G::Node>,
) -> Result<usize, CycleRatioError>
where
    G: UndirectedGraph,
{
    let mut nodes = graph.nodes();
    nodes.sort();

    let mut found = 0;
    for i in &nodes {
        let mut higher: Vec<G::Node> = graph.neighbors(i).into_iter().filter(|n| n > i).collect();
        higher.sort();

        for (pos, j) in higher.iter().enumerate() {
            for k in &higher[pos + 1..] {
                if !graph.has_edge(j, k) {
                    continue;
                }
                let cycle = SimpleCycle::from_walk(vec![i.clone(), j.clone(), k.clone()])
                    .ok_or_else(|| {
                        CycleRatioError::InvariantViolation(format!(
                            "triangle ({}, {}, {}) is not simple",
                            render(i),
                            render(j),
                            render(k)
                        ))
                    })?;
                if state.record(cycle) {
                    found += 1;
                }
            }
        }
    }

    tracing::debug!(triangles = found, "triangle pass complete");
    Ok(found)
}
