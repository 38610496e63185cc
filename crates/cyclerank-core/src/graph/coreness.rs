//! k-core decomposition.
//!
//! Implements the Batagelj–Zaversnik bucket algorithm: nodes are bucket-sorted
//! by degree, then processed in increasing order of current degree. Processing
//! a node "peels" it off: every neighbour with a higher current degree moves
//! down one bucket. When the scan finishes, each node's current degree is its
//! core number. Runs in O(N + E).
use std::collections::HashMap;

use crate::graph::UndirectedGraph;

/// Returns the core number of every node in `graph`.
///
/// The core number of a node is the largest `k` such that the node belongs to
/// a subgraph in which every node has degree at least `k`. Isolated nodes have
/// core number 0.
pub fn core_number<G: UndirectedGraph>(graph: &G) -> HashMap<G::Node, usize> {
    let mut nodes = graph.nodes();
    nodes.sort();

    let adjacency: Vec<Vec<usize>> = {
        let ordinal: HashMap<&G::Node, usize> =
            nodes.iter().enumerate().map(|(i, n)| (n, i)).collect();
        nodes
            .iter()
            .map(|n| {
                graph
                    .neighbors(n)
                    .iter()
                    .filter_map(|m| ordinal.get(m).copied())
                    .collect()
            })
            .collect()
    };

    let n = nodes.len();
    let mut degree: Vec<usize> = adjacency.iter().map(Vec::len).collect();
    let max_degree = degree.iter().copied().max().unwrap_or(0);

    // bin[d] = start offset of the degree-d bucket inside `vert`.
    let mut bin = vec![0usize; max_degree + 1];
    for &d in &degree {
        bin[d] += 1;
    }
    let mut start = 0;
    for slot in &mut bin {
        let count = *slot;
        *slot = start;
        start += count;
    }

    let mut pos = vec![0usize; n];
    let mut vert = vec![0usize; n];
    for v in 0..n {
        pos[v] = bin[degree[v]];
        vert[pos[v]] = v;
        bin[degree[v]] += 1;
    }
    for d in (1..=max_degree).rev() {
        bin[d] = bin[d - 1];
    }
    bin[0] = 0;

    for i in 0..n {
        let v = vert[i];
        for &u in &adjacency[v] {
            if degree[u] > degree[v] {
                let du = degree[u];
                let pu = pos[u];
                let pw = bin[du];
                let w = vert[pw];
                if u != w {
                    pos[u] = pw;
                    vert[pu] = w;
                    pos[w] = pu;
                    vert[pw] = u;
                }
                bin[du] += 1;
                degree[u] -= 1;
            }
        }
    }

    nodes.into_iter().zip(degree).collect()
}
