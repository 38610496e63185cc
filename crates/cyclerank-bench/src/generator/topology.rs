//! Edge generators for the supported topologies.
//!
//! Each returns a sorted, duplicate-free edge list with `a < b` and no
//! self-loops, so the graph accepts every edge.

use std::collections::BTreeSet;

use rand::Rng;
use rand::rngs::StdRng;

/// Node id of the `index`-th node.
pub fn node_id(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

fn ordered(a: usize, b: usize) -> (u32, u32) {
    if a < b {
        (node_id(a), node_id(b))
    } else {
        (node_id(b), node_id(a))
    }
}

/// G(n, p): each of the `n(n-1)/2` pairs becomes an edge with probability `p`.
pub fn erdos_renyi(n: usize, p: f64, rng: &mut StdRng) -> Vec<(u32, u32)> {
    let p = p.clamp(0.0, 1.0);
    let mut edges = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            if rng.gen_bool(p) {
                edges.push(ordered(a, b));
            }
        }
    }
    edges
}

/// Watts–Strogatz ring lattice.
///
/// Node `i` is joined to `i + 1 ..= i + k` (mod `n`). Each lattice edge is
/// then, with probability `beta`, replaced by an edge from `i` to a uniformly
/// chosen node that is neither `i` nor already adjacent. A rewire that finds
/// no free endpoint keeps the original edge.
pub fn ring_lattice(n: usize, k: usize, beta: f64, rng: &mut StdRng) -> Vec<(u32, u32)> {
    let beta = beta.clamp(0.0, 1.0);
    let k = k.min(n.saturating_sub(1) / 2);
    let mut edges: BTreeSet<(u32, u32)> = BTreeSet::new();

    for i in 0..n {
        for offset in 1..=k {
            edges.insert(ordered(i, (i + offset) % n));
        }
    }

    for i in 0..n {
        for offset in 1..=k {
            if !rng.gen_bool(beta) {
                continue;
            }
            let old = ordered(i, (i + offset) % n);
            let free: Vec<usize> = (0..n)
                .filter(|&j| j != i && !edges.contains(&ordered(i, j)))
                .collect();
            if free.is_empty() {
                continue;
            }
            let target = free[rng.gen_range(0..free.len())];
            if edges.remove(&old) {
                edges.insert(ordered(i, target));
            }
        }
    }

    edges.into_iter().collect()
}
