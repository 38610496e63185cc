//! Shared fixture constructors for unit tests.
//!
//! Integration tests under `crates/cyclerank-core/tests/` keep their own
//! helpers since they link against the non-test library build.
#![allow(clippy::expect_used)]

use crate::graph::{SimpleGraph, UndirectedGraph};

/// Builds a `u32` graph from an edge list, panicking on invalid input.
pub fn graph(edges: &[(u32, u32)]) -> SimpleGraph<u32> {
    SimpleGraph::from_edges(edges.iter().copied()).expect("valid edge list")
}

/// Returns the normalised edge list of `g` in ascending order.
pub fn sorted_edges<G: UndirectedGraph>(g: &G) -> Vec<(G::Node, G::Node)> {
    let mut e = g.edges();
    e.sort();
    e
}
