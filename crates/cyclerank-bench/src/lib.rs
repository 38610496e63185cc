//! Random graph generator and benchmark utilities for `cyclerank-core`.
//!
//! This crate provides deterministic generation of undirected graphs for
//! benchmarking and for checking the cycle ratio engine against independent
//! invariants.

pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, Topology, generate_graph, generate_json};
