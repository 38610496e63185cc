//! Seeded random graph generator.
//!
//! Produces [`SimpleGraph<u32>`] instances with nodes `0..num_nodes`. The
//! same configuration always yields the same graph.

pub mod topology;

use cyclerank_core::{GraphDocument, GraphError, NodeName, SimpleGraph, UndirectedGraph};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Edge layout of a generated graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Topology {
    /// Every pair of nodes is joined independently with `edge_probability`.
    ErdosRenyi {
        /// Probability of each possible edge.
        edge_probability: f64,
    },
    /// A ring where each node is joined to its `neighbours` nearest
    /// successors, after which each lattice edge is moved to a random
    /// endpoint with `rewire_probability` (Watts–Strogatz).
    RingLattice {
        /// Successors joined on each side of the ring.
        neighbours: usize,
        /// Probability of rewiring a lattice edge.
        rewire_probability: f64,
    },
}

/// Configuration for the graph generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of nodes.
    pub num_nodes: usize,
    /// Edge layout.
    pub topology: Topology,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 50 nodes
    Small,
    /// 300 nodes
    Medium,
    /// 1000 nodes
    Large,
}

impl SizeTier {
    /// Number of nodes in this tier.
    pub fn num_nodes(self) -> usize {
        match self {
            SizeTier::Small => 50,
            SizeTier::Medium => 300,
            SizeTier::Large => 1000,
        }
    }

    /// A sparse Erdős–Rényi graph with mean degree 3.
    ///
    /// Few triangles form at this density, so most nodes go through the
    /// residual search.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let n = self.num_nodes();
        GeneratorConfig {
            seed,
            num_nodes: n,
            topology: Topology::ErdosRenyi {
                edge_probability: 3.0 / (n.saturating_sub(1).max(1) as f64),
            },
        }
    }

    /// A small-world ring lattice: each node joined to its two nearest
    /// successors, one in ten edges rewired.
    ///
    /// Dense in triangles, so the triangle pass resolves most nodes.
    pub fn lattice_config(self, seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            seed,
            num_nodes: self.num_nodes(),
            topology: Topology::RingLattice {
                neighbours: 2,
                rewire_probability: 0.1,
            },
        }
    }
}

/// Generates the graph described by `config`.
///
/// # Errors
///
/// Propagates a [`GraphError`] if the graph rejects an edge, which the
/// topology builders rule out.
pub fn generate_graph(config: &GeneratorConfig) -> Result<SimpleGraph<u32>, GraphError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let edges = match config.topology {
        Topology::ErdosRenyi { edge_probability } => {
            topology::erdos_renyi(config.num_nodes, edge_probability, &mut rng)
        }
        Topology::RingLattice {
            neighbours,
            rewire_probability,
        } => topology::ring_lattice(config.num_nodes, neighbours, rewire_probability, &mut rng),
    };

    let mut graph = SimpleGraph::with_capacity(config.num_nodes, edges.len());
    for node in 0..config.num_nodes {
        graph.add_node(topology::node_id(node));
    }
    for (a, b) in &edges {
        graph.add_edge(a, b)?;
    }
    Ok(graph)
}

/// Generates the graph described by `config` as a JSON graph document.
///
/// # Errors
///
/// The message of a [`GraphError`] from [`generate_graph`] or of a JSON
/// serialization failure.
pub fn generate_json(config: &GeneratorConfig) -> Result<Vec<u8>, String> {
    let graph = generate_graph(config).map_err(|e| e.to_string())?;
    let doc = GraphDocument {
        nodes: Some(
            (0..config.num_nodes)
                .map(|n| NodeName::Int(i64::from(topology::node_id(n))))
                .collect(),
        ),
        edges: graph
            .edges()
            .into_iter()
            .map(|(a, b)| (NodeName::Int(i64::from(a)), NodeName::Int(i64::from(b))))
            .collect(),
    };
    serde_json::to_vec(&doc).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn same_seed_same_graph() {
        let config = SizeTier::Small.config(7);
        let a = generate_graph(&config).expect("generates");
        let b = generate_graph(&config).expect("generates");
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn tiers_have_their_node_count() {
        for tier in [SizeTier::Small, SizeTier::Medium] {
            let g = generate_graph(&tier.lattice_config(1)).expect("generates");
            assert_eq!(g.number_of_nodes(), tier.num_nodes());
        }
    }

    #[test]
    fn json_document_round_trips_through_the_loader() {
        let config = SizeTier::Small.config(3);
        let bytes = generate_json(&config).expect("encodes");
        let loaded = cyclerank_core::load_graph(&bytes).expect("loads");
        let graph = generate_graph(&config).expect("generates");
        assert_eq!(loaded.number_of_nodes(), graph.number_of_nodes());
        assert_eq!(loaded.number_of_edges(), graph.number_of_edges());
    }
}
