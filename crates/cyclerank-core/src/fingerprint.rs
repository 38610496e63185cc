//! SHA-256 fingerprint of a graph's node and edge sets.
//!
//! The digest covers the sorted node list and the sorted list of normalised
//! `(low, high)` edge pairs, each identifier rendered with its `Debug`
//! representation. Two graphs with the same nodes and the same node pairs
//! joined by edges have the same fingerprint regardless of insertion order or
//! adjacency-list layout. The engine compares fingerprints taken before and
//! after a run to confirm every probed edge was restored.
use std::fmt;

use sha2::{Digest, Sha256};

use crate::graph::UndirectedGraph;

/// Digest of a graph's structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphFingerprint([u8; 32]);

impl GraphFingerprint {
    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for GraphFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex_encode(&self.0))
    }
}

/// Computes the fingerprint of `graph`.
pub fn graph_fingerprint<G: UndirectedGraph>(graph: &G) -> GraphFingerprint {
    let mut nodes = graph.nodes();
    nodes.sort();
    let mut edges = graph.edges();
    edges.sort();

    let mut hasher = Sha256::new();
    hasher.update(b"nodes\n");
    for node in &nodes {
        hasher.update(format!("{node:?}\n").as_bytes());
    }
    hasher.update(b"edges\n");
    for (a, b) in &edges {
        hasher.update(format!("{a:?}\t{b:?}\n").as_bytes());
    }

    GraphFingerprint(hasher.finalize().into())
}

/// Encodes a byte slice as a lowercase hexadecimal string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX_CHARS[(b >> 4) as usize] as char);
        out.push(HEX_CHARS[(b & 0x0f) as usize] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::graph::SimpleGraph;

    #[test]
    fn insertion_order_does_not_matter() {
        let a = SimpleGraph::from_edges([(1u32, 2u32), (2, 3), (3, 1)]).expect("builds");
        let b = SimpleGraph::from_edges([(3u32, 1u32), (2, 1), (3, 2)]).expect("builds");
        assert_eq!(graph_fingerprint(&a), graph_fingerprint(&b));
    }

    #[test]
    fn remove_and_restore_keeps_fingerprint() {
        let mut g = SimpleGraph::from_edges([(1u32, 2u32), (2, 3), (3, 1)]).expect("builds");
        let before = graph_fingerprint(&g);
        g.remove_edge(&1, &2).expect("present");
        assert_ne!(graph_fingerprint(&g), before);
        g.add_edge(&2, &1).expect("restores");
        assert_eq!(graph_fingerprint(&g), before);
    }

    #[test]
    fn isolated_nodes_are_covered() {
        let a = SimpleGraph::from_edges([(1u32, 2u32)]).expect("builds");
        let mut b = a.clone();
        b.add_node(3);
        assert_ne!(graph_fingerprint(&a), graph_fingerprint(&b));
    }

    #[test]
    fn display_is_64_hex_chars() {
        let g: SimpleGraph<u32> = SimpleGraph::new();
        let hex = graph_fingerprint(&g).to_string();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
