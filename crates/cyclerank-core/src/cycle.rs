//! Simple cycles and per-node girth.
//!
//! A [`SimpleCycle`] remembers the walk along which it was discovered but is
//! identified by its sorted member tuple: equality, ordering and hashing look
//! at the members only, so the same node set reached through different edges
//! collapses into one cycle when stored in a set.
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::graph::{NodeKey, UndirectedGraph};

// ---------------------------------------------------------------------------
// SimpleCycle
// ---------------------------------------------------------------------------

/// A closed walk of at least three distinct nodes.
#[derive(Debug, Clone)]
pub struct SimpleCycle<N> {
    members: Vec<N>,
    walk: Vec<N>,
}

impl<N: NodeKey> SimpleCycle<N> {
    /// Builds a cycle from a walk `v0, v1, ..., vk` whose closing edge is
    /// `(vk, v0)`.
    ///
    /// The stored walk is canonical: rotated to start at the smallest member
    /// and oriented towards the smaller of its two neighbours, so every walk
    /// around the same cycle is stored identically.
    ///
    /// Returns `None` if the walk has fewer than three nodes or repeats one.
    pub fn from_walk(walk: Vec<N>) -> Option<Self> {
        if walk.len() < 3 {
            return None;
        }
        let mut members = walk.clone();
        members.sort();
        if members.windows(2).any(|w| w[0] == w[1]) {
            return None;
        }
        Some(Self {
            members,
            walk: canonical_walk(walk),
        })
    }

    /// Number of nodes (and edges) on the cycle.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false` for a constructed cycle.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in ascending order.
    pub fn members(&self) -> &[N] {
        &self.members
    }

    /// Members in canonical walk order.
    pub fn walk(&self) -> &[N] {
        &self.walk
    }

    /// Returns `true` if `node` lies on the cycle.
    pub fn contains(&self, node: &N) -> bool {
        self.members.binary_search(node).is_ok()
    }

    /// Returns `true` if every consecutive pair of the walk, and the closing
    /// pair, is an edge of `graph`.
    pub fn closes_in<G>(&self, graph: &G) -> bool
    where
        G: UndirectedGraph<Node = N>,
    {
        let closing = match (self.walk.last(), self.walk.first()) {
            (Some(last), Some(first)) => graph.has_edge(last, first),
            _ => false,
        };
        closing && self.walk.windows(2).all(|w| graph.has_edge(&w[0], &w[1]))
    }

    /// Returns `true` if the members induce exactly the cycle's own edges,
    /// i.e. no chord joins two non-consecutive members.
    ///
    /// Counts the graph edges among all member pairs and compares the count
    /// with the cycle length.
    pub fn is_chordless_in<G>(&self, graph: &G) -> bool
    where
        G: UndirectedGraph<Node = N>,
    {
        let mut edges = 0;
        for (i, a) in self.members.iter().enumerate() {
            for b in &self.members[i + 1..] {
                if graph.has_edge(a, b) {
                    edges += 1;
                }
            }
        }
        edges == self.members.len()
    }
}

fn canonical_walk<N: Ord>(mut walk: Vec<N>) -> Vec<N> {
    let start = walk
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map_or(0, |(i, _)| i);
    walk.rotate_left(start);
    let last = walk.len() - 1;
    if walk[last] < walk[1] {
        walk[1..].reverse();
    }
    walk
}

impl<N: Ord> PartialEq for SimpleCycle<N> {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl<N: Ord> Eq for SimpleCycle<N> {}

impl<N: Ord> PartialOrd for SimpleCycle<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: Ord> Ord for SimpleCycle<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.members.cmp(&other.members)
    }
}

impl<N: Hash> Hash for SimpleCycle<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.members.hash(state);
    }
}

// ---------------------------------------------------------------------------
// Girth
// ---------------------------------------------------------------------------

/// Length of the shortest known cycle through a node.
///
/// Variant order makes every `Length` compare below `Unresolved`, so
/// `min` refines towards shorter cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Girth {
    /// Shortest known cycle length.
    Length(usize),
    /// No cycle through the node is known.
    Unresolved,
}

impl Girth {
    /// Lowers the girth to `len` if that is shorter. Returns `true` if the
    /// value changed.
    pub fn refine(&mut self, len: usize) -> bool {
        let candidate = Girth::Length(len);
        if candidate < *self {
            *self = candidate;
            true
        } else {
            false
        }
    }

    /// The resolved length, if any.
    pub fn length(self) -> Option<usize> {
        match self {
            Girth::Length(len) => Some(len),
            Girth::Unresolved => None,
        }
    }

    /// Returns `true` once some cycle through the node is known.
    pub fn is_resolved(self) -> bool {
        matches!(self, Girth::Length(_))
    }
}
