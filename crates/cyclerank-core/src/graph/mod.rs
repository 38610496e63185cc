/// Undirected simple graph storage built on `petgraph`, plus the graph
/// interface consumed by the cycle ratio algorithm.
///
/// The algorithm never touches `petgraph` directly. It is written against the
/// [`UndirectedGraph`] trait, which captures the small set of operations it
/// needs: node and edge enumeration, adjacency, edge existence tests, and the
/// reversible edge removal/insertion used while probing edges.
///
/// [`SimpleGraph`] is the bundled implementation. It wraps a
/// [`StableUnGraph`] and keeps a `HashMap<N, NodeIndex>` for O(1) lookup of
/// nodes by identifier. Because [`StableUnGraph`] uses tombstones rather than
/// compacting on removal, node indices stay valid while edges are removed and
/// re-inserted during a run.
///
/// # Submodules
///
/// - [`coreness`]: k-core decomposition (`core_number`).
/// - [`queries`]: BFS predecessor trees and lazy enumeration of all
///   shortest paths.
/// - [`mutation`]: the scoped [`mutation::EdgeRemoval`] guard.
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use petgraph::stable_graph::{NodeIndex, StableUnGraph};

pub mod coreness;
pub mod mutation;
pub mod queries;

// ---------------------------------------------------------------------------
// Node identifiers
// ---------------------------------------------------------------------------

/// Bound shared by every node identifier type.
///
/// Identifiers must be totally ordered (the triangle scan and all reports
/// iterate nodes in sorted order) and hashable (adjacency and bookkeeping
/// maps are keyed by them).
pub trait NodeKey: Clone + Ord + Hash + Debug {}

impl<T: Clone + Ord + Hash + Debug> NodeKey for T {}

/// Renders a node identifier for error messages.
pub(crate) fn render<N: Debug>(node: &N) -> String {
    format!("{node:?}")
}

// ---------------------------------------------------------------------------
// GraphError
// ---------------------------------------------------------------------------

/// Errors raised by graph construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The node is not present in the graph.
    UnknownNode(String),
    /// Both endpoints of an edge are the same node.
    SelfLoop(String),
    /// The edge already exists; parallel edges are not supported.
    DuplicateEdge {
        /// First endpoint.
        a: String,
        /// Second endpoint.
        b: String,
    },
    /// The edge to remove does not exist.
    EdgeNotFound {
        /// First endpoint.
        a: String,
        /// Second endpoint.
        b: String,
    },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::UnknownNode(id) => write!(f, "unknown node {id}"),
            GraphError::SelfLoop(id) => write!(f, "self-loop on node {id} is not allowed"),
            GraphError::DuplicateEdge { a, b } => {
                write!(f, "edge ({a}, {b}) already exists")
            }
            GraphError::EdgeNotFound { a, b } => write!(f, "edge ({a}, {b}) not found"),
        }
    }
}

impl std::error::Error for GraphError {}

// ---------------------------------------------------------------------------
// UndirectedGraph
// ---------------------------------------------------------------------------

/// The graph operations the cycle ratio algorithm relies on.
///
/// Implementations model an undirected simple graph: no self-loops and at
/// most one edge between any pair of nodes. Iteration order of [`nodes`],
/// [`edges`], and [`neighbors`] must be deterministic for a fixed sequence of
/// mutations, otherwise the order of enumerated paths is not reproducible.
///
/// [`nodes`]: UndirectedGraph::nodes
/// [`edges`]: UndirectedGraph::edges
/// [`neighbors`]: UndirectedGraph::neighbors
pub trait UndirectedGraph {
    /// Node identifier type.
    type Node: NodeKey;

    /// Returns every node in the graph.
    fn nodes(&self) -> Vec<Self::Node>;

    /// Returns every edge exactly once, endpoints ordered so that `a < b`.
    fn edges(&self) -> Vec<(Self::Node, Self::Node)>;

    /// Returns `true` if `node` is present.
    fn has_node(&self, node: &Self::Node) -> bool;

    /// Returns `true` if an edge joins `a` and `b` (in either orientation).
    fn has_edge(&self, a: &Self::Node, b: &Self::Node) -> bool;

    /// Returns the nodes adjacent to `node`; empty if `node` is unknown.
    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Inserts the edge `(a, b)` between two existing nodes.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`], [`GraphError::SelfLoop`], or
    /// [`GraphError::DuplicateEdge`].
    fn add_edge(&mut self, a: &Self::Node, b: &Self::Node) -> Result<(), GraphError>;

    /// Removes the edge `(a, b)`.
    ///
    /// # Errors
    ///
    /// [`GraphError::EdgeNotFound`] if no such edge exists.
    fn remove_edge(&mut self, a: &Self::Node, b: &Self::Node) -> Result<(), GraphError>;

    /// Returns the number of nodes.
    fn number_of_nodes(&self) -> usize;

    /// Returns the number of edges.
    fn number_of_edges(&self) -> usize;

    /// Returns `true` if a path joins `a` and `b`.
    ///
    /// The default implementation is a breadth-first search from `a` that
    /// stops as soon as `b` is discovered. A node is always connected to
    /// itself; unknown nodes are connected to nothing.
    fn is_connected(&self, a: &Self::Node, b: &Self::Node) -> bool {
        if !self.has_node(a) || !self.has_node(b) {
            return false;
        }
        if a == b {
            return true;
        }

        let mut visited: HashSet<Self::Node> = HashSet::new();
        let mut queue: VecDeque<Self::Node> = VecDeque::new();
        visited.insert(a.clone());
        queue.push_back(a.clone());

        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(&current) {
                if &next == b {
                    return true;
                }
                if visited.insert(next.clone()) {
                    queue.push_back(next);
                }
            }
        }

        false
    }
}

// ---------------------------------------------------------------------------
// SimpleGraph
// ---------------------------------------------------------------------------

/// An undirected simple graph keyed by node identifiers of type `N`.
///
/// Construct with [`SimpleGraph::new`] and [`SimpleGraph::add_node`], or in
/// one step with [`SimpleGraph::from_edges`].
#[derive(Debug, Clone)]
pub struct SimpleGraph<N> {
    graph: StableUnGraph<N, ()>,
    id_to_index: HashMap<N, NodeIndex>,
}

impl<N: NodeKey> Default for SimpleGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> SimpleGraph<N> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Creates an empty graph with room for `nodes` nodes and `edges` edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: StableUnGraph::with_capacity(nodes, edges),
            id_to_index: HashMap::with_capacity(nodes),
        }
    }

    /// Builds a graph from an edge list, creating endpoints on first sight.
    ///
    /// # Errors
    ///
    /// [`GraphError::SelfLoop`] or [`GraphError::DuplicateEdge`] for the first
    /// offending edge.
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::new();
        for (a, b) in edges {
            graph.add_node(a.clone());
            graph.add_node(b.clone());
            graph.add_edge(&a, &b)?;
        }
        Ok(graph)
    }

    /// Adds `node` if absent. Returns `true` if the node was inserted.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.id_to_index.contains_key(&node) {
            return false;
        }
        let idx = self.graph.add_node(node.clone());
        self.id_to_index.insert(node, idx);
        true
    }

    /// Looks up the [`NodeIndex`] of `node`.
    pub fn node_index(&self, node: &N) -> Option<&NodeIndex> {
        self.id_to_index.get(node)
    }

    /// Returns a reference to the underlying [`StableUnGraph`].
    pub fn graph(&self) -> &StableUnGraph<N, ()> {
        &self.graph
    }

    fn index_of(&self, node: &N) -> Result<NodeIndex, GraphError> {
        self.id_to_index
            .get(node)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(render(node)))
    }
}

impl<N: NodeKey> UndirectedGraph for SimpleGraph<N> {
    type Node = N;

    fn nodes(&self) -> Vec<N> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect()
    }

    fn edges(&self) -> Vec<(N, N)> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .filter_map(|(ia, ib)| {
                let a = self.graph.node_weight(ia)?.clone();
                let b = self.graph.node_weight(ib)?.clone();
                Some(if a <= b { (a, b) } else { (b, a) })
            })
            .collect()
    }

    fn has_node(&self, node: &N) -> bool {
        self.id_to_index.contains_key(node)
    }

    fn has_edge(&self, a: &N, b: &N) -> bool {
        match (self.id_to_index.get(a), self.id_to_index.get(b)) {
            (Some(&ia), Some(&ib)) => self.graph.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    fn neighbors(&self, node: &N) -> Vec<N> {
        let Some(&idx) = self.id_to_index.get(node) else {
            return Vec::new();
        };
        self.graph
            .neighbors(idx)
            .filter_map(|n| self.graph.node_weight(n).cloned())
            .collect()
    }

    fn add_edge(&mut self, a: &N, b: &N) -> Result<(), GraphError> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        if ia == ib {
            return Err(GraphError::SelfLoop(render(a)));
        }
        if self.graph.find_edge(ia, ib).is_some() {
            return Err(GraphError::DuplicateEdge {
                a: render(a),
                b: render(b),
            });
        }
        self.graph.add_edge(ia, ib, ());
        Ok(())
    }

    fn remove_edge(&mut self, a: &N, b: &N) -> Result<(), GraphError> {
        let not_found = || GraphError::EdgeNotFound {
            a: render(a),
            b: render(b),
        };
        let (Some(&ia), Some(&ib)) = (self.id_to_index.get(a), self.id_to_index.get(b)) else {
            return Err(not_found());
        };
        let edge = self.graph.find_edge(ia, ib).ok_or_else(not_found)?;
        self.graph.remove_edge(edge);
        Ok(())
    }

    fn number_of_nodes(&self) -> usize {
        self.graph.node_count()
    }

    fn number_of_edges(&self) -> usize {
        self.graph.edge_count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
