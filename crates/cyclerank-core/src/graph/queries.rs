//! Shortest-path queries: BFS predecessor trees and lazy enumeration of every
//! shortest path between two nodes.
//!
//! # Predecessor trees
//!
//! [`PredecessorTree::build`] runs a level-synchronous BFS from a source node.
//! For every reachable node it records, in discovery order, each neighbour
//! one level closer to the source. Following predecessor links from any node
//! back to the source therefore always yields a shortest path, and every
//! shortest path is obtained by some choice of links.
//!
//! # Path enumeration
//!
//! [`all_shortest_paths`] walks predecessor links backwards from the target
//! with an explicit stack of `(node, cursor)` frames instead of recursion, so
//! arbitrarily long predecessor chains cannot overflow the call stack. Paths
//! are produced lazily through the [`AllShortestPaths`] iterator.
use std::collections::{HashMap, HashSet};

use crate::error::CycleRatioError;
use crate::graph::{NodeKey, UndirectedGraph, render};

// ---------------------------------------------------------------------------
// PredecessorTree
// ---------------------------------------------------------------------------

/// BFS predecessor lists rooted at a fixed source.
///
/// The source maps to an empty list. Unreachable nodes have no entry.
#[derive(Debug, Clone)]
pub struct PredecessorTree<N> {
    source: N,
    predecessors: HashMap<N, Vec<N>>,
    depth: HashMap<N, usize>,
}

impl<N: NodeKey> PredecessorTree<N> {
    /// Builds the predecessor tree of `graph` rooted at `source`.
    ///
    /// Predecessor lists are ordered by discovery, which follows the
    /// graph's neighbour iteration order and is therefore deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`CycleRatioError::NodeNotFound`] if `source` is not in the
    /// graph.
    pub fn build<G>(graph: &G, source: &N) -> Result<Self, CycleRatioError>
    where
        G: UndirectedGraph<Node = N>,
    {
        if !graph.has_node(source) {
            return Err(CycleRatioError::NodeNotFound(render(source)));
        }

        let mut predecessors: HashMap<N, Vec<N>> = HashMap::new();
        let mut depth: HashMap<N, usize> = HashMap::new();
        predecessors.insert(source.clone(), Vec::new());
        depth.insert(source.clone(), 0);

        let mut frontier = vec![source.clone()];
        let mut level = 0;

        while !frontier.is_empty() {
            level += 1;
            let mut next_frontier = Vec::new();

            for node in &frontier {
                for neighbour in graph.neighbors(node) {
                    match depth.get(&neighbour) {
                        None => {
                            depth.insert(neighbour.clone(), level);
                            predecessors.insert(neighbour.clone(), vec![node.clone()]);
                            next_frontier.push(neighbour);
                        }
                        Some(&d) if d == level => {
                            if let Some(list) = predecessors.get_mut(&neighbour) {
                                list.push(node.clone());
                            }
                        }
                        Some(_) => {}
                    }
                }
            }

            frontier = next_frontier;
        }

        Ok(Self {
            source: source.clone(),
            predecessors,
            depth,
        })
    }

    /// Returns the node the tree is rooted at.
    pub fn source(&self) -> &N {
        &self.source
    }

    /// Returns the predecessors of `node`, or `None` if it is unreachable.
    pub fn predecessors(&self, node: &N) -> Option<&[N]> {
        self.predecessors.get(node).map(Vec::as_slice)
    }

    /// Returns `true` if `node` is reachable from the source.
    pub fn reaches(&self, node: &N) -> bool {
        self.predecessors.contains_key(node)
    }

    /// Returns the hop distance from the source to `node`.
    pub fn distance(&self, node: &N) -> Option<usize> {
        self.depth.get(node).copied()
    }

    /// Returns the number of reachable nodes, the source included.
    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    /// Returns `true` if the tree holds no nodes. A built tree always holds
    /// at least its source.
    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// all_shortest_paths
// ---------------------------------------------------------------------------

/// Returns a lazy iterator over every shortest path from the tree's source to
/// `target`.
///
/// Each path is ordered from source to target inclusive. Every shortest path
/// is yielded exactly once; the order is fixed by the order of the
/// predecessor lists. The iterator is finite and single-use.
///
/// # Errors
///
/// Returns [`CycleRatioError::NoPath`] if `target` is not reachable from the
/// source.
pub fn all_shortest_paths<'t, N: NodeKey>(
    tree: &'t PredecessorTree<N>,
    target: &N,
) -> Result<AllShortestPaths<'t, N>, CycleRatioError> {
    if !tree.reaches(target) {
        return Err(CycleRatioError::NoPath {
            source: render(tree.source()),
            target: render(target),
        });
    }

    let mut on_path = HashSet::new();
    on_path.insert(target.clone());

    Ok(AllShortestPaths {
        tree,
        stack: vec![(target.clone(), 0)],
        on_path,
    })
}

/// Iterator returned by [`all_shortest_paths`].
///
/// The stack holds the partial path from the target (bottom) towards the
/// source (top). Each frame carries a cursor into its node's predecessor
/// list. `on_path` mirrors the stack contents so that a node is never pushed
/// twice onto the same partial path; popping a frame removes its node again
/// so other branches may reuse it.
#[derive(Debug)]
pub struct AllShortestPaths<'t, N> {
    tree: &'t PredecessorTree<N>,
    stack: Vec<(N, usize)>,
    on_path: HashSet<N>,
}

impl<N: NodeKey> Iterator for AllShortestPaths<'_, N> {
    type Item = Vec<N>;

    fn next(&mut self) -> Option<Vec<N>> {
        let tree = self.tree;
        loop {
            let frame = self.stack.last_mut()?;

            if frame.0 == tree.source {
                let path: Vec<N> = self.stack.iter().rev().map(|(n, _)| n.clone()).collect();
                // The source has no predecessors, so its frame is exhausted.
                if let Some((done, _)) = self.stack.pop() {
                    self.on_path.remove(&done);
                }
                return Some(path);
            }

            let preds = tree.predecessors(&frame.0).unwrap_or(&[]);
            match preds.get(frame.1) {
                Some(next) => {
                    frame.1 += 1;
                    if self.on_path.insert(next.clone()) {
                        self.stack.push((next.clone(), 0));
                    }
                }
                None => {
                    if let Some((done, _)) = self.stack.pop() {
                        self.on_path.remove(&done);
                    }
                }
            }
        }
    }
}
