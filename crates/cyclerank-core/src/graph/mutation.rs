//! Scoped, reversible edge removal.
//!
//! [`EdgeRemoval`] removes an edge on construction and puts it back when it
//! goes out of scope. While the guard is alive the graph is only reachable
//! through [`EdgeRemoval::graph`], which hands out shared references, so no
//! other mutation can interleave with the probe.
//!
//! The normal exit path calls [`EdgeRemoval::restore`] to observe insertion
//! errors. Every other exit path (an early `?` return, a cancellation, an
//! unwinding panic) reaches `Drop`, which restores the edge and logs any
//! failure since `Drop` cannot return one.
use crate::graph::{GraphError, UndirectedGraph};

/// Guard holding an edge temporarily removed from a graph.
#[derive(Debug)]
pub struct EdgeRemoval<'g, G: UndirectedGraph> {
    graph: &'g mut G,
    a: G::Node,
    b: G::Node,
    armed: bool,
}

impl<'g, G: UndirectedGraph> EdgeRemoval<'g, G> {
    /// Removes the edge `(a, b)` from `graph` and returns the guard.
    ///
    /// # Errors
    ///
    /// [`GraphError::EdgeNotFound`] if the edge is absent; the graph is left
    /// untouched.
    pub fn remove(graph: &'g mut G, a: &G::Node, b: &G::Node) -> Result<Self, GraphError> {
        graph.remove_edge(a, b)?;
        Ok(Self {
            graph,
            a: a.clone(),
            b: b.clone(),
            armed: true,
        })
    }

    /// Read-only view of the graph with the edge removed.
    pub fn graph(&self) -> &G {
        self.graph
    }

    /// Re-inserts the edge and disarms the guard.
    ///
    /// # Errors
    ///
    /// Propagates the graph's insertion error. The guard is disarmed either
    /// way, so the insertion is attempted exactly once.
    pub fn restore(mut self) -> Result<(), GraphError> {
        self.armed = false;
        self.graph.add_edge(&self.a, &self.b)
    }
}

impl<G: UndirectedGraph> Drop for EdgeRemoval<'_, G> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = self.graph.add_edge(&self.a, &self.b) {
            tracing::error!(
                a = ?self.a,
                b = ?self.b,
                error = %e,
                "failed to restore temporarily removed edge"
            );
        }
    }
}
