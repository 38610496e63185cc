//! Errors produced while enumerating smallest cycles and computing cycle ratio.
//!
//! Node identifiers are rendered with their `Debug` representation so that the
//! error type stays independent of the graph's node type.
use std::fmt;

use crate::graph::GraphError;

/// All error conditions of the cycle ratio pipeline.
///
/// - [`CycleRatioError::NoPath`] is recoverable: the residual cycle finder
///   confirms reachability before enumerating, so it only surfaces to callers
///   that use the path enumerator directly.
/// - [`CycleRatioError::EdgeNotFound`] and [`CycleRatioError::Graph`] signal a
///   broken precondition in graph mutation and are fatal.
/// - [`CycleRatioError::InvariantViolation`] signals broken cycle bookkeeping
///   and is fatal.
/// - [`CycleRatioError::Cancelled`] is returned after a cooperative
///   cancellation request was observed; the graph has been restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleRatioError {
    /// No path joins `source` and `target`.
    NoPath {
        /// Node the predecessor tree is rooted at.
        source: String,
        /// Node that could not be reached.
        target: String,
    },
    /// A node named by the caller does not exist in the graph.
    NodeNotFound(String),
    /// An edge scheduled for removal does not exist.
    EdgeNotFound {
        /// First endpoint.
        a: String,
        /// Second endpoint.
        b: String,
    },
    /// Any other graph mutation failure.
    Graph(GraphError),
    /// The run observed a cancellation request.
    Cancelled,
    /// Internal bookkeeping reached a state that should be impossible.
    InvariantViolation(String),
}

impl fmt::Display for CycleRatioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPath { source, target } => {
                write!(f, "no path from {source} to {target}")
            }
            Self::NodeNotFound(id) => write!(f, "node not found: {id}"),
            Self::EdgeNotFound { a, b } => write!(f, "edge ({a}, {b}) not found"),
            Self::Graph(e) => write!(f, "graph mutation failed: {e}"),
            Self::Cancelled => f.write_str("computation cancelled"),
            Self::InvariantViolation(detail) => write!(f, "invariant violation: {detail}"),
        }
    }
}

impl std::error::Error for CycleRatioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Graph(e) => Some(e),
            Self::NoPath { .. }
            | Self::NodeNotFound(_)
            | Self::EdgeNotFound { .. }
            | Self::Cancelled
            | Self::InvariantViolation(_) => None,
        }
    }
}

impl From<GraphError> for CycleRatioError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::EdgeNotFound { a, b } => Self::EdgeNotFound { a, b },
            GraphError::UnknownNode(id) => Self::NodeNotFound(id),
            other @ (GraphError::SelfLoop(_) | GraphError::DuplicateEdge { .. }) => {
                Self::Graph(other)
            }
        }
    }
}
