//! Implementation of `cyclerank demo`.
//!
//! Scores a fixed example: the complete graph on nodes 1 to 4 with a
//! pendant triangle (1, 2, 5). Useful as a smoke test of an installation.
use cyclerank_core::SimpleGraph;

use crate::cli::RunArgs;
use crate::cmd::ratio::{self, Selection};
use crate::cmd::{Globals, compute};
use crate::error::CliError;

/// Edges of the example graph.
pub const DEMO_EDGES: [(u32, u32); 8] = [
    (1, 2),
    (1, 3),
    (1, 4),
    (2, 3),
    (2, 4),
    (3, 4),
    (1, 5),
    (2, 5),
];

/// Runs the `demo` command.
///
/// # Errors
///
/// [`CliError::IoError`] if stdout cannot be written. The example graph
/// itself always scores.
pub fn run(globals: &Globals) -> Result<(), CliError> {
    let mut graph = SimpleGraph::from_edges(DEMO_EDGES).map_err(|e| CliError::Algorithm {
        detail: e.to_string(),
    })?;
    let report = compute(&mut graph, &RunArgs::default())?;
    let rows = ratio::select_rows(&report, Selection::All, |id| id.parse().ok());
    ratio::write(&rows, report.num_smallest_cycles(), globals)
}
