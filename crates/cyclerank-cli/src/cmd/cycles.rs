//! Implementation of `cyclerank cycles <file>`.
//!
//! Lists the smallest cycles found by the search, one per line, as their
//! canonical walk. `--node ID` keeps only the cycles through that node.
use std::fmt::Display;
use std::io::Write;

use cyclerank_core::{CycleRatioReport, NodeKey, SimpleCycle};

use crate::cli::RunArgs;
use crate::cmd::{Globals, compute, emit, require_node};
use crate::error::CliError;
use crate::format::FormatterConfig;
use crate::io::read_graph;
use crate::{OutputFormat, PathOrStdin};

/// Runs the `cycles` command.
///
/// # Errors
///
/// Input errors (exit 2) from reading the graph, [`CliError::NodeNotFound`]
/// for an unknown `--node`, or an algorithm error (exit 1).
pub fn run(
    file: &PathOrStdin,
    node: Option<&str>,
    run_args: &RunArgs,
    globals: &Globals,
) -> Result<(), CliError> {
    let mut graph = read_graph(file, globals.max_file_size)?;
    if let Some(id) = node {
        require_node(&graph, id)?;
    }
    let report = compute(&mut graph, run_args)?;
    let selected = select(&report, node.map(str::to_owned).as_ref());

    emit(|out| match globals.format {
        OutputFormat::Human => print_human(out, &selected, &globals.style),
        OutputFormat::Json => print_json(out, &selected),
    })
}

/// The cycles of `report`, restricted to those through `node` when given.
pub fn select<'r, N: NodeKey>(
    report: &'r CycleRatioReport<N>,
    node: Option<&N>,
) -> Vec<&'r SimpleCycle<N>> {
    match node {
        Some(n) => report.smallest_cycles_of(n),
        None => report.cycles().iter().collect(),
    }
}

fn render_walk<N: Display>(walk: &[N]) -> String {
    walk.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" - ")
}

fn print_human<N: NodeKey + Display>(
    out: &mut dyn Write,
    cycles: &[&SimpleCycle<N>],
    style: &FormatterConfig,
) -> std::io::Result<()> {
    if cycles.is_empty() {
        return writeln!(out, "{}", style.dim("(no cycles)"));
    }
    for cycle in cycles {
        writeln!(
            out,
            "{}  {}",
            style.heading(&format!("[{}]", cycle.len())),
            render_walk(cycle.walk())
        )?;
    }
    Ok(())
}

fn print_json<N: NodeKey + Display>(
    out: &mut dyn Write,
    cycles: &[&SimpleCycle<N>],
) -> std::io::Result<()> {
    let entries: Vec<serde_json::Value> = cycles
        .iter()
        .map(|c| {
            let walk: Vec<String> = c.walk().iter().map(ToString::to_string).collect();
            serde_json::json!({ "length": c.len(), "walk": walk })
        })
        .collect();
    let doc = serde_json::json!({ "count": entries.len(), "cycles": entries });
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}
