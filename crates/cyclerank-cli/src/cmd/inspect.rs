//! Implementation of `cyclerank inspect <file>`.
//!
//! Prints summary statistics of a graph and its smallest cycles:
//! - node, edge and isolated-node counts
//! - k-core distribution
//! - girth distribution over nodes
//! - smallest-cycle length histogram and search counters
//!
//! In `--format json` mode a single JSON object is emitted to stdout.
//! In human mode, aligned key/value lines are printed.
use std::collections::BTreeMap;
use std::io::Write;

use cyclerank_core::{CycleRatioReport, NodeKey, RunStats, UndirectedGraph, core_number};

use crate::cli::RunArgs;
use crate::cmd::{Globals, compute, emit};
use crate::error::CliError;
use crate::format::FormatterConfig;
use crate::io::read_graph;
use crate::{OutputFormat, PathOrStdin};

/// Statistics gathered from a graph and its cycle ratio report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectStats {
    /// Total number of nodes.
    pub node_count: usize,
    /// Total number of edges.
    pub edge_count: usize,
    /// Nodes without neighbours.
    pub isolated_count: usize,
    /// Core number → number of nodes with that core number.
    pub core_counts: BTreeMap<usize, usize>,
    /// Girth → number of nodes with that girth.
    pub girth_counts: BTreeMap<usize, usize>,
    /// Nodes on no cycle.
    pub acyclic_count: usize,
    /// Number of smallest cycles.
    pub cycle_count: usize,
    /// Cycle length → number of smallest cycles of that length.
    pub length_histogram: BTreeMap<usize, usize>,
    /// Search counters.
    pub stats: RunStats,
}

impl InspectStats {
    /// Computes statistics from `graph` and the report produced for it.
    pub fn collect<G>(graph: &G, report: &CycleRatioReport<G::Node>) -> Self
    where
        G: UndirectedGraph,
    {
        let nodes = graph.nodes();
        let isolated_count = nodes
            .iter()
            .filter(|n| graph.neighbors(n).is_empty())
            .count();

        let mut core_counts: BTreeMap<usize, usize> = BTreeMap::new();
        for core in core_number(graph).into_values() {
            *core_counts.entry(core).or_insert(0) += 1;
        }

        let (girth_counts, acyclic_count) = girth_distribution(report);

        Self {
            node_count: nodes.len(),
            edge_count: graph.number_of_edges(),
            isolated_count,
            core_counts,
            girth_counts,
            acyclic_count,
            cycle_count: report.num_smallest_cycles(),
            length_histogram: report.length_histogram().clone(),
            stats: *report.stats(),
        }
    }
}

fn girth_distribution<N: NodeKey>(report: &CycleRatioReport<N>) -> (BTreeMap<usize, usize>, usize) {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    let mut acyclic = 0;
    for girth in report.girths().values() {
        match girth.length() {
            Some(len) => *counts.entry(len).or_insert(0) += 1,
            None => acyclic += 1,
        }
    }
    (counts, acyclic)
}

/// Runs the `inspect` command.
///
/// # Errors
///
/// Input errors (exit 2) from reading the graph, or an algorithm error
/// (exit 1).
pub fn run(file: &PathOrStdin, run_args: &RunArgs, globals: &Globals) -> Result<(), CliError> {
    let mut graph = read_graph(file, globals.max_file_size)?;
    let report = compute(&mut graph, run_args)?;
    let stats = InspectStats::collect(&graph, &report);

    emit(|out| match globals.format {
        OutputFormat::Human => print_human(out, &stats, &globals.style),
        OutputFormat::Json => print_json(out, &stats),
    })
}

fn print_human(
    w: &mut dyn Write,
    stats: &InspectStats,
    style: &FormatterConfig,
) -> std::io::Result<()> {
    writeln!(w, "{}       {}", style.heading("nodes:"), stats.node_count)?;
    writeln!(w, "{}       {}", style.heading("edges:"), stats.edge_count)?;
    writeln!(w, "{}    {}", style.heading("isolated:"), stats.isolated_count)?;
    writeln!(w, "{}", style.heading("coreness:"))?;
    for (core, count) in &stats.core_counts {
        writeln!(w, "  {core}: {count}")?;
    }
    writeln!(w, "{}", style.heading("girth:"))?;
    for (girth, count) in &stats.girth_counts {
        writeln!(w, "  {girth}: {count}")?;
    }
    writeln!(w, "  -: {}", stats.acyclic_count)?;
    writeln!(w, "{}      {}", style.heading("cycles:"), stats.cycle_count)?;
    for (len, count) in &stats.length_histogram {
        writeln!(w, "  length {len}: {count}")?;
    }
    writeln!(
        w,
        "{}      triangles {}, probed edges {}, pruned edges {}, paths {}",
        style.heading("search:"),
        stats.stats.triangles,
        stats.stats.probed_edges,
        stats.stats.pruned_edges,
        stats.stats.paths,
    )?;
    Ok(())
}

fn count_map(map: &BTreeMap<usize, usize>) -> serde_json::Map<String, serde_json::Value> {
    map.iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::Number((*v).into())))
        .collect()
}

fn print_json(w: &mut dyn Write, stats: &InspectStats) -> std::io::Result<()> {
    let doc = serde_json::json!({
        "node_count": stats.node_count,
        "edge_count": stats.edge_count,
        "isolated_count": stats.isolated_count,
        "core_counts": count_map(&stats.core_counts),
        "girth_counts": count_map(&stats.girth_counts),
        "acyclic_count": stats.acyclic_count,
        "num_smallest_cycles": stats.cycle_count,
        "length_histogram": count_map(&stats.length_histogram),
        "stats": stats.stats,
    });
    serde_json::to_writer_pretty(&mut *w, &doc)?;
    writeln!(w)
}
