//! Implementation of `cyclerank ratio <file>`.
//!
//! Prints the cycle ratio of every node on at least one smallest cycle,
//! ordered by node id. `--top N` orders by descending score instead (ties by
//! id) and keeps the first `N`. `--node ID` prints one node, which may lie on
//! no cycle; its score is then shown as `-` (`null` in JSON).
use std::fmt::Display;
use std::io::Write;

use cyclerank_core::{CycleRatioReport, NodeKey};

use crate::cli::RunArgs;
use crate::cmd::{Globals, compute, emit, require_node};
use crate::error::CliError;
use crate::format::{self, FormatterConfig};
use crate::io::read_graph;
use crate::{OutputFormat, PathOrStdin};

/// One printed row.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    /// Node id.
    pub node: String,
    /// Cycle ratio, or `None` if the node lies on no cycle.
    pub score: Option<f64>,
    /// Length of the node's smallest cycle.
    pub girth: Option<usize>,
}

/// Which rows to print.
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    /// Every scored node by id.
    All,
    /// The `N` best scores.
    Top(usize),
    /// A single node.
    Node(&'a str),
}

/// Runs the `ratio` command.
///
/// # Errors
///
/// Input errors (exit 2) from reading the graph, [`CliError::NodeNotFound`]
/// for an unknown `--node`, or an algorithm error (exit 1).
pub fn run(
    file: &PathOrStdin,
    top: Option<usize>,
    node: Option<&str>,
    run_args: &RunArgs,
    globals: &Globals,
) -> Result<(), CliError> {
    let mut graph = read_graph(file, globals.max_file_size)?;
    if let Some(id) = node {
        require_node(&graph, id)?;
    }
    let report = compute(&mut graph, run_args)?;

    let selection = match (node, top) {
        (Some(id), _) => Selection::Node(id),
        (None, Some(n)) => Selection::Top(n),
        (None, None) => Selection::All,
    };
    let rows = select_rows(&report, selection, |id| Some(id.to_owned()));
    write(&rows, report.num_smallest_cycles(), globals)
}

/// Writes `rows` in the format chosen by `globals`.
///
/// # Errors
///
/// [`CliError::IoError`] if stdout cannot be written.
pub fn write(rows: &[ScoreRow], num_cycles: usize, globals: &Globals) -> Result<(), CliError> {
    emit(|out| match globals.format {
        OutputFormat::Human => print_human(out, rows, &globals.style),
        OutputFormat::Json => print_json(out, rows, num_cycles),
    })
}

/// Builds the rows for `selection`. `lookup` maps a requested id to the
/// report's node key.
pub fn select_rows<N, F>(
    report: &CycleRatioReport<N>,
    selection: Selection<'_>,
    lookup: F,
) -> Vec<ScoreRow>
where
    N: NodeKey + Display,
    F: Fn(&str) -> Option<N>,
{
    let row = |node: &N| ScoreRow {
        node: node.to_string(),
        score: report.ratio_of(node),
        girth: report.girth(node).and_then(cyclerank_core::Girth::length),
    };

    match selection {
        Selection::All => report.cycle_ratio().keys().map(row).collect(),
        Selection::Top(n) => {
            let mut ranked: Vec<(&N, f64)> =
                report.cycle_ratio().iter().map(|(k, v)| (k, *v)).collect();
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            ranked.into_iter().take(n).map(|(k, _)| row(k)).collect()
        }
        Selection::Node(id) => match lookup(id) {
            Some(key) => vec![row(&key)],
            None => Vec::new(),
        },
    }
}

fn print_human(out: &mut dyn Write, rows: &[ScoreRow], style: &FormatterConfig) -> std::io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "{}", style.dim("(no node lies on a cycle)"));
    }
    let width = rows.iter().map(|r| r.node.chars().count()).max().unwrap_or(0);
    for row in rows {
        let score = row.score.map_or_else(|| "-".to_owned(), format::score);
        let girth = row.girth.map_or_else(|| "-".to_owned(), |g| g.to_string());
        writeln!(
            out,
            "{}  {score}  {}",
            style.node(&format!("{:<width$}", row.node)),
            style.dim(&format!("girth {girth}")),
        )?;
    }
    Ok(())
}

fn print_json(out: &mut dyn Write, rows: &[ScoreRow], num_cycles: usize) -> std::io::Result<()> {
    let scores: Vec<serde_json::Value> = rows
        .iter()
        .map(|r| {
            serde_json::json!({
                "node": r.node,
                "cycle_ratio": r.score,
                "girth": r.girth,
            })
        })
        .collect();
    let doc = serde_json::json!({
        "num_smallest_cycles": num_cycles,
        "scores": scores,
    });
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use cyclerank_core::{CycleRatioEngine, SimpleGraph};

    use super::*;

    fn k4_with_pendant() -> CycleRatioReport<u32> {
        let mut g = SimpleGraph::from_edges([
            (1u32, 2u32),
            (1, 3),
            (1, 4),
            (2, 3),
            (2, 4),
            (3, 4),
            (1, 5),
            (2, 5),
        ])
        .expect("builds");
        CycleRatioEngine::default().run(&mut g).expect("runs")
    }

    fn lookup(id: &str) -> Option<u32> {
        id.parse().ok()
    }

    #[test]
    fn all_rows_are_ordered_by_id() {
        let rows = select_rows(&k4_with_pendant(), Selection::All, lookup);
        let ids: Vec<&str> = rows.iter().map(|r| r.node.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn top_orders_by_score_then_id() {
        let rows = select_rows(&k4_with_pendant(), Selection::Top(3), lookup);
        let ids: Vec<&str> = rows.iter().map(|r| r.node.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        let best = rows.first().and_then(|r| r.score).expect("scored");
        assert!((best - 49.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn top_larger_than_graph_returns_every_node() {
        let rows = select_rows(&k4_with_pendant(), Selection::Top(100), lookup);
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn single_node_row() {
        let rows = select_rows(&k4_with_pendant(), Selection::Node("5"), lookup);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.first().and_then(|r| r.girth), Some(3));
        assert_eq!(rows.first().and_then(|r| r.score), Some(1.5));
    }

    #[test]
    fn human_output_lists_scores() {
        let rows = select_rows(&k4_with_pendant(), Selection::All, lookup);
        let mut buf = Vec::new();
        print_human(&mut buf, &rows, &FormatterConfig { colors: false }).expect("writes");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("5  1.500000  girth 3"), "output: {text}");
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn json_output_uses_null_for_unscored_node() {
        let rows = vec![ScoreRow {
            node: "leaf".to_owned(),
            score: None,
            girth: None,
        }];
        let mut buf = Vec::new();
        print_json(&mut buf, &rows, 0).expect("writes");
        let doc: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(doc["scores"][0]["node"], "leaf");
        assert!(doc["scores"][0]["cycle_ratio"].is_null());
        assert_eq!(doc["num_smallest_cycles"], 0);
    }
}
