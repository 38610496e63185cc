//! Implementation of `cyclerank report <file>`.
//!
//! Writes the complete report document (per-node girth, cycle count and
//! score, every smallest cycle, the length histogram and the search
//! counters) to stdout as pretty JSON or tagged CBOR. `--format` does not
//! apply here; `--to` selects the encoding.
use std::io::Write as _;

use cyclerank_core::{encode_report_cbor, encode_report_json};

use crate::PathOrStdin;
use crate::cli::{ReportEncoding, RunArgs};
use crate::cmd::{Globals, compute, emit};
use crate::error::CliError;
use crate::io::read_graph;

/// Runs the `report` command.
///
/// # Errors
///
/// Input errors (exit 2) from reading the graph, an algorithm error
/// (exit 1), or [`CliError::IoError`] if the report cannot be written.
pub fn run(
    file: &PathOrStdin,
    to: ReportEncoding,
    run_args: &RunArgs,
    globals: &Globals,
) -> Result<(), CliError> {
    let mut graph = read_graph(file, globals.max_file_size)?;
    let report = compute(&mut graph, run_args)?;

    let encoded = match to {
        ReportEncoding::Json => encode_report_json(&report),
        ReportEncoding::Cbor => encode_report_cbor(&report),
    }
    .map_err(|e| CliError::IoError {
        source: "report".to_owned(),
        detail: e.to_string(),
    })?;

    emit(|out| {
        out.write_all(&encoded)?;
        if to == ReportEncoding::Json {
            out.write_all(b"\n")?;
        }
        Ok(())
    })
}
