//! Command module for the `cyclerank` CLI.
//!
//! Each submodule implements one subcommand. Its `run` function takes the
//! parsed arguments and returns `Ok(())` on success or a
//! [`crate::error::CliError`] on failure. Shared plumbing lives here: the
//! global settings every command sees and the engine invocation with its
//! optional timeout watchdog.
use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use cyclerank_core::{
    CancelFlag, CycleRatioConfig, CycleRatioEngine, CycleRatioReport, UndirectedGraph,
};

use crate::OutputFormat;
use crate::cli::RunArgs;
use crate::error::CliError;
use crate::format::FormatterConfig;

pub mod cycles;
pub mod demo;
pub mod inspect;
pub mod ratio;
pub mod report;

/// Settings taken from the global flags.
#[derive(Debug, Clone, Copy)]
pub struct Globals {
    /// `--format`.
    pub format: OutputFormat,
    /// `--max-file-size`.
    pub max_file_size: u64,
    /// Color settings for human output.
    pub style: FormatterConfig,
}

impl RunArgs {
    /// Engine configuration selected by the flags.
    pub fn config(&self) -> CycleRatioConfig {
        CycleRatioConfig {
            core_pruning: self.core_pruning,
            verify_restoration: !self.no_verify,
        }
    }
}

/// Runs the cycle ratio engine on `graph` with the options in `run`.
///
/// With `--timeout-ms`, a watchdog thread sets the engine's cancel flag once
/// the timeout elapses. The watchdog exits early when the run finishes first.
///
/// # Errors
///
/// [`CliError::TimedOut`] when the watchdog fired, otherwise the engine
/// error mapped by [`CliError::from_algorithm`].
pub fn compute<G>(graph: &mut G, run: &RunArgs) -> Result<CycleRatioReport<G::Node>, CliError>
where
    G: UndirectedGraph,
{
    let cancel = CancelFlag::new();
    let engine = CycleRatioEngine::new(run.config()).with_cancel(cancel.clone());
    let started = Instant::now();

    let result = match run.timeout_ms {
        None => engine.run(graph),
        Some(timeout_ms) => {
            let (done_tx, done_rx) = mpsc::channel::<()>();
            let watchdog = std::thread::spawn(move || {
                if let Err(RecvTimeoutError::Timeout) =
                    done_rx.recv_timeout(Duration::from_millis(timeout_ms))
                {
                    tracing::warn!(timeout_ms, "timeout reached; cancelling cycle search");
                    cancel.cancel();
                }
            });
            let result = engine.run(graph);
            drop(done_tx);
            if watchdog.join().is_err() {
                tracing::error!("timeout watchdog panicked");
            }
            result
        }
    };

    let report = result.map_err(|e| CliError::from_algorithm(&e, run.timeout_ms))?;
    let stats = report.stats();
    tracing::info!(
        elapsed_ms = started.elapsed().as_millis(),
        cycles = report.num_smallest_cycles(),
        triangles = stats.triangles,
        probed_edges = stats.probed_edges,
        pruned_edges = stats.pruned_edges,
        "cycle search finished"
    );
    Ok(report)
}

/// Fails with [`CliError::NodeNotFound`] unless `graph` contains `id`.
pub fn require_node<G>(graph: &G, id: &str) -> Result<(), CliError>
where
    G: UndirectedGraph<Node = String>,
{
    if graph.has_node(&id.to_owned()) {
        Ok(())
    } else {
        Err(CliError::NodeNotFound { id: id.to_owned() })
    }
}

/// Hands a locked stdout to `write`, mapping I/O failures to
/// [`CliError::IoError`].
pub fn emit<F>(write: F) -> Result<(), CliError>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write(&mut out)
        .and_then(|()| out.flush())
        .map_err(|e| CliError::IoError {
            source: "stdout".to_owned(),
            detail: e.to_string(),
        })
}
