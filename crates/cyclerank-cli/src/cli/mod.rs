//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl PathOrStdin {
    /// Label used in messages: the path, or `-` for stdin.
    pub fn label(&self) -> String {
        match self {
            PathOrStdin::Stdin => "-".to_owned(),
            PathOrStdin::Path(p) => p.display().to_string(),
        }
    }
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// A single JSON document on stdout.
    Json,
}

/// Serialization used by the `report` subcommand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportEncoding {
    /// Pretty-printed JSON (default).
    Json,
    /// CBOR with self-describing tag 55799.
    Cbor,
}

/// Options shared by every subcommand that runs the cycle search.
#[derive(Args, Clone, Debug, Default)]
pub struct RunArgs {
    /// Skip probing edges whose endpoint has coreness 2 and a known girth.
    ///
    /// Faster on sparse graphs but may leave some nodes without a score.
    #[arg(long)]
    pub core_pruning: bool,

    /// Do not fingerprint the graph before and after the run.
    #[arg(long)]
    pub no_verify: bool,

    /// Cancel the computation after this many milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

/// All top-level subcommands exposed by the `cyclerank` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Print the cycle ratio of every node on a smallest cycle.
    Ratio {
        /// Path to a graph file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Only print the N highest-scoring nodes.
        #[arg(long, value_name = "N")]
        top: Option<usize>,
        /// Only print this node.
        #[arg(long, value_name = "NODE_ID", conflicts_with = "top")]
        node: Option<String>,
        #[command(flatten)]
        run: RunArgs,
    },

    /// List the smallest cycles of a graph.
    Cycles {
        /// Path to a graph file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Only list cycles through this node.
        #[arg(long, value_name = "NODE_ID")]
        node: Option<String>,
        #[command(flatten)]
        run: RunArgs,
    },

    /// Print graph statistics: sizes, coreness, girth and cycle lengths.
    Inspect {
        /// Path to a graph file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        #[command(flatten)]
        run: RunArgs,
    },

    /// Write the full report (cycles, girths, scores, counters).
    Report {
        /// Path to a graph file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Output encoding: json (default) or cbor.
        #[arg(long, default_value = "json", value_enum)]
        to: ReportEncoding,
        #[command(flatten)]
        run: RunArgs,
    },

    /// Score the built-in example graph (K4 plus a pendant triangle).
    Demo,

    /// Print the cyclerank-core library version.
    Version,
}

/// Root CLI struct for the `cyclerank` binary.
///
/// Global flags are marked `global = true` so clap accepts them after any
/// subcommand.
#[derive(Parser)]
#[command(
    name = "cyclerank",
    version,
    about = "Cycle ratio centrality for undirected graphs",
    long_about = "Finds the smallest cycles through every node of an undirected graph\n\
                  and scores nodes by how their smallest cycles overlap (cycle ratio)."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Only log errors to stderr (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log progress and run counters to stderr (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Also bounds the decompressed size of zstd input. Can be set via the
    /// `CYCLERANK_MAX_FILE_SIZE` environment variable. Default: 268435456
    /// (256 MiB).
    #[arg(
        long,
        global = true,
        env = "CYCLERANK_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}
