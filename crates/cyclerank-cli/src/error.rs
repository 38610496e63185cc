//! CLI error types with associated exit codes.
//!
//! Every [`CliError`] variant maps to a stable exit code via
//! [`CliError::exit_code`]:
//!
//! - **2**: input failure. The graph could not be read, decoded or built.
//! - **1**: logical failure. The graph loaded but the command could not
//!   produce its result.
use std::fmt;
use std::path::PathBuf;

use cyclerank_core::{CycleRatioError, GraphFileError};

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `cyclerank` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, when known.
        actual: Option<u64>,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// `"-"`, `"stdout"`, or the filesystem path.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The input could not be decoded or does not describe a simple graph.
    InvalidGraph {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The decoding or construction error.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// `--node` named a node the graph does not contain.
    NodeNotFound {
        /// The requested id.
        id: String,
    },

    /// `--timeout-ms` elapsed before the computation finished.
    TimedOut {
        /// The configured timeout.
        after_ms: u64,
    },

    /// The computation failed.
    Algorithm {
        /// The underlying error message.
        detail: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::InvalidGraph { .. } => 2,

            Self::NodeNotFound { .. } | Self::TimedOut { .. } | Self::Algorithm { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::InvalidGraph { source, detail } => {
                format!("error: invalid graph in {source}: {detail}")
            }
            Self::NodeNotFound { id } => format!("error: node not found: {id}"),
            Self::TimedOut { after_ms } => {
                format!("error: computation cancelled after {after_ms} ms")
            }
            Self::Algorithm { detail } => format!("error: cycle search failed: {detail}"),
        }
    }

    /// Wraps a graph file error for the given input label.
    pub fn from_graph_file(source: &str, err: &GraphFileError) -> Self {
        match err {
            GraphFileError::DecompressedTooLarge { limit } => Self::FileTooLarge {
                source: source.to_owned(),
                limit: *limit,
                actual: None,
            },
            other => Self::InvalidGraph {
                source: source.to_owned(),
                detail: other.to_string(),
            },
        }
    }

    /// Wraps an algorithm error. `timeout_ms` is the configured timeout, if
    /// any, so a cancellation can be reported as a timeout.
    pub fn from_algorithm(err: &CycleRatioError, timeout_ms: Option<u64>) -> Self {
        match (err, timeout_ms) {
            (CycleRatioError::Cancelled, Some(after_ms)) => Self::TimedOut { after_ms },
            (CycleRatioError::NodeNotFound(id), _) => Self::NodeNotFound { id: id.clone() },
            (other, _) => Self::Algorithm {
                detail: other.to_string(),
            },
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use std::path::PathBuf;

    use cyclerank_core::GraphError;

    use super::*;

    // ── exit_code ────────────────────────────────────────────────────────────

    #[test]
    fn input_failures_are_exit_2() {
        let errors = [
            CliError::FileNotFound {
                path: PathBuf::from("g.json"),
            },
            CliError::PermissionDenied {
                path: PathBuf::from("/root/g.json"),
            },
            CliError::FileTooLarge {
                source: "big.json".to_owned(),
                limit: 1024,
                actual: Some(2048),
            },
            CliError::StdinReadError {
                detail: "broken pipe".to_owned(),
            },
            CliError::IoError {
                source: "stdout".to_owned(),
                detail: "device full".to_owned(),
            },
            CliError::InvalidGraph {
                source: "g.json".to_owned(),
                detail: "edges[0]: self-loop".to_owned(),
            },
        ];
        for e in errors {
            assert_eq!(e.exit_code(), 2, "{e}");
        }
    }

    #[test]
    fn logical_failures_are_exit_1() {
        let errors = [
            CliError::NodeNotFound { id: "x".to_owned() },
            CliError::TimedOut { after_ms: 10 },
            CliError::Algorithm {
                detail: "invariant violation: lost edge".to_owned(),
            },
        ];
        for e in errors {
            assert_eq!(e.exit_code(), 1, "{e}");
        }
    }

    // ── message content ──────────────────────────────────────────────────────

    #[test]
    fn every_message_starts_with_error_prefix() {
        let e = CliError::NodeNotFound {
            id: "hub".to_owned(),
        };
        assert!(e.message().starts_with("error: "));
        assert_eq!(e.to_string(), e.message());
        assert!(e.message().contains("hub"));
    }

    #[test]
    fn file_too_large_without_actual_size() {
        let e = CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: 10,
            actual: None,
        };
        let msg = e.message();
        assert!(msg.contains("exceeded limit of 10 bytes"), "message: {msg}");
    }

    // ── conversions ──────────────────────────────────────────────────────────

    #[test]
    fn decompression_bomb_maps_to_file_too_large() {
        let e = CliError::from_graph_file("g.json.zst", &GraphFileError::DecompressedTooLarge {
            limit: 64,
        });
        match e {
            CliError::FileTooLarge { source, limit, .. } => {
                assert_eq!(source, "g.json.zst");
                assert_eq!(limit, 64);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn rejected_edge_maps_to_invalid_graph() {
        let e = CliError::from_graph_file("g.json", &GraphFileError::InvalidEdge {
            index: 3,
            source: GraphError::SelfLoop("b".to_owned()),
        });
        assert_eq!(e.exit_code(), 2);
        assert!(e.message().contains("edges[3]"), "message: {}", e.message());
    }

    #[test]
    fn cancellation_with_timeout_is_timed_out() {
        let e = CliError::from_algorithm(&CycleRatioError::Cancelled, Some(5));
        assert!(matches!(e, CliError::TimedOut { after_ms: 5 }));
    }

    #[test]
    fn cancellation_without_timeout_is_algorithm_error() {
        let e = CliError::from_algorithm(&CycleRatioError::Cancelled, None);
        assert!(matches!(e, CliError::Algorithm { .. }));
    }
}
