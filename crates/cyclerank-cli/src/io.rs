//! File and stdin reading with size enforcement.
//!
//! This module is the single entry point for all input I/O in the
//! `cyclerank` binary. `cyclerank-core` never touches the filesystem.
//!
//! - Disk files: size checked via `std::fs::metadata` before any read.
//! - Stdin: buffered with a `Read::take` cap so allocation is bounded.
//! - zstd input: the decompressed size is bounded by the same limit.
//! - All failures are converted to [`CliError`] variants with exit code 2.
use std::io::Read as _;
use std::path::Path;

use cyclerank_core::{SimpleGraph, decode_document_with_limit};

use crate::PathOrStdin;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads the entire contents of `source`, rejecting inputs above `max_size`.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) for a missing file, a permission
/// error, an input over `max_size`, or any other I/O error.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<Vec<u8>, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

/// Reads `source` and builds the graph it describes.
///
/// JSON, tagged CBOR and zstd-wrapped documents are accepted. The size limit
/// applies to the raw input and again to decompressed zstd content.
///
/// # Errors
///
/// Everything [`read_input`] returns, plus [`CliError::InvalidGraph`] when
/// the document cannot be decoded or names an invalid edge.
pub fn read_graph(source: &PathOrStdin, max_size: u64) -> Result<SimpleGraph<String>, CliError> {
    let bytes = read_input(source, max_size)?;
    let label = source.label();
    let graph = decode_document_with_limit(&bytes, max_size)
        .and_then(cyclerank_core::GraphDocument::into_graph)
        .map_err(|e| CliError::from_graph_file(&label, &e))?;
    tracing::debug!(
        source = %label,
        bytes = bytes.len(),
        nodes = cyclerank_core::UndirectedGraph::number_of_nodes(&graph),
        "graph loaded"
    );
    Ok(graph)
}

// ---------------------------------------------------------------------------
// Disk file reading
// ---------------------------------------------------------------------------

fn read_file(path: &Path, max_size: u64) -> Result<Vec<u8>, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();

    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))
}

/// Maps a `std::io::Error` arising from a disk-file operation to a [`CliError`].
#[allow(clippy::wildcard_enum_match_arm)]
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    match e.kind() {
        std::io::ErrorKind::NotFound => CliError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Stdin reading
// ---------------------------------------------------------------------------

/// Reads the entire stdin stream, capped at `max_size` bytes.
///
/// A stream that yields exactly `max_size` bytes is probed for one more byte
/// to tell "at the limit" from "over the limit".
fn read_stdin(max_size: u64) -> Result<Vec<u8>, CliError> {
    let stdin = std::io::stdin();
    let mut handle = stdin.lock();

    let mut buf: Vec<u8> = Vec::new();
    (&mut handle)
        .take(max_size)
        .read_to_end(&mut buf)
        .map_err(|e| CliError::StdinReadError {
            detail: e.to_string(),
        })?;

    if buf.len() as u64 == max_size {
        let mut probe = [0u8; 1];
        let extra = handle
            .read(&mut probe)
            .map_err(|e| CliError::StdinReadError {
                detail: e.to_string(),
            })?;
        if extra > 0 {
            return Err(CliError::FileTooLarge {
                source: "-".to_owned(),
                limit: max_size,
                actual: None,
            });
        }
    }

    Ok(buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use std::io::Write as _;
    use std::path::PathBuf;

    use cyclerank_core::UndirectedGraph as _;

    use super::*;

    fn temp_file_with(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("create temp file");
        f.write_all(contents).expect("write temp file");
        f
    }

    fn path_of(f: &tempfile::NamedTempFile) -> PathOrStdin {
        PathOrStdin::Path(f.path().to_path_buf())
    }

    // ── raw input ────────────────────────────────────────────────────────────

    #[test]
    fn read_file_exactly_at_limit_succeeds() {
        let f = temp_file_with(b"hello");
        let bytes = read_input(&path_of(&f), 5).expect("should succeed at limit");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn read_file_over_limit_reports_actual_size() {
        let f = temp_file_with(b"hello world");
        let err = read_input(&path_of(&f), 4).expect_err("should fail");
        match err {
            CliError::FileTooLarge {
                actual: Some(n), ..
            } => assert_eq!(n, 11),
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn read_nonexistent_file_returns_file_not_found() {
        let source = PathOrStdin::Path(PathBuf::from("/no/such/file/ever.json"));
        let err = read_input(&source, 1024).expect_err("should fail");
        assert_eq!(err.exit_code(), 2);
        assert!(matches!(err, CliError::FileNotFound { .. }));
    }

    #[test]
    fn binary_input_is_not_rejected_before_decoding() {
        let f = temp_file_with(&[0xD9, 0xD9, 0xF7, 0xA0]);
        let bytes = read_input(&path_of(&f), 1024).expect("reads bytes");
        assert_eq!(bytes.len(), 4);
    }

    // ── graph loading ────────────────────────────────────────────────────────

    #[test]
    fn read_graph_builds_a_square() {
        let f = temp_file_with(br#"{"edges": [["a","b"],["b","c"],["c","d"],["d","a"]]}"#);
        let g = read_graph(&path_of(&f), 1024).expect("loads");
        assert_eq!(g.number_of_nodes(), 4);
        assert_eq!(g.number_of_edges(), 4);
    }

    #[test]
    fn read_graph_rejects_self_loop() {
        let f = temp_file_with(br#"{"edges": [["a","b"],["b","b"]]}"#);
        let err = read_graph(&path_of(&f), 1024).expect_err("self-loop");
        match err {
            CliError::InvalidGraph { detail, .. } => {
                assert!(detail.contains("edges[1]"), "detail: {detail}");
            }
            other => panic!("expected InvalidGraph, got {other:?}"),
        }
    }

    #[test]
    fn read_graph_rejects_unknown_encoding() {
        let f = temp_file_with(b"a,b\nb,c\n");
        let err = read_graph(&path_of(&f), 1024).expect_err("not a graph");
        assert_eq!(err.exit_code(), 2);
        assert!(matches!(err, CliError::InvalidGraph { .. }));
    }
}
