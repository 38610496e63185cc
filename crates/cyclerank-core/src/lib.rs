#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod cancel;
pub mod centrality;
pub mod cycle;
pub mod encoding;
pub mod error;
pub mod fingerprint;
pub mod graph;
pub mod graph_file;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use cancel::CancelFlag;
pub use centrality::aggregate::{Aggregation, aggregate};
pub use centrality::residual::find_residual_cycles;
pub use centrality::triangles::detect_triangles;
pub use centrality::{
    CycleRatioConfig, CycleRatioEngine, CycleRatioReport, RunStats, SearchState,
    cycle_ratio_centrality, cycle_ratio_centrality_snapshot,
};
pub use cycle::{Girth, SimpleCycle};
pub use encoding::{Encoding, EncodingDetectionError, detect_encoding};
pub use error::CycleRatioError;
pub use fingerprint::{GraphFingerprint, graph_fingerprint};
pub use graph::coreness::core_number;
pub use graph::mutation::EdgeRemoval;
pub use graph::queries::{AllShortestPaths, PredecessorTree, all_shortest_paths};
pub use graph::{GraphError, NodeKey, SimpleGraph, UndirectedGraph};
pub use graph_file::{
    DEFAULT_MAX_DECOMPRESSED_SIZE, GraphDocument, GraphFileError, NodeName, ReportDocument,
    decode_document, decode_document_with_limit, encode_document_cbor, encode_report_cbor,
    encode_report_json, load_graph,
};

/// Returns the current version of the cyclerank-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
