//! Graph documents on disk and serialized reports.
//!
//! A graph document is a map with an optional `nodes` list and an `edges`
//! list of endpoint pairs:
//!
//! ```json
//! { "nodes": ["a", "b", 3], "edges": [["a", "b"], ["b", 3]] }
//! ```
//!
//! Identifiers may be strings or integers; integers are rendered to their
//! decimal string, so `3` and `"3"` name the same node. When `nodes` is
//! present every edge endpoint must be declared in it. When it is absent
//! endpoints are created as they are seen.
//!
//! Documents are read as JSON, as CBOR carrying the self-describing tag, or
//! as either of those wrapped in a zstd frame (with the `compression`
//! feature).
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::centrality::{CycleRatioReport, RunStats};
use crate::encoding::{CBOR_TAG, Encoding, EncodingDetectionError, detect_encoding};
use crate::graph::{GraphError, NodeKey, SimpleGraph, UndirectedGraph};

/// Upper bound on the decompressed size of a zstd-wrapped document.
pub const DEFAULT_MAX_DECOMPRESSED_SIZE: u64 = 1024 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while reading a graph document or writing a report.
#[derive(Debug)]
pub enum GraphFileError {
    /// The leading bytes match no supported encoding.
    Encoding(EncodingDetectionError),
    /// The JSON payload is malformed or does not match the document shape.
    Json(serde_json::Error),
    /// The CBOR payload is malformed or does not match the document shape.
    Cbor(String),
    /// The zstd frame could not be decompressed.
    Decompress(String),
    /// The decompressed payload exceeds the configured limit.
    DecompressedTooLarge {
        /// The limit in bytes.
        limit: u64,
    },
    /// A zstd frame decompressed to another zstd frame.
    NestedCompression,
    /// The input is zstd-compressed but the `compression` feature is off.
    CompressionUnsupported,
    /// The `nodes` list names the same node twice.
    DuplicateNode(String),
    /// An edge was rejected by the graph.
    InvalidEdge {
        /// Position of the edge in the `edges` list.
        index: usize,
        /// Why it was rejected.
        source: GraphError,
    },
}

impl std::fmt::Display for GraphFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encoding(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "invalid JSON graph document: {e}"),
            Self::Cbor(msg) => write!(f, "invalid CBOR graph document: {msg}"),
            Self::Decompress(msg) => write!(f, "zstd decompression failed: {msg}"),
            Self::DecompressedTooLarge { limit } => {
                write!(f, "decompressed document exceeds {limit} bytes")
            }
            Self::NestedCompression => f.write_str("nested zstd compression is not supported"),
            Self::CompressionUnsupported => {
                f.write_str("input is zstd-compressed but compression support is disabled")
            }
            Self::DuplicateNode(id) => write!(f, "node {id:?} is declared twice"),
            Self::InvalidEdge { index, source } => write!(f, "edges[{index}]: {source}"),
        }
    }
}

impl std::error::Error for GraphFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::InvalidEdge { source, .. } => Some(source),
            Self::Cbor(_)
            | Self::Decompress(_)
            | Self::DecompressedTooLarge { .. }
            | Self::NestedCompression
            | Self::CompressionUnsupported
            | Self::DuplicateNode(_) => None,
        }
    }
}

impl From<EncodingDetectionError> for GraphFileError {
    fn from(e: EncodingDetectionError) -> Self {
        Self::Encoding(e)
    }
}

// ---------------------------------------------------------------------------
// GraphDocument
// ---------------------------------------------------------------------------

/// A node identifier as written in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeName {
    /// Integer identifier.
    Int(i64),
    /// String identifier.
    Text(String),
}

impl NodeName {
    /// The identifier used inside the graph.
    pub fn into_id(self) -> String {
        match self {
            Self::Int(i) => i.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// The serialized form of an undirected graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Declared nodes. Optional; isolated nodes can only be expressed here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<NodeName>>,
    /// Undirected edges as endpoint pairs.
    pub edges: Vec<(NodeName, NodeName)>,
}

impl GraphDocument {
    /// Describes `graph` with every node declared, nodes and edges sorted.
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: UndirectedGraph<Node = String>,
    {
        let mut nodes = graph.nodes();
        nodes.sort();
        let mut edges = graph.edges();
        edges.sort();
        Self {
            nodes: Some(nodes.into_iter().map(NodeName::Text).collect()),
            edges: edges
                .into_iter()
                .map(|(a, b)| (NodeName::Text(a), NodeName::Text(b)))
                .collect(),
        }
    }

    /// Builds the graph the document describes.
    ///
    /// # Errors
    ///
    /// [`GraphFileError::DuplicateNode`] for a repeated declaration, and
    /// [`GraphFileError::InvalidEdge`] for a self-loop, a repeated edge, or
    /// (when `nodes` is given) an undeclared endpoint.
    pub fn into_graph(self) -> Result<SimpleGraph<String>, GraphFileError> {
        let declared = self.nodes.is_some();
        let mut graph =
            SimpleGraph::with_capacity(self.nodes.as_ref().map_or(0, Vec::len), self.edges.len());

        for name in self.nodes.into_iter().flatten() {
            let id = name.into_id();
            if !graph.add_node(id.clone()) {
                return Err(GraphFileError::DuplicateNode(id));
            }
        }

        for (index, (a, b)) in self.edges.into_iter().enumerate() {
            let a = a.into_id();
            let b = b.into_id();
            if !declared {
                graph.add_node(a.clone());
                graph.add_node(b.clone());
            }
            graph
                .add_edge(&a, &b)
                .map_err(|source| GraphFileError::InvalidEdge { index, source })?;
        }

        Ok(graph)
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Decodes a graph document in any supported encoding.
///
/// # Errors
///
/// See [`GraphFileError`].
pub fn decode_document(bytes: &[u8]) -> Result<GraphDocument, GraphFileError> {
    decode_document_with_limit(bytes, DEFAULT_MAX_DECOMPRESSED_SIZE)
}

/// Like [`decode_document`], with an explicit bound on the decompressed size
/// of zstd input.
///
/// # Errors
///
/// See [`GraphFileError`].
pub fn decode_document_with_limit(
    bytes: &[u8],
    max_decompressed: u64,
) -> Result<GraphDocument, GraphFileError> {
    match detect_encoding(bytes)? {
        Encoding::Json => decode_json(bytes),
        Encoding::Cbor => decode_cbor(bytes),
        Encoding::Zstd => {
            let inner = decompress(bytes, max_decompressed)?;
            match detect_encoding(&inner)? {
                Encoding::Json => decode_json(&inner),
                Encoding::Cbor => decode_cbor(&inner),
                Encoding::Zstd => Err(GraphFileError::NestedCompression),
            }
        }
    }
}

/// Decodes `bytes` and builds the graph.
///
/// # Errors
///
/// See [`decode_document`] and [`GraphDocument::into_graph`].
pub fn load_graph(bytes: &[u8]) -> Result<SimpleGraph<String>, GraphFileError> {
    decode_document(bytes)?.into_graph()
}

fn decode_json(bytes: &[u8]) -> Result<GraphDocument, GraphFileError> {
    serde_json::from_slice(bytes).map_err(GraphFileError::Json)
}

fn decode_cbor(bytes: &[u8]) -> Result<GraphDocument, GraphFileError> {
    let body = bytes.strip_prefix(&CBOR_TAG[..]).unwrap_or(bytes);
    cbor4ii::serde::from_slice(body).map_err(|e| GraphFileError::Cbor(e.to_string()))
}

#[cfg(feature = "compression")]
fn decompress(bytes: &[u8], limit: u64) -> Result<Vec<u8>, GraphFileError> {
    use std::io::Read;

    let decoder =
        zstd::stream::Decoder::new(bytes).map_err(|e| GraphFileError::Decompress(e.to_string()))?;
    let mut out = Vec::new();
    decoder
        .take(limit.saturating_add(1))
        .read_to_end(&mut out)
        .map_err(|e| GraphFileError::Decompress(e.to_string()))?;
    if out.len() as u64 > limit {
        return Err(GraphFileError::DecompressedTooLarge { limit });
    }
    Ok(out)
}

#[cfg(not(feature = "compression"))]
fn decompress(_bytes: &[u8], _limit: u64) -> Result<Vec<u8>, GraphFileError> {
    Err(GraphFileError::CompressionUnsupported)
}

/// Encodes a document as tagged CBOR.
///
/// # Errors
///
/// [`GraphFileError::Cbor`] if serialization fails.
pub fn encode_document_cbor(doc: &GraphDocument) -> Result<Vec<u8>, GraphFileError> {
    cbor4ii::serde::to_vec(CBOR_TAG.to_vec(), doc).map_err(|e| GraphFileError::Cbor(e.to_string()))
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// One smallest cycle in a serialized report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleEntry<'a, N> {
    /// Cycle length.
    pub length: usize,
    /// Members in ascending order.
    pub members: &'a [N],
    /// Members in canonical walk order.
    pub walk: &'a [N],
}

/// Per-node summary in a serialized report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeEntry<'a, N> {
    /// Node identifier.
    pub id: &'a N,
    /// Girth, or `None` if the node lies on no cycle.
    pub girth: Option<usize>,
    /// Number of smallest cycles through the node.
    pub cycles: usize,
    /// Cycle ratio, or `None` if the node lies on no smallest cycle.
    pub cycle_ratio: Option<f64>,
}

/// Serializable view of a [`CycleRatioReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument<'a, N> {
    /// Number of distinct smallest cycles.
    pub num_smallest_cycles: usize,
    /// Cycle length → count.
    pub length_histogram: &'a BTreeMap<usize, usize>,
    /// Every node in ascending order.
    pub nodes: Vec<NodeEntry<'a, N>>,
    /// Every smallest cycle.
    pub cycles: Vec<CycleEntry<'a, N>>,
    /// Run counters.
    pub stats: &'a RunStats,
}

impl<'a, N: NodeKey> ReportDocument<'a, N> {
    /// Borrows `report` into its serializable form.
    pub fn new(report: &'a CycleRatioReport<N>) -> Self {
        let nodes = report
            .girths()
            .iter()
            .map(|(id, girth)| NodeEntry {
                id,
                girth: girth.length(),
                cycles: report.cycles_of(id).len(),
                cycle_ratio: report.ratio_of(id),
            })
            .collect();
        let cycles = report
            .cycles()
            .iter()
            .map(|c| CycleEntry {
                length: c.len(),
                members: c.members(),
                walk: c.walk(),
            })
            .collect();
        Self {
            num_smallest_cycles: report.num_smallest_cycles(),
            length_histogram: report.length_histogram(),
            nodes,
            cycles,
            stats: report.stats(),
        }
    }
}

/// Serializes `report` as pretty-printed JSON.
///
/// # Errors
///
/// [`GraphFileError::Json`] if serialization fails.
pub fn encode_report_json<N>(report: &CycleRatioReport<N>) -> Result<Vec<u8>, GraphFileError>
where
    N: NodeKey + Serialize,
{
    serde_json::to_vec_pretty(&ReportDocument::new(report)).map_err(GraphFileError::Json)
}

/// Serializes `report` as tagged CBOR.
///
/// # Errors
///
/// [`GraphFileError::Cbor`] if serialization fails.
pub fn encode_report_cbor<N>(report: &CycleRatioReport<N>) -> Result<Vec<u8>, GraphFileError>
where
    N: NodeKey + Serialize,
{
    cbor4ii::serde::to_vec(CBOR_TAG.to_vec(), &ReportDocument::new(report))
        .map_err(|e| GraphFileError::Cbor(e.to_string()))
}
