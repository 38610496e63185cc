//! Cycle ratio centrality.
//!
//! A run works through three phases over one [`SearchState`] that belongs to
//! the call alone:
//!
//! 1. [`triangles::detect_triangles`] records every 3-cycle straight from
//!    adjacency and resolves the girth of the nodes on them.
//! 2. [`residual::find_residual_cycles`] probes the edges incident to every
//!    node left unresolved: the edge is removed, all shortest paths between
//!    its endpoints are enumerated, and each path closed by the removed edge
//!    is recorded as a smallest cycle. The edge is always put back.
//! 3. [`aggregate::aggregate`] groups the cycles per node and computes the
//!    cycle ratio of every node on at least one smallest cycle.
//!
//! [`cycle_ratio_centrality`] runs the pipeline with the default
//! [`CycleRatioConfig`]. [`CycleRatioEngine`] exposes the configuration, a
//! [`CancelFlag`], and the full [`CycleRatioReport`].
use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::cancel::CancelFlag;
use crate::cycle::{Girth, SimpleCycle};
use crate::error::CycleRatioError;
use crate::fingerprint::graph_fingerprint;
use crate::graph::{NodeKey, UndirectedGraph};

pub mod aggregate;
pub mod residual;
pub mod triangles;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables of a cycle ratio run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleRatioConfig {
    /// Skip probing an edge when either endpoint has coreness 2 and an
    /// already resolved girth.
    ///
    /// Faster on sparse graphs, but not exact: a node whose only route to a
    /// cycle passes through such endpoints can be left unresolved. Off by
    /// default.
    pub core_pruning: bool,
    /// Fingerprint the graph before and after the run and fail with
    /// [`CycleRatioError::InvariantViolation`] if its edge set changed.
    pub verify_restoration: bool,
}

impl Default for CycleRatioConfig {
    fn default() -> Self {
        Self {
            core_pruning: false,
            verify_restoration: true,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Mutable context of one run: per-node girth and the smallest cycles found
/// so far.
#[derive(Debug, Clone)]
pub struct SearchState<N> {
    girth: HashMap<N, Girth>,
    cycles: BTreeSet<SimpleCycle<N>>,
}

impl<N: NodeKey> SearchState<N> {
    /// Creates a state with every node in `nodes` unresolved.
    pub fn new<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
    {
        Self {
            girth: nodes.into_iter().map(|n| (n, Girth::Unresolved)).collect(),
            cycles: BTreeSet::new(),
        }
    }

    /// Girth currently known for `node`. Nodes never seen are unresolved.
    pub fn girth_of(&self, node: &N) -> Girth {
        self.girth.get(node).copied().unwrap_or(Girth::Unresolved)
    }

    /// Adds `cycle` to the cycle set and lowers the girth of each member to
    /// the cycle length where that is shorter.
    ///
    /// Returns `true` if the cycle was not already known.
    pub fn record(&mut self, cycle: SimpleCycle<N>) -> bool {
        let len = cycle.len();
        for member in cycle.members() {
            self.girth
                .entry(member.clone())
                .or_insert(Girth::Unresolved)
                .refine(len);
        }
        self.cycles.insert(cycle)
    }

    /// The smallest cycles found so far.
    pub fn cycles(&self) -> &BTreeSet<SimpleCycle<N>> {
        &self.cycles
    }

    fn into_parts(self) -> (HashMap<N, Girth>, BTreeSet<SimpleCycle<N>>) {
        (self.girth, self.cycles)
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Counters collected during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Triangles recorded by the triangle pass.
    pub triangles: usize,
    /// Nodes still unresolved when the residual pass started.
    pub unresolved_after_triangles: usize,
    /// Edges removed and probed for shortest paths.
    pub probed_edges: usize,
    /// Edges skipped by core pruning.
    pub pruned_edges: usize,
    /// Shortest paths enumerated across all probes.
    pub paths: usize,
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct CycleRatioReport<N> {
    cycles: Vec<SimpleCycle<N>>,
    girth: BTreeMap<N, Girth>,
    cycles_of_node: BTreeMap<N, Vec<usize>>,
    cycle_ratio: BTreeMap<N, f64>,
    length_histogram: BTreeMap<usize, usize>,
    stats: RunStats,
}

impl<N: NodeKey> CycleRatioReport<N> {
    /// Every smallest cycle, ordered by sorted member tuple.
    pub fn cycles(&self) -> &[SimpleCycle<N>] {
        &self.cycles
    }

    /// Number of distinct smallest cycles.
    pub fn num_smallest_cycles(&self) -> usize {
        self.cycles.len()
    }

    /// Girth of `node`, or `None` if the node is not in the graph.
    pub fn girth(&self, node: &N) -> Option<Girth> {
        self.girth.get(node).copied()
    }

    /// Girth of every node of the graph.
    pub fn girths(&self) -> &BTreeMap<N, Girth> {
        &self.girth
    }

    /// Indices into [`cycles`](Self::cycles) of the smallest cycles through
    /// `node`. Empty if the node lies on none.
    pub fn cycles_of(&self, node: &N) -> &[usize] {
        self.cycles_of_node.get(node).map_or(&[], Vec::as_slice)
    }

    /// Smallest cycles through `node`.
    pub fn smallest_cycles_of(&self, node: &N) -> Vec<&SimpleCycle<N>> {
        self.cycles_of(node)
            .iter()
            .filter_map(|&idx| self.cycles.get(idx))
            .collect()
    }

    /// Cycle ratio of every node on at least one smallest cycle.
    pub fn cycle_ratio(&self) -> &BTreeMap<N, f64> {
        &self.cycle_ratio
    }

    /// Cycle ratio of `node`, or `None` if it lies on no smallest cycle.
    pub fn ratio_of(&self, node: &N) -> Option<f64> {
        self.cycle_ratio.get(node).copied()
    }

    /// Cycle length → number of smallest cycles of that length.
    pub fn length_histogram(&self) -> &BTreeMap<usize, usize> {
        &self.length_histogram
    }

    /// Counters collected during the run.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Consumes the report, keeping only the scores.
    pub fn into_cycle_ratio(self) -> BTreeMap<N, f64> {
        self.cycle_ratio
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Configured entry point of the algorithm.
///
/// ```
/// use cyclerank_core::{CycleRatioConfig, CycleRatioEngine, SimpleGraph};
///
/// let mut g = SimpleGraph::from_edges([(1u32, 2u32), (2, 3), (3, 4), (4, 1)])?;
/// let report = CycleRatioEngine::new(CycleRatioConfig::default()).run(&mut g)?;
/// assert_eq!(report.num_smallest_cycles(), 1);
/// assert_eq!(report.ratio_of(&1), Some(4.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CycleRatioEngine {
    config: CycleRatioConfig,
    cancel: CancelFlag,
}

impl CycleRatioEngine {
    /// Creates an engine with `config` and a fresh, unset cancel flag.
    pub fn new(config: CycleRatioConfig) -> Self {
        Self {
            config,
            cancel: CancelFlag::new(),
        }
    }

    /// Replaces the cancel flag with `cancel`, usually a clone held by
    /// another thread.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// The configuration this engine runs with.
    pub fn config(&self) -> &CycleRatioConfig {
        &self.config
    }

    /// Runs the full pipeline on `graph`.
    ///
    /// The graph is borrowed mutably for the whole run because edges are
    /// removed and re-inserted while probing. Its edge set is the same on
    /// return as on entry, whether the run succeeds or fails.
    ///
    /// # Errors
    ///
    /// - [`CycleRatioError::Cancelled`] if the cancel flag was set.
    /// - [`CycleRatioError::InvariantViolation`] if cycle bookkeeping broke
    ///   or, with `verify_restoration`, the edge set changed.
    /// - [`CycleRatioError::EdgeNotFound`] / [`CycleRatioError::Graph`] if
    ///   the graph rejected a removal or re-insertion.
    pub fn run<G>(&self, graph: &mut G) -> Result<CycleRatioReport<G::Node>, CycleRatioError>
    where
        G: UndirectedGraph,
    {
        let span = tracing::debug_span!(
            "cycle_ratio",
            nodes = graph.number_of_nodes(),
            edges = graph.number_of_edges()
        );
        let _enter = span.enter();

        let before = self
            .config
            .verify_restoration
            .then(|| graph_fingerprint(graph));

        let searched = self.search(graph);

        if let Some(before) = before {
            let after = graph_fingerprint(graph);
            if after != before {
                tracing::error!(%before, %after, "graph changed during cycle search");
                return Err(CycleRatioError::InvariantViolation(format!(
                    "graph fingerprint changed during the run ({before} -> {after})"
                )));
            }
        }

        let (state, stats) = searched?;
        let (girth, cycle_set) = state.into_parts();
        let cycles: Vec<SimpleCycle<G::Node>> = cycle_set.into_iter().collect();
        let aggregation = aggregate::aggregate(&cycles)?;

        tracing::debug!(
            cycles = cycles.len(),
            scored = aggregation.cycle_ratio.len(),
            "cycle ratio computed"
        );

        Ok(CycleRatioReport {
            cycles,
            girth: girth.into_iter().collect(),
            cycles_of_node: aggregation.cycles_of_node,
            cycle_ratio: aggregation.cycle_ratio,
            length_histogram: aggregation.length_histogram,
            stats,
        })
    }

    fn search<G>(&self, graph: &mut G) -> Result<(SearchState<G::Node>, RunStats), CycleRatioError>
    where
        G: UndirectedGraph,
    {
        self.cancel.check()?;

        let mut state = SearchState::new(graph.nodes());
        let mut stats = RunStats {
            triangles: triangles::detect_triangles(graph, &mut state)?,
            ..RunStats::default()
        };

        residual::find_residual_cycles(graph, &mut state, &self.config, &self.cancel, &mut stats)?;

        Ok((state, stats))
    }
}

// ---------------------------------------------------------------------------
// Convenience entry points
// ---------------------------------------------------------------------------

/// Computes the cycle ratio of every node of `graph` that lies on at least
/// one smallest cycle, with the default configuration.
///
/// # Errors
///
/// See [`CycleRatioEngine::run`].
pub fn cycle_ratio_centrality<G>(graph: &mut G) -> Result<BTreeMap<G::Node, f64>, CycleRatioError>
where
    G: UndirectedGraph,
{
    CycleRatioEngine::default()
        .run(graph)
        .map(CycleRatioReport::into_cycle_ratio)
}

/// Like [`cycle_ratio_centrality`], but runs on a private copy so `graph`
/// can stay shared.
///
/// # Errors
///
/// See [`CycleRatioEngine::run`].
pub fn cycle_ratio_centrality_snapshot<G>(
    graph: &G,
) -> Result<BTreeMap<G::Node, f64>, CycleRatioError>
where
    G: UndirectedGraph + Clone,
{
    let mut copy = graph.clone();
    cycle_ratio_centrality(&mut copy)
}
