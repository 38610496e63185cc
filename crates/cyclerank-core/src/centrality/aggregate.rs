//! Third pass: per-node cycle membership and the cycle ratio score.
//!
//! For a node `x` on at least one smallest cycle, let `occ(n)` count the
//! smallest cycles of `x` that also contain `n`. Then
//!
//! ```text
//! ratio(x) = 1 + Σ_{n ≠ x} occ(n) / |cycles(n)|
//! ```
//!
//! Co-occurring nodes are summed in sorted order, so the floating-point
//! result is the same on every run.
use std::collections::BTreeMap;

use crate::cycle::SimpleCycle;
use crate::error::CycleRatioError;
use crate::graph::{NodeKey, render};

/// Output of [`aggregate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation<N> {
    /// Node → indices of the cycles it lies on. Nodes on no cycle are absent.
    pub cycles_of_node: BTreeMap<N, Vec<usize>>,
    /// Node → cycle ratio, for every key of `cycles_of_node`.
    pub cycle_ratio: BTreeMap<N, f64>,
    /// Cycle length → number of cycles of that length.
    pub length_histogram: BTreeMap<usize, usize>,
}

/// Groups `cycles` per member node and computes every node's cycle ratio.
///
/// # Errors
///
/// [`CycleRatioError::InvariantViolation`] if a co-occurring node has no
/// cycle of its own, which the grouping makes impossible.
pub fn aggregate<N: NodeKey>(cycles: &[SimpleCycle<N>]) -> Result<Aggregation<N>, CycleRatioError> {
    let mut cycles_of_node: BTreeMap<N, Vec<usize>> = BTreeMap::new();
    let mut length_histogram: BTreeMap<usize, usize> = BTreeMap::new();

    for (idx, cycle) in cycles.iter().enumerate() {
        *length_histogram.entry(cycle.len()).or_insert(0) += 1;
        for member in cycle.members() {
            cycles_of_node.entry(member.clone()).or_default().push(idx);
        }
    }

    let mut cycle_ratio = BTreeMap::new();
    for (node, indices) in &cycles_of_node {
        let mut occurrences: BTreeMap<&N, usize> = BTreeMap::new();
        for cycle in indices.iter().filter_map(|&idx| cycles.get(idx)) {
            for member in cycle.members().iter().filter(|m| *m != node) {
                *occurrences.entry(member).or_insert(0) += 1;
            }
        }

        let mut ratio = 1.0;
        for (neighbour, count) in occurrences {
            let denominator = cycles_of_node.get(neighbour).map_or(0, Vec::len);
            debug_assert!(denominator > 0, "co-occurring node {neighbour:?} has no cycles");
            if denominator == 0 {
                return Err(CycleRatioError::InvariantViolation(format!(
                    "node {} shares a cycle with {} but has no cycles of its own",
                    render(neighbour),
                    render(node)
                )));
            }
            ratio += count as f64 / denominator as f64;
        }
        cycle_ratio.insert(node.clone(), ratio);
    }

    Ok(Aggregation {
        cycles_of_node,
        cycle_ratio,
        length_histogram,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn cycles(sets: &[&[u32]]) -> Vec<SimpleCycle<u32>> {
        sets.iter()
            .map(|s| SimpleCycle::from_walk(s.to_vec()).expect("valid"))
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn empty_input_scores_nothing() {
        let agg = aggregate::<u32>(&[]).expect("aggregates");
        assert!(agg.cycle_ratio.is_empty());
        assert!(agg.cycles_of_node.is_empty());
        assert!(agg.length_histogram.is_empty());
    }

    #[test]
    fn lone_cycle_scores_its_length() {
        let agg = aggregate(&cycles(&[&[1, 2, 3, 4, 5]])).expect("aggregates");
        for n in 1..=5 {
            assert!(close(agg.cycle_ratio[&n], 5.0));
        }
        assert_eq!(agg.length_histogram.get(&5), Some(&1));
    }

    #[test]
    fn k4_with_pendant_triangle() {
        let agg = aggregate(&cycles(&[
            &[1, 2, 3],
            &[1, 2, 4],
            &[1, 3, 4],
            &[2, 3, 4],
            &[1, 2, 5],
        ]))
        .expect("aggregates");

        let hub = 1.0 + 3.0 / 4.0 + 2.0 / 3.0 + 2.0 / 3.0 + 1.0;
        assert!(close(agg.cycle_ratio[&1], hub));
        assert!(close(agg.cycle_ratio[&2], hub));
        assert!(close(agg.cycle_ratio[&3], 1.0 + 0.5 + 0.5 + 2.0 / 3.0));
        assert!(close(agg.cycle_ratio[&5], 1.5));
        assert_eq!(agg.cycles_of_node[&1].len(), 4);
        assert_eq!(agg.cycles_of_node[&5], vec![4]);
        assert_eq!(agg.length_histogram.get(&3), Some(&5));
    }

    #[test]
    fn nodes_off_every_cycle_are_absent() {
        let agg = aggregate(&cycles(&[&[1, 2, 3]])).expect("aggregates");
        assert!(!agg.cycle_ratio.contains_key(&4));
        assert!(!agg.cycles_of_node.contains_key(&4));
    }

    #[test]
    fn every_score_is_at_least_one() {
        let agg = aggregate(&cycles(&[&[1, 2, 3], &[3, 4, 5, 6], &[6, 7, 8]])).expect("aggregates");
        assert!(agg.cycle_ratio.values().all(|&r| r >= 1.0));
        assert_eq!(agg.length_histogram.get(&3), Some(&2));
        assert_eq!(agg.length_histogram.get(&4), Some(&1));
    }
}
