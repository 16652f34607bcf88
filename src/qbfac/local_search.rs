//! Steepest-descent local search over Insertion, Removal and 2-Exchange.
//!
//! # Algorithm
//!
//! 1. Recompute the legal candidates of the current selection.
//! 2. Scan, in this order, and keep the move with the smallest delta
//!    (the first one wins ties):
//!    a. every insertion of a candidate;
//!    b. every removal of a selected value;
//!    c. for every selected value `v`: the exchanges `v → v−1` (when `v−2`
//!    is not selected) and `v → v+1` (when `v+2` is not selected), then
//!    `v → c` for every candidate `c`.
//! 3. If the best delta is below `-tolerance`, apply it, refresh the cost
//!    with a full evaluation and go back to 1. Otherwise stop.
//!
//! Each step costs `O(n · |S|)` for the candidate refresh plus
//! `O(|candidates| · |S|²)` incremental queries; the quadratic form is only
//! evaluated in full once per accepted move.

use super::candidates::CandidateManager;
use super::perturbation::FrequencyTable;
use crate::grasp::LocalSearchMode;
use crate::qbf::ObjectiveFunction;
use crate::solution::Solution;

/// A neighborhood move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Add a candidate.
    Insert(usize),
    /// Drop a selected value.
    Remove(usize),
    /// Drop `outgoing` and add `incoming` in one step.
    Exchange { incoming: usize, outgoing: usize },
}

impl Move {
    /// Applies the move to `solution` without touching its cost.
    pub fn apply(self, solution: &mut Solution) {
        match self {
            Move::Insert(c) => {
                solution.add(c);
            }
            Move::Remove(v) => {
                solution.remove(v);
            }
            Move::Exchange { incoming, outgoing } => {
                solution.remove(outgoing);
                solution.add(incoming);
            }
        }
    }
}

/// Counters for one local search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalSearchStats {
    /// Neighborhood scans performed.
    pub scans: usize,
    /// Accepted insertions.
    pub insertions: usize,
    /// Accepted removals.
    pub removals: usize,
    /// Accepted 2-exchanges.
    pub exchanges: usize,
}

impl LocalSearchStats {
    /// Total accepted moves.
    pub fn moves(&self) -> usize {
        self.insertions + self.removals + self.exchanges
    }

    fn record(&mut self, mv: Move) {
        match mv {
            Move::Insert(_) => self.insertions += 1,
            Move::Remove(_) => self.removals += 1,
            Move::Exchange { .. } => self.exchanges += 1,
        }
    }
}

/// Local search engine for adjacency-constrained selections.
///
/// The engine minimizes: pass a sign-inverted objective for maximization.
#[derive(Debug, Clone)]
pub struct LocalSearchEngine<O> {
    objective: O,
    candidates: CandidateManager,
    mode: LocalSearchMode,
    tolerance: f64,
}

impl<O: ObjectiveFunction> LocalSearchEngine<O> {
    /// Creates a best-improving engine with tolerance `1e-9`.
    pub fn new(objective: O) -> Self {
        let candidates = CandidateManager::new(objective.domain_size());
        Self {
            objective,
            candidates,
            mode: LocalSearchMode::BestImproving,
            tolerance: 1e-9,
        }
    }

    /// Sets the termination mode.
    pub fn with_mode(mut self, mode: LocalSearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// A delta counts as improving only when below `-tolerance`.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The objective the engine queries.
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Improves `solution` in place until no improving move remains (or
    /// after one move in [`LocalSearchMode::FirstImproving`]), then records
    /// the final selection in `frequency`.
    ///
    /// `solution` must satisfy the adjacency constraint on entry; it does
    /// after every accepted move.
    pub fn improve(&self, solution: &mut Solution, frequency: &mut FrequencyTable) -> LocalSearchStats {
        let mut stats = LocalSearchStats::default();
        let mut candidates = Vec::with_capacity(self.candidates.domain_size());

        loop {
            self.candidates.refresh_into(solution, &mut candidates);
            stats.scans += 1;

            let Some((mv, delta)) = self.best_move(solution, &candidates) else {
                break;
            };
            if delta >= -self.tolerance {
                break;
            }

            mv.apply(solution);
            solution.cost = self.objective.evaluate(solution);
            stats.record(mv);
            debug_assert!(
                solution.is_adjacency_feasible(),
                "{mv:?} broke the adjacency constraint: {:?}",
                solution.elements()
            );
            tracing::trace!(?mv, delta, cost = solution.cost, "accepted move");

            if self.mode == LocalSearchMode::FirstImproving {
                break;
            }
        }

        frequency.record(solution);
        stats
    }

    /// Returns `true` if no move improves `solution` beyond the tolerance.
    pub fn is_local_optimum(&self, solution: &Solution) -> bool {
        let candidates = self.candidates.refresh(solution);
        self.best_move(solution, &candidates)
            .is_none_or(|(_, delta)| delta >= -self.tolerance)
    }

    /// The move with the smallest delta, scanning in the documented order.
    ///
    /// `candidates` must be the refreshed candidate list of `solution`.
    pub fn best_move(&self, solution: &Solution, candidates: &[usize]) -> Option<(Move, f64)> {
        let mut best = BestMove::default();
        let n = self.candidates.domain_size();

        for &c in candidates {
            let delta = self.objective.evaluate_insertion_cost(c, solution);
            best.offer(Move::Insert(c), delta);
        }

        for &v in solution.elements() {
            let delta = self.objective.evaluate_removal_cost(v, solution);
            best.offer(Move::Remove(v), delta);
        }

        for &out in solution.elements() {
            if out >= 1 && (out < 2 || !solution.contains(out - 2)) {
                self.offer_exchange(&mut best, out - 1, out, solution);
            }
            if out + 1 < n && !solution.contains(out + 2) {
                self.offer_exchange(&mut best, out + 1, out, solution);
            }
            for &c in candidates {
                self.offer_exchange(&mut best, c, out, solution);
            }
        }

        best.into_inner()
    }

    fn offer_exchange(&self, best: &mut BestMove, incoming: usize, outgoing: usize, solution: &Solution) {
        let delta = self
            .objective
            .evaluate_exchange_cost(incoming, outgoing, solution);
        best.offer(Move::Exchange { incoming, outgoing }, delta);
    }
}

/// Running minimum over offered moves; NaN deltas are never kept.
struct BestMove {
    mv: Option<Move>,
    delta: f64,
}

impl Default for BestMove {
    fn default() -> Self {
        Self {
            mv: None,
            delta: f64::INFINITY,
        }
    }
}

impl BestMove {
    fn offer(&mut self, mv: Move, delta: f64) {
        if delta < self.delta {
            self.mv = Some(mv);
            self.delta = delta;
        }
    }

    fn into_inner(self) -> Option<(Move, f64)> {
        self.mv.map(|mv| (mv, self.delta))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::qbf::{Inverse, Qbf};
    use proptest::prelude::*;

    fn instance() -> impl Strategy<Value = Qbf> {
        (0usize..12).prop_flat_map(|n| {
            prop::collection::vec(-10i32..10, n * n).prop_map(move |values| {
                let mut qbf = Qbf::zeros(n);
                for i in 0..n {
                    for j in i..n {
                        qbf.set(i, j, values[i * n + j] as f64);
                    }
                }
                qbf
            })
        })
    }

    /// A feasible selection built greedily from a random mask.
    fn feasible_start(n: usize, mask: &[bool]) -> Solution {
        let mut s = Solution::new();
        let cm = CandidateManager::new(n);
        for i in 0..n {
            if mask.get(i).copied().unwrap_or(false) && cm.is_candidate(i, &s) {
                s.add(i);
            }
        }
        s
    }

    /// Every feasible selection one Insert, Remove or Exchange away from `s`,
    /// built by mutating a copy.
    fn feasible_neighbors(n: usize, s: &Solution) -> Vec<Solution> {
        let mut neighbors = Vec::new();
        for i in (0..n).filter(|&i| !s.contains(i)) {
            let mut inserted = s.clone();
            inserted.add(i);
            neighbors.push(inserted);
        }
        for &v in s.elements() {
            let mut removed = s.clone();
            removed.remove(v);
            neighbors.push(removed.clone());
            for i in (0..n).filter(|&i| !s.contains(i)) {
                let mut swapped = removed.clone();
                swapped.add(i);
                neighbors.push(swapped);
            }
        }
        neighbors.retain(Solution::is_adjacency_feasible);
        neighbors
    }

    proptest! {
        #[test]
        fn candidate_set_matches_definition(
            n in 0usize..30,
            mask in prop::collection::vec(any::<bool>(), 30),
        ) {
            let s = feasible_start(n, &mask);
            let cm = CandidateManager::new(n);
            let expected: Vec<usize> = (0..n)
                .filter(|&i| {
                    !s.contains(i)
                        && !(i > 0 && s.contains(i - 1))
                        && !s.contains(i + 1)
                })
                .collect();
            prop_assert_eq!(cm.refresh(&s), expected.clone());
            prop_assert_eq!(cm.refresh(&s), expected);
        }

        #[test]
        fn local_search_reaches_feasible_consistent_optimum(
            qbf in instance(),
            mask in prop::collection::vec(any::<bool>(), 12),
        ) {
            let n = qbf.domain_size();
            let e = LocalSearchEngine::new(Inverse::new(qbf));
            let mut s = feasible_start(n, &mask);
            prop_assert!(s.is_adjacency_feasible());
            s.cost = e.objective().evaluate(&s);
            let start_cost = s.cost;
            let mut freq = FrequencyTable::new(n);

            e.improve(&mut s, &mut freq);

            prop_assert!(s.is_adjacency_feasible());
            prop_assert!((s.cost - e.objective().evaluate(&s)).abs() < 1e-9);
            prop_assert!(s.cost <= start_cost + 1e-9);
            prop_assert!(e.is_local_optimum(&s));
            for neighbor in feasible_neighbors(n, &s) {
                let cost = e.objective().evaluate(&neighbor);
                prop_assert!(
                    cost >= s.cost - 1e-6,
                    "{:?} improves on {:?}: {} < {}",
                    neighbor.elements(), s.elements(), cost, s.cost
                );
            }
        }

        #[test]
        fn every_accepted_move_keeps_invariants(
            qbf in instance(),
            mask in prop::collection::vec(any::<bool>(), 12),
        ) {
            let n = qbf.domain_size();
            let e = LocalSearchEngine::new(Inverse::new(qbf))
                .with_mode(LocalSearchMode::FirstImproving);
            let mut s = feasible_start(n, &mask);
            s.cost = e.objective().evaluate(&s);
            let mut freq = FrequencyTable::new(n);

            // Step one move at a time and check after each.
            for _ in 0..(4 * n + 4) {
                let stats = e.improve(&mut s, &mut freq);
                prop_assert!(s.is_adjacency_feasible());
                prop_assert!((s.cost - e.objective().evaluate(&s)).abs() < 1e-9);
                if stats.moves() == 0 {
                    break;
                }
            }
        }

        #[test]
        fn frequency_sum_equals_selection_sizes(
            qbf in instance(),
            masks in prop::collection::vec(prop::collection::vec(any::<bool>(), 12), 1..6),
        ) {
            let n = qbf.domain_size();
            let e = LocalSearchEngine::new(Inverse::new(qbf));
            let mut freq = FrequencyTable::new(n);
            let mut sizes = 0u64;
            let mut previous = freq.counts().to_vec();

            for mask in &masks {
                let mut s = feasible_start(n, mask);
                s.cost = e.objective().evaluate(&s);
                e.improve(&mut s, &mut freq);
                sizes += s.len() as u64;

                for (now, before) in freq.counts().iter().zip(&previous) {
                    prop_assert!(now >= before);
                }
                previous = freq.counts().to_vec();
            }

            prop_assert_eq!(freq.total(), sizes);
            prop_assert_eq!(freq.records(), masks.len() as u64);
        }
    }
}
