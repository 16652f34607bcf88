//! Objective function contract consumed by the search.

use crate::solution::Solution;

/// An objective over subsets of the domain `0..domain_size()`.
///
/// Implementors provide two kinds of queries:
///
/// - [`evaluate`](ObjectiveFunction::evaluate) recomputes the objective of
///   a whole selection. It is authoritative and is used to refresh the cached
///   cost after every accepted move.
/// - The `evaluate_*_cost` queries return the cost *change* of a single move
///   without mutating the selection. They are what keeps a local search step
///   cheap, and callers never accumulate them into the cached cost.
///
/// # Minimization
///
/// The search treats negative deltas as improving. Maximization objectives
/// are queried through [`Inverse`](super::Inverse).
pub trait ObjectiveFunction: Send + Sync {
    /// Number of binary decision variables.
    fn domain_size(&self) -> usize;

    /// Full objective value of `solution`.
    fn evaluate(&self, solution: &Solution) -> f64;

    /// Cost change from adding `candidate` to `solution`.
    fn evaluate_insertion_cost(&self, candidate: usize, solution: &Solution) -> f64;

    /// Cost change from removing `candidate` from `solution`.
    fn evaluate_removal_cost(&self, candidate: usize, solution: &Solution) -> f64;

    /// Cost change from removing `candidate_out` and adding `candidate_in`
    /// in one step.
    fn evaluate_exchange_cost(
        &self,
        candidate_in: usize,
        candidate_out: usize,
        solution: &Solution,
    ) -> f64;
}

impl<O: ObjectiveFunction + ?Sized> ObjectiveFunction for &O {
    fn domain_size(&self) -> usize {
        (**self).domain_size()
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        (**self).evaluate(solution)
    }

    fn evaluate_insertion_cost(&self, candidate: usize, solution: &Solution) -> f64 {
        (**self).evaluate_insertion_cost(candidate, solution)
    }

    fn evaluate_removal_cost(&self, candidate: usize, solution: &Solution) -> f64 {
        (**self).evaluate_removal_cost(candidate, solution)
    }

    fn evaluate_exchange_cost(
        &self,
        candidate_in: usize,
        candidate_out: usize,
        solution: &Solution,
    ) -> f64 {
        (**self).evaluate_exchange_cost(candidate_in, candidate_out, solution)
    }
}
