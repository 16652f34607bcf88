//! Sign-inverted view of an objective.

use super::types::ObjectiveFunction;
use crate::solution::Solution;

/// Negates every query of the wrapped objective.
///
/// The GRASP driver and local search minimize, so a function that should be
/// maximized is searched through `Inverse`. Costs reported by the search are
/// then the negated objective values.
#[derive(Debug, Clone, PartialEq)]
pub struct Inverse<O> {
    inner: O,
}

impl<O: ObjectiveFunction> Inverse<O> {
    /// Wraps `inner`.
    pub fn new(inner: O) -> Self {
        Self { inner }
    }

    /// The wrapped (non-inverted) objective.
    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// Unwraps the original objective.
    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: ObjectiveFunction> ObjectiveFunction for Inverse<O> {
    fn domain_size(&self) -> usize {
        self.inner.domain_size()
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        -self.inner.evaluate(solution)
    }

    fn evaluate_insertion_cost(&self, candidate: usize, solution: &Solution) -> f64 {
        -self.inner.evaluate_insertion_cost(candidate, solution)
    }

    fn evaluate_removal_cost(&self, candidate: usize, solution: &Solution) -> f64 {
        -self.inner.evaluate_removal_cost(candidate, solution)
    }

    fn evaluate_exchange_cost(
        &self,
        candidate_in: usize,
        candidate_out: usize,
        solution: &Solution,
    ) -> f64 {
        -self
            .inner
            .evaluate_exchange_cost(candidate_in, candidate_out, solution)
    }
}
