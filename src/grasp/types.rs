//! Strategy trait for GRASP problems.

use super::stop::StopReason;
use crate::qbf::ObjectiveFunction;
use crate::solution::Solution;

/// The problem-specific hooks the generic [`GraspRunner`](super::GraspRunner)
/// drives.
///
/// The runner owns the randomized-greedy construction and the incumbent
/// bookkeeping; everything that depends on the problem's structure
/// (which candidates are legal, how a local optimum is reached, how the next
/// construction is biased, when to halt) is delegated here.
///
/// Costs follow the minimizing convention: lower is better, negative deltas
/// improve.
pub trait GraspProblem {
    /// Objective used to score candidates during construction.
    type Objective: ObjectiveFunction;

    /// The objective function.
    fn objective(&self) -> &Self::Objective;

    /// The unconstrained candidate list: every domain value.
    fn make_candidate_list(&self) -> Vec<usize>;

    /// Recomputes the legal candidates for `solution` into `candidates`.
    fn update_candidate_list(&self, solution: &Solution, candidates: &mut Vec<usize>);

    /// An empty solution with its cost set.
    fn create_empty_solution(&self) -> Solution;

    /// Improves `solution` in place, keeping its cached cost current.
    fn local_search(&mut self, solution: &mut Solution);

    /// Multiplier applied to `candidate`'s insertion delta while building
    /// the solution of iteration `iteration` (the number of completed
    /// iterations so far).
    fn perturbation(&mut self, candidate: usize, iteration: usize) -> f64;

    /// Called once when a run starts, before the first construction.
    ///
    /// Problems that keep a run clock restart it here so the time limit is
    /// measured from the same instant as [`GraspResult::elapsed`](super::GraspResult::elapsed).
    fn start_run(&mut self) {}

    /// Returns why the run should halt, if it should.
    fn stop_reason(&self, best_cost: f64, completed_iterations: usize) -> Option<StopReason>;

    /// Returns `true` if the run should halt.
    fn should_stop(&self, best_cost: f64, completed_iterations: usize) -> bool {
        self.stop_reason(best_cost, completed_iterations).is_some()
    }
}
