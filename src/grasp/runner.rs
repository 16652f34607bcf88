//! GRASP execution engine.
//!
//! # Algorithm
//!
//! 1. Until the stopping criterion fires:
//!    a. **Construction**: starting from the empty solution, repeatedly
//!    score every legal candidate by its (perturbation-weighted) insertion
//!    delta, keep those within `α` of the best score as the restricted
//!    candidate list, and add one of them at random. Construction stops
//!    when no candidate is left or an addition fails to lower the cost.
//!    b. **Local search**: hand the constructed solution to the problem's
//!    local search.
//!    c. **Incumbent update**: keep the result if it is strictly better than
//!    the best so far.
//! 2. Return the best solution found.
//!
//! # Reference
//!
//! Feo, T. A. & Resende, M. G. C. (1995). "Greedy Randomized Adaptive Search
//! Procedures", *Journal of Global Optimization* 6(2), 109-133.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::GraspConfig;
use super::stop::StopReason;
use super::types::GraspProblem;
use crate::qbf::ObjectiveFunction;
use crate::solution::Solution;

/// Result of a GRASP run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspResult {
    /// Best solution found (after local search).
    pub best: Solution,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Best solution produced by construction alone, before local search.
    pub best_constructed: Solution,
    /// Number of completed iterations.
    pub iterations: usize,
    /// Iteration (1-based) at which the best solution was found; 0 if none.
    pub best_iteration: usize,
    /// Best cost after each completed iteration.
    pub cost_history: Vec<f64>,
    /// Wall-clock time spent in the run.
    pub elapsed: Duration,
    /// Why the run ended.
    pub stop_reason: StopReason,
}

/// GRASP runner.
pub struct GraspRunner;

impl GraspRunner {
    /// Executes GRASP on the given problem.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (call [`GraspConfig::validate`]
    /// first to get a descriptive error).
    pub fn run<P: GraspProblem>(problem: &mut P, config: &GraspConfig) -> GraspResult {
        Self::run_with_cancel(problem, config, None)
    }

    /// Executes GRASP with an optional cancellation token.
    ///
    /// The flag is polled before each iteration; an iteration in progress
    /// always completes.
    #[tracing::instrument(level = "debug", name = "GRASP", skip_all, fields(alpha = config.alpha))]
    pub fn run_with_cancel<P: GraspProblem>(
        problem: &mut P,
        config: &GraspConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> GraspResult {
        config.validate().expect("invalid GraspConfig");

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        problem.start_run();
        let started = Instant::now();
        let mut best: Option<Solution> = None;
        let mut best_constructed: Option<Solution> = None;
        let mut best_iteration = 0;
        let mut cost_history = Vec::new();
        let mut iteration = 0usize;

        tracing::info!(
            domain_size = problem.objective().domain_size(),
            "starting GRASP"
        );

        let stop_reason = loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break StopReason::Cancelled;
                }
            }

            let mut solution = construct(problem, config.alpha, iteration, &mut rng);
            tracing::trace!(
                iteration,
                size = solution.len(),
                cost = solution.cost,
                "constructed solution"
            );

            if best_constructed
                .as_ref()
                .is_none_or(|b| solution.cost < b.cost)
            {
                best_constructed = Some(solution.clone());
            }

            problem.local_search(&mut solution);
            iteration += 1;

            if best.as_ref().is_none_or(|b| solution.cost < b.cost) {
                tracing::debug!(
                    iteration,
                    cost = solution.cost,
                    size = solution.len(),
                    "new incumbent"
                );
                best = Some(solution);
                best_iteration = iteration;
            }

            let best_cost = best.as_ref().map_or(0.0, |b| b.cost);
            cost_history.push(best_cost);

            if let Some(reason) = problem.stop_reason(best_cost, iteration) {
                break reason;
            }
        };

        let best = best.unwrap_or_else(|| problem.create_empty_solution());
        let best_constructed = best_constructed.unwrap_or_else(|| problem.create_empty_solution());
        let elapsed = started.elapsed();

        tracing::info!(
            iterations = iteration,
            best_cost = best.cost,
            ?stop_reason,
            elapsed_ms = elapsed.as_millis() as u64,
            "GRASP finished"
        );

        GraspResult {
            best_cost: best.cost,
            best,
            best_constructed,
            iterations: iteration,
            best_iteration,
            cost_history,
            elapsed,
            stop_reason,
        }
    }
}

/// Randomized-greedy construction of one solution.
fn construct<P: GraspProblem, R: Rng>(
    problem: &mut P,
    alpha: f64,
    iteration: usize,
    rng: &mut R,
) -> Solution {
    let mut candidates = problem.make_candidate_list();
    let mut solution = problem.create_empty_solution();
    let mut scored: Vec<(usize, f64)> = Vec::with_capacity(candidates.len());
    let mut rcl: Vec<usize> = Vec::with_capacity(candidates.len());

    loop {
        let previous_cost = solution.cost;
        problem.update_candidate_list(&solution, &mut candidates);
        if candidates.is_empty() {
            break;
        }

        scored.clear();
        let mut min_cost = f64::INFINITY;
        let mut max_cost = f64::NEG_INFINITY;
        for &c in &candidates {
            let delta = problem.objective().evaluate_insertion_cost(c, &solution);
            let biased = delta * problem.perturbation(c, iteration);
            min_cost = min_cost.min(biased);
            max_cost = max_cost.max(biased);
            scored.push((c, biased));
        }

        let threshold = min_cost + alpha * (max_cost - min_cost);
        rcl.clear();
        rcl.extend(
            scored
                .iter()
                .filter(|&&(_, cost)| cost <= threshold)
                .map(|&(c, _)| c),
        );
        // Only NaN scores can leave the list empty.
        if rcl.is_empty() {
            break;
        }

        let chosen = rcl[rng.random_range(0..rcl.len())];
        solution.add(chosen);
        solution.cost = problem.objective().evaluate(&solution);

        if solution.cost >= previous_cost {
            break;
        }
    }

    solution
}
