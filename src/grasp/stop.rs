//! Stopping criterion for the outer GRASP loop.

use std::time::{Duration, Instant};

use super::config::GraspConfig;

/// Why a GRASP run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The best cost matched the configured target exactly.
    TargetReached,
    /// Elapsed time reached the wall-clock ceiling.
    TimeLimit,
    /// The optional iteration cap was reached.
    IterationLimit,
    /// An external cancellation flag was raised.
    Cancelled,
}

/// Decides whether the outer loop halts, polled once per completed
/// iteration.
///
/// The target check comes first: a run that reaches the known optimum
/// stops there no matter how little time has passed. Otherwise the run
/// halts once the elapsed time is at least the ceiling. The iteration cap
/// is only consulted when configured.
///
/// Each criterion owns its clock, started at construction.
#[derive(Debug, Clone)]
pub struct StoppingCriterion {
    started: Instant,
    time_limit: Duration,
    target_cost: Option<f64>,
    max_iterations: Option<usize>,
}

impl StoppingCriterion {
    /// Creates a criterion with the given ceiling and optional target.
    pub fn new(time_limit: Duration, target_cost: Option<f64>) -> Self {
        Self {
            started: Instant::now(),
            time_limit,
            target_cost,
            max_iterations: None,
        }
    }

    /// Creates a criterion from the run configuration.
    pub fn from_config(config: &GraspConfig) -> Self {
        let mut criterion = Self::new(config.time_limit, config.target_cost);
        criterion.max_iterations = config.max_iterations;
        criterion
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Restarts the clock.
    pub fn restart(&mut self) {
        self.started = Instant::now();
    }

    /// Time since construction or the last [`restart`](Self::restart).
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Returns `true` if the run should halt given the best cost so far.
    pub fn should_stop(&self, best_cost: f64) -> bool {
        self.check(best_cost, 0).is_some()
    }

    /// Checks every halting condition against the current clock.
    pub fn check(&self, best_cost: f64, completed_iterations: usize) -> Option<StopReason> {
        self.check_at(best_cost, completed_iterations, self.elapsed())
    }

    /// Checks every halting condition for a given elapsed time.
    pub fn check_at(
        &self,
        best_cost: f64,
        completed_iterations: usize,
        elapsed: Duration,
    ) -> Option<StopReason> {
        if self.target_cost == Some(best_cost) {
            return Some(StopReason::TargetReached);
        }
        if elapsed >= self.time_limit {
            return Some(StopReason::TimeLimit);
        }
        match self.max_iterations {
            Some(cap) if completed_iterations >= cap => Some(StopReason::IterationLimit),
            _ => None,
        }
    }
}
