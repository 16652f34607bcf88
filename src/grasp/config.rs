//! GRASP run configuration.
//!
//! A [`GraspConfig`] is the whole run-scoped state a solver needs from its
//! caller. It is passed by reference into each solver instance, so sweeps
//! can run many configurations side by side without sharing timers or
//! target values.

use std::time::Duration;

/// Default wall-clock ceiling: 30 minutes.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30 * 60);

/// How the local search decides when to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalSearchMode {
    /// Apply the best improving move of every scan until no improving move
    /// remains (steepest descent to a local optimum).
    #[default]
    BestImproving,
    /// Apply the best improving move of a single scan, then stop.
    FirstImproving,
}

/// Multiplier used by the perturbation policy when `t mod 3 == 2`.
///
/// Two historical versions of the frequency-biased policy disagree on this
/// branch; both are kept, plus a proper uniform draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RandomPhasePolicy {
    /// Always `2.0`.
    #[default]
    Constant,
    /// A fresh draw from `[0, 2)` taken from the run's random stream.
    Uniform,
    /// `2 · u` where `u` is the first draw of a generator reseeded with
    /// `seed` on every call. The multiplier therefore never changes within
    /// or across runs.
    Reseeded {
        /// Seed used on every call.
        seed: u64,
    },
}

/// Configuration parameters for a GRASP run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_grasp::grasp::{GraspConfig, LocalSearchMode};
///
/// let config = GraspConfig::default()
///     .with_alpha(0.8)
///     .with_local_search(LocalSearchMode::FirstImproving)
///     .with_target_cost(-104.0)
///     .with_time_limit(Duration::from_secs(60))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.target_cost, Some(-104.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspConfig {
    /// Greediness of the restricted candidate list, in `[0, 1]`.
    ///
    /// `0.0` is purely greedy, `1.0` purely random.
    pub alpha: f64,

    /// Local search termination mode.
    pub local_search: LocalSearchMode,

    /// Whether frequency-biased perturbation is applied during construction.
    pub perturbation: bool,

    /// Multiplier policy for the free-random phase of the perturbation.
    pub random_phase: RandomPhasePolicy,

    /// Stop as soon as the best cost equals this value exactly.
    ///
    /// Expressed in the minimizing convention of the searched objective
    /// (for an inverted QBF, the negated maximum).
    pub target_cost: Option<f64>,

    /// Wall-clock ceiling for the run.
    ///
    /// Checked between iterations, so a run can overshoot by up to one
    /// construction plus local search.
    pub time_limit: Duration,

    /// Optional cap on completed iterations. `None` disables it.
    pub max_iterations: Option<usize>,

    /// A move is improving when its delta is below `-improvement_tolerance`.
    pub improvement_tolerance: f64,

    /// Random seed (`None` for a random seed).
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            local_search: LocalSearchMode::BestImproving,
            perturbation: true,
            random_phase: RandomPhasePolicy::Constant,
            target_cost: None,
            time_limit: DEFAULT_TIME_LIMIT,
            max_iterations: None,
            improvement_tolerance: 1e-9,
            seed: None,
        }
    }
}

impl GraspConfig {
    /// Sets the RCL greediness parameter.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the local search mode.
    pub fn with_local_search(mut self, mode: LocalSearchMode) -> Self {
        self.local_search = mode;
        self
    }

    /// Enables or disables frequency-biased perturbation.
    pub fn with_perturbation(mut self, enabled: bool) -> Self {
        self.perturbation = enabled;
        self
    }

    /// Sets the multiplier policy for the free-random phase.
    pub fn with_random_phase(mut self, policy: RandomPhasePolicy) -> Self {
        self.random_phase = policy;
        self
    }

    /// Sets the target cost.
    pub fn with_target_cost(mut self, target: f64) -> Self {
        self.target_cost = Some(target);
        self
    }

    /// Sets the wall-clock ceiling.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    pub fn with_improvement_tolerance(mut self, tolerance: f64) -> Self {
        self.improvement_tolerance = tolerance;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(format!("alpha must be in [0, 1], got {}", self.alpha));
        }
        if !self.improvement_tolerance.is_finite() || self.improvement_tolerance < 0.0 {
            return Err(format!(
                "improvement_tolerance must be finite and non-negative, got {}",
                self.improvement_tolerance
            ));
        }
        if let Some(target) = self.target_cost {
            if !target.is_finite() {
                return Err(format!("target_cost must be finite, got {target}"));
            }
        }
        if self.max_iterations == Some(0) {
            return Err("max_iterations must be positive".into());
        }
        Ok(())
    }
}
