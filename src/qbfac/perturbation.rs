//! Frequency memory and the construction bias derived from it.
//!
//! Every completed local search records which values ended up selected.
//! The next constructions scale each candidate's insertion delta by a
//! multiplier that rotates through three phases with the iteration index
//! `t`:
//!
//! | `t mod 3` | multiplier | effect |
//! |---|---|---|
//! | 1 | `1.25 + 0.75 · f/t` | reward values that were often selected |
//! | 0 | `2 − 0.75 · f/t` | penalize them, push toward rarely used values |
//! | 2 | see [`RandomPhasePolicy`] | ignore the memory |
//!
//! For `t < 3`, or when the bias is disabled, the multiplier is `1.0`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grasp::RandomPhasePolicy;
use crate::solution::Solution;

/// Per-value count of local searches whose final selection contained it.
///
/// Allocated once per run and only ever incremented.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrequencyTable {
    counts: Vec<u64>,
    records: u64,
}

impl FrequencyTable {
    /// A zeroed table over `domain_size` values.
    pub fn new(domain_size: usize) -> Self {
        Self {
            counts: vec![0; domain_size],
            records: 0,
        }
    }

    /// Increments the count of every value in `solution`.
    pub fn record(&mut self, solution: &Solution) {
        for &v in solution.elements() {
            self.counts[v] += 1;
        }
        self.records += 1;
    }

    /// Count for `value`.
    pub fn get(&self, value: usize) -> u64 {
        self.counts[value]
    }

    /// Counts for every value, indexed by value.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Number of recorded solutions.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Computes the construction multiplier for a candidate.
#[derive(Debug, Clone)]
pub struct Perturbation {
    enabled: bool,
    random_phase: RandomPhasePolicy,
    rng: StdRng,
}

impl Perturbation {
    /// Creates the policy. `seed` drives [`RandomPhasePolicy::Uniform`].
    pub fn new(enabled: bool, random_phase: RandomPhasePolicy, seed: u64) -> Self {
        Self {
            enabled,
            random_phase,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Whether the bias is applied at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Multiplier for a value selected `frequency` times, at iteration `t`.
    pub fn bias(&mut self, frequency: u64, iteration: usize) -> f64 {
        if !self.enabled || iteration < 3 {
            return 1.0;
        }
        let share = frequency as f64 / iteration as f64;
        match iteration % 3 {
            1 => 1.25 + 0.75 * share,
            0 => 2.0 - 0.75 * share,
            _ => match self.random_phase {
                RandomPhasePolicy::Constant => 2.0,
                RandomPhasePolicy::Uniform => self.rng.random_range(0.0..2.0),
                RandomPhasePolicy::Reseeded { seed } => {
                    2.0 * StdRng::seed_from_u64(seed).random::<f64>()
                }
            },
        }
    }
}
