//! Batch runs over instances and configurations.
//!
//! Every [`SweepRun`] loads its own instance and builds its own solver, so
//! runs share nothing: no timer, no frequency table, no target. With the
//! `parallel` feature they execute on the rayon thread pool.

use std::path::{Path, PathBuf};

use crate::grasp::{GraspConfig, GraspResult, LocalSearchMode};
use crate::qbf::InstanceError;
use crate::qbfac::solve_file;

/// One instance/configuration pair of a sweep.
#[derive(Debug, Clone)]
pub struct SweepRun {
    /// Human-readable name reported with the outcome.
    pub label: String,
    /// Path of the QBF instance file.
    pub instance: PathBuf,
    /// Configuration of this run only.
    pub config: GraspConfig,
}

impl SweepRun {
    /// Creates a run.
    pub fn new(label: impl Into<String>, instance: impl Into<PathBuf>, config: GraspConfig) -> Self {
        Self {
            label: label.into(),
            instance: instance.into(),
            config,
        }
    }
}

/// Result of one [`SweepRun`].
#[derive(Debug)]
pub struct SweepOutcome {
    /// Label of the originating run.
    pub label: String,
    /// Instance path of the originating run.
    pub instance: PathBuf,
    /// The run result, or the error that kept the instance from loading.
    pub result: Result<GraspResult, InstanceError>,
}

impl SweepOutcome {
    /// Best QBF value found, in the maximization sign.
    pub fn best_value(&self) -> Option<f64> {
        self.result.as_ref().ok().map(|r| -r.best_cost)
    }
}

/// Executes every run and returns the outcomes in input order.
///
/// A run whose instance fails to load yields an `Err` outcome; the others
/// are unaffected.
///
/// # Panics
///
/// Panics if any run carries an invalid configuration.
pub fn run_sweep(runs: &[SweepRun]) -> Vec<SweepOutcome> {
    tracing::info!(runs = runs.len(), "starting sweep");

    #[cfg(feature = "parallel")]
    let outcomes = {
        use rayon::prelude::*;
        runs.par_iter().map(execute).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let outcomes = runs.iter().map(execute).collect();

    outcomes
}

fn execute(run: &SweepRun) -> SweepOutcome {
    let result = solve_file(&run.instance, &run.config);
    match &result {
        Ok(r) => tracing::info!(
            label = %run.label,
            best = -r.best_cost,
            iterations = r.iterations,
            stop = ?r.stop_reason,
            "run finished"
        ),
        Err(e) => tracing::warn!(label = %run.label, error = %e, "run skipped"),
    }
    SweepOutcome {
        label: run.label.clone(),
        instance: run.instance.clone(),
        result,
    }
}

/// The eight-run study grid for one instance.
///
/// Crosses α ∈ {0.2, 0.8}, best/first-improving local search and
/// perturbation on/off, all sharing `base` otherwise. `target` is the known
/// optimum in the maximization sign, if any.
pub fn standard_grid<P: AsRef<Path>>(instance: P, target: Option<f64>, base: &GraspConfig) -> Vec<SweepRun> {
    let instance = instance.as_ref();
    let mut runs = Vec::with_capacity(8);
    for alpha in [0.2, 0.8] {
        for mode in [LocalSearchMode::BestImproving, LocalSearchMode::FirstImproving] {
            for perturbation in [true, false] {
                let mut config = base
                    .clone()
                    .with_alpha(alpha)
                    .with_local_search(mode)
                    .with_perturbation(perturbation);
                config.target_cost = target.map(|t| -t);

                let label = format!(
                    "{}:alpha={alpha:.1}:{}:{}",
                    instance.display(),
                    match mode {
                        LocalSearchMode::BestImproving => "best",
                        LocalSearchMode::FirstImproving => "first",
                    },
                    if perturbation { "perturbed" } else { "plain" },
                );
                runs.push(SweepRun::new(label, instance, config));
            }
        }
    }
    runs
}
