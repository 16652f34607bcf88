//! Greedy Randomized Adaptive Search Procedure (GRASP).
//!
//! A multi-start metaheuristic: every iteration builds a solution with a
//! randomized greedy construction and improves it with local search, and
//! the best local optimum over all iterations is returned. The driver is
//! generic; problems plug in through the [`GraspProblem`] strategy trait.
//!
//! # References
//!
//! - Feo, T. A. & Resende, M. G. C. (1995). "Greedy Randomized Adaptive
//!   Search Procedures", *Journal of Global Optimization* 6(2), 109-133.
//! - Resende, M. G. C. & Ribeiro, C. C. (2016). *Optimization by GRASP*,
//!   Springer.

mod config;
mod runner;
mod stop;
mod types;

pub use config::{GraspConfig, LocalSearchMode, RandomPhasePolicy, DEFAULT_TIME_LIMIT};
pub use runner::{GraspResult, GraspRunner};
pub use stop::{StopReason, StoppingCriterion};
pub use types::GraspProblem;
