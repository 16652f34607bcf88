//! Quadratic Binary Functions (QBF).
//!
//! The objective side of the solver: a [`Qbf`] evaluates `xᵀ A x` for a
//! selection of binary variables and answers incremental move queries
//! through the [`ObjectiveFunction`] trait. [`Inverse`] flips the sign so
//! the maximization problem can be handed to a minimizing search.
//!
//! # References
//!
//! - Kochenberger, G. et al. (2014). "The unconstrained binary quadratic
//!   programming problem: a survey", *Journal of Combinatorial Optimization*
//!   28(1), 58-81.

mod instance;
mod inverse;
mod matrix;
mod types;

pub use instance::{load_qbf, parse_qbf, InstanceError};
pub use inverse::Inverse;
pub use matrix::Qbf;
pub use types::ObjectiveFunction;
