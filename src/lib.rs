//! GRASP for quadratic binary functions under adjacency constraints.
//!
//! Maximizes `f(x) = xᵀAx` over binary vectors in which no two adjacent
//! positions are both set (QBFAC):
//!
//! - **[`grasp`]**: a generic GRASP driver (randomized greedy construction
//!   with a restricted candidate list, local search, multi-start) that
//!   problems plug into through the [`grasp::GraspProblem`] trait.
//! - **[`qbf`]**: the quadratic objective, its incremental insertion,
//!   removal and exchange deltas, and the instance file loader.
//! - **[`qbfac`]**: the adjacency-constrained candidate list, steepest
//!   descent local search and frequency-biased perturbation.
//! - **[`sweep`]**: batch runs over instance/configuration grids, in
//!   parallel with the `parallel` feature.
//!
//! # Conventions
//!
//! The search minimizes. A QBF to be maximized is wrapped in
//! [`qbf::Inverse`], so reported costs and `target_cost` are negated
//! values.
//!
//! # Example
//!
//! ```
//! use u_grasp::grasp::{GraspConfig, GraspRunner};
//! use u_grasp::qbf::{parse_qbf, Inverse};
//! use u_grasp::qbfac::QbfacGrasp;
//!
//! let qbf = parse_qbf("3\n1 0 5\n-1 0\n1\n").unwrap();
//! let config = GraspConfig::default().with_max_iterations(10).with_seed(1);
//! let mut solver = QbfacGrasp::new(Inverse::new(qbf), &config);
//!
//! let result = GraspRunner::run(&mut solver, &config);
//! assert_eq!(result.best.sorted_elements(), vec![0, 2]);
//! assert_eq!(-result.best_cost, 7.0);
//! ```

pub mod grasp;
pub mod qbf;
pub mod qbfac;
pub mod solution;
pub mod sweep;

pub use solution::Solution;
