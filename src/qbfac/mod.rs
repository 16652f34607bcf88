//! GRASP for QBF with adjacency constraints (QBFAC).
//!
//! Maximizes a quadratic binary function over selections in which no two
//! chosen indices are consecutive integers.
//!
//! # Components
//!
//! - [`CandidateManager`]: the legal insertion candidates of a selection.
//! - [`LocalSearchEngine`]: steepest descent over Insertion, Removal and
//!   2-Exchange moves with incremental evaluation.
//! - [`FrequencyTable`] / [`Perturbation`]: long-term memory of selected
//!   values and the rotating construction bias computed from it.
//! - [`QbfacGrasp`]: the [`GraspProblem`](crate::grasp::GraspProblem)
//!   implementation tying them to an objective.
//!
//! # Example
//!
//! ```
//! use u_grasp::grasp::{GraspConfig, GraspRunner};
//! use u_grasp::qbf::{Inverse, Qbf};
//! use u_grasp::qbfac::QbfacGrasp;
//!
//! let qbf = Qbf::zeros(5)
//!     .with_coefficient(0, 0, 1.0)
//!     .with_coefficient(2, 2, 1.0)
//!     .with_coefficient(0, 2, 10.0);
//! let config = GraspConfig::default().with_max_iterations(20).with_seed(42);
//! let mut solver = QbfacGrasp::new(Inverse::new(qbf), &config);
//!
//! let result = GraspRunner::run(&mut solver, &config);
//! assert!(result.best.is_adjacency_feasible());
//! assert_eq!(result.best_cost, -12.0);
//! ```

mod candidates;
mod local_search;
mod perturbation;
mod solver;

pub use candidates::CandidateManager;
pub use local_search::{LocalSearchEngine, LocalSearchStats, Move};
pub use perturbation::{FrequencyTable, Perturbation};
pub use solver::{solve_file, QbfacGrasp};
