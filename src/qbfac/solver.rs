//! GRASP solver for QBF with adjacency constraints.

use std::path::Path;

use super::candidates::CandidateManager;
use super::local_search::{LocalSearchEngine, LocalSearchStats};
use super::perturbation::{FrequencyTable, Perturbation};
use crate::grasp::{
    GraspConfig, GraspProblem, GraspResult, GraspRunner, LocalSearchMode, StopReason,
    StoppingCriterion,
};
use crate::qbf::{load_qbf, InstanceError, Inverse, ObjectiveFunction, Qbf};
use crate::solution::Solution;

/// One solver run over an objective.
///
/// Owns everything that is scoped to a single run: the frequency table,
/// the perturbation policy's random stream and the stopping clock. The clock
/// restarts when a run begins. Build a fresh solver for every run.
#[derive(Debug, Clone)]
pub struct QbfacGrasp<O> {
    objective: O,
    candidates: CandidateManager,
    local_search: LocalSearchMode,
    tolerance: f64,
    frequency: FrequencyTable,
    perturbation: Perturbation,
    stop: StoppingCriterion,
    last_search: LocalSearchStats,
}

impl<O: ObjectiveFunction> QbfacGrasp<O> {
    /// Creates a solver for a minimizing objective.
    pub fn new(objective: O, config: &GraspConfig) -> Self {
        let n = objective.domain_size();
        let perturbation_seed = config
            .seed
            .map_or_else(rand::random, |s| s.wrapping_add(0x9E37_79B9_7F4A_7C15));
        Self {
            candidates: CandidateManager::new(n),
            local_search: config.local_search,
            tolerance: config.improvement_tolerance,
            frequency: FrequencyTable::new(n),
            perturbation: Perturbation::new(config.perturbation, config.random_phase, perturbation_seed),
            stop: StoppingCriterion::from_config(config),
            last_search: LocalSearchStats::default(),
            objective,
        }
    }

    /// Frequency memory accumulated so far.
    pub fn frequency(&self) -> &FrequencyTable {
        &self.frequency
    }

    /// Counters of the most recent local search.
    pub fn last_search(&self) -> LocalSearchStats {
        self.last_search
    }

    /// Legal candidates of `solution`.
    pub fn refresh_candidate_list(&self, solution: &Solution) -> Vec<usize> {
        self.candidates.refresh(solution)
    }

    /// The construction multiplier for `candidate` at iteration `iteration`.
    pub fn perturbation_bias(&mut self, candidate: usize, iteration: usize) -> f64 {
        let f = self.frequency.get(candidate);
        self.perturbation.bias(f, iteration)
    }

    /// Halting check against the best cost alone.
    pub fn should_stop_at(&self, best_cost: f64) -> bool {
        self.stop.should_stop(best_cost)
    }

    /// Runs local search on `solution` and returns it.
    pub fn run_local_search(&mut self, mut solution: Solution) -> Solution {
        GraspProblem::local_search(self, &mut solution);
        solution
    }
}

impl QbfacGrasp<Inverse<Qbf>> {
    /// Loads a QBF instance and prepares a maximizing run over it.
    ///
    /// # Errors
    ///
    /// Fails if the instance cannot be read or parsed; no search state is
    /// created in that case.
    pub fn from_file<P: AsRef<Path>>(path: P, config: &GraspConfig) -> Result<Self, InstanceError> {
        let qbf = load_qbf(path)?;
        Ok(Self::new(Inverse::new(qbf), config))
    }
}

impl<O: ObjectiveFunction> GraspProblem for QbfacGrasp<O> {
    type Objective = O;

    fn objective(&self) -> &O {
        &self.objective
    }

    fn make_candidate_list(&self) -> Vec<usize> {
        self.candidates.full_list()
    }

    fn update_candidate_list(&self, solution: &Solution, candidates: &mut Vec<usize>) {
        self.candidates.refresh_into(solution, candidates);
    }

    fn create_empty_solution(&self) -> Solution {
        Solution::new()
    }

    fn local_search(&mut self, solution: &mut Solution) {
        let engine = LocalSearchEngine::new(&self.objective)
            .with_mode(self.local_search)
            .with_tolerance(self.tolerance);
        self.last_search = engine.improve(solution, &mut self.frequency);
    }

    fn perturbation(&mut self, candidate: usize, iteration: usize) -> f64 {
        self.perturbation_bias(candidate, iteration)
    }

    fn start_run(&mut self) {
        self.stop.restart();
    }

    fn stop_reason(&self, best_cost: f64, completed_iterations: usize) -> Option<StopReason> {
        self.stop.check(best_cost, completed_iterations)
    }
}

/// Loads an instance and solves it as a maximization problem.
///
/// Costs in the result are in the minimizing convention (negated QBF
/// values), as is `config.target_cost`.
///
/// # Errors
///
/// Returns the load error; the search never starts on a bad instance.
///
/// # Panics
///
/// Panics if `config` is invalid.
pub fn solve_file<P: AsRef<Path>>(path: P, config: &GraspConfig) -> Result<GraspResult, InstanceError> {
    let mut solver = QbfacGrasp::from_file(path, config)?;
    Ok(GraspRunner::run(&mut solver, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// {0, 2} is the only local optimum: 1, 3 and 4 only cost.
    fn pair_instance() -> Inverse<Qbf> {
        Inverse::new(
            Qbf::zeros(5)
                .with_coefficient(0, 2, 10.0)
                .with_coefficient(0, 0, 1.0)
                .with_coefficient(2, 2, 1.0)
                .with_coefficient(1, 1, -1.0)
                .with_coefficient(3, 3, -1.0)
                .with_coefficient(4, 4, -1.0),
        )
    }

    #[test]
    fn test_empty_solution_has_zero_cost() {
        let solver = QbfacGrasp::new(pair_instance(), &GraspConfig::default());
        let s = solver.create_empty_solution();
        assert!(s.is_empty());
        assert_eq!(s.cost, 0.0);
    }

    #[test]
    fn test_candidate_hooks() {
        let solver = QbfacGrasp::new(pair_instance(), &GraspConfig::default());
        assert_eq!(solver.make_candidate_list(), vec![0, 1, 2, 3, 4]);

        let s = Solution::from_elements([2]);
        let mut list = solver.make_candidate_list();
        solver.update_candidate_list(&s, &mut list);
        assert_eq!(list, vec![0, 4]);
        assert_eq!(solver.refresh_candidate_list(&s), list);
    }

    #[test]
    fn test_run_local_search_from_middle() {
        let mut solver = QbfacGrasp::new(pair_instance(), &GraspConfig::default());
        let mut s = Solution::from_elements([1]);
        s.cost = solver.objective().evaluate(&s);

        let s = solver.run_local_search(s);

        assert_eq!(s.sorted_elements(), vec![0, 2]);
        assert!((s.cost - -12.0).abs() < 1e-12);
        assert_eq!(solver.frequency().counts(), &[1, 0, 1, 0, 0]);
        assert_eq!(solver.last_search().moves(), 2);
    }

    #[test]
    fn test_solve_reaches_known_optimum() {
        let config = GraspConfig::default()
            .with_alpha(0.5)
            .with_target_cost(-12.0)
            .with_time_limit(Duration::from_secs(60))
            .with_seed(42);
        let mut solver = QbfacGrasp::new(pair_instance(), &config);

        let result = GraspRunner::run(&mut solver, &config);

        assert_eq!(result.stop_reason, StopReason::TargetReached);
        assert_eq!(result.best.sorted_elements(), vec![0, 2]);
        assert_eq!(result.best_cost, -12.0);
        assert!(result.best.is_adjacency_feasible());
    }

    #[test]
    fn test_frequency_tracks_every_local_search() {
        let config = GraspConfig::default()
            .with_alpha(1.0)
            .with_max_iterations(12)
            .with_seed(7);
        let mut solver = QbfacGrasp::new(pair_instance(), &config);

        let result = GraspRunner::run(&mut solver, &config);

        assert_eq!(result.iterations, 12);
        assert_eq!(solver.frequency().records(), 12);
        assert_eq!(solver.frequency().counts(), &[12, 0, 12, 0, 0]);
    }

    #[test]
    fn test_perturbation_hook_follows_policy() {
        let config = GraspConfig::default().with_seed(1);
        let mut solver = QbfacGrasp::new(pair_instance(), &config);
        for _ in 0..4 {
            let s = Solution::from_elements([0, 2]);
            solver.run_local_search(s);
        }

        assert_eq!(solver.perturbation(0, 2), 1.0);
        // t = 4, f = 4: 1.25 + 0.75
        assert!((solver.perturbation(0, 4) - 2.0).abs() < 1e-12);
        // t = 6, f = 4: 2 - 0.5
        assert!((solver.perturbation(0, 6) - 1.5).abs() < 1e-12);
        assert_eq!(solver.perturbation(1, 5), 2.0);
    }

    #[test]
    fn test_perturbation_disabled() {
        let config = GraspConfig::default().with_perturbation(false);
        let mut solver = QbfacGrasp::new(pair_instance(), &config);
        solver.run_local_search(Solution::from_elements([0, 2]));
        for t in 0..10 {
            assert_eq!(solver.perturbation(0, t), 1.0);
        }
    }

    #[test]
    fn test_stop_hooks() {
        let config = GraspConfig::default().with_target_cost(-12.0);
        let solver = QbfacGrasp::new(pair_instance(), &config);
        assert!(solver.should_stop_at(-12.0));
        assert!(!solver.should_stop_at(-11.0));
        assert!(solver.should_stop(-12.0, 1));
    }

    #[test]
    fn test_clock_restarts_when_run_begins() {
        let config = GraspConfig::default()
            .with_time_limit(Duration::from_millis(200))
            .with_max_iterations(3)
            .with_seed(5);
        let mut solver = QbfacGrasp::new(pair_instance(), &config);
        std::thread::sleep(Duration::from_millis(300));
        assert!(solver.stop_reason(0.0, 0).is_some());

        let result = GraspRunner::run(&mut solver, &config);

        assert_eq!(result.stop_reason, StopReason::IterationLimit);
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_single_value_domain_run() {
        let config = GraspConfig::default().with_max_iterations(3).with_seed(0);
        let mut solver = QbfacGrasp::new(Inverse::new(Qbf::zeros(1).with_coefficient(0, 0, 2.0)), &config);

        let result = GraspRunner::run(&mut solver, &config);

        assert_eq!(result.best.elements(), &[0]);
        assert_eq!(result.best_cost, -2.0);
    }

    #[test]
    fn test_empty_domain_run() {
        let config = GraspConfig::default().with_max_iterations(2).with_seed(0);
        let mut solver = QbfacGrasp::new(Inverse::new(Qbf::zeros(0)), &config);

        let result = GraspRunner::run(&mut solver, &config);

        assert!(result.best.is_empty());
        assert_eq!(result.best_cost, 0.0);
    }

    #[test]
    fn test_solve_file_reports_parse_error() {
        let path = std::env::temp_dir().join(format!("u_grasp_bad_{}.txt", std::process::id()));
        std::fs::write(&path, "4\n1 2 3\n").expect("write temp instance");
        let err = solve_file(&path, &GraspConfig::default()).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, InstanceError::Truncated { expected: 10, found: 3 }));
    }

    #[test]
    fn test_solve_file() {
        let path = std::env::temp_dir().join(format!("u_grasp_ok_{}.txt", std::process::id()));
        // 0 and 2 pay off together; {1} is a weaker local optimum.
        std::fs::write(&path, "4\n1 0 6 0\n2 0 0\n1 0\n-1\n").expect("write temp instance");
        let config = GraspConfig::default()
            .with_alpha(1.0)
            .with_max_iterations(50)
            .with_seed(11);

        let result = solve_file(&path, &config).expect("solve");
        let _ = std::fs::remove_file(&path);

        assert_eq!(result.best.sorted_elements(), vec![0, 2]);
        assert_eq!(result.best_cost, -8.0);
    }
}
