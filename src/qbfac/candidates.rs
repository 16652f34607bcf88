//! Adjacency-aware candidate list.

use crate::solution::Solution;

/// Derives the legal insertion candidates of a selection.
///
/// A value `i` is a candidate iff none of `i - 1`, `i`, `i + 1` is selected.
/// The list is always recomputed from scratch with a full domain scan, in
/// ascending order, so it can never drift from that definition. Each
/// refresh costs `O(n · |S|)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateManager {
    domain_size: usize,
}

impl CandidateManager {
    /// Creates a manager over the domain `0..domain_size`.
    pub fn new(domain_size: usize) -> Self {
        Self { domain_size }
    }

    /// Number of domain values.
    pub fn domain_size(&self) -> usize {
        self.domain_size
    }

    /// Every domain value, ignoring the adjacency constraint.
    pub fn full_list(&self) -> Vec<usize> {
        (0..self.domain_size).collect()
    }

    /// Returns `true` if `value` can be added to `solution` without
    /// violating the adjacency constraint.
    pub fn is_candidate(&self, value: usize, solution: &Solution) -> bool {
        value < self.domain_size
            && !solution.contains(value)
            && !(value > 0 && solution.contains(value - 1))
            && !solution.contains(value + 1)
    }

    /// The legal candidates of `solution`, ascending.
    pub fn refresh(&self, solution: &Solution) -> Vec<usize> {
        let mut candidates = Vec::with_capacity(self.domain_size);
        self.refresh_into(solution, &mut candidates);
        candidates
    }

    /// Recomputes the legal candidates of `solution` into `candidates`.
    pub fn refresh_into(&self, solution: &Solution, candidates: &mut Vec<usize>) {
        candidates.clear();
        candidates.extend((0..self.domain_size).filter(|&i| self.is_candidate(i, solution)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_list() {
        assert_eq!(CandidateManager::new(4).full_list(), vec![0, 1, 2, 3]);
        assert!(CandidateManager::new(0).full_list().is_empty());
    }

    #[test]
    fn test_empty_selection_allows_everything() {
        let cm = CandidateManager::new(5);
        assert_eq!(cm.refresh(&Solution::new()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_excludes_selected_and_neighbors() {
        let cm = CandidateManager::new(8);
        let s = Solution::from_elements([2, 6]);
        assert_eq!(cm.refresh(&s), vec![0, 4]);
    }

    #[test]
    fn test_domain_edges() {
        let cm = CandidateManager::new(5);
        assert_eq!(cm.refresh(&Solution::from_elements([0])), vec![2, 3, 4]);
        assert_eq!(cm.refresh(&Solution::from_elements([4])), vec![0, 1, 2]);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let cm = CandidateManager::new(10);
        let s = Solution::from_elements([7, 1, 4]);
        let first = cm.refresh(&s);
        let second = cm.refresh(&s);
        assert_eq!(first, second);
    }

    #[test]
    fn test_refresh_into_replaces_contents() {
        let cm = CandidateManager::new(4);
        let mut list = vec![99, 100];
        cm.refresh_into(&Solution::from_elements([1]), &mut list);
        assert_eq!(list, vec![3]);
    }

    #[test]
    fn test_single_value_domain() {
        let cm = CandidateManager::new(1);
        assert_eq!(cm.refresh(&Solution::new()), vec![0]);
        assert!(cm.refresh(&Solution::from_elements([0])).is_empty());
    }

    #[test]
    fn test_out_of_domain_is_not_candidate() {
        let cm = CandidateManager::new(3);
        assert!(!cm.is_candidate(3, &Solution::new()));
    }
}
