//! Subset solution container.
//!
//! A [`Solution`] is an ordered list of distinct domain indices together
//! with the objective cost of that selection. The order is the insertion
//! order; it carries no meaning for the objective but fixes the scan order
//! of neighborhood moves, which keeps tie-breaking deterministic.

/// A selection of distinct domain indices with its cached cost.
///
/// The cost is whatever the owning objective function reported the last
/// time the selection was evaluated. Code that mutates the selection is
/// responsible for refreshing it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    elements: Vec<usize>,
    /// Cached objective cost of `elements`.
    pub cost: f64,
}

impl Solution {
    /// Creates an empty selection with zero cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection from the given elements, dropping duplicates.
    ///
    /// The cost is left at zero; evaluate the selection before relying on it.
    pub fn from_elements<I: IntoIterator<Item = usize>>(elements: I) -> Self {
        let mut solution = Self::new();
        for e in elements {
            solution.add(e);
        }
        solution
    }

    /// Elements in insertion order.
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Linear membership test.
    pub fn contains(&self, value: usize) -> bool {
        self.elements.contains(&value)
    }

    /// Appends `value` unless it is already selected.
    ///
    /// Returns `true` if the selection changed.
    pub fn add(&mut self, value: usize) -> bool {
        if self.contains(value) {
            return false;
        }
        self.elements.push(value);
        true
    }

    /// Removes `value`, preserving the order of the remaining elements.
    ///
    /// Returns `true` if the selection changed.
    pub fn remove(&mut self, value: usize) -> bool {
        match self.elements.iter().position(|&e| e == value) {
            Some(idx) => {
                self.elements.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Elements in ascending order.
    pub fn sorted_elements(&self) -> Vec<usize> {
        let mut sorted = self.elements.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Returns `true` if no two selected indices are consecutive integers.
    pub fn is_adjacency_feasible(&self) -> bool {
        self.sorted_elements().windows(2).all(|w| w[1] - w[0] >= 2)
    }
}
