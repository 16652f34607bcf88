//! Quadratic binary function over a dense coefficient matrix.

use super::instance::InstanceError;
use super::types::ObjectiveFunction;
use crate::solution::Solution;

/// A quadratic binary function `f(x) = xᵀ A x` over `x ∈ {0,1}ⁿ`.
///
/// A selection `S` encodes `x_i = 1 ⇔ i ∈ S`, so
/// `f(S) = Σ_{i∈S} Σ_{j∈S} A[i][j]`. Diagonal entries act as linear terms.
///
/// Instance files only carry the upper triangle, in which case the lower
/// triangle is zero, but every query is correct for a full matrix as well.
///
/// All delta queries are `O(|S|)`: they only walk the selected indices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Qbf {
    size: usize,
    /// Row-major `size × size` coefficients.
    coefficients: Vec<f64>,
}

impl Qbf {
    /// Creates an all-zero function over `size` variables.
    ///
    /// # Panics
    ///
    /// Panics if `size * size` overflows `usize`.
    pub fn zeros(size: usize) -> Self {
        let len = size
            .checked_mul(size)
            .unwrap_or_else(|| panic!("QBF dimension {size} overflows the coefficient matrix"));
        Self {
            size,
            coefficients: vec![0.0; len],
        }
    }

    /// Builds a function from a square matrix.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::NotSquare`] if any row length differs from
    /// the number of rows.
    pub fn from_matrix(rows: Vec<Vec<f64>>) -> Result<Self, InstanceError> {
        let size = rows.len();
        let mut coefficients = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(InstanceError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            coefficients.extend(values);
        }
        Ok(Self { size, coefficients })
    }

    /// Builds a function from upper-triangular rows, where row `i` holds
    /// `A[i][i..size]`.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::NotSquare`] if row `i` does not hold exactly
    /// `size - i` values.
    pub fn from_upper_triangular(rows: Vec<Vec<f64>>) -> Result<Self, InstanceError> {
        let size = rows.len();
        let mut qbf = Self::zeros(size);
        for (i, values) in rows.into_iter().enumerate() {
            if values.len() != size - i {
                return Err(InstanceError::NotSquare {
                    row: i,
                    len: values.len(),
                    expected: size - i,
                });
            }
            for (offset, value) in values.into_iter().enumerate() {
                qbf.set(i, i + offset, value);
            }
        }
        Ok(qbf)
    }

    /// Coefficient `A[i][j]`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is outside the domain.
    pub fn coefficient(&self, i: usize, j: usize) -> f64 {
        self.coefficients[i * self.size + j]
    }

    /// Sets coefficient `A[i][j]`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is outside the domain.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.coefficients[i * self.size + j] = value;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with_coefficient(mut self, i: usize, j: usize, value: f64) -> Self {
        self.set(i, j, value);
        self
    }

    /// Objective change caused by `x_i` being set, given the rest of the
    /// selection: `A[i][i] + Σ_{j∈S, j≠i} (A[i][j] + A[j][i])`.
    fn contribution(&self, i: usize, solution: &Solution) -> f64 {
        let mut sum = self.coefficient(i, i);
        for &j in solution.elements() {
            if j != i {
                sum += self.coefficient(i, j) + self.coefficient(j, i);
            }
        }
        sum
    }
}

impl ObjectiveFunction for Qbf {
    fn domain_size(&self) -> usize {
        self.size
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        let selected = solution.elements();
        let mut total = 0.0;
        for &i in selected {
            for &j in selected {
                total += self.coefficient(i, j);
            }
        }
        total
    }

    fn evaluate_insertion_cost(&self, candidate: usize, solution: &Solution) -> f64 {
        if solution.contains(candidate) {
            return 0.0;
        }
        self.contribution(candidate, solution)
    }

    fn evaluate_removal_cost(&self, candidate: usize, solution: &Solution) -> f64 {
        if !solution.contains(candidate) {
            return 0.0;
        }
        -self.contribution(candidate, solution)
    }

    fn evaluate_exchange_cost(
        &self,
        candidate_in: usize,
        candidate_out: usize,
        solution: &Solution,
    ) -> f64 {
        if candidate_in == candidate_out {
            return 0.0;
        }
        if solution.contains(candidate_in) {
            return self.evaluate_removal_cost(candidate_out, solution);
        }
        if !solution.contains(candidate_out) {
            return self.evaluate_insertion_cost(candidate_in, solution);
        }
        self.contribution(candidate_in, solution)
            - self.contribution(candidate_out, solution)
            - (self.coefficient(candidate_in, candidate_out)
                + self.coefficient(candidate_out, candidate_in))
    }
}
