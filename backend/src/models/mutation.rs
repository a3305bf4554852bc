//! Mutation matrix
//!
//! Row-stochastic K×K matrix `Q` mapping parent species to offspring
//! species. Built once from a scalar mutation rate `mu`:
//!
//! ```text
//! Q[i][i] = 1 - mu
//! Q[i][j] = mu / (K - 1)   for i != j
//! ```
//!
//! # Critical Invariants
//!
//! 1. Every row sums to 1.0 (within floating-point tolerance)
//! 2. All entries are non-negative
//!
//! Together these guarantee that a distribution multiplied by `Q` is still
//! a distribution, which the replicator-mutator update relies on.

use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};

/// Row-stochastic mutation matrix stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationMatrix {
    size: usize,
    mutation_rate: f64,
    entries: Box<[f64]>,
}

impl MutationMatrix {
    /// Build the uniform-leakage mutation matrix
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` if `num_species < 2` (off-diagonal weight
    ///   `mu / (K - 1)` is undefined) or `mu` is not in `[0, 1]`
    ///
    /// # Example
    /// ```
    /// use genesis_simulator_core_rs::MutationMatrix;
    ///
    /// let q = MutationMatrix::uniform(3, 0.01).unwrap();
    /// assert!((q.get(0, 0) - 0.99).abs() < 1e-12);
    /// assert!((q.get(0, 1) - 0.005).abs() < 1e-12);
    /// assert!(q.is_row_stochastic(1e-12));
    /// ```
    pub fn uniform(num_species: usize, mu: f64) -> Result<Self, SimulationError> {
        if num_species < 2 {
            return Err(SimulationError::InvalidParameter(format!(
                "mutation matrix needs at least 2 species, got {}",
                num_species
            )));
        }
        if !mu.is_finite() || !(0.0..=1.0).contains(&mu) {
            return Err(SimulationError::InvalidParameter(format!(
                "mutation_rate must be within [0, 1], got {}",
                mu
            )));
        }

        let off_diagonal = mu / (num_species - 1) as f64;
        let entries = (0..num_species * num_species)
            .map(|idx| {
                if idx / num_species == idx % num_species {
                    1.0 - mu
                } else {
                    off_diagonal
                }
            })
            .collect();

        Ok(Self {
            size: num_species,
            mutation_rate: mu,
            entries,
        })
    }

    /// Number of species (matrix dimension)
    pub fn num_species(&self) -> usize {
        self.size
    }

    /// Mutation rate the matrix was built from
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Entry `Q[from][to]`
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        assert!(from < self.size && to < self.size, "index out of range");
        self.entries[from * self.size + to]
    }

    /// Row `from` as a slice
    pub fn row(&self, from: usize) -> &[f64] {
        &self.entries[from * self.size..(from + 1) * self.size]
    }

    /// Sum of each row
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.size).map(|i| self.row(i).iter().sum()).collect()
    }

    /// Check that every row sums to 1 within `tolerance` and no entry is negative
    pub fn is_row_stochastic(&self, tolerance: f64) -> bool {
        self.entries.iter().all(|&q| q >= 0.0)
            && self.row_sums().iter().all(|s| (s - 1.0).abs() <= tolerance)
    }

    /// Row-vector × matrix product: `out[j] = Σ_i weights[i] * Q[i][j]`
    ///
    /// # Panics
    /// Panics if `weights` or `out` length differs from the matrix size.
    pub fn apply(&self, weights: &[f64], out: &mut [f64]) {
        assert_eq!(weights.len(), self.size, "weights length mismatch");
        assert_eq!(out.len(), self.size, "output length mismatch");

        for (j, slot) in out.iter_mut().enumerate() {
            *slot = weights
                .iter()
                .enumerate()
                .map(|(i, w)| w * self.entries[i * self.size + j])
                .sum();
        }
    }
}
