//! Population State
//!
//! Holds the per-species vectors that evolve during a run.
//!
//! # Critical Invariants
//!
//! 1. **Simplex**: `shares` are non-negative and sum to 1.0
//! 2. **Alignment bounds**: every `alignment[i]` lies within the configured
//!    alignment bounds (default `[0, 1]`)
//! 3. **Bandwidth bounds**: every `bandwidth[i]` lies within the configured
//!    bandwidth bounds (default `[0.01, 5.0]`)
//! 4. **Fixed shape**: all vectors have length K, fixed at construction
//! 5. **Fixed environment**: `meaning` and `friction` never change
//!
//! Only the engine mutates a `PopulationState`; everything else sees it
//! through shared references.

use crate::core::numeric::{argmax, mean};
use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};

/// Complete per-species state of one simulation
///
/// # Example
///
/// ```rust
/// use genesis_simulator_core_rs::PopulationState;
///
/// let state = PopulationState::new(
///     vec![0.5, 0.5],
///     vec![0.1, 0.2],
///     vec![0.1, 0.1],
///     vec![0.5, 1.0],
///     vec![0.8, 0.5],
/// )
/// .unwrap();
///
/// assert_eq!(state.num_species(), 2);
/// assert!((state.mean_alignment() - 0.15).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationState {
    /// Population share x
    shares: Box<[f64]>,
    /// Alignment / coherence R
    alignment: Box<[f64]>,
    /// Bandwidth / capacity B
    bandwidth: Box<[f64]>,
    /// Meaning potential M (read-only)
    meaning: Box<[f64]>,
    /// Friction C (read-only)
    friction: Box<[f64]>,
}

impl PopulationState {
    /// Create a state from five equally sized vectors
    ///
    /// Shares are taken as given; the caller is responsible for the simplex
    /// invariant (the engine normalizes before calling this).
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` if vectors are empty or have different lengths
    pub fn new(
        shares: Vec<f64>,
        alignment: Vec<f64>,
        bandwidth: Vec<f64>,
        meaning: Vec<f64>,
        friction: Vec<f64>,
    ) -> Result<Self, SimulationError> {
        let k = shares.len();
        if k == 0 {
            return Err(SimulationError::InvalidParameter(
                "population must have at least one species".to_string(),
            ));
        }

        for (name, len) in [
            ("alignment", alignment.len()),
            ("bandwidth", bandwidth.len()),
            ("meaning", meaning.len()),
            ("friction", friction.len()),
        ] {
            if len != k {
                return Err(SimulationError::InvalidParameter(format!(
                    "{} has {} entries but shares has {}",
                    name, len, k
                )));
            }
        }

        Ok(Self {
            shares: shares.into_boxed_slice(),
            alignment: alignment.into_boxed_slice(),
            bandwidth: bandwidth.into_boxed_slice(),
            meaning: meaning.into_boxed_slice(),
            friction: friction.into_boxed_slice(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of species K
    pub fn num_species(&self) -> usize {
        self.shares.len()
    }

    pub fn shares(&self) -> &[f64] {
        &self.shares
    }

    pub fn alignment(&self) -> &[f64] {
        &self.alignment
    }

    pub fn bandwidth(&self) -> &[f64] {
        &self.bandwidth
    }

    pub fn meaning(&self) -> &[f64] {
        &self.meaning
    }

    pub fn friction(&self) -> &[f64] {
        &self.friction
    }

    pub fn mean_alignment(&self) -> f64 {
        mean(&self.alignment)
    }

    pub fn mean_bandwidth(&self) -> f64 {
        mean(&self.bandwidth)
    }

    /// Sum of shares (1.0 while the simplex invariant holds)
    pub fn share_sum(&self) -> f64 {
        self.shares.iter().sum()
    }

    /// Species holding the largest share
    pub fn dominant_species(&self) -> usize {
        argmax(&self.shares).unwrap_or(0)
    }

    // ========================================================================
    // Mutation (engine only)
    // ========================================================================

    pub(crate) fn set_shares(&mut self, shares: &[f64]) {
        self.shares.copy_from_slice(shares);
    }

    pub(crate) fn set_traits(&mut self, alignment: &[f64], bandwidth: &[f64]) {
        self.alignment.copy_from_slice(alignment);
        self.bandwidth.copy_from_slice(bandwidth);
    }
}
