//! Selection and replicator-mutator update
//!
//! ```text
//! F_prob[i] = exp(beta_sel * F_eff[i])
//! growth[j] = Σ_i x[i] * F_prob[i] * Q[i][j]
//! phi_bar   = Σ_j growth[j]
//! x'[j]     = growth[j] / phi_bar
//! ```
//!
//! `phi_bar` must be strictly positive and finite. If every selection weight
//! underflows to zero, or one overflows to infinity, the division is
//! undefined and the update is rejected with `NumericDegeneracy` instead of
//! writing NaN into the shares.

use crate::models::MutationMatrix;
use crate::orchestrator::SimulationError;

/// Boltzmann-style selection weights `exp(beta_sel * F_eff)`
///
/// # Example
/// ```
/// use genesis_simulator_core_rs::dynamics::selection_weights;
///
/// let mut out = [0.0; 2];
/// selection_weights(2.0, &[0.0, 0.5], &mut out);
/// assert_eq!(out[0], 1.0);
/// assert!((out[1] - 1f64.exp()).abs() < 1e-12);
/// ```
pub fn selection_weights(selection_pressure: f64, effective_fitness: &[f64], out: &mut [f64]) {
    for (slot, f) in out.iter_mut().zip(effective_fitness) {
        *slot = (selection_pressure * f).exp();
    }
}

/// Compute the next share vector into `next_shares`
///
/// `step` is only used to label a degeneracy error.
///
/// # Returns
///
/// * `Ok(phi_bar)` - mean fitness used as normaliser
/// * `Err(SimulationError::NumericDegeneracy)` - `phi_bar` is zero, negative,
///   or not finite; `next_shares` must then be discarded
pub fn replicator_mutator_update(
    shares: &[f64],
    selection: &[f64],
    mutation: &MutationMatrix,
    step: usize,
    next_shares: &mut [f64],
) -> Result<f64, SimulationError> {
    let weighted: Vec<f64> = shares.iter().zip(selection).map(|(x, f)| x * f).collect();
    mutation.apply(&weighted, next_shares);

    let phi_bar: f64 = next_shares.iter().sum();
    if !phi_bar.is_finite() || phi_bar <= 0.0 {
        return Err(SimulationError::NumericDegeneracy { step, phi_bar });
    }

    for x in next_shares.iter_mut() {
        *x /= phi_bar;
    }

    Ok(phi_bar)
}
