//! Criticality gate (phase transition)
//!
//! Each species has an order parameter built from its traits:
//!
//! ```text
//! threshold = R + B - 0.5*C
//! s         = sigmoid(kappa * (threshold - tau_c))
//! gain      = gain_low*(1 - s) + gain_high*s
//! ```
//!
//! `s` is the criticality signal reported in step summaries; `gain`
//! multiplies core fitness. With `kappa > 0` the signal rises monotonically
//! with the threshold.

use crate::core::numeric::sigmoid;
use crate::models::PopulationState;
use serde::{Deserialize, Serialize};

/// Weight of friction in the order parameter
pub const FRICTION_THRESHOLD_WEIGHT: f64 = 0.5;

/// Sigmoid gate parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalityParams {
    /// Steepness of the transition
    pub kappa: f64,
    /// Order-parameter value at which `s = 0.5`
    pub tau_c: f64,
    /// Fitness multiplier well below the transition
    pub gain_low: f64,
    /// Fitness multiplier well above the transition
    pub gain_high: f64,
}

impl Default for CriticalityParams {
    fn default() -> Self {
        Self {
            kappa: 5.0,
            tau_c: 1.0,
            gain_low: 1.0,
            gain_high: 3.0,
        }
    }
}

impl CriticalityParams {
    /// Order parameter of one species
    pub fn threshold(alignment: f64, bandwidth: f64, friction: f64) -> f64 {
        alignment + bandwidth - FRICTION_THRESHOLD_WEIGHT * friction
    }

    /// Criticality signal for a given order parameter
    ///
    /// # Example
    /// ```
    /// use genesis_simulator_core_rs::CriticalityParams;
    ///
    /// let params = CriticalityParams::default();
    /// assert_eq!(params.signal(params.tau_c), 0.5);
    /// assert!(params.signal(2.0) > params.signal(1.5));
    /// ```
    pub fn signal(&self, threshold: f64) -> f64 {
        sigmoid(self.kappa * (threshold - self.tau_c))
    }

    /// Fitness gain interpolated between `gain_low` and `gain_high`
    pub fn gain(&self, signal: f64) -> f64 {
        self.gain_low * (1.0 - signal) + self.gain_high * signal
    }

    /// Signal and gain for every species in `state`
    pub fn gate(&self, state: &PopulationState, signals: &mut [f64], gains: &mut [f64]) {
        for i in 0..signals.len() {
            let threshold = Self::threshold(
                state.alignment()[i],
                state.bandwidth()[i],
                state.friction()[i],
            );
            signals[i] = self.signal(threshold);
            gains[i] = self.gain(signals[i]);
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        [self.kappa, self.tau_c, self.gain_low, self.gain_high]
            .iter()
            .all(|p| p.is_finite())
    }
}
