//! Core fitness
//!
//! ```text
//! F_core = w_R*R + w_B*B + w_M*M - w_C*C
//! ```

use crate::models::PopulationState;
use serde::{Deserialize, Serialize};

/// Weights of the linear core fitness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    pub alignment: f64,
    pub bandwidth: f64,
    pub meaning: f64,
    pub friction: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            alignment: 1.0,
            bandwidth: 1.5,
            meaning: 0.5,
            friction: 0.8,
        }
    }
}

impl FitnessWeights {
    /// Core fitness of a single species
    ///
    /// # Example
    /// ```
    /// use genesis_simulator_core_rs::FitnessWeights;
    ///
    /// let w = FitnessWeights::default();
    /// let f = w.evaluate(0.1, 0.1, 0.5, 0.8);
    /// assert!((f - (0.1 + 0.15 + 0.25 - 0.64)).abs() < 1e-12);
    /// ```
    pub fn evaluate(&self, alignment: f64, bandwidth: f64, meaning: f64, friction: f64) -> f64 {
        self.alignment * alignment + self.bandwidth * bandwidth + self.meaning * meaning
            - self.friction * friction
    }

    /// Core fitness of every species in `state`, written into `out`
    pub fn core_fitness(&self, state: &PopulationState, out: &mut [f64]) {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.evaluate(
                state.alignment()[i],
                state.bandwidth()[i],
                state.meaning()[i],
                state.friction()[i],
            );
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        [self.alignment, self.bandwidth, self.meaning, self.friction]
            .iter()
            .all(|w| w.is_finite())
    }
}
