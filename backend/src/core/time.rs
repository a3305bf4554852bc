//! Time management for the simulation
//!
//! The simulation operates in discrete steps of fixed width `dt`.
//! This module provides deterministic time advancement and the mapping
//! from step index to simulated time used by the time axis of a history.

use serde::{Deserialize, Serialize};

/// Counts elapsed discrete steps and converts them to simulated time
///
/// # Example
/// ```
/// use genesis_simulator_core_rs::StepClock;
///
/// let mut clock = StepClock::new(0.05);
/// assert_eq!(clock.current_step(), 0);
///
/// clock.advance();
/// assert_eq!(clock.current_step(), 1);
/// assert!((clock.elapsed() - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepClock {
    /// Steps elapsed since simulation start
    current_step: usize,
    /// Width of one step in simulated time units
    dt: f64,
}

impl StepClock {
    /// Create a new clock at step 0
    ///
    /// # Arguments
    /// * `dt` - Width of one step (must be positive and finite)
    ///
    /// # Panics
    /// Panics if `dt` is not a positive finite number. The engine validates
    /// `dt` before constructing a clock, so this only fires on direct misuse.
    pub fn new(dt: f64) -> Self {
        assert!(dt.is_finite() && dt > 0.0, "dt must be positive and finite");
        Self { current_step: 0, dt }
    }

    /// Advance the clock by one step
    pub fn advance(&mut self) {
        self.current_step += 1;
    }

    /// Number of steps elapsed
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Step width
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Simulated time elapsed (`current_step * dt`)
    pub fn elapsed(&self) -> f64 {
        self.time_at(self.current_step)
    }

    /// Simulated time at an arbitrary step index
    ///
    /// # Example
    /// ```
    /// use genesis_simulator_core_rs::StepClock;
    ///
    /// let clock = StepClock::new(0.05);
    /// assert!((clock.time_at(1000) - 50.0).abs() < 1e-9);
    /// ```
    pub fn time_at(&self, step_index: usize) -> f64 {
        step_index as f64 * self.dt
    }

    /// Time axis for `len` recorded steps: `[0, dt, 2*dt, ...]`
    pub fn time_axis(&self, len: usize) -> Vec<f64> {
        (0..len).map(|i| self.time_at(i)).collect()
    }
}
