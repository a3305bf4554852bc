//! Genesis Simulator Core - Rust Engine
//!
//! Discrete-time replicator-mutator simulator comparing a Darwinian
//! population (fixed traits) against one whose alignment and bandwidth
//! evolve endogenously, with a sigmoid-gated phase transition in fitness.
//!
//! # Architecture
//!
//! - **core**: Step clock and numeric helpers
//! - **models**: Domain types (species, population state, mutation matrix, events)
//! - **dynamics**: Fitness, criticality gate, replicator update, trait policies
//! - **orchestrator**: Configuration, engine, scenario runner, history
//! - **integral**: Journal integral utility (independent of the simulator)
//!
//! # Critical Invariants
//!
//! 1. Population shares stay on the simplex (non-negative, sum to 1)
//! 2. Alignment and bandwidth stay within their bounds
//! 3. No randomness: same config + mode = identical history
//! 4. A degenerate normaliser fails the step instead of producing NaN
//!
//! # Example
//!
//! ```rust
//! use genesis_simulator_core_rs::{run_comparison, SimulationConfig};
//!
//! let config = SimulationConfig { steps: 100, ..Default::default() };
//! let comparison = run_comparison(&config).unwrap();
//!
//! let summary = comparison.summary().unwrap();
//! assert!(summary.endogenous_final_bandwidth > summary.darwinian_final_bandwidth);
//! ```

// Module declarations
pub mod core;
pub mod dynamics;
pub mod integral;
pub mod models;
pub mod orchestrator;

// Re-exports for convenience
pub use crate::core::time::StepClock;
pub use dynamics::{
    AlignmentCoefficients, BandwidthCoefficients, CriticalityParams, DynamicsMode,
    FitnessWeights, TraitBounds, TraitDynamics,
};
pub use models::{
    event::{Event, EventLog},
    mutation::MutationMatrix,
    species::SpeciesConfig,
    state::PopulationState,
};
pub use orchestrator::{
    compute_config_hash, run_comparison, run_scenario, run_scenario_with, ComparisonHistory,
    ComparisonSummary, Engine, History, SimulationConfig, SimulationError, StepSummary,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn genesis_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::engine::PyEngine>()?;
    m.add_function(wrap_pyfunction!(ffi::engine::run_scenario, m)?)?;
    Ok(())
}
