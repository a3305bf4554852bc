//! Orchestrator - configuration, engine, and scenario loop
//!
//! - **config**: Run parameters, validation, config hashing
//! - **engine**: One-step-at-a-time replicator-mutator engine
//! - **runner**: Fixed-length scenario loop and two-mode comparison
//! - **history**: Recorded time series and export

pub mod config;
pub mod engine;
pub mod history;
pub mod runner;

// Re-export main types for convenience
pub use config::{compute_config_hash, SimulationConfig};
pub use engine::{Engine, SimulationError, StepSummary};
pub use history::{ComparisonHistory, ComparisonSummary, History};
pub use runner::{run_comparison, run_scenario, run_scenario_with};
