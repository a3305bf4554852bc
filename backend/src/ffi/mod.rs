//! Python bindings (feature `pyo3`)
//!
//! - **engine**: `Engine` class and `run_scenario` function
//! - **types**: Conversions between Rust results and Python dicts

pub mod engine;
pub mod types;
