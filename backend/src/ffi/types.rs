//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).

use pyo3::exceptions::{PyArithmeticError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::dynamics::DynamicsMode;
use crate::orchestrator::{History, SimulationConfig, SimulationError, StepSummary};

/// Map a simulation error onto the closest Python exception
pub fn to_py_err(err: SimulationError) -> PyErr {
    match err {
        SimulationError::NumericDegeneracy { .. } => PyArithmeticError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Parse a mode name (`"darwinian"`, `"endogenous"`, ...)
pub fn parse_mode(mode: &str) -> PyResult<DynamicsMode> {
    mode.parse().map_err(PyValueError::new_err)
}

/// Build a config from optional JSON text (defaults when `None`)
pub fn parse_config(config_json: Option<&str>) -> PyResult<SimulationConfig> {
    match config_json {
        Some(json) => SimulationConfig::from_json_str(json).map_err(to_py_err),
        None => Ok(SimulationConfig::default()),
    }
}

/// Convert a step summary to a Python dict
pub fn summary_to_py<'py>(py: Python<'py>, summary: &StepSummary) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("step", summary.step)?;
    dict.set_item("shares", summary.shares.clone())?;
    dict.set_item("mean_alignment", summary.mean_alignment)?;
    dict.set_item("mean_bandwidth", summary.mean_bandwidth)?;
    dict.set_item("mean_criticality", summary.mean_criticality)?;
    dict.set_item("mean_fitness", summary.mean_fitness)?;
    Ok(dict)
}

/// Convert a history to a dict of aligned lists
pub fn history_to_py<'py>(py: Python<'py>, history: &History) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("mode", history.mode().as_str())?;
    dict.set_item("config_hash", history.config_hash())?;
    dict.set_item("time", history.time_axis())?;
    dict.set_item("shares", history.shares().to_vec())?;
    dict.set_item("mean_alignment", history.mean_alignment().to_vec())?;
    dict.set_item("mean_bandwidth", history.mean_bandwidth().to_vec())?;
    dict.set_item("mean_criticality", history.mean_criticality().to_vec())?;
    dict.set_item("mean_fitness", history.mean_fitness().to_vec())?;
    dict.set_item("num_events", history.events().len())?;
    Ok(dict)
}
