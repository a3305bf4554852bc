//! PyO3 wrapper for Engine
//!
//! # Example (from Python)
//!
//! ```python
//! from genesis_simulator_core_rs import Engine, run_scenario
//!
//! engine = Engine("endogenous")
//! summary = engine.advance()
//! print(summary["mean_bandwidth"])
//!
//! history = run_scenario("darwinian", '{"steps": 200}')
//! print(len(history["mean_bandwidth"]))
//! ```

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{history_to_py, parse_config, parse_mode, summary_to_py, to_py_err};
use crate::orchestrator::{self, Engine as RustEngine};

/// Python wrapper for the Rust engine
#[pyclass(name = "Engine")]
pub struct PyEngine {
    inner: RustEngine,
}

#[pymethods]
impl PyEngine {
    /// Create an engine for `mode`, optionally from a JSON config document
    ///
    /// Raises ValueError on unknown modes or invalid parameters.
    #[new]
    #[pyo3(signature = (mode, config_json = None))]
    fn new(mode: &str, config_json: Option<&str>) -> PyResult<Self> {
        let mode = parse_mode(mode)?;
        let config = parse_config(config_json)?;
        let inner = RustEngine::new(&config, mode).map_err(to_py_err)?;
        Ok(PyEngine { inner })
    }

    /// Execute one step and return its summary dict
    ///
    /// Raises ArithmeticError on numeric degeneracy.
    fn advance<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let summary = self.inner.advance().map_err(to_py_err)?;
        summary_to_py(py, &summary)
    }

    /// Steps executed so far
    #[getter]
    fn step(&self) -> usize {
        self.inner.current_step()
    }

    /// Current population shares
    #[getter]
    fn shares(&self) -> Vec<f64> {
        self.inner.state().shares().to_vec()
    }

    /// Dynamics mode name
    #[getter]
    fn mode(&self) -> &'static str {
        self.inner.mode().as_str()
    }
}

/// Run one full scenario and return its history as a dict of lists
#[pyfunction]
#[pyo3(signature = (mode, config_json = None))]
pub fn run_scenario<'py>(
    py: Python<'py>,
    mode: &str,
    config_json: Option<&str>,
) -> PyResult<Bound<'py, PyDict>> {
    let mode = parse_mode(mode)?;
    let config = parse_config(config_json)?;
    let history = orchestrator::run_scenario(&config, mode).map_err(to_py_err)?;
    history_to_py(py, &history)
}
