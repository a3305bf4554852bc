//! Scenario Runner
//!
//! Drives one engine for a fixed number of steps and collects its history.
//! Each run constructs a private engine, so runs share no mutable state and
//! can execute concurrently; [`run_comparison`] runs both modes on two
//! scoped threads.

use crate::dynamics::DynamicsMode;
use crate::orchestrator::config::{compute_config_hash, SimulationConfig};
use crate::orchestrator::engine::{Engine, SimulationError, StepSummary};
use crate::orchestrator::history::{ComparisonHistory, History};
use std::ops::ControlFlow;
use tracing::{debug, debug_span, info, warn};

/// Run one scenario for `config.steps` steps
///
/// # Example
///
/// ```rust
/// use genesis_simulator_core_rs::{run_scenario, DynamicsMode, SimulationConfig};
///
/// let config = SimulationConfig { steps: 20, ..Default::default() };
/// let history = run_scenario(&config, DynamicsMode::Darwinian).unwrap();
///
/// assert_eq!(history.len(), 20);
/// assert_eq!(history.mean_bandwidth()[0], history.mean_bandwidth()[19]);
/// ```
pub fn run_scenario(
    config: &SimulationConfig,
    mode: DynamicsMode,
) -> Result<History, SimulationError> {
    run_scenario_with(config, mode, |_| ControlFlow::Continue(()))
}

/// Run one scenario, letting `observer` see every step and stop early
///
/// `config.steps` is a cap checked once per iteration; returning
/// `ControlFlow::Break(())` ends the run after the current step has been
/// recorded.
///
/// # Example
///
/// ```rust
/// use std::ops::ControlFlow;
/// use genesis_simulator_core_rs::{run_scenario_with, DynamicsMode, SimulationConfig};
///
/// let config = SimulationConfig::default();
/// let history = run_scenario_with(&config, DynamicsMode::EndogenousAlignment, |summary| {
///     if summary.mean_criticality > 0.5 {
///         ControlFlow::Break(())
///     } else {
///         ControlFlow::Continue(())
///     }
/// })
/// .unwrap();
///
/// assert!(history.len() < config.steps);
/// ```
pub fn run_scenario_with<F>(
    config: &SimulationConfig,
    mode: DynamicsMode,
    mut observer: F,
) -> Result<History, SimulationError>
where
    F: FnMut(&StepSummary) -> ControlFlow<()>,
{
    let config_hash = compute_config_hash(config)?;
    let span = debug_span!(
        "scenario",
        mode = %mode,
        steps = config.steps,
        config_hash = &config_hash[..12]
    );
    let _guard = span.enter();

    let mut engine = Engine::new(config, mode)?;
    let mut history = History::new(
        mode,
        config.dt,
        config_hash,
        engine.species_labels().to_vec(),
    );

    debug!(
        species = engine.state().num_species(),
        traits = engine.trait_policy(),
        "scenario started"
    );

    for _ in 0..config.steps {
        let summary = engine.advance().map_err(|e| {
            warn!(error = %e, step = engine.current_step() + 1, "scenario aborted");
            e
        })?;

        let flow = observer(&summary);
        history.record(summary);

        if flow.is_break() {
            debug!(step = engine.current_step(), "scenario stopped by observer");
            break;
        }
    }

    history.set_events(engine.take_event_log());

    if let Some(last) = history.final_summary() {
        info!(
            mode = %mode,
            steps = last.step,
            mean_alignment = last.mean_alignment,
            mean_bandwidth = last.mean_bandwidth,
            mean_criticality = last.mean_criticality,
            events = history.events().len(),
            "scenario complete"
        );
    }

    Ok(history)
}

/// Run both modes with the same config on two isolated threads
///
/// # Errors
///
/// Returns the first error in mode order (endogenous, then Darwinian).
pub fn run_comparison(config: &SimulationConfig) -> Result<ComparisonHistory, SimulationError> {
    let (endogenous, darwinian) = std::thread::scope(|scope| {
        let endogenous =
            scope.spawn(|| run_scenario(config, DynamicsMode::EndogenousAlignment));
        let darwinian = scope.spawn(|| run_scenario(config, DynamicsMode::Darwinian));

        (
            endogenous
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic)),
            darwinian
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic)),
        )
    });

    Ok(ComparisonHistory {
        endogenous: endogenous?,
        darwinian: darwinian?,
    })
}
