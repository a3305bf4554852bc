//! Simulation Engine
//!
//! Owns the population state and advances it one discrete step at a time.
//!
//! # Architecture
//!
//! ```text
//! For each step t:
//! 1. Core fitness      F_core = w·(R, B, M, -C)
//! 2. Criticality gate  s = sigmoid(kappa*(R + B - 0.5C - tau_c)), gain(s)
//! 3. Effective fitness F_eff = F_core * gain
//! 4. Selection         F_prob = exp(beta_sel * F_eff)
//! 5. Replicator-mutator x' = ((x ⊙ F_prob) · Q) / phi_bar
//! 6. Trait update      R', B' (EndogenousAlignment only)
//! 7. Commit state, log events, advance clock
//! ```
//!
//! Steps 1-6 only read the state. Nothing is written until step 7, so a
//! step that fails with `NumericDegeneracy` leaves the engine exactly as it
//! was before the call.
//!
//! # Example
//!
//! ```rust
//! use genesis_simulator_core_rs::{DynamicsMode, Engine, SimulationConfig};
//!
//! let config = SimulationConfig::default();
//! let mut engine = Engine::new(&config, DynamicsMode::EndogenousAlignment).unwrap();
//!
//! for _ in 0..10 {
//!     let summary = engine.advance().unwrap();
//!     let total: f64 = summary.shares.iter().sum();
//!     assert!((total - 1.0).abs() < 1e-9);
//! }
//! assert_eq!(engine.current_step(), 10);
//! ```

use crate::core::numeric::mean;
use crate::core::time::StepClock;
use crate::dynamics::{
    replicator_mutator_update, selection_weights, ClampRecord, CriticalityParams, DynamicsMode,
    EndogenousTraits, FitnessWeights, FixedTraits, TraitDynamics,
};
use crate::models::{
    Event, EventLog, MutationMatrix, PopulationState, TraitKind, TransitionDirection,
    TRANSITION_LEVEL,
};
use crate::orchestrator::config::SimulationConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

// ============================================================================
// Errors and Results
// ============================================================================

/// Simulation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Malformed dimensions, non-positive `dt`, degenerate initial
    /// distribution, or any other construction-time problem
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Normalisation denominator was zero, negative, or not finite
    #[error("Numeric degeneracy at step {step}: phi_bar = {phi_bar}")]
    NumericDegeneracy { step: usize, phi_bar: f64 },

    /// Config file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization of configs or histories failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSummary {
    /// Step number (1-based: the first `advance` returns step 1)
    pub step: usize,

    /// Population shares after the step
    pub shares: Vec<f64>,

    /// Mean alignment after the step
    pub mean_alignment: f64,

    /// Mean bandwidth after the step
    pub mean_bandwidth: f64,

    /// Mean criticality signal computed during the step
    pub mean_criticality: f64,

    /// Normaliser `phi_bar` (population mean fitness after mutation)
    pub mean_fitness: f64,
}

// ============================================================================
// Engine
// ============================================================================

/// Replicator-mutator simulation engine
///
/// Exclusively owns its population state; callers only observe it through
/// shared references and step summaries.
///
/// # Determinism
///
/// There is no randomness anywhere in the engine. The same config and mode
/// produce bit-identical summaries.
pub struct Engine {
    /// Dynamics mode this engine was built for
    mode: DynamicsMode,

    /// Per-species vectors
    state: PopulationState,

    /// Species labels (index-aligned with the state vectors)
    labels: Vec<String>,

    /// Row-stochastic mutation matrix
    mutation: MutationMatrix,

    /// Core fitness weights
    fitness: FitnessWeights,

    /// Sigmoid gate parameters
    criticality: CriticalityParams,

    /// Energy influx
    phi: f64,

    /// Selection pressure beta_sel
    selection_pressure: f64,

    /// Trait evolution policy selected by `mode`
    traits: Box<dyn TraitDynamics>,

    /// Step counter
    clock: StepClock,

    /// Notable state changes
    event_log: EventLog,

    /// Criticality signals from the previous step (for crossing detection)
    last_signals: Option<Vec<f64>>,
}

impl Engine {
    /// Create a new engine from configuration
    ///
    /// Seed alignment and bandwidth values outside their bounds are clamped;
    /// initial shares are normalised to sum to 1.
    ///
    /// # Returns
    ///
    /// * `Ok(Engine)` - Engine at step 0
    /// * `Err(SimulationError::InvalidParameter)` - Configuration validation failed
    pub fn new(config: &SimulationConfig, mode: DynamicsMode) -> Result<Self, SimulationError> {
        config.validate()?;

        let k = config.num_species();
        let mutation = MutationMatrix::uniform(k, config.mutation_rate)?;

        let shares = config.normalized_initial_shares()?;
        let alignment = config
            .species
            .iter()
            .map(|s| config.bounds.clamp_alignment(s.initial_alignment).0)
            .collect();
        let bandwidth = config
            .species
            .iter()
            .map(|s| config.bounds.clamp_bandwidth(s.initial_bandwidth).0)
            .collect();
        let meaning = config.species.iter().map(|s| s.meaning).collect();
        let friction = config.species.iter().map(|s| s.friction).collect();

        let state = PopulationState::new(shares, alignment, bandwidth, meaning, friction)?;

        let traits: Box<dyn TraitDynamics> = match mode {
            DynamicsMode::Darwinian => Box::new(FixedTraits),
            DynamicsMode::EndogenousAlignment => Box::new(EndogenousTraits::new(
                config.alignment,
                config.bandwidth,
                config.bounds,
            )),
        };

        Ok(Self {
            mode,
            state,
            labels: config.species.iter().map(|s| s.label.clone()).collect(),
            mutation,
            fitness: config.fitness,
            criticality: config.criticality,
            phi: config.phi,
            selection_pressure: config.selection_pressure,
            traits,
            clock: StepClock::new(config.dt),
            event_log: EventLog::new(),
            last_signals: None,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn mode(&self) -> DynamicsMode {
        self.mode
    }

    /// Number of steps executed so far
    pub fn current_step(&self) -> usize {
        self.clock.current_step()
    }

    /// Simulated time elapsed
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn dt(&self) -> f64 {
        self.clock.dt()
    }

    /// Name of the trait evolution policy in use
    pub fn trait_policy(&self) -> &'static str {
        self.traits.name()
    }

    pub fn state(&self) -> &PopulationState {
        &self.state
    }

    pub fn species_labels(&self) -> &[String] {
        &self.labels
    }

    pub fn mutation_matrix(&self) -> &MutationMatrix {
        &self.mutation
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Move the event log out, leaving an empty one behind
    pub fn take_event_log(&mut self) -> EventLog {
        std::mem::take(&mut self.event_log)
    }

    // ========================================================================
    // Step Implementation
    // ========================================================================

    /// Execute one simulation step
    ///
    /// # Returns
    ///
    /// * `Ok(StepSummary)` - Step executed and committed
    /// * `Err(SimulationError::NumericDegeneracy)` - `phi_bar` was zero or
    ///   not finite; state is unchanged
    pub fn advance(&mut self) -> Result<StepSummary, SimulationError> {
        let step = self.clock.current_step() + 1;
        let k = self.state.num_species();

        // STEP 1: CORE FITNESS
        let mut effective = vec![0.0; k];
        self.fitness.core_fitness(&self.state, &mut effective);

        // STEP 2: CRITICALITY GATE
        let mut signals = vec![0.0; k];
        let mut gains = vec![0.0; k];
        self.criticality.gate(&self.state, &mut signals, &mut gains);

        // STEP 3: EFFECTIVE FITNESS
        for (f, gain) in effective.iter_mut().zip(&gains) {
            *f *= gain;
        }

        // STEP 4: SELECTION TRANSFORM
        let mut selection = vec![0.0; k];
        selection_weights(self.selection_pressure, &effective, &mut selection);

        // STEP 5: REPLICATOR-MUTATOR UPDATE
        let mut next_shares = vec![0.0; k];
        let phi_bar = replicator_mutator_update(
            self.state.shares(),
            &selection,
            &self.mutation,
            step,
            &mut next_shares,
        )?;

        // STEP 6: TRAIT UPDATE (reads pre-update R and B)
        let trait_update = self.traits.update(&self.state, self.phi, self.clock.dt());

        // STEP 7: COMMIT
        let previous_dominant = self.state.dominant_species();
        self.state.set_shares(&next_shares);

        if let Some(update) = trait_update {
            self.log_clamps(step, &update.clamps);
            self.state.set_traits(&update.alignment, &update.bandwidth);
        }

        self.log_transitions(step, &signals);
        self.log_dominance_shift(step, previous_dominant);
        self.last_signals = Some(signals.clone());
        self.clock.advance();

        let summary = StepSummary {
            step,
            shares: next_shares,
            mean_alignment: self.state.mean_alignment(),
            mean_bandwidth: self.state.mean_bandwidth(),
            mean_criticality: mean(&signals),
            mean_fitness: phi_bar,
        };

        trace!(
            step,
            mean_alignment = summary.mean_alignment,
            mean_bandwidth = summary.mean_bandwidth,
            mean_criticality = summary.mean_criticality,
            "step"
        );

        Ok(summary)
    }

    // ========================================================================
    // Event Logging
    // ========================================================================

    /// Log clamps that moved a trait onto its bound
    ///
    /// A trait resting on its bound is clamped every step; only the first
    /// step it lands there is logged.
    fn log_clamps(&mut self, step: usize, clamps: &[ClampRecord]) {
        for clamp in clamps {
            let previous = match clamp.trait_kind {
                TraitKind::Alignment => self.state.alignment()[clamp.species],
                TraitKind::Bandwidth => self.state.bandwidth()[clamp.species],
            };
            if previous != clamp.clamped {
                self.event_log.log(Event::TraitClamped {
                    step,
                    species: clamp.species,
                    trait_kind: clamp.trait_kind,
                    raw: clamp.raw,
                    clamped: clamp.clamped,
                });
            }
        }
    }

    fn log_transitions(&mut self, step: usize, signals: &[f64]) {
        for (species, &signal) in signals.iter().enumerate() {
            let was_above = self
                .last_signals
                .as_ref()
                .map_or(false, |prev| prev[species] >= TRANSITION_LEVEL);
            let is_above = signal >= TRANSITION_LEVEL;

            if is_above != was_above {
                let direction = if is_above {
                    TransitionDirection::Awakening
                } else {
                    TransitionDirection::Relapse
                };
                self.event_log.log(Event::PhaseTransition {
                    step,
                    species,
                    signal,
                    direction,
                });
            }
        }
    }

    fn log_dominance_shift(&mut self, step: usize, previous: usize) {
        let current = self.state.dominant_species();
        if current != previous {
            self.event_log.log(Event::DominanceShift {
                step,
                from: previous,
                to: current,
                share: self.state.shares()[current],
            });
        }
    }
}
