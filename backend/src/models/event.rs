//! Event logging for run auditing and analysis.
//!
//! This module defines the Event enum which captures notable state changes
//! during a run. The numeric series in a history say *how much*; events say
//! *when* something qualitatively changed:
//! - **PhaseTransition**: a species' criticality signal crossed 0.5
//! - **TraitClamped**: an endogenous trait update hit its bound
//! - **DominanceShift**: a different species now holds the largest share
//!
//! # Example
//!
//! ```rust
//! use genesis_simulator_core_rs::models::{Event, EventLog, TransitionDirection};
//!
//! let mut log = EventLog::new();
//! log.log(Event::PhaseTransition {
//!     step: 42,
//!     species: 2,
//!     signal: 0.51,
//!     direction: TransitionDirection::Awakening,
//! });
//!
//! assert_eq!(log.events_at_step(42).len(), 1);
//! assert_eq!(log.events()[0].event_type(), "PhaseTransition");
//! ```

use serde::{Deserialize, Serialize};

/// Criticality level at which a species is considered "awakened"
pub const TRANSITION_LEVEL: f64 = 0.5;

/// Which way the criticality signal crossed `TRANSITION_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionDirection {
    /// Signal rose to or above the level
    Awakening,
    /// Signal fell back below the level
    Relapse,
}

/// Which endogenous trait was clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraitKind {
    Alignment,
    Bandwidth,
}

/// Simulation event capturing a state change.
///
/// All events carry the 1-based step at which they occurred. Events are
/// logged in the order they occur within a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Criticality signal of one species crossed `TRANSITION_LEVEL`
    PhaseTransition {
        step: usize,
        species: usize,
        signal: f64,
        direction: TransitionDirection,
    },

    /// Trait update produced a value outside its bounds and was clamped
    TraitClamped {
        step: usize,
        species: usize,
        trait_kind: TraitKind,
        raw: f64,
        clamped: f64,
    },

    /// The species with the largest share changed
    DominanceShift {
        step: usize,
        from: usize,
        to: usize,
        share: f64,
    },
}

impl Event {
    /// Step at which the event occurred
    pub fn step(&self) -> usize {
        match self {
            Event::PhaseTransition { step, .. } => *step,
            Event::TraitClamped { step, .. } => *step,
            Event::DominanceShift { step, .. } => *step,
        }
    }

    /// Short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::PhaseTransition { .. } => "PhaseTransition",
            Event::TraitClamped { .. } => "TraitClamped",
            Event::DominanceShift { .. } => "DominanceShift",
        }
    }

    /// Species the event refers to (the new dominant one for shifts)
    pub fn species(&self) -> usize {
        match self {
            Event::PhaseTransition { species, .. } => *species,
            Event::TraitClamped { species, .. } => *species,
            Event::DominanceShift { to, .. } => *to,
        }
    }
}

/// Append-only event log for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific step
    pub fn events_at_step(&self, step: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.step() == step).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific species
    pub fn events_for_species(&self, species: usize) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.species() == species)
            .collect()
    }

    /// First step at which `species` awakened, if it ever did
    pub fn first_awakening(&self, species: usize) -> Option<usize> {
        self.events.iter().find_map(|e| match e {
            Event::PhaseTransition {
                step,
                species: s,
                direction: TransitionDirection::Awakening,
                ..
            } if *s == species => Some(*step),
            _ => None,
        })
    }
}
