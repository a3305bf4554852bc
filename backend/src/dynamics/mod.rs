//! Population dynamics
//!
//! The pieces of one simulation step, each a pure function of the current
//! [`PopulationState`](crate::models::PopulationState) and fixed parameters:
//!
//! 1. **fitness**: weighted core fitness per species
//! 2. **criticality**: sigmoid-gated phase-transition signal and fitness gain
//! 3. **replicator**: selection transform and replicator-mutator share update
//! 4. **traits**: alignment/bandwidth evolution, selected by [`DynamicsMode`]
//!
//! The engine in `orchestrator` composes them in that order.

pub mod criticality;
pub mod fitness;
pub mod replicator;
pub mod traits;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use criticality::CriticalityParams;
pub use fitness::FitnessWeights;
pub use replicator::{replicator_mutator_update, selection_weights};
pub use traits::{
    AlignmentCoefficients, BandwidthCoefficients, ClampRecord, EndogenousTraits, FixedTraits,
    TraitBounds, TraitDynamics, TraitUpdate,
};

/// Selects whether alignment and bandwidth evolve during a run
///
/// # Example
/// ```
/// use genesis_simulator_core_rs::DynamicsMode;
///
/// let mode: DynamicsMode = "darwinian".parse().unwrap();
/// assert_eq!(mode, DynamicsMode::Darwinian);
/// assert!(!mode.evolves_traits());
/// assert!(DynamicsMode::EndogenousAlignment.evolves_traits());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicsMode {
    /// Fixed traits; survival of the fittest only (comparison baseline)
    Darwinian,
    /// Alignment and bandwidth evolve endogenously each step
    EndogenousAlignment,
}

impl DynamicsMode {
    /// Both modes, endogenous first (the order comparison runs report them)
    pub const ALL: [DynamicsMode; 2] = [DynamicsMode::EndogenousAlignment, DynamicsMode::Darwinian];

    /// Whether R and B are updated each step
    pub fn evolves_traits(&self) -> bool {
        matches!(self, DynamicsMode::EndogenousAlignment)
    }

    /// Stable lowercase name used in file names and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            DynamicsMode::Darwinian => "darwinian",
            DynamicsMode::EndogenousAlignment => "endogenous",
        }
    }
}

impl fmt::Display for DynamicsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DynamicsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "darwinian" | "standard" => Ok(DynamicsMode::Darwinian),
            "endogenous" | "endogenous_alignment" | "love_os" => {
                Ok(DynamicsMode::EndogenousAlignment)
            }
            other => Err(format!("unknown dynamics mode: {}", other)),
        }
    }
}
