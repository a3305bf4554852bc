//! Domain models for the population simulator

pub mod event;
pub mod mutation;
pub mod species;
pub mod state;

// Re-exports
pub use event::{Event, EventLog, TraitKind, TransitionDirection, TRANSITION_LEVEL};
pub use mutation::MutationMatrix;
pub use species::SpeciesConfig;
pub use state::PopulationState;
