//! Species configuration
//!
//! A species is one strategy competing for population share. Its meaning
//! potential and friction are fixed genetic predispositions; alignment and
//! bandwidth are seeded here and may evolve during the run.

use serde::{Deserialize, Serialize};

/// Per-species initial conditions and fixed environment profile
///
/// # Example
/// ```
/// use genesis_simulator_core_rs::SpeciesConfig;
///
/// let efficient = SpeciesConfig::new("efficient", 0.15, 0.1, 1.5, 0.3);
/// assert_eq!(efficient.label, "efficient");
/// assert_eq!(efficient.friction, 0.3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    /// Human-readable label (used in events and exports)
    pub label: String,

    /// Seed alignment R, clamped into the alignment bounds at construction
    pub initial_alignment: f64,

    /// Seed bandwidth B, clamped into the bandwidth bounds at construction
    pub initial_bandwidth: f64,

    /// Meaning potential M (constant for the whole run)
    pub meaning: f64,

    /// Friction / noise C (constant for the whole run)
    pub friction: f64,
}

impl SpeciesConfig {
    pub fn new(
        label: impl Into<String>,
        initial_alignment: f64,
        initial_bandwidth: f64,
        meaning: f64,
        friction: f64,
    ) -> Self {
        Self {
            label: label.into(),
            initial_alignment,
            initial_bandwidth,
            meaning,
            friction,
        }
    }

    /// The three reference species: low-meaning/high-friction, balanced,
    /// and high-meaning/low-friction
    pub fn reference_set() -> Vec<SpeciesConfig> {
        vec![
            SpeciesConfig::new("species_0", 0.1, 0.1, 0.5, 0.8),
            SpeciesConfig::new("species_1", 0.2, 0.1, 1.0, 0.5),
            SpeciesConfig::new("species_2", 0.15, 0.1, 1.5, 0.3),
        ]
    }
}
