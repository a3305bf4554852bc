//! History - per-step time series of one scenario run
//!
//! A history is append-only while its run is in progress and read-only
//! afterwards. All series are index-aligned: entry `i` of every series
//! describes step `i + 1`, and the time axis maps index `i` to `i * dt`.
//!
//! # Export
//!
//! - [`History::write_csv`]: flat numeric series, one row per step
//! - [`History::to_json`]: full history including events and provenance

use crate::dynamics::DynamicsMode;
use crate::models::EventLog;
use crate::orchestrator::engine::{SimulationError, StepSummary};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Recorded time series of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    mode: DynamicsMode,
    dt: f64,
    /// SHA-256 of the config that produced this history
    config_hash: String,
    species_labels: Vec<String>,
    shares: Vec<Vec<f64>>,
    mean_alignment: Vec<f64>,
    mean_bandwidth: Vec<f64>,
    mean_criticality: Vec<f64>,
    mean_fitness: Vec<f64>,
    events: EventLog,
}

impl History {
    /// Create an empty history
    pub fn new(
        mode: DynamicsMode,
        dt: f64,
        config_hash: String,
        species_labels: Vec<String>,
    ) -> Self {
        Self {
            mode,
            dt,
            config_hash,
            species_labels,
            shares: Vec::new(),
            mean_alignment: Vec::new(),
            mean_bandwidth: Vec::new(),
            mean_criticality: Vec::new(),
            mean_fitness: Vec::new(),
            events: EventLog::new(),
        }
    }

    /// Append one step
    pub(crate) fn record(&mut self, summary: StepSummary) {
        self.mean_alignment.push(summary.mean_alignment);
        self.mean_bandwidth.push(summary.mean_bandwidth);
        self.mean_criticality.push(summary.mean_criticality);
        self.mean_fitness.push(summary.mean_fitness);
        self.shares.push(summary.shares);
    }

    pub(crate) fn set_events(&mut self, events: EventLog) {
        self.events = events;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of recorded steps
    pub fn len(&self) -> usize {
        self.mean_bandwidth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean_bandwidth.is_empty()
    }

    pub fn mode(&self) -> DynamicsMode {
        self.mode
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    pub fn species_labels(&self) -> &[String] {
        &self.species_labels
    }

    pub fn shares(&self) -> &[Vec<f64>] {
        &self.shares
    }

    pub fn mean_alignment(&self) -> &[f64] {
        &self.mean_alignment
    }

    pub fn mean_bandwidth(&self) -> &[f64] {
        &self.mean_bandwidth
    }

    pub fn mean_criticality(&self) -> &[f64] {
        &self.mean_criticality
    }

    pub fn mean_fitness(&self) -> &[f64] {
        &self.mean_fitness
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Time axis `[0, dt, 2*dt, ...]`, one entry per recorded step
    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.len()).map(|i| i as f64 * self.dt).collect()
    }

    /// Share series of a single species
    pub fn species_shares(&self, species: usize) -> Vec<f64> {
        self.shares.iter().map(|x| x[species]).collect()
    }

    /// Summary of the step at `index` (0-based)
    pub fn summary(&self, index: usize) -> Option<StepSummary> {
        if index >= self.len() {
            return None;
        }
        Some(StepSummary {
            step: index + 1,
            shares: self.shares[index].clone(),
            mean_alignment: self.mean_alignment[index],
            mean_bandwidth: self.mean_bandwidth[index],
            mean_criticality: self.mean_criticality[index],
            mean_fitness: self.mean_fitness[index],
        })
    }

    /// Summary of the last recorded step
    pub fn final_summary(&self) -> Option<StepSummary> {
        self.len().checked_sub(1).and_then(|i| self.summary(i))
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Write the series as CSV
    ///
    /// Columns: `step,time,mean_alignment,mean_bandwidth,mean_criticality,mean_fitness`
    /// followed by one `share_<label>` column per species.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(
            writer,
            "step,time,mean_alignment,mean_bandwidth,mean_criticality,mean_fitness"
        )?;
        for label in &self.species_labels {
            write!(writer, ",share_{}", label)?;
        }
        writeln!(writer)?;

        for (i, time) in self.time_axis().into_iter().enumerate() {
            write!(
                writer,
                "{},{},{},{},{},{}",
                i + 1,
                time,
                self.mean_alignment[i],
                self.mean_bandwidth[i],
                self.mean_criticality[i],
                self.mean_fitness[i]
            )?;
            for share in &self.shares[i] {
                write!(writer, ",{}", share)?;
            }
            writeln!(writer)?;
        }

        writer.flush()
    }

    /// Serialize the whole history (series, events, provenance) to JSON
    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self)
            .map_err(|e| SimulationError::Serialization(format!("history serialization failed: {}", e)))
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// The two histories of a Darwinian vs endogenous comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonHistory {
    pub endogenous: History,
    pub darwinian: History,
}

/// Final-step figures of a comparison, for logging and reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub steps: usize,
    pub endogenous_final_bandwidth: f64,
    pub darwinian_final_bandwidth: f64,
    pub endogenous_final_alignment: f64,
    pub darwinian_final_alignment: f64,
    pub endogenous_final_criticality: f64,
    pub darwinian_final_criticality: f64,
    /// Number of phase transitions logged in the endogenous run
    pub endogenous_transitions: usize,
}

impl ComparisonHistory {
    /// History for `mode`
    pub fn get(&self, mode: DynamicsMode) -> &History {
        match mode {
            DynamicsMode::EndogenousAlignment => &self.endogenous,
            DynamicsMode::Darwinian => &self.darwinian,
        }
    }

    /// Final-step figures; `None` if either run recorded no steps
    pub fn summary(&self) -> Option<ComparisonSummary> {
        let endo = self.endogenous.final_summary()?;
        let darwin = self.darwinian.final_summary()?;

        Some(ComparisonSummary {
            steps: endo.step.min(darwin.step),
            endogenous_final_bandwidth: endo.mean_bandwidth,
            darwinian_final_bandwidth: darwin.mean_bandwidth,
            endogenous_final_alignment: endo.mean_alignment,
            darwinian_final_alignment: darwin.mean_alignment,
            endogenous_final_criticality: endo.mean_criticality,
            darwinian_final_criticality: darwin.mean_criticality,
            endogenous_transitions: self
                .endogenous
                .events()
                .events_of_type("PhaseTransition")
                .len(),
        })
    }
}
