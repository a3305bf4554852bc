//! Simulation configuration
//!
//! Every parameter of a run lives in [`SimulationConfig`]. `Default` is the
//! reference scenario (three species, 1000 steps of width 0.05, energy
//! influx 1.2). Configs round-trip through JSON; missing fields fall back to
//! the reference values, so a document only needs the fields it changes:
//!
//! ```rust
//! use genesis_simulator_core_rs::SimulationConfig;
//!
//! let config = SimulationConfig::from_json_str(r#"{ "phi": 2.0, "steps": 50 }"#).unwrap();
//! assert_eq!(config.phi, 2.0);
//! assert_eq!(config.steps, 50);
//! assert_eq!(config.dt, 0.05);
//! assert_eq!(config.num_species(), 3);
//! ```

use crate::dynamics::{
    AlignmentCoefficients, BandwidthCoefficients, CriticalityParams, FitnessWeights, TraitBounds,
};
use crate::models::SpeciesConfig;
use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Complete run configuration
///
/// # Fields
///
/// * `dt` - Step width
/// * `steps` - Number of steps a scenario runs (T_max)
/// * `phi` - Energy influx, constant across species and time
/// * `mutation_rate` - `mu` used to build the mutation matrix
/// * `selection_pressure` - `beta_sel` in `exp(beta_sel * F_eff)`
/// * `species` - One entry per species; K = `species.len()`
/// * `initial_shares` - Starting distribution (uniform when `None`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub dt: f64,
    pub steps: usize,
    pub phi: f64,
    pub mutation_rate: f64,
    pub selection_pressure: f64,
    pub fitness: FitnessWeights,
    pub alignment: AlignmentCoefficients,
    pub bandwidth: BandwidthCoefficients,
    pub criticality: CriticalityParams,
    pub bounds: TraitBounds,
    pub species: Vec<SpeciesConfig>,
    pub initial_shares: Option<Vec<f64>>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 0.05,
            steps: 1000,
            phi: 1.2,
            mutation_rate: 0.01,
            selection_pressure: 2.0,
            fitness: FitnessWeights::default(),
            alignment: AlignmentCoefficients::default(),
            bandwidth: BandwidthCoefficients::default(),
            criticality: CriticalityParams::default(),
            bounds: TraitBounds::default(),
            species: SpeciesConfig::reference_set(),
            initial_shares: None,
        }
    }
}

impl SimulationConfig {
    /// Number of species K
    pub fn num_species(&self) -> usize {
        self.species.len()
    }

    /// Parse a JSON document, overlaying it on the defaults
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json)
            .map_err(|e| SimulationError::Config(format!("invalid config JSON: {}", e)))
    }

    /// Read and parse a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SimulationError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SimulationError::Serialization(format!("config serialization failed: {}", e)))
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when:
    /// - fewer than 2 species
    /// - `dt` is not positive and finite
    /// - `mutation_rate` is outside `[0, 1]`
    /// - any scalar parameter or species constant is not finite
    /// - a bound has `min > max`
    /// - `initial_shares` has the wrong length, a negative entry, or does
    ///   not sum to a positive finite value
    pub fn validate(&self) -> Result<(), SimulationError> {
        let k = self.num_species();
        if k < 2 {
            return Err(invalid(format!(
                "at least 2 species are required, got {}",
                k
            )));
        }

        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(invalid(format!("dt must be > 0, got {}", self.dt)));
        }

        if !self.mutation_rate.is_finite() || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }

        for (name, value) in [("phi", self.phi), ("selection_pressure", self.selection_pressure)] {
            if !value.is_finite() {
                return Err(invalid(format!("{} must be finite, got {}", name, value)));
            }
        }

        if !self.fitness.is_finite() {
            return Err(invalid("fitness weights must be finite".to_string()));
        }
        if !self.criticality.is_finite() {
            return Err(invalid("criticality parameters must be finite".to_string()));
        }

        let a = &self.alignment;
        let b = &self.bandwidth;
        if ![a.alpha, a.beta, a.gamma, b.rho_r, b.rho_phi, b.rho_c, b.lambda]
            .iter()
            .all(|c| c.is_finite())
        {
            return Err(invalid("trait dynamics coefficients must be finite".to_string()));
        }

        let bounds = &self.bounds;
        for (name, min, max) in [
            ("alignment", bounds.alignment_min, bounds.alignment_max),
            ("bandwidth", bounds.bandwidth_min, bounds.bandwidth_max),
        ] {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(invalid(format!(
                    "{} bounds must be finite with min <= max, got [{}, {}]",
                    name, min, max
                )));
            }
        }

        for species in &self.species {
            let values = [
                species.initial_alignment,
                species.initial_bandwidth,
                species.meaning,
                species.friction,
            ];
            if !values.iter().all(|v| v.is_finite()) {
                return Err(invalid(format!(
                    "species '{}' has a non-finite value",
                    species.label
                )));
            }
        }

        self.normalized_initial_shares().map(|_| ())
    }

    /// Initial share vector scaled to sum to 1
    ///
    /// Uniform `1/K` when `initial_shares` is `None`.
    pub fn normalized_initial_shares(&self) -> Result<Vec<f64>, SimulationError> {
        let k = self.num_species();
        let shares = match &self.initial_shares {
            None => return Ok(vec![1.0 / k as f64; k]),
            Some(shares) => shares,
        };

        if shares.len() != k {
            return Err(invalid(format!(
                "initial_shares has {} entries but there are {} species",
                shares.len(),
                k
            )));
        }
        if shares.iter().any(|x| !x.is_finite() || *x < 0.0) {
            return Err(invalid(
                "initial_shares must be finite and non-negative".to_string(),
            ));
        }

        let total: f64 = shares.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(invalid(format!(
                "initial_shares must sum to a positive value, got {}",
                total
            )));
        }

        Ok(shares.iter().map(|x| x / total).collect())
    }
}

fn invalid(msg: String) -> SimulationError {
    SimulationError::InvalidParameter(msg)
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of a config
///
/// Recorded in every history so exported series can be traced back to the
/// exact parameter set that produced them.
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on field order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        SimulationConfig::default().validate().unwrap();
    }

    #[test]
    fn test_default_shares_uniform() {
        let shares = SimulationConfig::default().normalized_initial_shares().unwrap();
        assert_eq!(shares, vec![1.0 / 3.0; 3]);
    }

    #[test]
    fn test_initial_shares_normalized() {
        let config = SimulationConfig {
            initial_shares: Some(vec![2.0, 1.0, 1.0]),
            ..Default::default()
        };
        let shares = config.normalized_initial_shares().unwrap();
        assert_eq!(shares, vec![0.5, 0.25, 0.25]);
    }

    #[test]
    fn test_compute_config_hash_deterministic() {
        let hash1 = compute_config_hash(&SimulationConfig::default()).unwrap();
        let hash2 = compute_config_hash(&SimulationConfig::default()).unwrap();
        assert_eq!(hash1, hash2, "Same config should produce same hash");
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_compute_config_hash_different_for_different_configs() {
        let config2 = SimulationConfig {
            phi: 1.3,
            ..Default::default()
        };

        assert_ne!(
            compute_config_hash(&SimulationConfig::default()).unwrap(),
            compute_config_hash(&config2).unwrap(),
            "Different configs should produce different hashes"
        );
    }
}
