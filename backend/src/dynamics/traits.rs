//! Trait dynamics (alignment R and bandwidth B)
//!
//! # Policy Interface
//!
//! Trait evolution is pluggable through the [`TraitDynamics`] trait. The
//! engine asks its policy for an update each step and commits whatever it
//! returns; `None` leaves the traits untouched.
//!
//! Two policies ship with the crate:
//! 1. [`FixedTraits`]: Darwinian baseline, traits never change
//! 2. [`EndogenousTraits`]: coupled feedback loop
//!
//! ```text
//! dR = alpha*Phi*(1-R) + beta*B*(1-R) - gamma*C*R
//! dB = rho_R*R + rho_Phi*Phi - rho_C*C - lambda*B
//! R' = clamp(R + dt*dR, R_min, R_max)
//! B' = clamp(B + dt*dB, B_min, B_max)
//! ```
//!
//! Clamping is a normal branch, not a failure. Every clamp is reported in
//! [`TraitUpdate::clamps`] so the engine can log it.

use crate::core::numeric::clamp_with_flag;
use crate::models::{PopulationState, TraitKind};
use serde::{Deserialize, Serialize};

/// Alignment dynamics coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentCoefficients {
    /// Reinforcement by energy influx
    pub alpha: f64,
    /// Reinforcement by bandwidth
    pub beta: f64,
    /// Erosion by friction
    pub gamma: f64,
}

impl Default for AlignmentCoefficients {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.8,
            gamma: 0.4,
        }
    }
}

/// Bandwidth dynamics coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandwidthCoefficients {
    /// Growth driven by alignment
    pub rho_r: f64,
    /// Growth driven by energy influx
    pub rho_phi: f64,
    /// Loss driven by friction
    pub rho_c: f64,
    /// Decay rate
    pub lambda: f64,
}

impl Default for BandwidthCoefficients {
    fn default() -> Self {
        Self {
            rho_r: 0.4,
            rho_phi: 0.1,
            rho_c: 0.3,
            lambda: 0.02,
        }
    }
}

/// Closed intervals that R and B are clamped into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitBounds {
    pub alignment_min: f64,
    pub alignment_max: f64,
    pub bandwidth_min: f64,
    pub bandwidth_max: f64,
}

impl Default for TraitBounds {
    fn default() -> Self {
        Self {
            alignment_min: 0.0,
            alignment_max: 1.0,
            bandwidth_min: 0.01,
            bandwidth_max: 5.0,
        }
    }
}

impl TraitBounds {
    pub fn clamp_alignment(&self, value: f64) -> (f64, bool) {
        clamp_with_flag(value, self.alignment_min, self.alignment_max)
    }

    pub fn clamp_bandwidth(&self, value: f64) -> (f64, bool) {
        clamp_with_flag(value, self.bandwidth_min, self.bandwidth_max)
    }

    pub fn contains_alignment(&self, value: f64) -> bool {
        (self.alignment_min..=self.alignment_max).contains(&value)
    }

    pub fn contains_bandwidth(&self, value: f64) -> bool {
        (self.bandwidth_min..=self.bandwidth_max).contains(&value)
    }
}

/// One clamped trait value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampRecord {
    pub species: usize,
    pub trait_kind: TraitKind,
    /// Value before clamping
    pub raw: f64,
    /// Value after clamping
    pub clamped: f64,
}

/// New trait vectors produced by a policy
#[derive(Debug, Clone, PartialEq)]
pub struct TraitUpdate {
    pub alignment: Vec<f64>,
    pub bandwidth: Vec<f64>,
    pub clamps: Vec<ClampRecord>,
}

/// Trait evolution policy
///
/// Implementations are pure: they read the current state and return the
/// next trait values without mutating anything.
pub trait TraitDynamics: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Next alignment/bandwidth values, or `None` to leave them unchanged
    ///
    /// # Arguments
    ///
    /// * `state` - Current population (pre-update traits)
    /// * `phi` - Energy influx
    /// * `dt` - Step width
    fn update(&self, state: &PopulationState, phi: f64, dt: f64) -> Option<TraitUpdate>;
}

/// Darwinian baseline: traits are fixed genetic predispositions
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTraits;

impl TraitDynamics for FixedTraits {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn update(&self, _state: &PopulationState, _phi: f64, _dt: f64) -> Option<TraitUpdate> {
        None
    }
}

/// Endogenous alignment/bandwidth feedback loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndogenousTraits {
    alignment: AlignmentCoefficients,
    bandwidth: BandwidthCoefficients,
    bounds: TraitBounds,
}

impl EndogenousTraits {
    pub fn new(
        alignment: AlignmentCoefficients,
        bandwidth: BandwidthCoefficients,
        bounds: TraitBounds,
    ) -> Self {
        Self {
            alignment,
            bandwidth,
            bounds,
        }
    }

    /// Rate of change of alignment for one species
    pub fn alignment_rate(&self, r: f64, b: f64, c: f64, phi: f64) -> f64 {
        let a = &self.alignment;
        a.alpha * phi * (1.0 - r) + a.beta * b * (1.0 - r) - a.gamma * c * r
    }

    /// Rate of change of bandwidth for one species
    pub fn bandwidth_rate(&self, r: f64, b: f64, c: f64, phi: f64) -> f64 {
        let k = &self.bandwidth;
        k.rho_r * r + k.rho_phi * phi - k.rho_c * c - k.lambda * b
    }
}

impl TraitDynamics for EndogenousTraits {
    fn name(&self) -> &'static str {
        "endogenous"
    }

    fn update(&self, state: &PopulationState, phi: f64, dt: f64) -> Option<TraitUpdate> {
        let k = state.num_species();
        let mut alignment = Vec::with_capacity(k);
        let mut bandwidth = Vec::with_capacity(k);
        let mut clamps = Vec::new();

        for i in 0..k {
            let r = state.alignment()[i];
            let b = state.bandwidth()[i];
            let c = state.friction()[i];

            // Both rates use pre-update R and B
            let raw_r = r + dt * self.alignment_rate(r, b, c, phi);
            let raw_b = b + dt * self.bandwidth_rate(r, b, c, phi);

            let (new_r, r_clamped) = self.bounds.clamp_alignment(raw_r);
            let (new_b, b_clamped) = self.bounds.clamp_bandwidth(raw_b);

            if r_clamped {
                clamps.push(ClampRecord {
                    species: i,
                    trait_kind: TraitKind::Alignment,
                    raw: raw_r,
                    clamped: new_r,
                });
            }
            if b_clamped {
                clamps.push(ClampRecord {
                    species: i,
                    trait_kind: TraitKind::Bandwidth,
                    raw: raw_b,
                    clamped: new_b,
                });
            }

            alignment.push(new_r);
            bandwidth.push(new_b);
        }

        Some(TraitUpdate {
            alignment,
            bandwidth,
            clamps,
        })
    }
}
