//! Journal Integral
//!
//! Row-wise reduction of a personal metrics journal into a cumulative
//! "integral" plus a per-day criticality indicator. Independent of the
//! population simulator; it shares only the logistic function.
//!
//! # Algorithm
//!
//! ```text
//! M = meaning / 7      R = alignment      C = friction / 7      dr = action_volume
//! density     = alpha_M*M + alpha_R*R - alpha_C*C
//! daily       = density * dr
//! total      += daily
//! criticality = sigmoid(k * ((M + R - C) - threshold))
//! ```
//!
//! # Example
//!
//! ```rust
//! use genesis_simulator_core_rs::integral::{integrate, sample_journal, IntegralParams};
//!
//! let points = integrate(&sample_journal(), &IntegralParams::default()).unwrap();
//! assert_eq!(points.len(), 7);
//! assert!(points[6].total > points[0].total);
//! ```

mod entry;

pub use entry::{sample_journal, JournalEntry};

use crate::core::numeric::sigmoid;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper end of the 1–7 rating scales
pub const RATING_SCALE_MAX: f64 = 7.0;

/// Integral calculation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegralError {
    #[error("Row {row} ({date}): {field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        row: usize,
        date: String,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Tuning of the integral
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegralParams {
    pub alpha_meaning: f64,
    pub alpha_alignment: f64,
    pub alpha_friction: f64,
    /// Sigmoid steepness
    pub steepness: f64,
    /// Order-parameter value at which criticality is 0.5
    pub threshold: f64,
    /// Criticality above which a day counts as "in the zone"
    pub critical_level: f64,
}

impl Default for IntegralParams {
    fn default() -> Self {
        Self {
            alpha_meaning: 1.0,
            alpha_alignment: 1.2,
            alpha_friction: 0.5,
            steepness: 5.0,
            threshold: 0.5,
            critical_level: 0.8,
        }
    }
}

/// One output row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegralPoint {
    pub date: String,
    /// Work done this day (`density * action_volume`)
    pub daily: f64,
    /// Running sum of `daily`
    pub total: f64,
    pub criticality: f64,
    /// `criticality > critical_level`
    pub is_critical: bool,
}

/// Reduce a journal to its integral series
///
/// # Errors
///
/// `IntegralError::OutOfRange` for the first row with a value outside its
/// declared scale.
pub fn integrate(
    entries: &[JournalEntry],
    params: &IntegralParams,
) -> Result<Vec<IntegralPoint>, IntegralError> {
    let mut total = 0.0;

    entries
        .iter()
        .enumerate()
        .map(|(row, entry)| {
            entry.validate(row)?;

            let m = entry.meaning / RATING_SCALE_MAX;
            let r = entry.alignment;
            let c = entry.friction / RATING_SCALE_MAX;

            let density = params.alpha_meaning * m + params.alpha_alignment * r
                - params.alpha_friction * c;
            let daily = density * entry.action_volume;
            total += daily;

            let criticality = sigmoid(params.steepness * ((m + r - c) - params.threshold));

            Ok(IntegralPoint {
                date: entry.date.clone(),
                daily,
                total,
                criticality,
                is_critical: criticality > params.critical_level,
            })
        })
        .collect()
}
