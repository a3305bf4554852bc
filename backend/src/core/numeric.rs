//! Scalar numeric helpers
//!
//! The logistic function here never overflows: for negative inputs it is
//! evaluated as `e^z / (1 + e^z)` so `exp` only ever sees non-positive
//! arguments.

/// Logistic function `1 / (1 + e^-z)`, stable for any finite or infinite `z`
///
/// # Example
/// ```
/// use genesis_simulator_core_rs::core::numeric::sigmoid;
///
/// assert_eq!(sigmoid(0.0), 0.5);
/// assert_eq!(sigmoid(-1.0e6), 0.0);
/// assert_eq!(sigmoid(1.0e6), 1.0);
/// ```
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Arithmetic mean; `0.0` for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Clamp `value` into `[min, max]`, returning whether the bound was hit
///
/// NaN inputs are mapped to `min`.
pub fn clamp_with_flag(value: f64, min: f64, max: f64) -> (f64, bool) {
    if value.is_nan() {
        (min, true)
    } else if value < min {
        (min, true)
    } else if value > max {
        (max, true)
    } else {
        (value, false)
    }
}

/// Index of the largest element (first one on ties)
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, bv)) if bv >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
