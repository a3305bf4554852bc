//! Core building blocks shared by every simulation component
//!
//! - **time**: Discrete step counter and step → time mapping
//! - **numeric**: Numerically stable scalar helpers (sigmoid, mean, clamp)

pub mod numeric;
pub mod time;
