//! Probability value object (0.0-1.0 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A fraction between 0 and 1 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    /// Certainly not.
    pub const ZERO: Self = Self(0.0);

    /// Certainly.
    pub const ONE: Self = Self(1.0);

    /// Creates a Probability, clamping to the unit interval. NaN maps to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a Probability, returning error if outside [0, 1].
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::not_finite("probability"));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("probability", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Share of `hits` among `total` trials. Zero trials give zero.
    pub fn from_counts(hits: usize, total: usize) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        Self::new(hits as f64 / total as f64)
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Probability {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}
