//! Incremental ratio (ICER/ICUR) with an explicit undefined case.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Incremental cost per unit of incremental effect.
///
/// A ratio only exists when the effect gain is strictly positive. Zero or
/// negative effect deltas produce `Undefined`, which carries no number and
/// so cannot leak into arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Ratio {
    Defined(f64),
    Undefined,
}

impl Ratio {
    /// Derives the ratio from a pair of deltas.
    pub fn from_deltas(delta_cost: f64, delta_effect: f64) -> Self {
        if delta_effect > 0.0 {
            Ratio::Defined(delta_cost / delta_effect)
        } else {
            Ratio::Undefined
        }
    }

    /// The numeric value, if defined.
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Defined(v) => Some(*v),
            Ratio::Undefined => None,
        }
    }

    /// Returns true for the undefined case.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Ratio::Undefined)
    }

    /// Frontier ordering: undefined ranks above every defined ratio.
    pub fn frontier_cmp(&self, other: &Ratio) -> Ordering {
        match (self, other) {
            (Ratio::Defined(a), Ratio::Defined(b)) => a.total_cmp(b),
            (Ratio::Defined(_), Ratio::Undefined) => Ordering::Less,
            (Ratio::Undefined, Ratio::Defined(_)) => Ordering::Greater,
            (Ratio::Undefined, Ratio::Undefined) => Ordering::Equal,
        }
    }
}

impl From<Option<f64>> for Ratio {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Ratio::Defined(v),
            _ => Ratio::Undefined,
        }
    }
}

impl From<Ratio> for Option<f64> {
    fn from(ratio: Ratio) -> Self {
        ratio.value()
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Defined(v) => write!(f, "{}", v),
            Ratio::Undefined => write!(f, "undefined"),
        }
    }
}
