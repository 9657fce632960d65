//! Joint missing-value filtering
//!
//! Correlation inputs are paired measurements of two molecules over the
//! same samples. A sample where either molecule has no reading cannot
//! contribute to the association, so both sequences drop that index together.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::StatsError;

/// How an absent measurement is represented before filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum MissingValue {
    /// Missing readings are `0.0`; an exact zero is always treated as missing.
    #[default]
    Zero,
    /// Missing readings are `NaN`; an exact zero is a genuine reading.
    NaN,
}

impl MissingValue {
    /// The value stored for a molecule with no reading in a sample
    pub fn fill(self) -> f64 {
        match self {
            MissingValue::Zero => 0.0,
            MissingValue::NaN => f64::NAN,
        }
    }

    /// Whether a reading counts as missing under this policy
    ///
    /// Non-finite values are missing under both policies.
    pub fn is_missing(self, value: f64) -> bool {
        if !value.is_finite() {
            return true;
        }
        match self {
            MissingValue::Zero => value == 0.0,
            MissingValue::NaN => false,
        }
    }
}

impl fmt::Display for MissingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingValue::Zero => write!(f, "zero"),
            MissingValue::NaN => write!(f, "nan"),
        }
    }
}

impl FromStr for MissingValue {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(MissingValue::Zero),
            "nan" => Ok(MissingValue::NaN),
            other => Err(StatsError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Jointly filter two paired sequences
///
/// Returns working copies with every index removed where either value is
/// missing under `policy`. Inputs of different length cannot be paired and
/// produce two empty vectors, which every correlation maps to `0.0`.
pub fn filter_pairs(x: &[f64], y: &[f64], policy: MissingValue) -> (Vec<f64>, Vec<f64>) {
    if x.len() != y.len() {
        return (Vec::new(), Vec::new());
    }

    x.iter()
        .zip(y)
        .filter(|&(&a, &b)| !policy.is_missing(a) && !policy.is_missing(b))
        .map(|(&a, &b)| (a, b))
        .unzip()
}
