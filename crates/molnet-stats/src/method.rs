//! Correlation method selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rank::{kendall_paired, pearson_paired, spearman_paired};
use crate::{filter_pairs, MissingValue, StatsError};

/// The three supported association measures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum CorrelationMethod {
    #[default]
    Pearson,
    Spearman,
    Kendall,
}

impl CorrelationMethod {
    /// All methods in cache-slot order
    pub const ALL: [CorrelationMethod; 3] = [
        CorrelationMethod::Pearson,
        CorrelationMethod::Spearman,
        CorrelationMethod::Kendall,
    ];

    /// Stable slot index, used by per-method caches
    pub fn index(self) -> usize {
        match self {
            CorrelationMethod::Pearson => 0,
            CorrelationMethod::Spearman => 1,
            CorrelationMethod::Kendall => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CorrelationMethod::Pearson => "pearson",
            CorrelationMethod::Spearman => "spearman",
            CorrelationMethod::Kendall => "kendall",
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CorrelationMethod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pearson" => Ok(CorrelationMethod::Pearson),
            "spearman" => Ok(CorrelationMethod::Spearman),
            "kendall" => Ok(CorrelationMethod::Kendall),
            other => Err(StatsError::UnknownMethod(other.to_string())),
        }
    }
}

/// Compute a correlation under an explicit missing-value policy
///
/// This is the entry point used by the correlation engine. The result is
/// always finite and within `[-1, 1]`.
pub fn correlate(method: CorrelationMethod, x: &[f64], y: &[f64], policy: MissingValue) -> f64 {
    let (x, y) = filter_pairs(x, y, policy);
    match method {
        CorrelationMethod::Pearson => pearson_paired(&x, &y),
        CorrelationMethod::Spearman => spearman_paired(&x, &y),
        CorrelationMethod::Kendall => kendall_paired(&x, &y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_roundtrip_names() {
        for method in CorrelationMethod::ALL {
            assert_eq!(method.name().parse::<CorrelationMethod>().unwrap(), method);
        }
        assert_eq!("KENDALL".parse::<CorrelationMethod>().unwrap(), CorrelationMethod::Kendall);
        assert!("cosine".parse::<CorrelationMethod>().is_err());
    }

    #[test]
    fn test_indices_are_distinct() {
        let indices: Vec<usize> = CorrelationMethod::ALL.iter().map(|m| m.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_correlate_zero_policy_matches_free_functions() {
        let x = [1.0, 0.0, 3.0, 4.0, 2.0, 7.0];
        let y = [2.0, 1.0, 5.0, 0.0, 1.0, 9.0];
        assert_eq!(
            correlate(CorrelationMethod::Pearson, &x, &y, MissingValue::Zero),
            crate::pearson(&x, &y)
        );
        assert_eq!(
            correlate(CorrelationMethod::Spearman, &x, &y, MissingValue::Zero),
            crate::spearman(&x, &y)
        );
        assert_eq!(
            correlate(CorrelationMethod::Kendall, &x, &y, MissingValue::Zero),
            crate::kendall(&x, &y)
        );
    }

    #[test]
    fn test_nan_policy_counts_zero_readings() {
        // Under the zero policy only three pairs survive; under NaN all four do
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(correlate(CorrelationMethod::Pearson, &x, &y, MissingValue::Zero), 0.0);
        assert_eq!(correlate(CorrelationMethod::Pearson, &x, &y, MissingValue::NaN), 1.0);
    }
}
