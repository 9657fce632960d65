//! molnet-stats - Rank statistics for molecule correlation networks
//!
//! This crate provides the stateless numeric core of molnet:
//!
//! - **Ranking**: 0-based ranks with tie averaging, O(n log n)
//! - **Pearson**: product-moment correlation
//! - **Spearman**: rank correlation over tie-averaged ranks
//! - **Kendall**: tau-b, the tie-corrected concordance measure
//! - **Critical values**: two-tailed significance thresholds by sample count
//!
//! # Degenerate inputs
//!
//! None of the correlation functions fail. Insufficient pairs, zero variance,
//! mismatched lengths and NaN intermediates all resolve to `0.0`, so callers
//! building graphs or layouts on top of these values always get a finite
//! number in `[-1, 1]`.
//!
//! # Missing values
//!
//! Before computing, both sequences are filtered jointly on working copies:
//! any index where either value counts as missing is dropped. What counts as
//! missing depends on [`MissingValue`].

pub mod critical;
pub mod error;
pub mod filter;
pub mod method;
pub mod rank;

pub use critical::*;
pub use error::*;
pub use filter::*;
pub use method::*;
pub use rank::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
