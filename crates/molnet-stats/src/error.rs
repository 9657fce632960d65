//! Error types for molnet-stats
//!
//! Numeric edge cases are never errors here; they resolve to `0.0`.
//! The only failure is parsing user-facing names.

use thiserror::Error;

/// Errors raised when parsing statistics settings from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// Unknown correlation method name
    #[error("Unknown correlation method: {0}")]
    UnknownMethod(String),

    /// Unknown missing-value policy name
    #[error("Unknown missing-value policy: {0}")]
    UnknownPolicy(String),
}
