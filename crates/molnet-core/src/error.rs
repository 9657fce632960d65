//! Error types for molnet-core
//!
//! Numeric degeneracies (too few samples, zero variance, length mismatch)
//! are not errors; they resolve to a `0.0` correlation. The errors here are
//! precondition violations by the owning collaborator and configuration
//! problems.

use thiserror::Error;

use crate::MoleculeId;

/// Result type alias for molnet operations
pub type Result<T> = std::result::Result<T, MolnetError>;

/// Main error type for molnet operations
#[derive(Error, Debug)]
pub enum MolnetError {
    /// Graph precondition violations
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Statistics setting errors
    #[error("Statistics error: {0}")]
    Stats(#[from] molnet_stats::StatsError),
}

/// Errors raised by [`crate::CorrelationGraph`] on caller mistakes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Molecule is not a vertex of the graph
    #[error("Molecule {0} is not in the graph")]
    UnknownMolecule(MoleculeId),

    /// Molecule was inserted twice in a batch, or is already present
    #[error("Molecule {0} is already in the graph")]
    DuplicateMolecule(MoleculeId),

    /// A molecule cannot be correlated with itself
    #[error("Molecule {0} cannot be correlated with itself")]
    SelfCorrelation(MoleculeId),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML could not be written
    #[error("Failed to serialize TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// JSON could not be parsed or written
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Config file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
