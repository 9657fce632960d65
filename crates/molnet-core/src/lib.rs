//! molnet-core - Molecule correlation engine and correlation graph
//!
//! This crate sits between the statistics primitives in `molnet-stats` and
//! the layout engine in `molnet-layout`:
//!
//! - **Interner**: Owned string ↔ [`MoleculeId`] table held by the data loader
//! - **Sample / SampleSet**: Named measurement contexts shared by all molecules
//! - **Molecule**: Identifier plus attributes, compared by interned id
//! - **Correlation**: One edge per molecule pair with per-method cached values
//! - **CorrelationGraph**: Complete graph over inserted molecules, owned in an
//!   arena keyed by [`EdgeKey`] with an adjacency index for neighbor queries
//! - **Config**: TOML/JSON configuration for correlation and layout settings
//!
//! # Data Flow
//!
//! ```text
//! SampleSet → Correlation (cached) → CorrelationGraph → layout
//! ```
//!
//! Edges never hold references to molecules or samples. The graph passes
//! its own [`SampleSet`] into each computation, and "correlations of X" is an
//! adjacency query rather than a field on the molecule.

pub mod config;
pub mod correlation;
pub mod error;
pub mod graph;
pub mod interner;
pub mod molecule;
pub mod sample;

pub use config::{CorrelationConfig, LayoutKind, LayoutSettings, MolnetConfig};
pub use correlation::{Correlation, EdgeKey};
pub use error::{ConfigError, GraphError, MolnetError, Result};
pub use graph::{CorrelationGraph, GraphEvent};
pub use interner::{Interner, MoleculeId};
pub use molecule::Molecule;
pub use sample::{Sample, SampleSet};

pub use molnet_stats::{CorrelationMethod, MissingValue};
