//! Error types for molnet-layout

use thiserror::Error;

/// Errors related to layout runs
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Layout area is empty or not finite
    #[error("Invalid layout bounds: {width}x{height} (must be positive and finite)")]
    InvalidBounds { width: f64, height: f64 },

    /// An edge names a vertex index outside the graph
    #[error("Edge {edge} refers to vertex {vertex}, but the graph has {vertex_count} vertices")]
    UnknownVertex {
        edge: usize,
        vertex: usize,
        vertex_count: usize,
    },

    /// A pass was requested before any placement
    #[error("Layout has not been initialized")]
    NotInitialized,

    /// The background thread could not be started
    #[error("Failed to spawn layout worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// The background thread panicked
    #[error("Layout worker panicked")]
    WorkerPanicked,

    /// Settings were rejected
    #[error("Configuration error: {0}")]
    Config(#[from] molnet_core::ConfigError),
}

/// Result type alias for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;
