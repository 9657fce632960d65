//! molnet-layout - Correlation-driven graph layout
//!
//! Positions the molecules of a [`molnet_core::CorrelationGraph`] in 2D so
//! that distance approximates an inverse function of correlation strength.
//!
//! # Key Components
//!
//! - **LayoutGraph**: Vertex list plus correlation-bearing edges, extracted
//!   from a correlation graph for one method
//! - **LayoutStrategy**: Capability trait (`initialize`, `step`, `is_converged`)
//! - **ClusterLayout**: Iterative relaxation toward `multiplier · (1.1 − c)`
//! - **CircleLayout** / **SpringLayout**: Alternative strategies
//! - **LayoutRunner**: State machine driving one strategy to convergence,
//!   exhaustion, cancellation or timeout
//! - **LayoutWorker**: Background thread publishing settled snapshots
//!
//! # States
//!
//! ```text
//! Uninitialized → Relaxing → Converged | Exhausted | Cancelled | TimedOut
//!                    ↑_______________ reset() ______________|
//! ```

pub mod circle;
pub mod cluster;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod runner;
pub mod spring;
pub mod strategy;
pub mod worker;

pub use circle::CircleLayout;
pub use cluster::ClusterLayout;
pub use error::{LayoutError, LayoutResult};
pub use geometry::{Bounds, LayoutPoint, Polar};
pub use graph::{LayoutEdge, LayoutGraph};
pub use runner::{CancelToken, LayoutReport, LayoutRunner, LayoutSnapshot, LayoutState};
pub use spring::SpringLayout;
pub use strategy::{Layout, LayoutRng, LayoutStrategy, PassOutcome};
pub use worker::LayoutWorker;
