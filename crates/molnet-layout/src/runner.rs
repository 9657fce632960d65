//! Layout run state machine
//!
//! A [`LayoutRunner`] owns one strategy, its input graph and its PRNG, and
//! drives passes until the strategy converges, the pass budget runs out, a
//! [`CancelToken`] fires or the configured timeout elapses. Cancellation
//! and the deadline are checked once per pass, never mid-pass.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use molnet_core::{LayoutSettings, MoleculeId};
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::{
    Bounds, Layout, LayoutError, LayoutGraph, LayoutPoint, LayoutResult, LayoutRng,
    LayoutStrategy, PassOutcome,
};

/// Where a layout run stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutState {
    #[default]
    Uninitialized,
    Relaxing,
    /// A full pass moved nothing
    Converged,
    /// The pass budget ran out first
    Exhausted,
    Cancelled,
    TimedOut,
}

impl LayoutState {
    /// Whether further passes would do nothing
    pub fn is_finished(self) -> bool {
        !matches!(self, LayoutState::Uninitialized | LayoutState::Relaxing)
    }
}

/// Cooperative cancellation flag shared with a running layout
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Settled positions after a completed pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub pass: usize,
    pub state: LayoutState,
    pub positions: Vec<(MoleculeId, LayoutPoint)>,
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutReport {
    pub state: LayoutState,
    pub passes: usize,
    pub elapsed: Duration,
}

pub struct LayoutRunner {
    graph: LayoutGraph,
    layout: Layout,
    rng: LayoutRng,
    timeout: Option<Duration>,
    bounds: Option<Bounds>,
    state: LayoutState,
    passes: usize,
}

impl LayoutRunner {
    /// Runner for the strategy named in `settings`
    ///
    /// With `settings.seed` the run is reproducible; otherwise the PRNG is
    /// seeded from OS entropy.
    pub fn new(graph: LayoutGraph, settings: &LayoutSettings) -> LayoutResult<Self> {
        let settings_error = |message: &str| {
            LayoutError::Config(molnet_core::ConfigError::OutOfRange(message.to_string()))
        };
        if settings.iteration_factor == 0 {
            return Err(settings_error("iteration_factor must be positive"));
        }
        if !(settings.nudge_step.is_finite() && settings.nudge_step > 0.0) {
            return Err(settings_error("nudge_step must be a positive number"));
        }
        graph.validate()?;

        let rng = match settings.seed {
            Some(seed) => LayoutRng::seed_from_u64(seed),
            None => LayoutRng::from_entropy(),
        };

        Ok(Self {
            graph,
            layout: Layout::from_settings(settings),
            rng,
            timeout: settings.timeout_ms.map(Duration::from_millis),
            bounds: None,
            state: LayoutState::Uninitialized,
            passes: 0,
        })
    }

    /// Place every vertex afresh inside `bounds` and enter `Relaxing`
    pub fn initialize(&mut self, bounds: Bounds) {
        self.layout.initialize(&self.graph, bounds, &mut self.rng);
        self.bounds = Some(bounds);
        self.passes = 0;
        self.state = LayoutState::Relaxing;
        tracing::debug!(
            "Initialized {} layout: {} vertices, {} edges, budget {} passes",
            self.layout.kind(),
            self.graph.vertex_count(),
            self.graph.edge_count(),
            self.layout.max_passes()
        );
    }

    /// Start over from a fresh random placement in the same bounds
    ///
    /// Nothing from the previous run carries over.
    pub fn reset(&mut self) -> LayoutResult<()> {
        let bounds = self.bounds.ok_or(LayoutError::NotInitialized)?;
        self.initialize(bounds);
        Ok(())
    }

    /// Run a single pass
    ///
    /// No-op once the run has finished.
    pub fn step(&mut self) -> LayoutResult<PassOutcome> {
        match self.state {
            LayoutState::Uninitialized => return Err(LayoutError::NotInitialized),
            LayoutState::Relaxing => {}
            _ => return Ok(PassOutcome::default()),
        }

        let outcome = self.layout.step(&self.graph, &mut self.rng);
        self.passes += 1;

        if self.layout.is_converged() {
            self.state = LayoutState::Converged;
        } else if self.passes >= self.layout.max_passes() {
            self.state = LayoutState::Exhausted;
        }
        tracing::trace!("Pass {}: moved {}", self.passes, outcome.moved);
        Ok(outcome)
    }

    /// Run passes until the layout finishes
    pub fn run(&mut self, cancel: &CancelToken) -> LayoutResult<LayoutReport> {
        self.run_with(cancel, |_| {})
    }

    /// Run passes until the layout finishes, calling `on_pass` after each one
    pub fn run_with<F>(&mut self, cancel: &CancelToken, mut on_pass: F) -> LayoutResult<LayoutReport>
    where
        F: FnMut(&LayoutRunner),
    {
        if self.state == LayoutState::Uninitialized {
            return Err(LayoutError::NotInitialized);
        }

        let started = Instant::now();
        let deadline = self.timeout.map(|t| started + t);

        while self.state == LayoutState::Relaxing {
            if cancel.is_cancelled() {
                self.state = LayoutState::Cancelled;
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                self.state = LayoutState::TimedOut;
                break;
            }
            self.step()?;
            on_pass(self);
        }

        let report = LayoutReport {
            state: self.state,
            passes: self.passes,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            "{} layout finished: {:?} after {} passes in {:?}",
            self.layout.kind(),
            report.state,
            report.passes,
            report.elapsed
        );
        Ok(report)
    }

    /// Place and relax in one call
    pub fn layout(&mut self, bounds: Bounds, cancel: &CancelToken) -> LayoutResult<LayoutReport> {
        self.initialize(bounds);
        self.run(cancel)
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn graph(&self) -> &LayoutGraph {
        &self.graph
    }

    pub fn positions(&self) -> &[LayoutPoint] {
        self.layout.positions()
    }

    /// Current positions paired with their molecule ids
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            pass: self.passes,
            state: self.state,
            positions: self
                .graph
                .vertices
                .iter()
                .copied()
                .zip(self.layout.positions().iter().copied())
                .collect(),
        }
    }
}
