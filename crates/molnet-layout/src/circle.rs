//! Circle layout - vertices evenly spaced around the centre
//!
//! Ignores correlation values. Useful as a stable baseline view and as a
//! fallback for very large graphs.

use std::f64::consts::TAU;

use crate::{Bounds, LayoutGraph, LayoutPoint, LayoutRng, LayoutStrategy, PassOutcome, Polar};

/// Fraction of the characteristic radius used for the ring
const RING_FRACTION: f64 = 0.9;

#[derive(Debug, Clone, Default)]
pub struct CircleLayout {
    positions: Vec<LayoutPoint>,
    initialized: bool,
}

impl CircleLayout {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutStrategy for CircleLayout {
    fn initialize(&mut self, graph: &LayoutGraph, bounds: Bounds, _rng: &mut LayoutRng) {
        let n = graph.vertex_count();
        let center = bounds.center();
        let r = bounds.multiplier() * RING_FRACTION;

        self.positions = (0..n)
            .map(|i| {
                let theta = TAU * i as f64 / n as f64;
                LayoutPoint::from_polar(center, Polar { r, theta })
            })
            .collect();
        self.initialized = true;
    }

    fn step(&mut self, _graph: &LayoutGraph, _rng: &mut LayoutRng) -> PassOutcome {
        PassOutcome::default()
    }

    fn is_converged(&self) -> bool {
        self.initialized
    }

    fn positions(&self) -> &[LayoutPoint] {
        &self.positions
    }

    fn max_passes(&self) -> usize {
        1
    }
}
