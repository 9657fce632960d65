//! The layout strategy seam
//!
//! Strategies are chosen at the call site through the [`Layout`] enum; each
//! variant also implements [`LayoutStrategy`] on its own.

use molnet_core::{LayoutKind, LayoutSettings};
use rand::rngs::StdRng;

use crate::{Bounds, CircleLayout, ClusterLayout, LayoutGraph, LayoutPoint, SpringLayout};

/// PRNG used by every strategy; seeded for reproducible runs
pub type LayoutRng = StdRng;

/// Result of one full pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassOutcome {
    /// Position updates applied during the pass
    ///
    /// The cluster layout counts one per nudged edge, so a vertex on several
    /// unsettled edges is counted once for each. The spring layout counts
    /// displaced vertices. Zero means the pass changed nothing.
    pub moved: usize,
}

/// A layout algorithm driven one pass at a time
pub trait LayoutStrategy {
    /// Discard any previous state and place every vertex afresh
    fn initialize(&mut self, graph: &LayoutGraph, bounds: Bounds, rng: &mut LayoutRng);

    /// Run one full pass over the graph
    fn step(&mut self, graph: &LayoutGraph, rng: &mut LayoutRng) -> PassOutcome;

    fn is_converged(&self) -> bool;

    /// Current positions, indexed like `graph.vertices`
    fn positions(&self) -> &[LayoutPoint];

    /// Pass budget for the current bounds
    fn max_passes(&self) -> usize;
}

/// Enum of the available strategies
#[derive(Debug, Clone)]
pub enum Layout {
    Circle(CircleLayout),
    Cluster(ClusterLayout),
    Spring(SpringLayout),
}

impl Layout {
    /// Build the strategy named by the settings
    pub fn from_settings(settings: &LayoutSettings) -> Self {
        match settings.kind {
            LayoutKind::Circle => Layout::Circle(CircleLayout::new()),
            LayoutKind::Cluster => Layout::Cluster(ClusterLayout::new(
                settings.iteration_factor,
                settings.nudge_step,
            )),
            LayoutKind::Spring => Layout::Spring(SpringLayout::new(settings.iteration_factor)),
        }
    }

    pub fn kind(&self) -> LayoutKind {
        match self {
            Layout::Circle(_) => LayoutKind::Circle,
            Layout::Cluster(_) => LayoutKind::Cluster,
            Layout::Spring(_) => LayoutKind::Spring,
        }
    }

    fn inner(&self) -> &dyn LayoutStrategy {
        match self {
            Layout::Circle(l) => l,
            Layout::Cluster(l) => l,
            Layout::Spring(l) => l,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn LayoutStrategy {
        match self {
            Layout::Circle(l) => l,
            Layout::Cluster(l) => l,
            Layout::Spring(l) => l,
        }
    }
}

impl LayoutStrategy for Layout {
    fn initialize(&mut self, graph: &LayoutGraph, bounds: Bounds, rng: &mut LayoutRng) {
        self.inner_mut().initialize(graph, bounds, rng)
    }

    fn step(&mut self, graph: &LayoutGraph, rng: &mut LayoutRng) -> PassOutcome {
        self.inner_mut().step(graph, rng)
    }

    fn is_converged(&self) -> bool {
        self.inner().is_converged()
    }

    fn positions(&self) -> &[LayoutPoint] {
        self.inner().positions()
    }

    fn max_passes(&self) -> usize {
        self.inner().max_passes()
    }
}

/// Uniform random placement inside `bounds`
pub(crate) fn random_positions(n: usize, bounds: Bounds, rng: &mut LayoutRng) -> Vec<LayoutPoint> {
    use rand::Rng;

    (0..n)
        .map(|_| LayoutPoint::new(rng.gen_range(0.0..=bounds.width), rng.gen_range(0.0..=bounds.height)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_picks_kind() {
        let mut settings = LayoutSettings::default();
        for kind in [LayoutKind::Circle, LayoutKind::Cluster, LayoutKind::Spring] {
            settings.kind = kind;
            assert_eq!(Layout::from_settings(&settings).kind(), kind);
        }
    }
}
