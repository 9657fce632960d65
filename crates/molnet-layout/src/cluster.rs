//! Correlation-driven cluster layout
//!
//! Each edge `(v, w)` with correlation `c` wants its endpoints at distance
//! `multiplier · (1.1 − c)`, where `multiplier` is half the shorter side of
//! the layout area. Strongly correlated molecules end up close together and
//! uncorrelated ones near the characteristic radius.
//!
//! A pass visits every edge once, in a freshly shuffled order. For each edge
//! one endpoint is picked at random as the fixed anchor and the other is
//! nudged along the line to the anchor by a fixed step toward the target
//! radius. The step is never proportional to the error, which keeps
//! convergence gradual. A nudge that leaves the area sends the vertex to
//! the centre instead.

use std::f64::consts::TAU;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::strategy::random_positions;
use crate::{Bounds, LayoutGraph, LayoutPoint, LayoutRng, LayoutStrategy, PassOutcome, Polar};

/// Radius error below which an edge counts as settled
const SETTLED: f64 = 1e-9;

/// Offset added to `−c` in the target radius
const RADIUS_OFFSET: f64 = 1.1;

#[derive(Debug, Clone)]
pub struct ClusterLayout {
    iteration_factor: u32,
    nudge_step: f64,
    bounds: Option<Bounds>,
    positions: Vec<LayoutPoint>,
    order: Vec<usize>,
    converged: bool,
}

impl ClusterLayout {
    pub fn new(iteration_factor: u32, nudge_step: f64) -> Self {
        Self {
            iteration_factor,
            nudge_step,
            bounds: None,
            positions: Vec::new(),
            order: Vec::new(),
            converged: false,
        }
    }

    /// Distance an edge with correlation `c` relaxes toward
    pub fn target_radius(multiplier: f64, correlation: f64) -> f64 {
        multiplier * (RADIUS_OFFSET - correlation)
    }
}

impl Default for ClusterLayout {
    fn default() -> Self {
        Self::new(4, 1.0)
    }
}

impl LayoutStrategy for ClusterLayout {
    fn initialize(&mut self, graph: &LayoutGraph, bounds: Bounds, rng: &mut LayoutRng) {
        self.bounds = Some(bounds);
        self.positions = random_positions(graph.vertex_count(), bounds, rng);
        self.order = (0..graph.edge_count()).collect();
        self.converged = false;
    }

    fn step(&mut self, graph: &LayoutGraph, rng: &mut LayoutRng) -> PassOutcome {
        let Some(bounds) = self.bounds else {
            return PassOutcome::default();
        };
        if self.order.len() != graph.edge_count() {
            self.order = (0..graph.edge_count()).collect();
        }
        self.order.shuffle(rng);

        let multiplier = bounds.multiplier();
        let mut moved = 0;

        for &i in &self.order {
            let edge = graph.edges[i];
            let target = Self::target_radius(multiplier, edge.correlation);

            let (anchor, mover) = if rng.gen_bool(0.5) {
                (edge.source, edge.target)
            } else {
                (edge.target, edge.source)
            };

            let origin = self.positions[anchor];
            let offset = self.positions[mover].polar_from(origin);
            let error = target - offset.r;
            if error.abs() <= SETTLED {
                continue;
            }

            // Coincident vertices have no direction; pick one
            let theta = if offset.r == 0.0 {
                rng.gen_range(0.0..TAU)
            } else {
                offset.theta
            };
            let r = offset.r + error.signum() * self.nudge_step.min(error.abs());

            let mut next = LayoutPoint::from_polar(origin, Polar { r, theta });
            if !bounds.contains(next) {
                next = bounds.center();
            }
            self.positions[mover] = next;
            moved += 1;
        }

        self.converged = moved == 0;
        PassOutcome { moved }
    }

    fn is_converged(&self) -> bool {
        self.converged
    }

    fn positions(&self) -> &[LayoutPoint] {
        &self.positions
    }

    fn max_passes(&self) -> usize {
        self.bounds
            .map(|b| (self.iteration_factor as f64 * b.longest_side()).ceil() as usize)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use molnet_core::MoleculeId;
    use rand::SeedableRng;

    fn ids(n: u32) -> Vec<MoleculeId> {
        (0..n).map(MoleculeId::from_raw).collect()
    }

    fn relax(layout: &mut ClusterLayout, graph: &LayoutGraph, rng: &mut LayoutRng) -> usize {
        let budget = layout.max_passes();
        for pass in 1..=budget {
            layout.step(graph, rng);
            if layout.is_converged() {
                return pass;
            }
        }
        budget
    }

    #[test]
    fn test_target_radius() {
        assert!((ClusterLayout::target_radius(100.0, 1.0) - 10.0).abs() < 1e-9);
        assert!((ClusterLayout::target_radius(100.0, 0.0) - 110.0).abs() < 1e-9);
        assert!((ClusterLayout::target_radius(100.0, -1.0) - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_pass_budget() {
        let graph = LayoutGraph::from_edges(ids(2), &[(0, 1, 0.5)]).unwrap();
        let mut layout = ClusterLayout::new(4, 1.0);
        let mut rng = LayoutRng::seed_from_u64(1);
        assert_eq!(layout.max_passes(), 0);

        layout.initialize(&graph, Bounds::new(300.0, 200.0).unwrap(), &mut rng);
        assert_eq!(layout.max_passes(), 1200);
    }

    #[test]
    fn test_initial_positions_in_bounds() {
        let graph = LayoutGraph::from_edges(ids(50), &[]).unwrap();
        let bounds = Bounds::new(120.0, 80.0).unwrap();
        let mut layout = ClusterLayout::default();
        let mut rng = LayoutRng::seed_from_u64(9);
        layout.initialize(&graph, bounds, &mut rng);

        assert_eq!(layout.positions().len(), 50);
        assert!(layout.positions().iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn test_two_vertices_converge_to_target() {
        let graph = LayoutGraph::from_edges(ids(2), &[(0, 1, 1.0)]).unwrap();
        let bounds = Bounds::new(200.0, 200.0).unwrap();

        for seed in 0..20 {
            let mut layout = ClusterLayout::default();
            let mut rng = LayoutRng::seed_from_u64(seed);
            layout.initialize(&graph, bounds, &mut rng);
            relax(&mut layout, &graph, &mut rng);

            assert!(layout.is_converged(), "seed {seed} did not converge");
            let p = layout.positions();
            let distance = p[0].distance(&p[1]);
            let limit = bounds.multiplier() * 0.1;
            assert!(distance <= limit + 1e-6, "seed {seed}: {distance}");
            assert!(distance >= limit - 1e-6, "seed {seed}: {distance}");
        }
    }

    #[test]
    fn test_nudge_is_fixed_step() {
        let graph = LayoutGraph::from_edges(ids(2), &[(0, 1, 1.0)]).unwrap();
        let bounds = Bounds::new(200.0, 200.0).unwrap();
        let mut layout = ClusterLayout::default();
        let mut rng = LayoutRng::seed_from_u64(3);
        layout.initialize(&graph, bounds, &mut rng);

        // Far apart, so no clamping to the target within one pass
        layout.positions = vec![LayoutPoint::new(20.0, 100.0), LayoutPoint::new(180.0, 100.0)];
        let outcome = layout.step(&graph, &mut rng);

        assert_eq!(outcome.moved, 1);
        let p = layout.positions();
        assert!((p[0].distance(&p[1]) - 159.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_bounds_resets_to_center() {
        // c = -1 wants 210 units in a 200x200 area
        let graph = LayoutGraph::from_edges(ids(2), &[(0, 1, -1.0)]).unwrap();
        let bounds = Bounds::new(200.0, 200.0).unwrap();
        let mut layout = ClusterLayout::default();
        let mut rng = LayoutRng::seed_from_u64(5);
        layout.initialize(&graph, bounds, &mut rng);

        // Both on the border, so whichever moves outward leaves the area
        layout.positions = vec![LayoutPoint::new(0.0, 100.0), LayoutPoint::new(200.0, 100.0)];
        layout.step(&graph, &mut rng);

        assert!(layout.positions().contains(&bounds.center()));
        assert!(layout.positions().iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn test_coincident_vertices_separate() {
        let graph = LayoutGraph::from_edges(ids(2), &[(0, 1, 0.5)]).unwrap();
        let bounds = Bounds::new(200.0, 200.0).unwrap();
        let mut layout = ClusterLayout::default();
        let mut rng = LayoutRng::seed_from_u64(8);
        layout.initialize(&graph, bounds, &mut rng);

        layout.positions = vec![bounds.center(), bounds.center()];
        layout.step(&graph, &mut rng);

        let p = layout.positions();
        assert!((p[0].distance(&p[1]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let graph = LayoutGraph::from_edges(ids(4), &[(0, 1, 0.9), (1, 2, 0.2), (0, 3, -0.3), (2, 3, 0.6)]).unwrap();
        let bounds = Bounds::new(150.0, 150.0).unwrap();

        let run = |seed| {
            let mut layout = ClusterLayout::default();
            let mut rng = LayoutRng::seed_from_u64(seed);
            layout.initialize(&graph, bounds, &mut rng);
            for _ in 0..50 {
                layout.step(&graph, &mut rng);
            }
            layout.positions().to_vec()
        };

        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn test_moved_counts_nudges_per_edge() {
        // Complete graph on 4 vertices: 6 edges, none settled after placement
        let edges = [(0, 1, 1.0), (0, 2, 1.0), (0, 3, 1.0), (1, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)];
        let graph = LayoutGraph::from_edges(ids(4), &edges).unwrap();
        let mut layout = ClusterLayout::default();
        let mut rng = LayoutRng::seed_from_u64(8);
        layout.initialize(&graph, Bounds::new(200.0, 200.0).unwrap(), &mut rng);

        let outcome = layout.step(&graph, &mut rng);
        assert_eq!(outcome.moved, graph.edge_count());
        assert!(outcome.moved > graph.vertex_count());
    }

    #[test]
    fn test_no_edges_converges_immediately() {
        let graph = LayoutGraph::from_edges(ids(3), &[]).unwrap();
        let mut layout = ClusterLayout::default();
        let mut rng = LayoutRng::seed_from_u64(0);
        layout.initialize(&graph, Bounds::new(10.0, 10.0).unwrap(), &mut rng);
        assert_eq!(layout.step(&graph, &mut rng).moved, 0);
        assert!(layout.is_converged());
    }
}
