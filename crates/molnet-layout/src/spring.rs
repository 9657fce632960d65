//! Spring layout - force-directed variant of the cluster layout
//!
//! Every edge is a spring whose rest length is the cluster layout's target
//! radius, `multiplier · (1.1 − c)`. All vertex pairs also repel weakly so
//! that vertices without edges spread out. Displacement per pass is capped
//! by a temperature that cools linearly over the pass budget.

use crate::strategy::random_positions;
use crate::{Bounds, ClusterLayout, LayoutGraph, LayoutPoint, LayoutRng, LayoutStrategy, PassOutcome};

const STIFFNESS: f64 = 0.1;
const REPULSION: f64 = 0.05;
/// Maximum displacement below which a pass counts as settled
const SETTLED: f64 = 0.5;
/// Distances are floored here so coincident vertices still push apart
const MIN_DISTANCE: f64 = 0.01;

#[derive(Debug, Clone)]
pub struct SpringLayout {
    iteration_factor: u32,
    bounds: Option<Bounds>,
    positions: Vec<LayoutPoint>,
    temperature: f64,
    cooling: f64,
    converged: bool,
}

impl SpringLayout {
    pub fn new(iteration_factor: u32) -> Self {
        Self {
            iteration_factor,
            bounds: None,
            positions: Vec::new(),
            temperature: 0.0,
            cooling: 0.0,
            converged: false,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self::new(4)
    }
}

impl LayoutStrategy for SpringLayout {
    fn initialize(&mut self, graph: &LayoutGraph, bounds: Bounds, rng: &mut LayoutRng) {
        self.bounds = Some(bounds);
        self.positions = random_positions(graph.vertex_count(), bounds, rng);
        self.temperature = bounds.multiplier() / 4.0;
        self.cooling = self.temperature / self.max_passes().max(1) as f64;
        self.converged = false;
    }

    fn step(&mut self, graph: &LayoutGraph, _rng: &mut LayoutRng) -> PassOutcome {
        let Some(bounds) = self.bounds else {
            return PassOutcome::default();
        };
        let multiplier = bounds.multiplier();
        let n = self.positions.len();
        let mut force = vec![(0.0_f64, 0.0_f64); n];

        for edge in &graph.edges {
            let (s, t) = (self.positions[edge.source], self.positions[edge.target]);
            let (dx, dy) = (t.x - s.x, t.y - s.y);
            let distance = dx.hypot(dy).max(MIN_DISTANCE);
            let rest = ClusterLayout::target_radius(multiplier, edge.correlation);
            let pull = STIFFNESS * (distance - rest) / distance;

            force[edge.source].0 += dx * pull;
            force[edge.source].1 += dy * pull;
            force[edge.target].0 -= dx * pull;
            force[edge.target].1 -= dy * pull;
        }

        let reach = REPULSION * multiplier * multiplier;
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (self.positions[i], self.positions[j]);
                let (dx, dy) = (b.x - a.x, b.y - a.y);
                let distance = dx.hypot(dy).max(MIN_DISTANCE);
                let push = reach / (distance * distance * distance);

                force[i].0 -= dx * push;
                force[i].1 -= dy * push;
                force[j].0 += dx * push;
                force[j].1 += dy * push;
            }
        }

        let mut moved = 0;
        let mut largest: f64 = 0.0;
        for (p, (fx, fy)) in self.positions.iter_mut().zip(force) {
            let magnitude = fx.hypot(fy);
            if magnitude == 0.0 {
                continue;
            }
            let scale = magnitude.min(self.temperature) / magnitude;
            let next = bounds.clamp(LayoutPoint::new(p.x + fx * scale, p.y + fy * scale));
            let shift = next.distance(p);
            if shift > 0.0 {
                moved += 1;
                largest = largest.max(shift);
            }
            *p = next;
        }

        self.temperature = (self.temperature - self.cooling).max(0.0);
        self.converged = largest < SETTLED;
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

    #[test]
    fn test_spring_settles_within_budget() {
        let vertices = (0..3).map(MoleculeId::from_raw).collect();
        let graph = LayoutGraph::from_edges(vertices, &[(0, 1, 0.9), (1, 2, 0.1), (0, 2, 0.1)]).unwrap();
        let bounds = Bounds::new(200.0, 200.0).unwrap();
        let mut layout = SpringLayout::default();
        let mut rng = LayoutRng::seed_from_u64(4);
        layout.initialize(&graph, bounds, &mut rng);

        let budget = layout.max_passes();
        let mut passes = 0;
        while passes < budget && !layout.is_converged() {
            layout.step(&graph, &mut rng);
            passes += 1;
        }

        assert!(layout.is_converged());
        assert!(layout.positions().iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn test_temperature_cools() {
        let vertices = (0..2).map(MoleculeId::from_raw).collect();
        let graph = LayoutGraph::from_edges(vertices, &[(0, 1, 0.0)]).unwrap();
        let mut layout = SpringLayout::default();
        let mut rng = LayoutRng::seed_from_u64(2);
        layout.initialize(&graph, Bounds::new(100.0, 100.0).unwrap(), &mut rng);

        let start = layout.temperature();
        layout.step(&graph, &mut rng);
        assert!(layout.temperature() < start);
    }
}
