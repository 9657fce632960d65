//! Correlation graph - a complete graph over inserted molecules
//!
//! The graph owns every [`Correlation`] in a flat arena keyed by
//! [`EdgeKey`], plus an adjacency index for neighbor queries. After `k`
//! distinct insertions it holds exactly `k(k−1)/2` edges; removing a
//! molecule removes every incident edge.
//!
//! Structural changes are queued as [`GraphEvent`]s so a view can redraw
//! incrementally via [`CorrelationGraph::drain_events`].

use std::collections::{BTreeMap, BTreeSet, HashSet};

use molnet_stats::CorrelationMethod;
use serde::{Deserialize, Serialize};

use crate::{Correlation, EdgeKey, GraphError, Molecule, MoleculeId, Sample, SampleSet};

/// A structural change to the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum GraphEvent {
    MoleculeAdded(MoleculeId),
    MoleculeRemoved(MoleculeId),
    EdgeAdded(EdgeKey),
    EdgeRemoved(EdgeKey),
}

/// Molecules, their pairwise correlations and the samples behind them
#[derive(Debug, Clone, Default)]
pub struct CorrelationGraph {
    samples: SampleSet,
    molecules: BTreeMap<MoleculeId, Molecule>,
    edges: BTreeMap<EdgeKey, Correlation>,
    adjacency: BTreeMap<MoleculeId, BTreeSet<MoleculeId>>,
    events: Vec<GraphEvent>,
}

impl CorrelationGraph {
    /// Empty graph over a sample set
    pub fn new(samples: SampleSet) -> Self {
        Self {
            samples,
            ..Default::default()
        }
    }

    // ===== Vertices =====

    /// Insert a molecule, creating one uncached edge to every existing molecule
    ///
    /// Returns `false` without changes if the molecule is already present.
    pub fn add(&mut self, molecule: Molecule) -> bool {
        if self.molecules.contains_key(&molecule.id) {
            return false;
        }

        let id = molecule.id;
        let existing: Vec<MoleculeId> = self.molecules.keys().copied().collect();
        for other in &existing {
            self.insert_edge(*other, id);
        }
        self.adjacency
            .entry(id)
            .or_default()
            .extend(existing.iter().copied());
        self.molecules.insert(id, molecule);
        self.events.push(GraphEvent::MoleculeAdded(id));

        tracing::debug!(
            "Added molecule {} with {} new edges ({} total)",
            id,
            existing.len(),
            self.edges.len()
        );
        debug_assert!(self.is_complete());
        true
    }

    /// Insert a batch of molecules atomically
    ///
    /// The whole batch is validated first. If any molecule is already in the
    /// graph or appears twice in the batch, nothing is inserted. Returns the
    /// number of molecules added.
    pub fn add_all<I>(&mut self, molecules: I) -> Result<usize, GraphError>
    where
        I: IntoIterator<Item = Molecule>,
    {
        let batch: Vec<Molecule> = molecules.into_iter().collect();

        let mut seen = HashSet::with_capacity(batch.len());
        for molecule in &batch {
            if self.molecules.contains_key(&molecule.id) || !seen.insert(molecule.id) {
                return Err(GraphError::DuplicateMolecule(molecule.id));
            }
        }

        let count = batch.len();
        for molecule in batch {
            self.add(molecule);
        }
        Ok(count)
    }

    /// Remove a molecule and every incident edge
    ///
    /// Returns `false` if the molecule was not present.
    pub fn remove(&mut self, id: MoleculeId) -> bool {
        if self.molecules.remove(&id).is_none() {
            return false;
        }

        let neighbors = self.adjacency.remove(&id).unwrap_or_default();
        for other in &neighbors {
            if let Some(set) = self.adjacency.get_mut(other) {
                set.remove(&id);
            }
            if let Some(key) = EdgeKey::new(id, *other) {
                if self.edges.remove(&key).is_some() {
                    self.events.push(GraphEvent::EdgeRemoved(key));
                }
            }
        }
        self.events.push(GraphEvent::MoleculeRemoved(id));

        tracing::debug!(
            "Removed molecule {} and {} edges ({} remaining)",
            id,
            neighbors.len(),
            self.edges.len()
        );
        debug_assert!(self.is_complete());
        true
    }

    pub fn contains(&self, id: MoleculeId) -> bool {
        self.molecules.contains_key(&id)
    }

    pub fn molecule(&self, id: MoleculeId) -> Option<&Molecule> {
        self.molecules.get(&id)
    }

    /// All molecules in id order
    pub fn molecules(&self) -> impl Iterator<Item = &Molecule> {
        self.molecules.values()
    }

    pub fn molecule_count(&self) -> usize {
        self.molecules.len()
    }

    // ===== Edges =====

    /// The edge between two molecules, if both are present and distinct
    pub fn correlation(&self, a: MoleculeId, b: MoleculeId) -> Option<&Correlation> {
        EdgeKey::new(a, b).and_then(|key| self.edges.get(&key))
    }

    /// Every edge incident to `id`
    pub fn correlations_of(&self, id: MoleculeId) -> impl Iterator<Item = &Correlation> {
        self.neighbors(id)
            .filter_map(move |other| self.correlation(id, other))
    }

    /// Molecules sharing an edge with `id`
    pub fn neighbors(&self, id: MoleculeId) -> impl Iterator<Item = MoleculeId> + '_ {
        self.adjacency
            .get(&id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// All edges in key order
    pub fn edges(&self) -> impl Iterator<Item = &Correlation> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the edge count matches a complete graph over the molecules
    pub fn is_complete(&self) -> bool {
        let k = self.molecules.len();
        self.edges.len() == k * k.saturating_sub(1) / 2
    }

    // ===== Values =====

    /// Correlation between two molecules, cached per method
    ///
    /// Asking about a molecule that is not in the graph, or about a molecule
    /// paired with itself, is a caller error.
    pub fn value(
        &mut self,
        a: MoleculeId,
        b: MoleculeId,
        method: CorrelationMethod,
    ) -> Result<f64, GraphError> {
        let key = self.checked_key(a, b)?;
        let samples = &self.samples;
        let edge = self
            .edges
            .get_mut(&key)
            .ok_or(GraphError::UnknownMolecule(a))?;
        Ok(edge.value(method, samples))
    }

    /// Force recomputation of one edge's value
    pub fn recompute(
        &mut self,
        a: MoleculeId,
        b: MoleculeId,
        method: CorrelationMethod,
    ) -> Result<f64, GraphError> {
        let key = self.checked_key(a, b)?;
        let samples = &self.samples;
        let edge = self
            .edges
            .get_mut(&key)
            .ok_or(GraphError::UnknownMolecule(a))?;
        Ok(edge.recompute(method, samples))
    }

    /// Value of every edge, computing stale ones
    pub fn values(&mut self, method: CorrelationMethod) -> Vec<(EdgeKey, f64)> {
        let samples = &self.samples;
        self.edges
            .iter_mut()
            .map(|(key, edge)| (*key, edge.value(method, samples)))
            .collect()
    }

    /// Edges whose `|value|` is at least `threshold`, for view filtering
    pub fn edges_above(&mut self, method: CorrelationMethod, threshold: f64) -> Vec<(EdgeKey, f64)> {
        self.values(method)
            .into_iter()
            .filter(|(_, value)| value.abs() >= threshold)
            .collect()
    }

    // ===== Samples =====

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    /// Mutable access to the sample set
    ///
    /// Cached values are keyed on the sample count alone. Any change in
    /// count invalidates them lazily, on the next query of each edge. An
    /// edit that keeps the count, such as replacing a sample or changing a
    /// reading in place, leaves stale values behind; follow it with
    /// [`CorrelationGraph::invalidate_all`].
    pub fn samples_mut(&mut self) -> &mut SampleSet {
        &mut self.samples
    }

    /// Drop every cached value so the next query recomputes
    pub fn invalidate_all(&mut self) {
        for edge in self.edges.values_mut() {
            edge.invalidate();
        }
        tracing::debug!("Invalidated {} cached correlations", self.edges.len());
    }

    pub fn push_sample(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    // ===== Events =====

    /// Take all structural changes since the last drain
    pub fn drain_events(&mut self) -> Vec<GraphEvent> {
        std::mem::take(&mut self.events)
    }

    fn checked_key(&self, a: MoleculeId, b: MoleculeId) -> Result<EdgeKey, GraphError> {
        for id in [a, b] {
            if !self.molecules.contains_key(&id) {
                return Err(GraphError::UnknownMolecule(id));
            }
        }
        EdgeKey::new(a, b).ok_or(GraphError::SelfCorrelation(a))
    }

    fn insert_edge(&mut self, a: MoleculeId, b: MoleculeId) {
        let Some(key) = EdgeKey::new(a, b) else {
            return;
        };
        let previous = self.edges.insert(key, Correlation::new(key));
        debug_assert!(previous.is_none(), "parallel edge {key}");
        self.adjacency.entry(a).or_default().insert(b);
        self.events.push(GraphEvent::EdgeAdded(key));
    }
}
