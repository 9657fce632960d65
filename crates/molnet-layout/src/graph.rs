//! Layout input: vertices and correlation-weighted edges
//!
//! A [`LayoutGraph`] is a plain, owned copy of the topology and edge values
//! a layout run needs. Extracting it up front means a run never touches the
//! correlation caches, so it can move to a worker thread.

use std::collections::HashMap;

use molnet_core::{CorrelationGraph, CorrelationMethod, MoleculeId};
use serde::{Deserialize, Serialize};

use crate::{LayoutError, LayoutResult};

/// An edge between two vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub source: usize,
    pub target: usize,
    pub correlation: f64,
}

/// Vertices (by molecule id) plus the edges to lay out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutGraph {
    pub vertices: Vec<MoleculeId>,
    pub edges: Vec<LayoutEdge>,
}

impl LayoutGraph {
    /// Extract a layout graph for one correlation method
    ///
    /// Edges with `|value| < threshold` are left out; every molecule stays a
    /// vertex. Stale correlations are computed as a side effect.
    pub fn from_graph(
        graph: &mut CorrelationGraph,
        method: CorrelationMethod,
        threshold: f64,
    ) -> Self {
        let vertices: Vec<MoleculeId> = graph.molecules().map(|m| m.id).collect();
        let index: HashMap<MoleculeId, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();

        let edges: Vec<LayoutEdge> = graph
            .edges_above(method, threshold)
            .into_iter()
            .filter_map(|(key, correlation)| {
                Some(LayoutEdge {
                    source: *index.get(&key.low())?,
                    target: *index.get(&key.high())?,
                    correlation,
                })
            })
            .collect();

        tracing::debug!(
            "Layout graph for {}: {} vertices, {} edges (threshold {})",
            method,
            vertices.len(),
            edges.len(),
            threshold
        );

        Self { vertices, edges }
    }

    /// Build directly from vertices and `(source, target, correlation)` triples
    ///
    /// Fails if an edge names a vertex index past the end of `vertices`.
    pub fn from_edges(vertices: Vec<MoleculeId>, edges: &[(usize, usize, f64)]) -> LayoutResult<Self> {
        let graph = Self {
            vertices,
            edges: edges
                .iter()
                .map(|&(source, target, correlation)| LayoutEdge {
                    source,
                    target,
                    correlation,
                })
                .collect(),
        };
        graph.validate()?;
        Ok(graph)
    }

    /// Check that every edge endpoint is a vertex index
    pub fn validate(&self) -> LayoutResult<()> {
        let vertex_count = self.vertices.len();
        for (i, edge) in self.edges.iter().enumerate() {
            for vertex in [edge.source, edge.target] {
                if vertex >= vertex_count {
                    return Err(LayoutError::UnknownVertex {
                        edge: i,
                        vertex,
                        vertex_count,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
