//! Samples - named measurement contexts shared across molecules
//!
//! A [`SampleSet`] turns per-sample maps into the paired numeric sequences
//! the statistics functions consume. Its length is the cache key for every
//! correlation computed over it.

use std::collections::HashMap;

use molnet_stats::MissingValue;
use serde::{Deserialize, Serialize};

use crate::MoleculeId;

/// One measurement context: a name plus a value per molecule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sample {
    pub name: String,
    pub values: HashMap<MoleculeId, f64>,
}

impl Sample {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Record a reading (builder style)
    pub fn with_value(mut self, molecule: MoleculeId, value: f64) -> Self {
        self.values.insert(molecule, value);
        self
    }

    pub fn value(&self, molecule: MoleculeId) -> Option<f64> {
        self.values.get(&molecule).copied()
    }
}

/// The ordered collection of samples of one experiment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleSet {
    samples: Vec<Sample>,
    missing: MissingValue,
}

impl SampleSet {
    /// Empty set using the given missing-value policy
    pub fn new(missing: MissingValue) -> Self {
        Self {
            samples: Vec::new(),
            missing,
        }
    }

    pub fn from_samples(samples: Vec<Sample>, missing: MissingValue) -> Self {
        Self { samples, missing }
    }

    pub fn missing_value(&self) -> MissingValue {
        self.missing
    }

    /// Append a sample
    ///
    /// This changes the set's cardinality and therefore invalidates every
    /// cached correlation computed over it.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Remove the first sample with `name`, returning it
    pub fn remove(&mut self, name: &str) -> Option<Sample> {
        let idx = self.samples.iter().position(|s| s.name == name)?;
        Some(self.samples.remove(idx))
    }

    pub fn get(&self, name: &str) -> Option<&Sample> {
        self.samples.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// The molecule's reading in every sample, in sample order
    ///
    /// Always `len()` long. A sample with no reading contributes the
    /// policy's fill value.
    pub fn values_for(&self, molecule: MoleculeId) -> Vec<f64> {
        let fill = self.missing.fill();
        self.samples
            .iter()
            .map(|s| s.value(molecule).unwrap_or(fill))
            .collect()
    }
}
