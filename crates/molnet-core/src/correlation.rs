//! Correlation edges and their per-method value cache
//!
//! Each [`Correlation`] caches one value per [`CorrelationMethod`], with NaN
//! meaning "not yet computed". All three slots share a single last-seen
//! sample count: when the sample set's cardinality differs from it, every
//! slot is cleared before the requested value is recomputed.

use std::fmt;

use molnet_stats::{correlate, CorrelationMethod};
use serde::{Deserialize, Serialize};

use crate::{MoleculeId, SampleSet};

/// Unordered molecule pair, normalized so `low < high`
///
/// Used as the edge's identity in the graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    low: MoleculeId,
    high: MoleculeId,
}

impl EdgeKey {
    /// Normalize a pair; `None` for a self pair
    pub fn new(a: MoleculeId, b: MoleculeId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn low(&self) -> MoleculeId {
        self.low
    }

    pub fn high(&self) -> MoleculeId {
        self.high
    }

    pub fn involves(&self, id: MoleculeId) -> bool {
        self.low == id || self.high == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint
    pub fn other(&self, id: MoleculeId) -> Option<MoleculeId> {
        if id == self.low {
            Some(self.high)
        } else if id == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// A cached pairwise association between two molecules
#[derive(Debug, Clone)]
pub struct Correlation {
    key: EdgeKey,
    /// Pearson, Spearman, Kendall; NaN until computed
    cache: [f64; 3],
    /// Sample count the cache is valid for
    seen_samples: Option<usize>,
}

impl Correlation {
    /// Fresh, uncached edge for a normalized pair
    pub fn new(key: EdgeKey) -> Self {
        Self {
            key,
            cache: [f64::NAN; 3],
            seen_samples: None,
        }
    }

    pub fn key(&self) -> EdgeKey {
        self.key
    }

    /// Both endpoints, low id first
    pub fn pair(&self) -> (MoleculeId, MoleculeId) {
        (self.key.low, self.key.high)
    }

    pub fn involves(&self, id: MoleculeId) -> bool {
        self.key.involves(id)
    }

    pub fn other(&self, id: MoleculeId) -> Option<MoleculeId> {
        self.key.other(id)
    }

    /// Sample count the cached values were computed against
    pub fn seen_sample_count(&self) -> Option<usize> {
        self.seen_samples
    }

    /// Cached value if it is still valid for `sample_count`
    pub fn cached(&self, method: CorrelationMethod, sample_count: usize) -> Option<f64> {
        if self.seen_samples != Some(sample_count) {
            return None;
        }
        let value = self.cache[method.index()];
        (!value.is_nan()).then_some(value)
    }

    /// Cached value or a fresh computation
    ///
    /// Repeated calls with no change to the sample count return the same
    /// float, bit for bit.
    pub fn value(&mut self, method: CorrelationMethod, samples: &SampleSet) -> f64 {
        self.sync_sample_count(samples.len());
        let slot = self.cache[method.index()];
        if !slot.is_nan() {
            return slot;
        }
        self.compute(method, samples)
    }

    /// Recompute regardless of cache state
    pub fn recompute(&mut self, method: CorrelationMethod, samples: &SampleSet) -> f64 {
        self.sync_sample_count(samples.len());
        self.compute(method, samples)
    }

    /// Drop all cached values
    pub fn invalidate(&mut self) {
        self.cache = [f64::NAN; 3];
        self.seen_samples = None;
    }

    fn sync_sample_count(&mut self, count: usize) {
        if self.seen_samples == Some(count) {
            return;
        }
        if let Some(previous) = self.seen_samples {
            tracing::debug!(
                "Correlation {} invalidated: sample count {} -> {}",
                self.key,
                previous,
                count
            );
        }
        self.cache = [f64::NAN; 3];
        self.seen_samples = Some(count);
    }

    fn compute(&mut self, method: CorrelationMethod, samples: &SampleSet) -> f64 {
        let x = samples.values_for(self.key.low);
        let y = samples.values_for(self.key.high);
        let value = correlate(method, &x, &y, samples.missing_value());
        tracing::trace!("Computed {} {} = {}", method, self.key, value);
        self.cache[method.index()] = value;
        value
    }
}
