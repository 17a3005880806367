//! Frequency counting — collapse raw samples into a sorted (value, count) table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One distinct observed value and how many times it occurred.
///
/// Counts are `f64` rather than integers so a table can also carry relative
/// frequencies or externally supplied weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountedPair {
    pub value: f64,
    pub count: f64,
}

/// Sorted table of unique values and their occurrence counts.
///
/// Always ascending by value. Callers treat a built table as immutable —
/// there is no mutation API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pairs: Vec<CountedPair>,
}

/// Ordered value/weight projections consumed by the quantile engine.
///
/// Implementors promise `values()` and `counts()` are index-aligned and
/// ascending by value; the engine re-checks the ordering contract defensively
/// before walking the cumulative-weight curve.
pub trait CountedPairs {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn values(&self) -> Vec<f64>;

    fn counts(&self) -> Vec<f64>;
}

impl Counter {
    /// Count occurrences of each distinct sample value.
    ///
    /// Equality is exact floating-point equality — no binning or tolerance.
    /// The returned table is ascending by value and the sum of counts equals
    /// `samples.len()`. An empty input yields an empty table.
    pub fn count(samples: &[f64]) -> Self {
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let mut pairs: Vec<CountedPair> = Vec::new();
        for v in sorted {
            match pairs.last_mut() {
                Some(last) if last.value == v => last.count += 1.0,
                _ => pairs.push(CountedPair { value: v, count: 1.0 }),
            }
        }

        Self { pairs }
    }

    /// Build a table from pre-counted pairs, sorting ascending by value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = CountedPair>) -> Self {
        let mut pairs: Vec<CountedPair> = pairs.into_iter().collect();
        pairs.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
        Self { pairs }
    }

    pub fn pairs(&self) -> &[CountedPair] {
        &self.pairs
    }
}

impl CountedPairs for Counter {
    fn len(&self) -> usize {
        self.pairs.len()
    }

    fn values(&self) -> Vec<f64> {
        self.pairs.iter().map(|p| p.value).collect()
    }

    fn counts(&self) -> Vec<f64> {
        self.pairs.iter().map(|p| p.count).collect()
    }
}
