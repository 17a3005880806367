//! Decile table construction, lazy invariant repair, and value lookup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::counter::CountedPairs;
use super::quantile::{quantiles, DECILE_LADDER};

/// Normalized weights may miss unity by accumulated rounding, nothing more.
const STOCHASTIC_TOLERANCE: f64 = 1e-9;

/// One decile boundary: the bucket index (1..=10) and the point value at
/// which cumulative probability crosses that decile's threshold.
///
/// `weight` is a boundary value on the sample axis, not a frequency count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecilePair {
    pub decile: i8,
    pub weight: f64,
}

/// Structural and boundary-miss errors from the decile engine.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecileError {
    /// All weights were zero, so normalization is undefined.
    #[error("decile table has no weights (counts or frequencies were all 0)")]
    NoWeights,

    /// Normalized weights did not sum to one within tolerance.
    #[error("decile weights did not (or could not be scaled to) sum to 1")]
    NonStochasticWeights,

    /// The lookup value lies above the highest decile boundary.
    #[error("value does not appear in the calculated decile range")]
    ValueNotFound,
}

/// Advisory warnings: the engine repaired an invariant on the caller's behalf.
///
/// Returned alongside a successful lookup, never as an error. Repeated
/// occurrences mean a table is being rebuilt or reused in unrepaired form
/// instead of being kept in its repaired state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairWarning {
    /// Pairs were deduplicated (and re-sorted) automatically.
    NotDeduplicated,
    /// Pairs were sorted automatically.
    NotSorted,
}

/// Which invariants the pair sequence currently satisfies.
///
/// A single tag instead of two independent booleans, so only the four legal
/// combinations are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    /// Neither sorted by decile nor deduplicated by weight.
    Raw,
    /// Ascending by decile; duplicate weights may remain.
    Sorted,
    /// One pair per distinct weight; order not guaranteed.
    Deduplicated,
    /// Sorted and deduplicated — lookups need no repair.
    Canonical,
}

impl TableState {
    fn is_sorted(self) -> bool {
        matches!(self, TableState::Sorted | TableState::Canonical)
    }

    fn is_deduplicated(self) -> bool {
        matches!(self, TableState::Deduplicated | TableState::Canonical)
    }

    fn after_sort(self) -> Self {
        if self.is_deduplicated() {
            TableState::Canonical
        } else {
            TableState::Sorted
        }
    }

    fn after_dedup(self) -> Self {
        // Dedup walks in decile order but rebuilds the sequence, so the sort
        // invariant is dropped.
        TableState::Deduplicated
    }
}

/// Sort pairs ascending by decile index. No-op when already sorted.
fn sort_pairs(state: TableState, mut pairs: Vec<DecilePair>) -> (TableState, Vec<DecilePair>) {
    if state.is_sorted() {
        return (state, pairs);
    }
    pairs.sort_by_key(|p| p.decile);
    (state.after_sort(), pairs)
}

/// Collapse pairs sharing a boundary value into one representative each.
///
/// Guarantees the sort invariant first, then walks in ascending decile order
/// with last-writer-wins per distinct weight: the highest decile sharing a
/// boundary is the one retained, so a later lookup returns the most
/// conservative decile consistent with that boundary.
fn dedup_pairs(state: TableState, pairs: Vec<DecilePair>) -> (TableState, Vec<DecilePair>) {
    let (state, pairs) = sort_pairs(state, pairs);

    let mut deduped: Vec<DecilePair> = Vec::with_capacity(pairs.len());
    for pair in pairs {
        match deduped.iter_mut().find(|d| d.weight == pair.weight) {
            Some(existing) => existing.decile = pair.decile,
            None => deduped.push(pair),
        }
    }

    (state.after_dedup(), deduped)
}

/// Decile classification table derived from a counted-pair source.
///
/// Construction always ends with a sort pass, so a fresh table is sorted but
/// only deduplicated on request. [`Deciles::lookup_value`] repairs whatever
/// is missing and reports the repair as a [`RepairWarning`]; once the table
/// reaches the sorted-and-deduplicated state it stays there and repeat
/// lookups are warning-free.
#[derive(Debug, Clone, PartialEq)]
pub struct Deciles {
    pairs: Vec<DecilePair>,
    state: TableState,
}

impl Deciles {
    /// Build the ten-decile table for a counted source.
    ///
    /// Point values come from the weighted empirical CDF over the fixed
    /// ladder {0.1, 0.2, ..., 1.0}; the ladder is chosen so the decile index
    /// `(p * 10).round()` is exact. When `deduplicate` is set, pairs sharing
    /// a boundary value are collapsed immediately. The result is sorted by
    /// decile before returning regardless, as a final safety pass.
    pub fn from_counts<C: CountedPairs + ?Sized>(table: &C, deduplicate: bool) -> Self {
        let (probs, points) = quantiles(table, &DECILE_LADDER);

        let pairs = probs
            .iter()
            .zip(&points)
            .map(|(&p, &weight)| DecilePair {
                decile: (p * 10.0).round() as i8,
                weight,
            })
            .collect();

        let mut table = Self {
            pairs,
            state: TableState::Raw,
        };

        if deduplicate {
            table.deduplicate();
        }
        table.sort();

        table
    }

    /// Assemble a table from raw pairs with no invariant assumed.
    pub fn from_pairs(pairs: Vec<DecilePair>) -> Self {
        Self {
            pairs,
            state: TableState::Raw,
        }
    }

    pub fn pairs(&self) -> &[DecilePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sort pairs ascending by decile index.
    pub fn sort(&mut self) {
        let (state, pairs) = sort_pairs(self.state, std::mem::take(&mut self.pairs));
        self.state = state;
        self.pairs = pairs;
    }

    /// Collapse pairs sharing a boundary value, keeping the highest decile.
    ///
    /// Leaves the table in a deduplicated-but-unsorted state; callers that
    /// rely on order must [`Deciles::sort`] afterward (lookup does both).
    pub fn deduplicate(&mut self) {
        let (state, pairs) = dedup_pairs(self.state, std::mem::take(&mut self.pairs));
        self.state = state;
        self.pairs = pairs;
    }

    /// Classify `v` into a decile: the smallest boundary at or above `v`.
    ///
    /// A table missing an invariant is repaired first and the repair is
    /// reported. The warnings are mutually exclusive per call — the
    /// deduplication warning masks the sort warning, since dedup forces a
    /// re-sort internally anyway. Errors with
    /// [`DecileError::ValueNotFound`] when `v` exceeds every boundary.
    pub fn lookup_value(&mut self, v: f64) -> Result<(i8, Option<RepairWarning>), DecileError> {
        let mut warning = None;

        if !self.state.is_deduplicated() {
            self.deduplicate();
            warning = Some(RepairWarning::NotDeduplicated);
        }
        if !self.state.is_sorted() {
            self.sort();
            if warning.is_none() {
                warning = Some(RepairWarning::NotSorted);
            }
        }

        for pair in &self.pairs {
            if v <= pair.weight {
                return Ok((pair.decile, warning));
            }
        }

        Err(DecileError::ValueNotFound)
    }

    /// Normalize boundary weights so they sum to one.
    ///
    /// Errors with [`DecileError::NoWeights`] when the total is zero and with
    /// [`DecileError::NonStochasticWeights`] when the scaled weights still
    /// miss unity beyond tolerance.
    pub fn scale_to_one(&mut self) -> Result<(), DecileError> {
        let total: f64 = self.pairs.iter().map(|p| p.weight).sum();
        if total == 0.0 {
            return Err(DecileError::NoWeights);
        }

        for pair in &mut self.pairs {
            pair.weight /= total;
        }

        let scaled: f64 = self.pairs.iter().map(|p| p.weight).sum();
        if (scaled - 1.0).abs() > STOCHASTIC_TOLERANCE {
            return Err(DecileError::NonStochasticWeights);
        }

        Ok(())
    }
}
