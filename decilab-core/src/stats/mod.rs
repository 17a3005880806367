//! Frequency counting and decile quantiles.

pub mod counter;
pub mod deciles;
pub mod quantile;

pub use counter::{CountedPair, CountedPairs, Counter};
pub use deciles::{DecileError, DecilePair, Deciles, RepairWarning};
pub use quantile::{quantiles, quantiles_with, weighted_quantile, CumulantKind, DECILE_LADDER};
