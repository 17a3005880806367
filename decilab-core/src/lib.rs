//! Decilab Core — price records, frequency counting, decile classification,
//! and multi-key ordering.
//!
//! The classification pipeline: raw samples → [`stats::Counter`] →
//! [`stats::Deciles`] → per-value decile lookup. [`domain::MultiSorter`]
//! orders record collections through a prioritized chain of single-key
//! comparators, independently of the decile path. The `data` module supplies
//! the inputs: monthly ticker returns downloaded from Tiingo, or purchase
//! records imported from CSV.

pub mod data;
pub mod domain;
pub mod stats;
