//! Weighted empirical quantiles over a counted-pair table.

use std::cmp::Ordering;

use super::counter::CountedPairs;

/// The ten decile probabilities.
pub const DECILE_LADDER: [f64; 10] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// How the cumulative-weight curve is read at a requested probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CumulantKind {
    /// Step empirical CDF: the smallest value whose cumulative weight reaches
    /// `p * total_weight`.
    Empirical,
    /// Linear interpolation between the two bracketing step positions.
    LinInterp,
}

/// Compute empirical quantile point values for each requested probability.
///
/// Returns the echoed probability ladder and the point values, index-aligned
/// and in request order. Shorthand for [`quantiles_with`] using
/// [`CumulantKind::Empirical`], which is what decile construction uses.
pub fn quantiles<C: CountedPairs + ?Sized>(table: &C, probs: &[f64]) -> (Vec<f64>, Vec<f64>) {
    quantiles_with(table, probs, CumulantKind::Empirical)
}

/// Quantile ladder with an explicit cumulant kind.
///
/// The table must be ascending by value. A violated ordering contract is
/// repaired here before the cumulative walk — a safety net, not a normal
/// path, since [`super::Counter`] sorts on construction.
pub fn quantiles_with<C: CountedPairs + ?Sized>(
    table: &C,
    probs: &[f64],
    kind: CumulantKind,
) -> (Vec<f64>, Vec<f64>) {
    let mut values = table.values();
    let mut weights = table.counts();

    if !is_ascending(&values) {
        sort_aligned(&mut values, &mut weights);
    }

    let echoed = probs.to_vec();
    let points = probs
        .iter()
        .map(|&p| weighted_quantile(p, kind, &values, &weights))
        .collect();

    (echoed, points)
}

/// Weighted quantile at probability `p` over ascending `values` with parallel
/// `weights`.
///
/// Handles duplicate-weight runs and unevenly weighted points; weights are
/// not assumed to be 1. Returns NaN for an empty table.
///
/// # Panics
/// Panics when `p` is outside `[0, 1]`.
pub fn weighted_quantile(p: f64, kind: CumulantKind, values: &[f64], weights: &[f64]) -> f64 {
    assert!((0.0..=1.0).contains(&p), "probability must be in [0, 1]");
    debug_assert_eq!(values.len(), weights.len());

    if values.is_empty() {
        return f64::NAN;
    }

    let total: f64 = weights.iter().sum();
    let target = p * total;

    let mut cumsum = 0.0;
    for (i, (&v, &w)) in values.iter().zip(weights).enumerate() {
        cumsum += w;
        if cumsum >= target {
            match kind {
                CumulantKind::Empirical => return v,
                CumulantKind::LinInterp => {
                    if i == 0 {
                        return v;
                    }
                    let t = (cumsum - target) / w;
                    return t * values[i - 1] + (1.0 - t) * v;
                }
            }
        }
    }

    // Only reachable when the trailing weights are all zero.
    values[values.len() - 1]
}

fn is_ascending(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

fn sort_aligned(values: &mut [f64], weights: &mut [f64]) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].partial_cmp(&values[j]).unwrap_or(Ordering::Equal));

    let sorted_values: Vec<f64> = order.iter().map(|&i| values[i]).collect();
    let sorted_weights: Vec<f64> = order.iter().map(|&i| weights[i]).collect();
    values.copy_from_slice(&sorted_values);
    weights.copy_from_slice(&sorted_weights);
}
