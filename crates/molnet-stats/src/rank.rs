//! Ranking and the three correlation coefficients
//!
//! All public coefficient functions apply the legacy-compatible
//! [`MissingValue::Zero`] filter first. Use [`crate::correlate`] to pick a
//! different policy.

use std::cmp::Ordering;

use crate::{filter_pairs, MissingValue};

/// Minimum number of valid pairs needed for a defined correlation
///
/// Below this the coefficient is `0.0`.
pub const MIN_PAIRS: usize = 4;

/// Rank values with tie averaging
///
/// Returns, for each input element, its 0-based position in ascending
/// sorted order. Tied values share the average of the positions they would
/// jointly occupy, so `[5, 5, 1]` ranks as `[1.5, 1.5, 0.0]`.
///
/// Time complexity: O(n log n)
pub fn rank(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end share the mean of start and end - 1
        let shared = (start + end - 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = shared;
        }
        start = end;
    }

    ranks
}

/// Pearson product-moment correlation
///
/// Uses population means and the sample standard deviation form
/// `Σ(x−x̄)(y−ȳ) / ((n−1)·Sx·Sy)`. The `(n−1)` factors cancel, leaving
/// `Sxy / sqrt(Sxx·Syy)`, which is what gets evaluated.
///
/// Zero variance on either side, fewer than [`MIN_PAIRS`] valid pairs,
/// or a NaN result all give `0.0`.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let (x, y) = filter_pairs(x, y, MissingValue::Zero);
    pearson_paired(&x, &y)
}

/// Spearman rank correlation
///
/// `1 − 6·Σ(Rx−Ry)² / (n·(n²−1))` over tie-averaged ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    let (x, y) = filter_pairs(x, y, MissingValue::Zero);
    spearman_paired(&x, &y)
}

/// Kendall tau-b
///
/// Counts concordant and discordant pairs over all unordered index pairs.
/// A pair tied in either sequence is excluded from both counts. The
/// difference is normalized by `sqrt((n0 − Tx)·(n0 − Ty))` with
/// `n0 = n(n−1)/2`.
///
/// Time complexity: O(n²)
pub fn kendall(x: &[f64], y: &[f64]) -> f64 {
    let (x, y) = filter_pairs(x, y, MissingValue::Zero);
    kendall_paired(&x, &y)
}

/// Pearson over already-filtered, equal-length data
pub(crate) fn pearson_paired(x: &[f64], y: &[f64]) -> f64 {
    if !has_enough_pairs(x, y) {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return 0.0;
    }

    normalize(sxy / (sxx * syy).sqrt())
}

/// Spearman over already-filtered, equal-length data
pub(crate) fn spearman_paired(x: &[f64], y: &[f64]) -> f64 {
    if !has_enough_pairs(x, y) {
        return 0.0;
    }

    let rx = rank(x);
    let ry = rank(y);
    let n = x.len() as f64;

    let d2: f64 = rx.iter().zip(&ry).map(|(a, b)| (a - b).powi(2)).sum();
    normalize(1.0 - 6.0 * d2 / (n * (n * n - 1.0)))
}

/// Kendall tau-b over already-filtered, equal-length data
pub(crate) fn kendall_paired(x: &[f64], y: &[f64]) -> f64 {
    if !has_enough_pairs(x, y) {
        return 0.0;
    }

    let n = x.len();
    let mut concordant: u64 = 0;
    let mut discordant: u64 = 0;
    let mut ties_x: u64 = 0;
    let mut ties_y: u64 = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let ox = x[i].partial_cmp(&x[j]).unwrap_or(Ordering::Equal);
            let oy = y[i].partial_cmp(&y[j]).unwrap_or(Ordering::Equal);

            if ox == Ordering::Equal {
                ties_x += 1;
            }
            if oy == Ordering::Equal {
                ties_y += 1;
            }
            if ox == Ordering::Equal || oy == Ordering::Equal {
                continue;
            }

            if ox == oy {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }

    let n0 = (n * (n - 1) / 2) as f64;
    let denom = ((n0 - ties_x as f64) * (n0 - ties_y as f64)).sqrt();
    if denom == 0.0 {
        return 0.0;
    }

    normalize((concordant as f64 - discordant as f64) / denom)
}

fn has_enough_pairs(x: &[f64], y: &[f64]) -> bool {
    x.len() == y.len() && x.len() >= MIN_PAIRS
}

/// Map NaN to the fallback and clamp rounding drift into `[-1, 1]`
fn normalize(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}
