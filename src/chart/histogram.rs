//! Equal-width binning over the value range of a metric.
//!
//! Bin edges follow the usual numeric convention: `bins + 1` evenly spaced
//! edges from min to max, every bin half-open `[lo, hi)` except the last,
//! which also takes values equal to max. A flat series is widened around its
//! value and an empty one spans `[0, 1]`, so there is always a non-zero width.

use serde::Serialize;

use crate::core::bounds::widen_flat;

/// One histogram bar.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bin {
    pub low: f64,
    pub high: f64,
    pub count: usize,
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);
    for &v in values {
        low = low.min(v);
        high = high.max(v);
    }
    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }
    if low == high {
        return widen_flat(low);
    }
    (low, high)
}

/// `bins + 1` edges; the last one is exactly `high`.
#[allow(clippy::cast_precision_loss)]
fn edges(low: f64, high: f64, bins: usize) -> Vec<f64> {
    let step = (high - low) / bins as f64;
    (0..=bins)
        .map(|i| if i == bins { high } else { low + step * i as f64 })
        .collect()
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn bin_index(v: f64, edges: &[f64]) -> usize {
    let bins = edges.len() - 1;
    let (low, high) = (edges[0], edges[bins]);
    let guess = ((v - low) / (high - low) * bins as f64).floor();
    let mut i = if guess <= 0.0 {
        0
    } else {
        (guess as usize).min(bins - 1)
    };
    // the division can land one bin off near an edge
    if i > 0 && v < edges[i] {
        i -= 1;
    } else if i + 1 < bins && v >= edges[i + 1] {
        i += 1;
    }
    i
}

/// Count `values` into `bins` equal-width bins. Panics if `bins` is zero.
#[must_use]
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    assert!(bins > 0, "histogram needs at least one bin");
    let (low, high) = value_range(values);
    let edges = edges(low, high, bins);
    let mut counts = vec![0usize; bins];
    for &v in values {
        counts[bin_index(v, &edges)] += 1;
    }
    edges
        .windows(2)
        .zip(counts)
        .map(|(w, count)| Bin {
            low: w[0],
            high: w[1],
            count,
        })
        .collect()
}
