//! Geometry helpers: value ranges + terminal size plumbing.

use terminal_size::{Height, Width, terminal_size};

use crate::core::constants::{
    BORDER_WIDTH, BRAILLE_HORIZONTAL_RESOLUTION as HR, LABEL_GUTTER, MIN_GRAPH_HEIGHT,
    MIN_GRAPH_WIDTH,
};

/// Vertical extent drawn in one half-column: a point is `low == high`, a bar
/// runs from its baseline to its value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub low: f64,
    pub high: f64,
}

impl Envelope {
    #[inline]
    #[must_use]
    pub fn point(v: f64) -> Self {
        Self { low: v, high: v }
    }

    /// Bar from zero to `v`, whichever side of zero `v` is on.
    #[inline]
    #[must_use]
    pub fn bar(v: f64) -> Self {
        Self {
            low: v.min(0.0),
            high: v.max(0.0),
        }
    }

    #[inline]
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
        }
    }
}

/// Inclusive bounds without any padding.
///
/// * If the series is empty or contains only gaps the fallback is `(0.0, 1.0)`.
/// * If *all* values are identical we expand by [`widen_flat`] so the graph
///   still has non-zero height.
#[must_use]
pub fn bounds(steps: &[Option<Envelope>]) -> (f64, f64) {
    let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);
    for e in steps.iter().flatten() {
        low = low.min(e.low);
        high = high.max(e.high);
    }

    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }

    // Degenerate (flat-line) series - give it some breathing room.
    if (high - low).abs() < f64::EPSILON {
        return widen_flat(low);
    }

    (low, high)
}

/// A non-empty range around `v`: ±0.5, or more once `v` is so large that
/// ±0.5 would round back to `v`.
#[must_use]
pub fn widen_flat(v: f64) -> (f64, f64) {
    let pad = 0.5_f64.max(v.abs() * 1e-9);
    ((v - pad).max(f64::MIN), (v + pad).min(f64::MAX))
}

/// Current terminal geometry (80×30 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(80), Height(30)))
}

/// Convert terminal dimensions + sample count to graph char grid.
/// Leaves space for borders + labels; never smaller than the minimum graph.
#[inline]
#[must_use]
pub fn graph_dims((w, h): (Width, Height), samples: usize, label_width: usize) -> (usize, usize) {
    let x_chars = std::cmp::min(
        samples.div_ceil(HR),
        usize::from(w.0).saturating_sub(BORDER_WIDTH + LABEL_GUTTER + label_width + 1),
    )
    .max(MIN_GRAPH_WIDTH);
    // the dashboard around the chart keeps roughly half the screen
    let y_chars = (usize::from(h.0) / 2).max(MIN_GRAPH_HEIGHT);
    (x_chars, y_chars)
}

/// How wide will the y-axis labels be for the given min/max?
#[inline]
#[must_use]
pub fn y_label_width(y_range: (f64, f64), decimals: usize) -> usize {
    let (low, high) = y_range;
    format!("{low:.decimals$}")
        .len()
        .max(format!("{high:.decimals$}").len())
}
