//! Fit a series to the half-columns available.
//!
//! Long series are squeezed by index binning: each output half-column covers
//! a contiguous run of input indices and keeps the envelope (lowest low,
//! highest high) of that run, so spikes survive the downsampling. Gaps only
//! survive when the whole run is a gap.
//!
//! Short series are widened instead: `stretch` repeats entries (bars),
//! `spread` spaces them out (dots), `spread_linear` also draws the straight
//! segments in between (lines).

use crate::core::bounds::Envelope;

/// Bucket `data` into at most `target` envelopes.
///
/// Returns the input unchanged when it already fits.
#[must_use]
pub fn bin_index(data: &[Option<Envelope>], target: usize) -> Vec<Option<Envelope>> {
    let n = data.len();
    if n == 0 || target == 0 || n <= target {
        return data.to_vec();
    }

    (0..target)
        .map(|i| {
            let start = i * n / target;
            let end = (i + 1) * n / target;
            data[start..end]
                .iter()
                .flatten()
                .copied()
                .reduce(Envelope::merge)
        })
        .collect()
}

/// Stretch `data` across `target` half-columns, repeating each entry over
/// its share of the width. Used for histograms, which have few wide bars.
#[must_use]
pub fn stretch(data: &[Option<Envelope>], target: usize) -> Vec<Option<Envelope>> {
    let n = data.len();
    if n == 0 || target <= n {
        return bin_index(data, target);
    }
    (0..target).map(|j| data[j * n / target]).collect()
}

/// Half-column of entry `i` when `n` entries are spread over `target`.
#[inline]
fn position(i: usize, n: usize, target: usize) -> usize {
    if n <= 1 {
        0
    } else {
        i * (target - 1) / (n - 1)
    }
}

/// Space entries evenly, first at column 0 and last at `target - 1`.
#[must_use]
pub fn spread(data: &[Option<Envelope>], target: usize) -> Vec<Option<Envelope>> {
    let n = data.len();
    if n == 0 || target <= n {
        return bin_index(data, target);
    }
    let mut out = vec![None; target];
    for (i, e) in data.iter().enumerate() {
        out[position(i, n, target)] = *e;
    }
    out
}

/// `spread`, plus linear interpolation between neighbours that are both
/// present. A missing value still leaves a hole.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn spread_linear(data: &[Option<Envelope>], target: usize) -> Vec<Option<Envelope>> {
    let n = data.len();
    let mut out = spread(data, target);
    if n == 0 || target <= n {
        return out;
    }
    for (i, pair) in data.windows(2).enumerate() {
        let (Some(a), Some(b)) = (pair[0], pair[1]) else {
            continue;
        };
        let (from, to) = (position(i, n, target), position(i + 1, n, target));
        for (col, slot) in out.iter_mut().enumerate().take(to).skip(from + 1) {
            let t = (col - from) as f64 / (to - from) as f64;
            *slot = Some(Envelope::point(a.low + (b.low - a.low) * t));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[f64]) -> Vec<Option<Envelope>> {
        v.iter().map(|x| Some(Envelope::point(*x))).collect()
    }

    #[test]
    fn short_series_pass_through() {
        let d = pts(&[1.0, 2.0]);
        assert_eq!(bin_index(&d, 4), d);
    }

    #[test]
    fn buckets_keep_extrema() {
        let d = pts(&[1.0, 9.0, 2.0, 3.0, -4.0, 0.0]);
        let b = bin_index(&d, 2);
        assert_eq!(b[0], Some(Envelope { low: 1.0, high: 9.0 }));
        assert_eq!(b[1], Some(Envelope { low: -4.0, high: 3.0 }));
    }

    #[test]
    fn all_gap_bucket_stays_a_gap() {
        let d = vec![None, None, Some(Envelope::point(1.0)), None];
        assert_eq!(bin_index(&d, 2), vec![None, Some(Envelope::point(1.0))]);
    }

    #[test]
    fn spread_pins_first_and_last() {
        let d = pts(&[1.0, 2.0, 3.0]);
        let s = spread(&d, 5);
        assert_eq!(s, vec![d[0], None, d[1], None, d[2]]);
    }

    #[test]
    fn spread_linear_fills_between_present_points() {
        let d = vec![Some(Envelope::point(0.0)), Some(Envelope::point(4.0)), None];
        let s = spread_linear(&d, 5);
        assert_eq!(s[1], Some(Envelope::point(2.0)));
        assert_eq!(s[2], Some(Envelope::point(4.0)));
        assert_eq!(s[3], None);
        assert_eq!(s[4], None);
    }

    #[test]
    fn stretch_repeats_each_bar() {
        let d = pts(&[1.0, 2.0]);
        let s = stretch(&d, 4);
        assert_eq!(s, vec![d[0], d[0], d[1], d[1]]);
    }
}
