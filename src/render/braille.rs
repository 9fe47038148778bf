//! Value envelopes to UTF-8 braille grid, zero intermediate buffers.
//!
//! ### Workflow
//! 1. `preprocess_to_braille` maps value envelopes into pixel-space extrema
//!    (`GraphStep`), one entry per *half* column; gaps stay `None`.
//! 2. `encode_braille_into_frame` fills a caller-supplied buffer laid out
//!    row-major with exactly three bytes per character cell. Every braille
//!    scalar U+2800..U+28FF encodes to `E2 A0|(mask>>6) 80|(mask&0x3F)`, so
//!    bytes are written directly.
//!
//! The intersection of a contiguous vertical range with a 4-pixel braille
//! cell is one of 11 canonical patterns (full, two triplets, three pairs,
//! four single dots, empty). Masks for each pattern are precomputed for the
//! left and right half-columns.

use crate::core::{bounds::Envelope, config::Config, constants::BRAILLE_VERTICAL_RESOLUTION};

/// Pixel-space min/max inside one half-column; row 0 is the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphStep {
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Default)]
pub struct BraillePlot {
    pub steps: Vec<Option<GraphStep>>,
}

// --- Pre-Computed Masks ---

/// 0 empty, 1 full, 2 top-three, 3 bottom-three, 4 top-two, 5 middle-two,
/// 6 bottom-two, 7..=10 single dot rows 0..=3
const LEFT_MASKS: [u8; 11] = [
    0x00, 0x47, 0x07, 0x46, 0x03, 0x06, 0x44, 0x01, 0x02, 0x04, 0x40,
];
/// Same order as `LEFT_MASKS`, for the right dot column.
const RIGHT_MASKS: [u8; 11] = [
    0x00, 0xB8, 0x38, 0xB0, 0x18, 0x30, 0xA0, 0x08, 0x10, 0x20, 0x80,
];

/// Map `(low, high)` pixel offsets inside a 4-row cell to the pattern id.
#[inline]
const fn pattern_id(low: usize, high: usize) -> usize {
    match (low, high) {
        (0, 3) => 1,
        (0, 2) => 2,
        (1, 3) => 3,
        (0, 1) => 4,
        (1, 2) => 5,
        (2, 3) => 6,
        (0, 0) => 7,
        (1, 1) => 8,
        (2, 2) => 9,
        (3, 3) => 10,
        _ => 0,
    }
}

/// Pattern of `step` within the cell spanning pixel rows `top..=top+3`.
#[inline]
fn cell_pattern(step: Option<&Option<GraphStep>>, top: usize) -> usize {
    let bottom = top + BRAILLE_VERTICAL_RESOLUTION - 1;
    match step {
        Some(Some(s)) if s.max >= top && s.min <= bottom => {
            pattern_id(s.min.max(top) - top, s.max.min(bottom) - top)
        }
        _ => 0,
    }
}

/// Map envelopes to pixel rows. With `bridge`, each step is stretched to
/// touch its predecessor so a line reads as connected; a gap breaks it.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn preprocess_to_braille(v: &[Option<Envelope>], config: &Config, bridge: bool) -> BraillePlot {
    let vert_px = config.y_chars * BRAILLE_VERTICAL_RESOLUTION;
    let (y_min, y_max) = config.y_range;
    let y_span = y_max - y_min; // > 0 by construction

    // λ : ℝ → [0,vert_px-1]
    let map = |y: f64| -> usize {
        let r = ((y - y_min) / y_span).clamp(0.0, 1.0) * (vert_px - 1) as f64;
        (vert_px - 1) - r.round() as usize
    };

    let steps: Vec<Option<GraphStep>> = v
        .iter()
        .map(|e| {
            e.map(|e| {
                let (a, b) = (map(e.low), map(e.high));
                GraphStep {
                    min: a.min(b),
                    max: a.max(b),
                }
            })
        })
        .collect();

    if !bridge {
        return BraillePlot { steps };
    }

    let mut bridged = Vec::with_capacity(steps.len());
    let mut prev: Option<GraphStep> = None;
    for step in &steps {
        let out = match (prev, *step) {
            (Some(p), Some(c)) => Some(GraphStep {
                min: c.min.min(p.min + 1),
                max: c.max.max(p.max.saturating_sub(1)),
            }),
            (_, c) => c,
        };
        bridged.push(out);
        prev = *step;
    }
    BraillePlot { steps: bridged }
}

/// Encode `plot` straight into `buf`, which is the full frame buffer.
///
/// * `offset` -- byte index of the first braille cell (row 0, col 0)
/// * `row_stride` -- bytes between successive graph rows in `buf`
pub fn encode_braille_into_frame(
    buf: &mut [u8],
    offset: usize,
    row_stride: usize,
    plot: &BraillePlot,
    x_chars: usize,
    y_chars: usize,
) {
    debug_assert!(
        buf.len() >= offset + row_stride * (y_chars - 1) + x_chars * 3,
        "frame buffer too small"
    );

    for row in 0..y_chars {
        let row_top = row * BRAILLE_VERTICAL_RESOLUTION;
        let row_base = offset + row * row_stride;

        for col in 0..x_chars {
            let left = cell_pattern(plot.steps.get(col * 2), row_top);
            let right = cell_pattern(plot.steps.get(col * 2 + 1), row_top);

            // https://en.wikipedia.org/wiki/Braille_Patterns
            let mask = LEFT_MASKS[left] | RIGHT_MASKS[right];
            let cell = row_base + col * 3;
            buf[cell] = 0xE2;
            // dots 7 and 8 live in the second byte
            buf[cell + 1] = 0xA0 | ((mask >> 6) & 0x03);
            buf[cell + 2] = 0x80 | (mask & 0x3F);
        }
    }
}
