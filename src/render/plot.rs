//! Turn a `ChartSpec` into terminal output: a braille frame for point, bar
//! and histogram charts, a coloured legend for pie charts.

use std::io::Write;

use terminal_size::{Height, Width};

use crate::{
    chart::{ChartBody, ChartSpec, SeriesStyle, Slice},
    core::{
        bounds::{Envelope, bounds, graph_dims, y_label_width},
        color::{AnsiCode, colorize},
        config::Config,
        constants::{BRAILLE_HORIZONTAL_RESOLUTION as HR, DECIMAL_PRECISION},
        error::DashboardError,
    },
    render::{
        binner::{spread, spread_linear, stretch},
        braille::preprocess_to_braille,
        frame::Renderer,
    },
};

/// Width of the longest pie legend bar, in characters.
const PIE_BAR_WIDTH: usize = 30;
/// Half-columns given to each histogram bin before clamping to the terminal.
const HALF_COLUMNS_PER_BIN: usize = 4;
/// Rule characters kept free around a frame title.
const TITLE_ROOM: usize = 4;

/// Where and how charts are drawn.
#[derive(Clone, Copy, Debug)]
pub struct ChartView {
    pub term: (Width, Height),
    pub color: AnsiCode,
}

impl ChartView {
    #[must_use]
    pub fn new(term: (Width, Height), color: AnsiCode) -> Self {
        Self { term, color }
    }

    pub fn draw<W: Write>(
        &self,
        spec: &ChartSpec,
        renderer: &mut Renderer,
        out: &mut W,
    ) -> Result<(), DashboardError> {
        match &spec.body {
            ChartBody::Series { style, points } => {
                let envelopes: Vec<_> = points
                    .iter()
                    .map(|p| {
                        p.value.map(|v| match style {
                            SeriesStyle::Bars => Envelope::bar(v),
                            SeriesStyle::Line | SeriesStyle::Markers => Envelope::point(v),
                        })
                    })
                    .collect();
                let last = points.last().map_or(0, |p| p.index);
                let x_labels = Some(("0".to_owned(), last.to_string()));
                let (cfg, half_columns) =
                    self.frame_config(spec, &envelopes, envelopes.len(), x_labels)?;
                let fitted = match style {
                    SeriesStyle::Line => spread_linear(&envelopes, half_columns),
                    SeriesStyle::Markers => spread(&envelopes, half_columns),
                    SeriesStyle::Bars => stretch(&envelopes, half_columns),
                };
                let plot = preprocess_to_braille(&fitted, &cfg, *style == SeriesStyle::Line);
                renderer.render(&cfg, &plot, out)?;
            }
            ChartBody::Histogram { bins } => {
                #[allow(clippy::cast_precision_loss)]
                let envelopes: Vec<_> = bins
                    .iter()
                    .map(|b| Some(Envelope::bar(b.count as f64)))
                    .collect();
                let x_labels = match (bins.first(), bins.last()) {
                    (Some(first), Some(last)) => {
                        Some((format!("{:.2}", first.low), format!("{:.2}", last.high)))
                    }
                    _ => None,
                };
                let (cfg, half_columns) = self.frame_config(
                    spec,
                    &envelopes,
                    bins.len() * HALF_COLUMNS_PER_BIN,
                    x_labels,
                )?;
                let stretched = stretch(&envelopes, half_columns);
                let plot = preprocess_to_braille(&stretched, &cfg, false);
                renderer.render(&cfg, &plot, out)?;
            }
            ChartBody::Pie { slices } => self.draw_pie(spec, slices, out)?,
        }
        Ok(())
    }

    /// Frame config sized for `samples` half-columns, plus the half-column
    /// count actually available.
    fn frame_config(
        &self,
        spec: &ChartSpec,
        envelopes: &[Option<Envelope>],
        samples: usize,
        x_labels: Option<(String, String)>,
    ) -> Result<(Config, usize), DashboardError> {
        let y_range = bounds(envelopes);
        let label_width = y_label_width(y_range, DECIMAL_PRECISION);
        // wide enough for the title whenever the terminal allows it
        let title_samples = (spec.title.chars().count() + TITLE_ROOM) * HR;
        let (x_chars, y_chars) = graph_dims(self.term, samples.max(title_samples), label_width);
        let subtitle = match (&spec.x_label, &spec.y_label) {
            (Some(x), Some(y)) => Some(format!("x: {x} · y: {y}")),
            _ => None,
        };
        let mut builder = Config::builder(x_chars, y_chars)
            .title(&spec.title)
            .subtitle_opt(subtitle)
            .y_range(y_range)
            .color(self.color);
        if let Some((left, right)) = x_labels {
            builder = builder.x_labels(left, right);
        }
        Ok((builder.build()?, x_chars * HR))
    }

    fn draw_pie<W: Write>(
        &self,
        spec: &ChartSpec,
        slices: &[Slice],
        out: &mut W,
    ) -> Result<(), DashboardError> {
        writeln!(out, "{}", colorize(&self.color, &spec.title))?;
        if let Some(caption) = &spec.caption {
            writeln!(out, "{caption}")?;
        }
        if slices.is_empty() {
            writeln!(out, "  (no values)")?;
            return Ok(());
        }
        let label_w = slices.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);
        let count_w = slices.iter().map(|s| s.count.to_string().len()).max().unwrap_or(0);
        for (slice, color) in slices.iter().zip(self.color.palette(slices.len())) {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss
            )]
            let filled = ((slice.percent / 100.0 * PIE_BAR_WIDTH as f64).round() as usize)
                .clamp(1, PIE_BAR_WIDTH);
            writeln!(
                out,
                "  {}{} {:>label_w$}  count {:>count_w$}  {:>5.1}%",
                colorize(&color, &"█".repeat(filled)),
                " ".repeat(PIE_BAR_WIDTH - filled),
                slice.label,
                slice.count,
                slice.percent,
            )?;
        }
        Ok(())
    }
}
