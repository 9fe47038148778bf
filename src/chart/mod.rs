//! Renderer-agnostic chart descriptions and the dispatcher that builds them.
//!
//! [`render`] is pure: the same table, metric and kind always give the same
//! [`ChartSpec`]. Every datum carries enough to show its exact index (or bin,
//! or slice) and metric value on hover, whatever the chart kind.

pub mod histogram;

use serde::Serialize;

pub use histogram::{Bin, histogram};

use crate::core::{
    constants::{HISTOGRAM_BINS, PIE_TOP_N},
    error::SelectionError,
    selection::{ChartKind, MetricSelection},
    stats::TopValueDistribution,
    table::{NumericColumn, Table, format_float},
};

/// How a point series is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesStyle {
    /// Consecutive points joined.
    Line,
    /// One bar from zero per point.
    Bars,
    /// Unconnected dots.
    Markers,
}

/// One row of the metric. `value` is `None` for a missing cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub index: usize,
    pub value: Option<f64>,
}

/// One pie slice.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub count: usize,
    /// Share of the shown slices, not of the whole column.
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartBody {
    Series {
        style: SeriesStyle,
        points: Vec<Point>,
    },
    Histogram {
        bins: Vec<Bin>,
    },
    Pie {
        slices: Vec<Slice>,
    },
}

/// Everything a presentation layer needs to draw one chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub metric: String,
    /// Heading, e.g. "Line Chart for cases".
    pub title: String,
    pub caption: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub body: ChartBody,
    #[serde(skip)]
    integer: bool,
}

impl ChartSpec {
    fn new(kind: ChartKind, column: NumericColumn<'_>, body: ChartBody) -> Self {
        let metric = column.name().to_owned();
        let (x_label, y_label, caption) = match kind {
            ChartKind::Line | ChartKind::Bar | ChartKind::Dot => {
                (Some("Index".to_owned()), Some(metric.clone()), None)
            }
            ChartKind::Histogram => (Some(metric.clone()), Some("Frequency".to_owned()), None),
            ChartKind::Pie => (
                None,
                None,
                Some(format!("Top {PIE_TOP_N} Value Distribution")),
            ),
        };
        Self {
            kind,
            title: format!("{} for {}", kind.display_name(), metric),
            metric,
            caption,
            x_label,
            y_label,
            body,
            integer: column.is_integer(),
        }
    }

    /// Number of hoverable data (points, bins or slices).
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.body {
            ChartBody::Series { points, .. } => points.len(),
            ChartBody::Histogram { bins } => bins.len(),
            ChartBody::Pie { slices } => slices.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hover text for datum `n`.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn hover(&self, n: usize) -> Option<String> {
        let value = |v: f64| {
            if self.integer {
                format!("{}", v as i64)
            } else {
                format_float(v)
            }
        };
        let m = &self.metric;
        match &self.body {
            ChartBody::Series { points, .. } => points.get(n).map(|p| match p.value {
                Some(v) => format!("index {} · {m} {}", p.index, value(v)),
                None => format!("index {} · {m} missing", p.index),
            }),
            ChartBody::Histogram { bins } => bins.get(n).map(|b| {
                format!(
                    "{m} {} – {} · frequency {}",
                    format_float(b.low),
                    format_float(b.high),
                    b.count
                )
            }),
            ChartBody::Pie { slices } => slices.get(n).map(|s| {
                format!(
                    "{m} {} · count {} · {:.1}%",
                    s.label, s.count, s.percent
                )
            }),
        }
    }

    /// Hover text for every datum, in order.
    #[must_use]
    pub fn tooltips(&self) -> Vec<String> {
        (0..self.len()).filter_map(|n| self.hover(n)).collect()
    }
}

/// Build the chart for `metric` as `kind`.
pub fn render(
    table: &Table,
    metric: &MetricSelection,
    kind: ChartKind,
) -> Result<ChartSpec, SelectionError> {
    let column = table.numeric_column(metric.name())?;
    let body = match kind {
        ChartKind::Line => series(column, SeriesStyle::Line),
        ChartKind::Bar => series(column, SeriesStyle::Bars),
        ChartKind::Dot => series(column, SeriesStyle::Markers),
        ChartKind::Histogram => ChartBody::Histogram {
            bins: histogram(&column.present().collect::<Vec<_>>(), HISTOGRAM_BINS),
        },
        ChartKind::Pie => pie(column, PIE_TOP_N),
    };
    Ok(ChartSpec::new(kind, column, body))
}

fn series(column: NumericColumn<'_>, style: SeriesStyle) -> ChartBody {
    let points = column
        .iter()
        .enumerate()
        .map(|(index, value)| Point { index, value })
        .collect();
    ChartBody::Series { style, points }
}

#[allow(clippy::cast_precision_loss)]
fn pie(column: NumericColumn<'_>, top_n: usize) -> ChartBody {
    let top = TopValueDistribution::compute(column, top_n);
    let total = top.total() as f64;
    let slices = top
        .entries
        .into_iter()
        .map(|e| Slice {
            percent: e.count as f64 / total * 100.0,
            label: e.label,
            value: e.value,
            count: e.count,
        })
        .collect();
    ChartBody::Pie { slices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::{Column, ColumnData};

    fn table() -> Table {
        Table::new(vec![
            Column::new(
                "region",
                ColumnData::Text(vec![Some("n".into()); 5]),
            ),
            Column::new("cases", ColumnData::Integer(vec![1, 2, 2, 3, 100])),
            Column::new(
                "rate",
                ColumnData::Float(vec![Some(0.5), None, Some(1.5), Some(1.5), Some(2.0)]),
            ),
        ])
    }

    fn spec(t: &Table, metric: &str, kind: ChartKind) -> ChartSpec {
        render(t, &MetricSelection::new(t, metric).unwrap(), kind).unwrap()
    }

    #[test]
    fn line_keeps_index_and_labels() {
        let t = table();
        let s = spec(&t, "cases", ChartKind::Line);
        assert_eq!(s.title, "Line Chart for cases");
        assert_eq!(s.x_label.as_deref(), Some("Index"));
        assert_eq!(s.y_label.as_deref(), Some("cases"));
        let ChartBody::Series { style, points } = &s.body else {
            panic!("line chart is a series");
        };
        assert_eq!(*style, SeriesStyle::Line);
        assert_eq!(points[4], Point { index: 4, value: Some(100.0) });
    }

    #[test]
    fn dot_and_bar_share_line_data() {
        let t = table();
        let points = |k| match spec(&t, "rate", k).body {
            ChartBody::Series { points, .. } => points,
            _ => unreachable!(),
        };
        assert_eq!(points(ChartKind::Dot), points(ChartKind::Line));
        assert_eq!(points(ChartKind::Bar), points(ChartKind::Line));
        assert_eq!(points(ChartKind::Dot)[1].value, None);
    }

    #[test]
    fn histogram_labels_swap_axes() {
        let t = table();
        let s = spec(&t, "cases", ChartKind::Histogram);
        assert_eq!(s.x_label.as_deref(), Some("cases"));
        assert_eq!(s.y_label.as_deref(), Some("Frequency"));
        assert_eq!(s.len(), HISTOGRAM_BINS);
    }

    #[test]
    fn pie_percent_is_share_of_top_values() {
        let t = table();
        let s = spec(&t, "rate", ChartKind::Pie);
        assert_eq!(s.caption.as_deref(), Some("Top 5 Value Distribution"));
        let ChartBody::Pie { slices } = &s.body else {
            panic!("pie chart has slices");
        };
        assert_eq!(slices[0].label, "1.5");
        assert_eq!(slices[0].count, 2);
        assert!((slices[0].percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn hover_shows_index_and_value() {
        let t = table();
        assert_eq!(
            spec(&t, "cases", ChartKind::Bar).hover(3).as_deref(),
            Some("index 3 · cases 3")
        );
        assert_eq!(
            spec(&t, "rate", ChartKind::Dot).hover(1).as_deref(),
            Some("index 1 · rate missing")
        );
        assert_eq!(
            spec(&t, "cases", ChartKind::Pie).hover(0).as_deref(),
            Some("cases 2 · count 2 · 40.0%")
        );
        assert!(spec(&t, "cases", ChartKind::Line).hover(5).is_none());
        assert_eq!(spec(&t, "cases", ChartKind::Histogram).tooltips().len(), 25);
    }

    #[test]
    fn histogram_hover_keeps_narrow_edges_apart() {
        let t = Table::new(vec![Column::new(
            "ratio",
            ColumnData::Float(vec![Some(0.0001), Some(0.0002), Some(0.0006)]),
        )]);
        let s = spec(&t, "ratio", ChartKind::Histogram);
        assert_eq!(
            s.hover(0).as_deref(),
            Some("ratio 0.0001 – 0.00012 · frequency 1")
        );
        assert!(s.hover(24).unwrap().ends_with(" – 0.0006 · frequency 1"));
    }

    #[test]
    fn text_metric_is_rejected() {
        let t = table();
        let bogus = MetricSelection::first(&t).unwrap();
        let other = Table::new(vec![Column::new(
            "cases",
            ColumnData::Text(vec![Some("x".into())]),
        )]);
        assert_eq!(
            render(&other, &bogus, ChartKind::Line),
            Err(SelectionError::NotNumeric("cases".into()))
        );
    }
}
