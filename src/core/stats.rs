//! Summary statistics and value frequencies over one metric column.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::{
    constants::SUMMARY_DECIMALS,
    error::SummaryError,
    selection::MetricSelection,
    table::{NumericColumn, Table},
};

/// Minimum, maximum and mean of a metric, each rounded to two decimals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SummaryStats {
    pub minimum: f64,
    pub maximum: f64,
    pub average: f64,
}

/// Round half away from zero to `decimals` places.
///
/// Values too large to scale have no fractional digits left and come back
/// unchanged.
#[must_use]
pub fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let scaled = v * scale;
    if !scaled.is_finite() {
        return v;
    }
    scaled.round() / scale
}

pub fn summarize(table: &Table, metric: &MetricSelection) -> Result<SummaryStats, SummaryError> {
    let column = table.numeric_column(metric.name())?;
    summarize_column(column)
}

/// Missing cells are skipped; a column with nothing left is an error.
#[allow(clippy::cast_precision_loss)]
pub fn summarize_column(column: NumericColumn<'_>) -> Result<SummaryStats, SummaryError> {
    let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut sum, mut n) = (0.0, 0usize);
    for v in column.present() {
        low = low.min(v);
        high = high.max(v);
        sum += v;
        n += 1;
    }
    if n == 0 {
        return Err(SummaryError::EmptyColumn {
            column: column.name().to_owned(),
        });
    }
    let mut mean = sum / n as f64;
    if !mean.is_finite() {
        // the running sum overflowed; divide first
        mean = column.present().map(|v| v / n as f64).sum();
    }
    // float error must not push the mean outside the extrema
    let mean = mean.clamp(low, high);
    Ok(SummaryStats {
        minimum: round_to(low, SUMMARY_DECIMALS),
        maximum: round_to(high, SUMMARY_DECIMALS),
        average: round_to(mean, SUMMARY_DECIMALS),
    })
}

/// One distinct value and how often it occurs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: f64,
    pub label: String,
    pub count: usize,
}

/// The most frequent distinct values, highest count first.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TopValueDistribution {
    pub entries: Vec<ValueCount>,
}

impl TopValueDistribution {
    /// Count `n` most frequent present values. Ties keep first-seen order.
    #[must_use]
    pub fn compute(column: NumericColumn<'_>, n: usize) -> Self {
        // key: bit pattern with -0.0 folded into 0.0
        let mut slots: HashMap<u64, usize> = HashMap::new();
        let mut seen: Vec<(f64, usize)> = Vec::new();
        for v in column.present() {
            let key = if v == 0.0 { 0f64.to_bits() } else { v.to_bits() };
            let slot = *slots.entry(key).or_insert_with(|| {
                seen.push((v, 0));
                seen.len() - 1
            });
            seen[slot].1 += 1;
        }
        // stable sort: equal counts stay in first-seen order
        seen.sort_by(|a, b| b.1.cmp(&a.1));
        let entries = seen
            .into_iter()
            .take(n)
            .map(|(value, count)| ValueCount {
                value,
                label: column.label(value),
                count,
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::{Column, ColumnData};

    fn cases(values: Vec<i64>) -> Table {
        Table::new(vec![Column::new("cases", ColumnData::Integer(values))])
    }

    #[test]
    fn scenario_summary() {
        let t = cases(vec![1, 2, 2, 3, 100]);
        let m = MetricSelection::new(&t, "cases").unwrap();
        let s = summarize(&t, &m).unwrap();
        assert_eq!(s.minimum, 1.0);
        assert_eq!(s.maximum, 100.0);
        assert_eq!(s.average, 21.6);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(21.666, 2), 21.67);
    }

    #[test]
    fn huge_values_are_not_rounded_to_infinity() {
        assert_eq!(round_to(1.7e308, 2), 1.7e308);
        assert_eq!(round_to(-1.7e308, 2), -1.7e308);

        let t = Table::new(vec![Column::new(
            "load",
            ColumnData::Float(vec![Some(1.7e308), Some(1.7e308), Some(1.0)]),
        )]);
        let s = summarize(&t, &MetricSelection::first(&t).unwrap()).unwrap();
        assert_eq!(s.minimum, 1.0);
        assert_eq!(s.maximum, 1.7e308);
        assert!(s.average.is_finite());
        assert!(s.average > 1e308 && s.average <= s.maximum);
    }

    #[test]
    fn missing_values_are_skipped() {
        let t = Table::new(vec![Column::new(
            "rate",
            ColumnData::Float(vec![None, Some(1.0), Some(2.0), None]),
        )]);
        let s = summarize_column(t.numeric_column("rate").unwrap()).unwrap();
        assert_eq!(s.average, 1.5);
    }

    #[test]
    fn empty_column_is_an_error() {
        let t = Table::new(vec![Column::new("rate", ColumnData::Float(vec![None, None]))]);
        assert_eq!(
            summarize_column(t.numeric_column("rate").unwrap()),
            Err(SummaryError::EmptyColumn {
                column: "rate".into()
            })
        );
        let t = cases(vec![]);
        assert!(summarize_column(t.numeric_column("cases").unwrap()).is_err());
    }

    #[test]
    fn top_values_order_by_count_then_first_seen() {
        let t = cases(vec![1, 2, 2, 3, 100]);
        let top = TopValueDistribution::compute(t.numeric_column("cases").unwrap(), 5);
        let got: Vec<_> = top
            .entries
            .iter()
            .map(|e| (e.label.as_str(), e.count))
            .collect();
        assert_eq!(got, vec![("2", 2), ("1", 1), ("3", 1), ("100", 1)]);
        assert_eq!(top.total(), 5);
    }

    #[test]
    fn top_values_truncate_to_n() {
        let t = cases(vec![9, 8, 7, 6, 5, 4, 4]);
        let top = TopValueDistribution::compute(t.numeric_column("cases").unwrap(), 5);
        let labels: Vec<_> = top.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["4", "9", "8", "7", "6"]);
    }
}
