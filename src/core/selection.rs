//! What the user picked: one numeric metric and one chart kind.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::core::{error::SelectionError, table::Table};

/// The five chart kinds on offer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Histogram,
    Pie,
    Dot,
}

impl ChartKind {
    pub const ALL: [Self; 5] = [Self::Line, Self::Bar, Self::Histogram, Self::Pie, Self::Dot];

    /// Short name accepted on the command line.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Histogram => "histogram",
            Self::Pie => "pie",
            Self::Dot => "dot",
        }
    }

    /// Name shown in headings and controls.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Line => "Line Chart",
            Self::Bar => "Bar Graph",
            Self::Histogram => "Histogram",
            Self::Pie => "Pie Chart",
            Self::Dot => "Dot Plot",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts the short key or the display name, case-insensitively.
impl FromStr for ChartKind {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| {
                k.key().eq_ignore_ascii_case(wanted) || k.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| SelectionError::UnknownChart(wanted.to_owned()))
    }
}

/// A column name known to be numeric in the table it was checked against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetricSelection(String);

impl MetricSelection {
    pub fn new(table: &Table, name: &str) -> Result<Self, SelectionError> {
        table.numeric_column(name)?;
        Ok(Self(name.to_owned()))
    }

    /// First numeric column of the table.
    pub fn first(table: &Table) -> Result<Self, SelectionError> {
        table
            .numeric_columns()
            .first()
            .map(|name| Self((*name).to_owned()))
            .ok_or(SelectionError::NoNumericColumns)
    }

    /// `name` if given, the first numeric column otherwise.
    pub fn resolve(table: &Table, name: Option<&str>) -> Result<Self, SelectionError> {
        match name {
            Some(name) => Self::new(table, name),
            None => Self::first(table),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Selection state for one render cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub metric: MetricSelection,
    pub kind: ChartKind,
}

impl Selection {
    #[must_use]
    pub fn new(metric: MetricSelection, kind: ChartKind) -> Self {
        Self { metric, kind }
    }

    /// Switch metric; on error the current one is kept.
    pub fn set_metric(&mut self, table: &Table, name: &str) -> Result<(), SelectionError> {
        self.metric = MetricSelection::new(table, name)?;
        Ok(())
    }

    /// Switch chart kind; on error the current one is kept.
    pub fn set_kind(&mut self, name: &str) -> Result<(), SelectionError> {
        self.kind = name.parse()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::{Column, ColumnData};

    fn table() -> Table {
        Table::new(vec![
            Column::new("date", ColumnData::Text(vec![Some("d1".into())])),
            Column::new("cases", ColumnData::Integer(vec![4])),
            Column::new("deaths", ColumnData::Integer(vec![1])),
        ])
    }

    #[test]
    fn chart_kind_parses_keys_and_display_names() {
        assert_eq!("histogram".parse::<ChartKind>(), Ok(ChartKind::Histogram));
        assert_eq!("Dot Plot".parse::<ChartKind>(), Ok(ChartKind::Dot));
        assert_eq!(" BAR ".parse::<ChartKind>(), Ok(ChartKind::Bar));
        assert_eq!(
            "donut".parse::<ChartKind>(),
            Err(SelectionError::UnknownChart("donut".into()))
        );
    }

    #[test]
    fn metric_defaults_to_first_numeric_column() {
        let t = table();
        assert_eq!(MetricSelection::resolve(&t, None).unwrap().name(), "cases");
        assert_eq!(
            MetricSelection::resolve(&t, Some("date")),
            Err(SelectionError::NotNumeric("date".into()))
        );
    }

    #[test]
    fn failed_update_keeps_previous_selection() {
        let t = table();
        let mut sel = Selection::new(MetricSelection::first(&t).unwrap(), ChartKind::Line);
        assert!(sel.set_metric(&t, "nope").is_err());
        assert!(sel.set_kind("radar").is_err());
        assert_eq!(sel.metric.name(), "cases");
        assert_eq!(sel.kind, ChartKind::Line);

        sel.set_metric(&t, "deaths").unwrap();
        sel.set_kind("pie").unwrap();
        assert_eq!(sel.metric.name(), "deaths");
        assert_eq!(sel.kind, ChartKind::Pie);
    }

    #[test]
    fn table_without_numbers_has_no_default_metric() {
        let t = Table::new(vec![Column::new(
            "name",
            ColumnData::Text(vec![Some("x".into())]),
        )]);
        assert_eq!(
            MetricSelection::first(&t),
            Err(SelectionError::NoNumericColumns)
        );
    }
}
