//! Column-wise, immutable table with inferred column types.

use std::fmt;

use serde::Serialize;

use crate::core::error::SelectionError;

/// Type inferred for a column at load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl ColumnType {
    #[inline]
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage for one column. Integer columns never hold missing values; a
/// missing cell demotes the column to `Float`.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Integer(Vec<i64>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Integer(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        match self.data {
            ColumnData::Integer(_) => ColumnType::Integer,
            ColumnData::Float(_) => ColumnType::Float,
            ColumnData::Text(_) => ColumnType::Text,
        }
    }

    #[inline]
    #[must_use]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Cell at `row`; out-of-range rows read as missing.
    #[must_use]
    pub fn cell(&self, row: usize) -> Cell<'_> {
        match &self.data {
            ColumnData::Integer(v) => v.get(row).map_or(Cell::Missing, |x| Cell::Integer(*x)),
            ColumnData::Float(v) => v
                .get(row)
                .copied()
                .flatten()
                .map_or(Cell::Missing, Cell::Float),
            ColumnData::Text(v) => v
                .get(row)
                .and_then(Option::as_deref)
                .map_or(Cell::Missing, Cell::Text),
        }
    }

    /// Numeric view, `None` for text columns.
    #[must_use]
    pub fn numeric(&self) -> Option<NumericColumn<'_>> {
        let values = match &self.data {
            ColumnData::Integer(v) => NumericValues::Integer(v),
            ColumnData::Float(v) => NumericValues::Float(v),
            ColumnData::Text(_) => return None,
        };
        Some(NumericColumn {
            name: &self.name,
            values,
        })
    }
}

/// A single value as seen by the preview.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell<'a> {
    Integer(i64),
    Float(f64),
    Text(&'a str),
    Missing,
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(v) => write!(f, "{v}"),
            Cell::Float(v) => f.write_str(&format_float(*v)),
            Cell::Text(s) => f.write_str(s),
            Cell::Missing => f.write_str("NaN"),
        }
    }
}

/// Floats always show a fractional part so `2.0` never reads as an integer.
#[must_use]
pub fn format_float(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

#[derive(Clone, Copy, Debug)]
enum NumericValues<'a> {
    Integer(&'a [i64]),
    Float(&'a [Option<f64>]),
}

/// Borrowed numeric column: the metric every chart and summary reads.
#[derive(Clone, Copy, Debug)]
pub struct NumericColumn<'a> {
    name: &'a str,
    values: NumericValues<'a>,
}

impl<'a> NumericColumn<'a> {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self.values {
            NumericValues::Integer(v) => v.len(),
            NumericValues::Float(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self.values, NumericValues::Integer(_))
    }

    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn get(&self, row: usize) -> Option<f64> {
        match self.values {
            NumericValues::Integer(v) => v.get(row).map(|x| *x as f64),
            NumericValues::Float(v) => v.get(row).copied().flatten(),
        }
    }

    /// Every row in index order, `None` where the cell is missing.
    pub fn iter(self) -> impl Iterator<Item = Option<f64>> + 'a {
        (0..self.len()).map(move |row| self.get(row))
    }

    /// Present values only, in index order.
    pub fn present(self) -> impl Iterator<Item = f64> + 'a {
        self.iter().flatten()
    }

    /// Text for a value of this column: integers without a fractional part.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn label(&self, v: f64) -> String {
        if self.is_integer() {
            format!("{}", v as i64)
        } else {
            format_float(v)
        }
    }
}

/// Immutable table. Row order is the implicit index.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// All columns must have the same length.
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        let n_rows = columns.first().map_or(0, |c| c.data.len());
        debug_assert!(
            columns.iter().all(|c| c.data.len() == n_rows),
            "ragged columns"
        );
        Self { columns, n_rows }
    }

    #[inline]
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[inline]
    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of integer and float columns in definition order.
    #[must_use]
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.column_type().is_numeric())
            .map(Column::name)
            .collect()
    }

    /// Resolve `name` to a numeric column.
    pub fn numeric_column(&self, name: &str) -> Result<NumericColumn<'_>, SelectionError> {
        self.column(name)
            .ok_or_else(|| SelectionError::UnknownColumn(name.to_owned()))?
            .numeric()
            .ok_or_else(|| SelectionError::NotNumeric(name.to_owned()))
    }

    /// Cells of one row in column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Cell<'_>> + '_ {
        self.columns.iter().map(move |c| c.cell(row))
    }
}
