//! Centralised error types used across the crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The dataset could not be turned into a table. Always fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset `{}` not found", path.display())]
    Missing { path: PathBuf },
    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV in `{}`: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("line {line} of `{}` has {found} fields, the header has {expected}", path.display())]
    LongRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("dataset `{}` has no header columns", path.display())]
    NoColumns { path: PathBuf },
    #[error("dataset `{}` has a header but no rows", path.display())]
    NoRows { path: PathBuf },
}

/// A metric or chart kind that is not one of the offered choices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no column named `{0}`")]
    UnknownColumn(String),
    #[error("column `{0}` is not numeric")]
    NotNumeric(String),
    #[error("unknown chart kind `{0}` (expected line, bar, histogram, pie or dot)")]
    UnknownChart(String),
    #[error("the dataset has no numeric columns to plot")]
    NoNumericColumns,
}

/// Failures of the summary calculator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("column `{column}` has no values to summarise")]
    EmptyColumn { column: String },
}

/// Precise configuration faults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration missing field `{0}`")]
    MissingField(&'static str),
    #[error("y_min {low} must be < y_max {high}")]
    InvalidRange { low: f64, high: f64 },
    #[error("graph too small: need ≥{want_w}×{want_h}, got {got_w}×{got_h}")]
    GraphTooSmall {
        want_w: usize,
        want_h: usize,
        got_w: usize,
        got_h: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex colour digit")]
    InvalidHexDigit,
    #[error("hex colour must be exactly 6 digits")]
    InvalidHexLength,
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
