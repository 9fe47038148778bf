//! Public-facing crate root – re-exports.
//!
//! The pipeline is `Dataset::load` → `Selection` → [`render`] / [`summarize`]
//! → [`Dashboard`]; only the last step does any output.

pub mod chart;
pub mod cli;
pub mod core;
pub mod render;

pub use chart::{ChartBody, ChartSpec, render};
pub use core::{
    color::{AnsiCode, colorize},
    error::{DashboardError, LoadError, SelectionError, SummaryError},
    loader::Dataset,
    selection::{ChartKind, MetricSelection, Selection},
    stats::{SummaryStats, TopValueDistribution, summarize},
    table::{ColumnType, Table},
};
pub use render::{ChartView, Dashboard, Renderer};
