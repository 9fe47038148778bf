//! Aggregates the "business logic" layer.

pub mod bounds;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod selection;
pub mod stats;
pub mod table;

// re-export frequently-used items for convenience
pub use bounds::Envelope;
pub use color::{AnsiCode, colorize};
pub use config::{Config, ConfigBuilder};
pub use constants::{
    BORDER_WIDTH, BRAILLE_HORIZONTAL_RESOLUTION, DECIMAL_PRECISION, DEFAULT_DATA_PATH,
    HISTOGRAM_BINS, LABEL_GUTTER, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH, PIE_TOP_N,
};
pub use error::{
    ColorError, ConfigError, DashboardError, LoadError, SelectionError, SummaryError,
};
pub use loader::Dataset;
pub use selection::{ChartKind, MetricSelection, Selection};
pub use stats::{SummaryStats, TopValueDistribution, summarize};
pub use table::{Cell, Column, ColumnData, ColumnType, NumericColumn, Table};
