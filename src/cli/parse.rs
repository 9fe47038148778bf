use std::{fmt, path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::{
    color::AnsiCode,
    constants::{DEFAULT_DATA_PATH, DEFAULT_PREVIEW_ROWS},
    selection::ChartKind,
};

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "metric-dashboard",
    about = "Preview a CSV dataset and chart one numeric column in the terminal"
)]
pub struct Cli {
    /// CSV dataset (header row + values)
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Emit timing diagnostics
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the dashboard once
    Show(ShowArgs),
    /// Pick metric and chart from stdin, re-rendering after each change
    Interactive(ViewArgs),
    /// List the columns and their inferred types
    Columns,
    /// Print minimum, maximum and average of one metric
    Summary(SummaryArgs),
    /// List the chart kinds
    Charts,
    /// Show available color names / hex syntax
    Colors,
}

/// How many preview rows to print: a number or `all`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowLimit(pub Option<usize>);

impl FromStr for RowLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self(None));
        }
        s.parse()
            .map(|n| Self(Some(n)))
            .map_err(|_| format!("expected a row count or `all`, got `{s}`"))
    }
}

impl fmt::Display for RowLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("all"),
        }
    }
}

/// Options shared by `show` and `interactive`.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Numeric column to plot (first numeric column if omitted)
    #[arg(short, long)]
    pub metric: Option<String>,

    /// Chart kind: line, bar, histogram, pie or dot
    #[arg(short, long, default_value = "line")]
    pub chart: ChartKind,

    /// Color (name, `none`, or `#RRGGBB`)
    #[arg(long, default_value = "industrial")]
    pub color: AnsiCode,

    /// Preview rows (`all` for the whole table)
    #[arg(long, default_value_t = RowLimit(Some(DEFAULT_PREVIEW_ROWS)))]
    pub rows: RowLimit,

    /// Page title
    #[arg(short, long, default_value = "COVID-19 Data Visualization")]
    pub title: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Full dashboard page
    #[default]
    Text,
    /// Chart spec and summary as JSON
    Json,
}

/// `metric-dashboard show …`
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// `metric-dashboard summary …`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Numeric column (first numeric column if omitted)
    #[arg(short, long)]
    pub metric: Option<String>,
}
