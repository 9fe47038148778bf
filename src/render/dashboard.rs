//! The whole page: title, preview, controls, chart, summary, footer.
//!
//! A page is rendered into memory first and handed out only when every part
//! succeeded, so a failure never leaves half a dashboard on screen.

use std::{fmt::Write as _, time::Instant};

use serde::Serialize;

use crate::{
    chart::{ChartSpec, render},
    core::{
        color::colorize,
        error::DashboardError,
        selection::{ChartKind, Selection},
        stats::{SummaryStats, summarize},
        table::Table,
    },
    render::{frame::Renderer, plot::ChartView, preview::preview},
};

const SUBTITLE: &str = "Dataset preview at top and graphs below";
const FOOTER: &str = "Terminal data visualization | metric-dashboard";

/// Page-level settings.
#[derive(Clone, Debug)]
pub struct Dashboard {
    pub title: String,
    /// Preview row limit; `None` shows the whole table.
    pub preview_rows: Option<usize>,
    pub view: ChartView,
}

/// Machine-readable page body for `--format json`.
#[derive(Debug, Serialize)]
pub struct JsonPage<'a> {
    pub chart: &'a ChartSpec,
    pub summary: &'a SummaryStats,
}

impl Dashboard {
    fn divider(&self, out: &mut String) {
        let width = usize::from(self.view.term.0.0).clamp(20, 120);
        out.push_str(&"─".repeat(width));
        out.push('\n');
    }

    fn heading(&self, out: &mut String, icon: &str, text: &str) {
        let _ = writeln!(out, "{icon} {}", colorize(&self.view.color, text));
    }

    /// `label: [selected]  other  other`
    fn control<'a>(
        out: &mut String,
        label: &str,
        options: impl Iterator<Item = &'a str>,
        selected: &str,
    ) {
        let _ = write!(out, "{label:<18}");
        for opt in options {
            if opt == selected {
                let _ = write!(out, " [{opt}]");
            } else {
                let _ = write!(out, "  {opt} ");
            }
        }
        out.push('\n');
    }

    /// Build the chart and the summary for `selection`.
    pub fn compute(
        table: &Table,
        selection: &Selection,
    ) -> Result<(ChartSpec, SummaryStats), DashboardError> {
        let started = Instant::now();
        let spec = render(table, &selection.metric, selection.kind)?;
        let stats = summarize(table, &selection.metric)?;
        log::debug!(
            "dispatched {} for `{}` ({} data) in {} µs",
            selection.kind.key(),
            selection.metric,
            spec.len(),
            started.elapsed().as_micros()
        );
        Ok((spec, stats))
    }

    /// Full text page.
    pub fn render_page(
        &self,
        table: &Table,
        selection: &Selection,
        renderer: &mut Renderer,
    ) -> Result<String, DashboardError> {
        let (spec, stats) = Self::compute(table, selection)?;
        let started = Instant::now();

        let mut out = String::new();
        self.heading(&mut out, "📊", &self.title);
        let _ = writeln!(out, "{SUBTITLE}");
        self.divider(&mut out);

        self.heading(&mut out, "📄", "Dataset Preview");
        out.push_str(&preview(table, self.preview_rows));
        self.divider(&mut out);

        self.heading(&mut out, "📊", "Graph Controls");
        Self::control(
            &mut out,
            "Select Metric",
            table.numeric_columns().into_iter(),
            selection.metric.name(),
        );
        Self::control(
            &mut out,
            "Select Graph Type",
            ChartKind::ALL.iter().map(|k| k.display_name()),
            selection.kind.display_name(),
        );
        out.push('\n');

        let mut chart = Vec::new();
        self.view.draw(&spec, renderer, &mut chart)?;
        out.push_str(&String::from_utf8_lossy(&chart));
        self.divider(&mut out);

        self.heading(&mut out, "📌", "Statistical Summary");
        let cells = [
            ("Minimum", stats.minimum),
            ("Maximum", stats.maximum),
            ("Average", stats.average),
        ];
        for (label, _) in &cells {
            let _ = write!(out, "{label:<16}");
        }
        out.push('\n');
        for (_, value) in &cells {
            let _ = write!(out, "{:<16}", value.to_string());
        }
        out.push('\n');
        self.divider(&mut out);
        let _ = writeln!(out, "{FOOTER}");

        log::debug!("page rendered in {} µs", started.elapsed().as_micros());
        Ok(out)
    }

    /// Chart and summary as pretty JSON.
    pub fn render_json(table: &Table, selection: &Selection) -> Result<String, DashboardError> {
        let (chart, summary) = Self::compute(table, selection)?;
        Ok(serde_json::to_string_pretty(&JsonPage {
            chart: &chart,
            summary: &summary,
        })?)
    }
}
