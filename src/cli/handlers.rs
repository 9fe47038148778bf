use std::{
    io::{self, BufRead, Write},
    path::Path,
};

use crate::{
    chart::render,
    core::{
        bounds::terminal_geometry,
        color::{AnsiCode, colorize},
        error::{DashboardError, SelectionError},
        loader::Dataset,
        selection::{ChartKind, MetricSelection, Selection},
        stats::summarize,
        table::Table,
    },
    render::{dashboard::Dashboard, frame::Renderer, plot::ChartView},
};

use super::parse::{Format, ShowArgs, SummaryArgs, ViewArgs};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

fn dashboard(a: &ViewArgs) -> Dashboard {
    Dashboard {
        title: a.title.clone(),
        preview_rows: a.rows.0,
        view: ChartView::new(terminal_geometry(), a.color),
    }
}

/// Resolve the requested metric, logging the valid choices when it is not one.
fn metric_for(table: &Table, name: Option<&str>) -> Result<MetricSelection, SelectionError> {
    MetricSelection::resolve(table, name).inspect_err(|_| {
        let choices = table.numeric_columns();
        if !choices.is_empty() {
            log::error!("choose a metric from: {}", choices.join(", "));
        }
    })
}

pub fn show(data: &Path, a: &ShowArgs) -> Result<(), DashboardError> {
    let dataset = Dataset::new(data);
    let table = dataset.load()?;
    let selection = Selection::new(metric_for(table, a.view.metric.as_deref())?, a.view.chart);
    let page = match a.format {
        Format::Text => dashboard(&a.view).render_page(table, &selection, &mut Renderer::new())?,
        Format::Json => {
            let mut json = Dashboard::render_json(table, &selection)?;
            json.push('\n');
            json
        }
    };
    let mut out = io::stdout().lock();
    out.write_all(page.as_bytes())?;
    out.flush()?;
    Ok(())
}

pub fn interactive(data: &Path, a: &ViewArgs) -> Result<(), DashboardError> {
    let dataset = Dataset::new(data);
    let metric = metric_for(dataset.load()?, a.metric.as_deref())?;
    let mut session = Session {
        dataset: &dataset,
        dashboard: dashboard(a),
        selection: Selection::new(metric, a.chart),
        renderer: Renderer::new(),
        clear: true,
    };
    session.run(io::stdin().lock(), io::stdout().lock())
}

pub fn columns(data: &Path) -> Result<(), DashboardError> {
    let dataset = Dataset::new(data);
    let table = dataset.load()?;
    let width = table
        .columns()
        .iter()
        .map(|c| c.name().chars().count())
        .max()
        .unwrap_or(0);
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{}: {} rows × {} columns",
        dataset.path().display(),
        table.n_rows(),
        table.n_columns()
    )?;
    for c in table.columns() {
        let marker = if c.column_type().is_numeric() { "  (metric)" } else { "" };
        writeln!(out, "{:<width$}  {}{marker}", c.name(), c.column_type())?;
    }
    Ok(())
}

pub fn summary(data: &Path, a: &SummaryArgs) -> Result<(), DashboardError> {
    let dataset = Dataset::new(data);
    let table = dataset.load()?;
    let metric = metric_for(table, a.metric.as_deref())?;
    let stats = summarize(table, &metric)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{metric}")?;
    writeln!(out, "  Minimum  {}", stats.minimum)?;
    writeln!(out, "  Maximum  {}", stats.maximum)?;
    writeln!(out, "  Average  {}", stats.average)?;
    Ok(())
}

pub fn charts() {
    for kind in ChartKind::ALL {
        println!("{:<10} {}", kind.key(), kind.display_name());
    }
}

/// Pretty-print available color names + an example hex code.
pub fn colors() {
    println!("\nPossible colors:");
    println!("{}", colorize(&AnsiCode::black(), "black"));
    println!("{}", colorize(&AnsiCode::red(), "red"));
    println!("{}", colorize(&AnsiCode::green(), "green"));
    println!("{}", colorize(&AnsiCode::yellow(), "yellow"));
    println!("{}", colorize(&AnsiCode::blue(), "blue"));
    println!("{}", colorize(&AnsiCode::magenta(), "magenta"));
    println!("{}", colorize(&AnsiCode::cyan(), "cyan"));
    println!("{}", colorize(&AnsiCode::white(), "white"));
    println!(
        "{}",
        colorize(&AnsiCode::industrial_orange(), "orange | industrial")
    );
    println!("none | plain  (no escapes)");
    println!(
        "{}  (#505050 or any other #RRGGBB)\n",
        colorize(&AnsiCode::Rgb(0x50, 0x50, 0x50), "#505050")
    );
}

const HELP: &str = "\
commands:
  metric <name>   plot another numeric column
  chart <kind>    line, bar, histogram, pie or dot
  point <n>       hover text of datum n
  columns         list numeric columns
  help            this text
  quit            leave
";

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Metric(&'a str),
    Chart(&'a str),
    Point(usize),
    Columns,
    Help,
    Quit,
    Nothing,
}

fn parse_input(line: &str) -> Result<Input<'_>, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match (word, rest) {
        ("", _) => Ok(Input::Nothing),
        ("metric" | "m", name) if !name.is_empty() => Ok(Input::Metric(name)),
        ("chart" | "c", kind) if !kind.is_empty() => Ok(Input::Chart(kind)),
        ("point" | "p", n) => n
            .parse()
            .map(Input::Point)
            .map_err(|_| format!("`point` needs a datum number, got `{n}`")),
        ("columns", "") => Ok(Input::Columns),
        ("help" | "?", "") => Ok(Input::Help),
        ("quit" | "q" | "exit", "") => Ok(Input::Quit),
        _ => Err(format!("unrecognised command `{line}` (try `help`)")),
    }
}

/// Read-eval-render loop over one memoized dataset.
struct Session<'d> {
    dataset: &'d Dataset,
    dashboard: Dashboard,
    selection: Selection,
    renderer: Renderer,
    clear: bool,
}

impl Session<'_> {
    fn draw<W: Write>(&mut self, out: &mut W) -> Result<(), DashboardError> {
        let table = self.dataset.load()?;
        if self.clear {
            out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        match self.dashboard.render_page(table, &self.selection, &mut self.renderer) {
            Ok(page) => out.write_all(page.as_bytes())?,
            // the table is fine, only this metric can't be shown
            Err(e @ DashboardError::Summary(_)) => writeln!(out, "error: {e}")?,
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<(), DashboardError> {
        self.draw(&mut out)?;
        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                break;
            };
            let table = self.dataset.load()?;
            let changed = match parse_input(&line) {
                Ok(Input::Metric(name)) => self.selection.set_metric(table, name).map(|()| true),
                Ok(Input::Chart(kind)) => self.selection.set_kind(kind).map(|()| true),
                Ok(Input::Point(n)) => {
                    let spec = render(table, &self.selection.metric, self.selection.kind)?;
                    match spec.hover(n) {
                        Some(text) => writeln!(out, "{text}")?,
                        None => writeln!(out, "no datum {n} (chart has {})", spec.len())?,
                    }
                    Ok(false)
                }
                Ok(Input::Columns) => {
                    writeln!(out, "{}", table.numeric_columns().join("  "))?;
                    Ok(false)
                }
                Ok(Input::Help) => {
                    out.write_all(HELP.as_bytes())?;
                    Ok(false)
                }
                Ok(Input::Quit) => break,
                Ok(Input::Nothing) => Ok(false),
                Err(msg) => {
                    writeln!(out, "{msg}")?;
                    Ok(false)
                }
            };
            match changed {
                Ok(true) => self.draw(&mut out)?,
                Ok(false) => {}
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }
        out.flush()?;
        Ok(())
    }
}
