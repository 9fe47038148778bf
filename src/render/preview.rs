//! Plain-text dataset preview: aligned columns, index first.

use std::fmt::Write as _;

use crate::core::{
    constants::MAX_CELL_WIDTH,
    table::Table,
};

/// Cut `s` to `width` characters, ending in `…` when something was dropped.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Render the first `rows` rows (all of them for `None`).
#[must_use]
pub fn preview(table: &Table, rows: Option<usize>) -> String {
    let shown = rows.map_or(table.n_rows(), |n| n.min(table.n_rows()));
    let index_w = shown.saturating_sub(1).to_string().len();

    let numeric: Vec<bool> = table
        .columns()
        .iter()
        .map(|c| c.column_type().is_numeric())
        .collect();
    // header + shown rows, cell text already truncated
    let mut lines: Vec<Vec<String>> = Vec::with_capacity(shown + 1);
    lines.push(
        table
            .columns()
            .iter()
            .map(|c| truncate(c.name(), MAX_CELL_WIDTH))
            .collect(),
    );
    lines.extend((0..shown).map(|r| {
        table
            .row(r)
            .map(|cell| truncate(&cell.to_string(), MAX_CELL_WIDTH))
            .collect()
    }));
    let mut widths = vec![0; numeric.len()];
    for line in &lines {
        for (w, cell) in widths.iter_mut().zip(line) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out.push_str(&" ".repeat(index_w));
        } else {
            let _ = write!(out, "{:>index_w$}", i - 1);
        }
        for ((cell, w), right) in line.iter().zip(widths.iter().copied()).zip(&numeric) {
            if *right {
                let _ = write!(out, "  {cell:>w$}");
            } else {
                let _ = write!(out, "  {cell:<w$}");
            }
        }
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }
    let hidden = table.n_rows() - shown;
    if hidden > 0 {
        let _ = writeln!(out, "… {hidden} more rows");
    }
    let _ = writeln!(out, "[{} rows × {} columns]", table.n_rows(), table.n_columns());
    out
}
