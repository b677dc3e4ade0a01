//! Terminal rendering of execution results.
//!
//! ```text
//! +----+-------+-----+
//! | id | name  | age |
//! +----+-------+-----+
//! | 1  | Alice | 30  |
//! | 2  | Bob   | 25  |
//! +----+-------+-----+
//! 2 rows in set (0.001 sec)
//! ```
//!
//! Widths are measured in characters and capped at [`MAX_COLUMN_WIDTH`];
//! longer cells are cut and end in `...`.

#[cfg(test)]
mod tests;

use querydeck::core::{
    lifecycle::RequestLifecycle,
    result::{Cell, ExecutionResult, TabularResult, cell_text},
};
use std::{fmt::Write, time::Duration};

pub const MAX_COLUMN_WIDTH: usize = 50;

///
/// TableFormatter
///

pub struct TableFormatter {
    headers: Vec<String>,
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl TableFormatter {
    #[must_use]
    pub fn new(headers: &[String], rows: &[Vec<Cell>]) -> Self {
        let mut widths: Vec<usize> = headers
            .iter()
            .map(|h| h.chars().count().clamp(1, MAX_COLUMN_WIDTH))
            .collect();

        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(widths.iter_mut())
                    .map(|(cell, width)| {
                        let text = cell_text(cell);
                        *width = (*width).max(text.chars().count()).min(MAX_COLUMN_WIDTH);
                        text
                    })
                    .collect()
            })
            .collect();

        Self {
            headers: headers.to_vec(),
            widths,
            rows,
        }
    }

    #[must_use]
    pub fn from_result(table: &TabularResult) -> Self {
        Self::new(table.headers(), table.rows())
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();

        self.write_separator(&mut output);
        self.write_row(&mut output, &self.headers);
        self.write_separator(&mut output);
        for row in &self.rows {
            self.write_row(&mut output, row);
        }
        self.write_separator(&mut output);

        output
    }

    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub(crate) fn widths(&self) -> &[usize] {
        &self.widths
    }

    fn write_separator(&self, output: &mut String) {
        output.push('+');
        for width in &self.widths {
            output.push_str(&"-".repeat(width + 2));
            output.push('+');
        }
        output.push('\n');
    }

    fn write_row(&self, output: &mut String, cells: &[String]) {
        output.push('|');
        for (cell, &width) in cells.iter().zip(&self.widths) {
            let _ = write!(output, " {:<width$} |", truncate(cell, width));
        }
        output.push('\n');
    }
}

/// Render a settled result with its timing footer.
#[must_use]
pub fn render_result(result: &ExecutionResult, elapsed: Option<Duration>) -> String {
    let secs = elapsed.unwrap_or_default().as_secs_f64();

    match result {
        ExecutionResult::Table(table) => {
            let formatter = TableFormatter::from_result(table);
            let count = formatter.row_count();
            if count == 0 {
                format!("{}Empty set ({secs:.3} sec)", formatter.render())
            } else {
                format!(
                    "{}{count} row{} in set ({secs:.3} sec)",
                    formatter.render(),
                    plural(count)
                )
            }
        }
        ExecutionResult::Text(text) => render_text(text, elapsed),
        ExecutionResult::NoResult { reason } => {
            format!("No displayable result: {reason} ({secs:.3} sec)")
        }
    }
}

/// Free-form response text with its timing footer.
#[must_use]
pub fn render_text(text: &str, elapsed: Option<Duration>) -> String {
    let secs = elapsed.unwrap_or_default().as_secs_f64();

    format!("{text}\n({secs:.3} sec)")
}

/// Split a settled lifecycle into display text or a failure message.
/// Anything not yet settled counts as a failure.
pub fn settled<T>(
    lifecycle: &RequestLifecycle<T>,
    render: impl FnOnce(&T) -> String,
) -> Result<String, String> {
    match lifecycle {
        RequestLifecycle::Succeeded(value) => Ok(render(value)),
        RequestLifecycle::Failed(message) => Err(message.clone()),
        other => Err(render_status(other)),
    }
}

/// One-line summary of a builder's request lifecycle.
#[must_use]
pub fn render_status<T>(lifecycle: &RequestLifecycle<T>) -> String {
    match lifecycle {
        RequestLifecycle::Idle => "idle".to_string(),
        RequestLifecycle::Loading(ticket) => format!("executing {ticket}"),
        RequestLifecycle::Succeeded(_) => "succeeded".to_string(),
        RequestLifecycle::Failed(message) => format!("failed: {message}"),
    }
}

/// Render a name listing one entry per line.
#[must_use]
pub fn render_names<'a, I>(names: I, empty: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let lines: Vec<&str> = names.into_iter().collect();
    if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    }
}

const fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let mut cut: String = s.chars().take(max_len - 3).collect();
        cut.push_str("...");
        cut
    }
}
