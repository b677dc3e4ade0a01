//! Execution results and the shape check applied to tabular
//! responses.

#[cfg(test)]
mod tests;

use crate::error::ErrorClass;
use serde_json::Value as JsonValue;
use thiserror::Error as ThisError;
use tracing::warn;

/// One result cell, as sent by the collaborator.
pub type Cell = JsonValue;

///
/// ShapeError
///
/// Why a tabular response could not be displayed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ShapeError {
    #[error("response is not an object")]
    NotAnObject,

    #[error("response has no 'headers' array")]
    MissingHeaders,

    #[error("response has no 'rows' array")]
    MissingRows,

    #[error("header {index} is not text")]
    HeaderNotText { index: usize },

    #[error("row {row} is not an array")]
    RowNotArray { row: usize },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

///
/// TabularResult
///
/// Headers plus rows; every row has exactly one cell per header.
///

#[derive(Clone, Debug, PartialEq)]
pub struct TabularResult {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl TabularResult {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, ShapeError> {
        let expected = headers.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(ShapeError::RowWidth {
                row,
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self { headers, rows })
    }

    /// Validate a raw `{headers, rows}` body.
    pub fn from_json(value: JsonValue) -> Result<Self, ShapeError> {
        let JsonValue::Object(mut object) = value else {
            return Err(ShapeError::NotAnObject);
        };

        let Some(JsonValue::Array(raw_headers)) = object.remove("headers") else {
            return Err(ShapeError::MissingHeaders);
        };
        let Some(JsonValue::Array(raw_rows)) = object.remove("rows") else {
            return Err(ShapeError::MissingRows);
        };

        let headers = raw_headers
            .into_iter()
            .enumerate()
            .map(|(index, header)| match header {
                JsonValue::String(text) => Ok(text),
                _ => Err(ShapeError::HeaderNotText { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = raw_rows
            .into_iter()
            .enumerate()
            .map(|(row, cells)| match cells {
                JsonValue::Array(cells) => Ok(cells),
                _ => Err(ShapeError::RowNotArray { row }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(headers, rows)
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.headers.len()
    }
}

///
/// ExecutionResult
///

#[derive(Clone, Debug, PartialEq)]
pub enum ExecutionResult {
    Table(TabularResult),

    /// Free-form executor output, verbatim.
    Text(String),

    /// The collaborator answered but with nothing displayable.
    NoResult { reason: String },
}

impl ExecutionResult {
    /// Interpret a tabular response body.
    ///
    /// A malformed shape is not a failure; it degrades to `NoResult`.
    #[must_use]
    pub fn from_tabular_json(value: JsonValue) -> Self {
        match TabularResult::from_json(value) {
            Ok(table) => Self::Table(table),
            Err(err) => {
                warn!(class = %ErrorClass::MalformedResult, error = %err, "discarding malformed result");

                Self::NoResult {
                    reason: err.to_string(),
                }
            }
        }
    }

    #[must_use]
    pub const fn table(&self) -> Option<&TabularResult> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// Display text for a cell: strings verbatim, null as `NULL`, anything
/// else in its JSON form.
#[must_use]
pub fn cell_text(cell: &Cell) -> String {
    match cell {
        JsonValue::Null => "NULL".to_string(),
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}
