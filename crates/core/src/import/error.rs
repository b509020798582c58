//! Import and export error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural failures that stop a file before any row is processed.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The header lacks one or more required columns.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The file is not readable CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Reading or writing the underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reasons could not be encoded for export.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A validation failure attached to its row number.
///
/// The header is row 1, so the first data row is row 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Row number in the file.
    pub row: usize,
    /// What was wrong.
    pub message: String,
}

impl RowError {
    /// Creates a row error.
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}
