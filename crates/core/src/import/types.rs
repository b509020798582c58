//! Import plan and summary types.

use std::fmt;
use std::str::FromStr;

use forgeboard_shared::types::{OrderId, ProductionBatchId};
use serde::{Deserialize, Serialize};

use super::error::RowError;
use crate::records::{CreateOrderInput, CreateProductionBatchInput};

/// Which record type a CSV file carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// Sales orders.
    Orders,
    /// Production batches.
    Production,
}

impl ImportKind {
    /// Returns the lowercase name used in filenames.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orders" | "order" | "sales" => Ok(Self::Orders),
            "production" | "batches" => Ok(Self::Production),
            other => Err(format!("Unknown import kind: {other}")),
        }
    }
}

/// What to do with one valid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction<I, T> {
    /// Create a new record.
    Insert(T),
    /// Overwrite the record with this id; fails if it does not exist.
    Update(I, T),
}

impl<I, T> RowAction<I, T> {
    /// The decoded record fields.
    #[must_use]
    pub fn input(&self) -> &T {
        match self {
            Self::Insert(input) | Self::Update(_, input) => input,
        }
    }
}

/// A valid row and its originating row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRow<I, T> {
    /// Row number in the file (header is row 1).
    pub row: usize,
    /// Insert or update.
    pub action: RowAction<I, T>,
}

/// Decoded file: the rows to apply and the rows that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPlan<I, T> {
    /// Data rows read, valid or not.
    pub total: usize,
    /// Rows that passed validation, in file order.
    pub rows: Vec<PlannedRow<I, T>>,
    /// Every validation failure, in file order.
    pub errors: Vec<RowError>,
}

/// Plan for an orders file.
pub type OrderImportPlan = ImportPlan<OrderId, CreateOrderInput>;

/// Plan for a production file.
pub type ProductionImportPlan = ImportPlan<ProductionBatchId, CreateProductionBatchInput>;

impl<I, T> ImportPlan<I, T> {
    /// Number of distinct rows that failed validation.
    #[must_use]
    pub fn failed_rows(&self) -> usize {
        let mut rows: Vec<usize> = self.errors.iter().map(|e| e.row).collect();
        rows.dedup();
        rows.len()
    }

    /// Starts a summary seeded with the validation failures.
    #[must_use]
    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            total: self.total,
            succeeded: 0,
            failed: self.failed_rows(),
            errors: self.errors.clone(),
        }
    }
}

/// Outcome of an import, reported to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Data rows read.
    pub total: usize,
    /// Rows written.
    pub succeeded: usize,
    /// Rows skipped.
    pub failed: usize,
    /// One message per failure.
    pub errors: Vec<RowError>,
}

impl ImportSummary {
    /// Counts a written row.
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    /// Counts a row that failed while being written.
    pub fn record_failure(&mut self, error: RowError) {
        self.failed += 1;
        self.errors.push(error);
    }

    /// Error messages formatted as `Row N: message`.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}
