//! Fiscal calendar error types.

use thiserror::Error;

/// Errors raised while resolving fiscal labels and month names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FiscalError {
    /// Start month outside 1..=12.
    #[error("Invalid fiscal year start month: {0}")]
    InvalidStartMonth(u32),

    /// Label not in `"{startYear}/{YY}"` form, or `YY` does not follow `startYear`.
    #[error("Invalid fiscal year label: {0}")]
    InvalidLabel(String),

    /// Month name is not one of the twelve calendar month names.
    #[error("Unknown fiscal month: {0}")]
    UnknownMonth(String),

    /// The resolved date is outside the supported calendar range.
    #[error("Date out of range for fiscal year {0}")]
    DateOutOfRange(String),
}
