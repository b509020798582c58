//! Settings error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::fiscal::FiscalError;

/// Settings validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Fiscal year start month is not 1-12.
    #[error(transparent)]
    Calendar(#[from] FiscalError),

    /// Amber threshold must lie strictly between 0 and 1.
    #[error("Amber threshold must be between 0 and 1 (exclusive), got {0}")]
    AmberOutOfRange(Decimal),

    /// Baseline floor cannot be negative.
    #[error("Baseline floor per box cannot be negative")]
    NegativeFloor,

    /// Yearly target cannot be negative.
    #[error("Yearly box target cannot be negative")]
    NegativeYearlyTarget,

    /// Install capacity cannot be negative.
    #[error("Install capacity per week cannot be negative")]
    NegativeInstallCapacity,

    /// A monthly target key is not a month name.
    #[error("Unknown month in monthly targets: {0}")]
    UnknownMonth(String),

    /// A month has no target.
    #[error("Missing monthly target for {0}")]
    MissingMonth(String),

    /// A monthly target is negative.
    #[error("Monthly target for {0} cannot be negative")]
    NegativeMonthlyTarget(String),

    /// Monthly targets do not add up to the yearly target.
    #[error("Monthly targets sum to {sum}, expected yearly target {yearly}")]
    TargetSumMismatch {
        /// Sum of the monthly targets.
        sum: i64,
        /// Yearly target.
        yearly: i64,
    },
}
