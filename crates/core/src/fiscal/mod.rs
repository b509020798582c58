//! Fiscal year and fiscal month management.
//!
//! A fiscal year starts on the first day of a configurable calendar month
//! (July by default) and is labelled `"{startYear}/{YY}"`, where `YY` is the
//! last two digits of the following calendar year. Each fiscal year is split
//! into twelve fiscal months named after the calendar months they cover.

pub mod calendar;
pub mod error;

#[cfg(test)]
mod props;

pub use calendar::{
    DateRange, FiscalCalendar, FiscalYear, MONTH_NAMES, calendar_month_of, canonical_label,
    label_for, last_day_of_month, parse_label,
};
pub use error::FiscalError;
