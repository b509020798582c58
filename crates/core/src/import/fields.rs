//! Header lookup and cell parsing shared by both record types.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;

use super::error::ImportError;

/// Date format used by import and export.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column positions by lowercase header name.
#[derive(Debug, Clone)]
pub(crate) struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    /// Indexes the header and checks the required columns are present.
    pub(crate) fn from_headers(
        headers: &StringRecord,
        required: &[&str],
    ) -> Result<Self, ImportError> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase(), i))
            .collect();

        let missing: Vec<String> = required
            .iter()
            .filter(|name| !index.contains_key(**name))
            .map(|name| (*name).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        Ok(Self { index })
    }

    /// Trimmed cell value, `None` when the column is absent or the cell empty.
    pub(crate) fn get<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
        self.index
            .get(name)
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Free-text cell kept as written, `None` when absent or blank.
    pub(crate) fn get_text<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
        self.index
            .get(name)
            .and_then(|&i| record.get(i))
            .filter(|v| !v.trim().is_empty())
    }

    /// First non-empty cell among several column aliases.
    pub(crate) fn get_any<'r>(&self, record: &'r StringRecord, names: &[&str]) -> Option<&'r str> {
        names.iter().find_map(|name| self.get(record, name))
    }
}

/// Collects the failures of one row.
#[derive(Debug, Default)]
pub(crate) struct RowProblems {
    messages: Vec<String>,
}

impl RowProblems {
    pub(crate) fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Records the error of `result`, returning its value otherwise.
    pub(crate) fn check<T>(&mut self, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.messages.push(message);
                None
            }
        }
    }

    pub(crate) fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// Fails with "`{name}` is required" when the cell is empty.
pub(crate) fn required<'r>(value: Option<&'r str>, name: &str) -> Result<&'r str, String> {
    value.ok_or_else(|| format!("{name} is required"))
}

pub(crate) fn parse_date(value: &str, name: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| format!("{name} must be a valid date (YYYY-MM-DD), got '{value}'"))
}

pub(crate) fn parse_decimal(value: &str, name: &str) -> Result<Decimal, String> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| format!("{name} must be a number, got '{value}'"))
}

/// Parses a whole number no smaller than `min`.
pub(crate) fn parse_count(value: &str, name: &str, min: i32) -> Result<i32, String> {
    match value.parse::<i32>() {
        Ok(n) if n >= min => Ok(n),
        _ if min == 0 => Err(format!(
            "{name} must be a non-negative whole number, got '{value}'"
        )),
        _ => Err(format!(
            "{name} must be a whole number of at least {min}, got '{value}'"
        )),
    }
}

/// Parses the `id` cell: positive ids update, anything else inserts.
pub(crate) fn parse_id<I>(
    value: Option<&str>,
    positive: fn(i64) -> Option<I>,
) -> Result<Option<I>, String> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(positive)
            .map_err(|_| format!("id must be a whole number, got '{raw}'")),
    }
}

/// Row message for a record the reader could not decode.
///
/// I/O failures stop the file; anything else fails only that row.
pub(crate) fn unreadable_row(err: csv::Error) -> Result<String, ImportError> {
    if err.is_io_error() {
        return Err(err.into());
    }
    if matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) {
        Ok("row is not valid UTF-8".to_string())
    } else {
        Ok("row could not be read as CSV".to_string())
    }
}

/// Basic `local@domain.tld` shape check.
#[must_use]
pub fn is_email_shaped(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
