//! Fiscal calendar arithmetic.

use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::FiscalError;

/// Calendar month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new inclusive range.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns true if the given date falls within this range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The `days`-long window ending on (and including) `end`.
    ///
    /// Falls back to a window starting at `NaiveDate::MIN` when the start
    /// would underflow the calendar.
    #[must_use]
    pub fn trailing(end: NaiveDate, days: u64) -> Self {
        let back = chrono::Days::new(days.saturating_sub(1));
        let start = end.checked_sub_days(back).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }
}

/// A resolved fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYear {
    /// Label, e.g. `"2025/26"`.
    pub label: String,
    /// First day of the fiscal year.
    pub start_date: NaiveDate,
    /// Last day of the fiscal year.
    pub end_date: NaiveDate,
}

impl FiscalYear {
    /// Returns true if the given date falls within this fiscal year.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Fiscal calendar anchored on a start month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalCalendar {
    start_month: u32,
}

impl Default for FiscalCalendar {
    fn default() -> Self {
        Self {
            start_month: Self::DEFAULT_START_MONTH,
        }
    }
}

impl FiscalCalendar {
    /// July.
    pub const DEFAULT_START_MONTH: u32 = 7;

    /// Creates a calendar whose fiscal year starts in `start_month` (1-12).
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidStartMonth` outside 1..=12.
    pub const fn new(start_month: u32) -> Result<Self, FiscalError> {
        if start_month >= 1 && start_month <= 12 {
            Ok(Self { start_month })
        } else {
            Err(FiscalError::InvalidStartMonth(start_month))
        }
    }

    /// The configured start month (1-12).
    #[must_use]
    pub const fn start_month(&self) -> u32 {
        self.start_month
    }

    /// The twelve fiscal month names, in fiscal order.
    #[must_use]
    pub fn month_names(&self) -> [&'static str; 12] {
        let offset = (self.start_month - 1) as usize;
        std::array::from_fn(|i| MONTH_NAMES[(offset + i) % 12])
    }

    /// Alias of [`Self::month_names`] for callers enumerating selectable months.
    #[must_use]
    pub fn all_fiscal_month_names(&self) -> [&'static str; 12] {
        self.month_names()
    }

    /// The fiscal month name a date belongs to.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn fiscal_month_of(&self, date: NaiveDate) -> &'static str {
        MONTH_NAMES[date.month0() as usize]
    }

    /// Calendar year in which the fiscal year containing `date` starts.
    #[must_use]
    pub fn fiscal_start_year_of(&self, date: NaiveDate) -> i32 {
        if date.month() >= self.start_month {
            date.year()
        } else {
            date.year() - 1
        }
    }

    /// The fiscal year containing `date`.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::DateOutOfRange` only at the extremes of the
    /// supported calendar.
    pub fn fiscal_year_of(&self, date: NaiveDate) -> Result<FiscalYear, FiscalError> {
        self.fiscal_year_starting(self.fiscal_start_year_of(date))
    }

    /// The fiscal year containing today (UTC).
    ///
    /// # Errors
    ///
    /// See [`Self::fiscal_year_of`].
    pub fn current_fiscal_year(&self) -> Result<FiscalYear, FiscalError> {
        self.fiscal_year_of(Utc::now().date_naive())
    }

    /// The fiscal year identified by `label`.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidLabel` for malformed labels.
    pub fn fiscal_year_by_label(&self, label: &str) -> Result<FiscalYear, FiscalError> {
        self.fiscal_year_starting(parse_label(label)?)
    }

    /// The fiscal year starting in calendar year `start_year`.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::DateOutOfRange` if the span cannot be represented.
    pub fn fiscal_year_starting(&self, start_year: i32) -> Result<FiscalYear, FiscalError> {
        let label = label_for(start_year);
        let start_date = NaiveDate::from_ymd_opt(start_year, self.start_month, 1)
            .ok_or_else(|| FiscalError::DateOutOfRange(label.clone()))?;
        let end_date = start_date
            .checked_add_months(Months::new(12))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| FiscalError::DateOutOfRange(label.clone()))?;

        Ok(FiscalYear {
            label,
            start_date,
            end_date,
        })
    }

    /// Position (0-11) of a month name within the fiscal year.
    ///
    /// Names are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::UnknownMonth` for anything but a month name.
    pub fn fiscal_month_index(&self, month_name: &str) -> Result<usize, FiscalError> {
        let calendar_month = calendar_month_of(month_name)?;
        Ok(((calendar_month + 12 - self.start_month) % 12) as usize)
    }

    /// The inclusive calendar date range of a fiscal month.
    ///
    /// Months that fall before the start month belong to `startYear + 1`.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed label or unknown month name.
    pub fn date_range_of(&self, label: &str, month_name: &str) -> Result<DateRange, FiscalError> {
        let start_year = parse_label(label)?;
        let calendar_month = calendar_month_of(month_name)?;
        let year = if calendar_month >= self.start_month {
            start_year
        } else {
            start_year + 1
        };

        let start = NaiveDate::from_ymd_opt(year, calendar_month, 1)
            .ok_or_else(|| FiscalError::DateOutOfRange(label.to_string()))?;
        let end = last_day_of_month(year, calendar_month)
            .ok_or_else(|| FiscalError::DateOutOfRange(label.to_string()))?;

        Ok(DateRange::new(start, end))
    }

    /// `years_back + 1` consecutive labels ending at the current fiscal year,
    /// oldest first.
    #[must_use]
    pub fn all_fiscal_years(&self, years_back: u32) -> Vec<String> {
        self.all_fiscal_years_from(Utc::now().date_naive(), years_back)
    }

    /// Same as [`Self::all_fiscal_years`] but relative to `today`.
    #[must_use]
    pub fn all_fiscal_years_from(&self, today: NaiveDate, years_back: u32) -> Vec<String> {
        let current = self.fiscal_start_year_of(today);
        let back = i32::try_from(years_back).unwrap_or(i32::MAX);
        (current.saturating_sub(back)..=current)
            .map(label_for)
            .collect()
    }
}

/// Formats the label of the fiscal year starting in `start_year`.
#[must_use]
pub fn label_for(start_year: i32) -> String {
    format!("{start_year}/{:02}", (i64::from(start_year) + 1).rem_euclid(100))
}

/// Parses a `"{startYear}/{YY}"` label into its start year.
///
/// Only the canonical spelling is accepted: a four-digit start year and the
/// last two digits of the following year.
///
/// # Errors
///
/// Returns `FiscalError::InvalidLabel` for any other input.
pub fn parse_label(label: &str) -> Result<i32, FiscalError> {
    let invalid = || FiscalError::InvalidLabel(label.to_string());
    let trimmed = label.trim();
    let (start, _) = trimmed.split_once('/').ok_or_else(invalid)?;

    if start.len() != 4 || !start.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let start_year: i32 = start.parse().map_err(|_| invalid())?;

    if label_for(start_year) == trimmed {
        Ok(start_year)
    } else {
        Err(invalid())
    }
}

/// Canonical form of a fiscal year label.
///
/// # Errors
///
/// Returns `FiscalError::InvalidLabel` if the label does not parse.
pub fn canonical_label(label: &str) -> Result<String, FiscalError> {
    parse_label(label).map(label_for)
}

/// Calendar month number (1-12) of a month name, case-insensitive.
///
/// # Errors
///
/// Returns `FiscalError::UnknownMonth` for anything but a month name.
pub fn calendar_month_of(month_name: &str) -> Result<u32, FiscalError> {
    let wanted = month_name.trim();
    MONTH_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(wanted))
        .and_then(|idx| u32::try_from(idx + 1).ok())
        .ok_or_else(|| FiscalError::UnknownMonth(month_name.to_string()))
}

/// Returns the last day of a month, leap-year aware.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}
