//! Property-based tests for the fiscal calendar.
//!
//! - Every date maps to one of the twelve month names, and that month's
//!   range contains the date.
//! - The twelve month ranges of a fiscal year tile the year exactly.

use chrono::NaiveDate;
use proptest::prelude::*;

use super::calendar::FiscalCalendar;

/// Dates between 1990-01-01 and roughly 2150.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..58_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

fn any_calendar() -> impl Strategy<Value = FiscalCalendar> {
    (1u32..=12).prop_map(|m| FiscalCalendar::new(m).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* date, its fiscal month range (resolved through its own
    /// fiscal year label) contains the date.
    #[test]
    fn prop_month_range_contains_date(
        calendar in any_calendar(),
        date in any_date(),
    ) {
        let month = calendar.fiscal_month_of(date);
        prop_assert!(calendar.month_names().contains(&month));

        let fy = calendar.fiscal_year_of(date).unwrap();
        prop_assert!(fy.contains(date));

        let range = calendar.date_range_of(&fy.label, month).unwrap();
        prop_assert!(range.contains(date), "{range:?} should contain {date}");
    }

    /// *For any* fiscal year, the twelve month ranges are contiguous,
    /// non-overlapping, and span exactly the fiscal year.
    #[test]
    fn prop_month_ranges_tile_fiscal_year(
        calendar in any_calendar(),
        today in any_date(),
        years_back in 0u32..6,
    ) {
        for label in calendar.all_fiscal_years_from(today, years_back) {
            let fy = calendar.fiscal_year_by_label(&label).unwrap();
            let ranges: Vec<_> = calendar
                .month_names()
                .iter()
                .map(|m| calendar.date_range_of(&label, m).unwrap())
                .collect();

            prop_assert_eq!(ranges[0].start, fy.start_date);
            prop_assert_eq!(ranges[11].end, fy.end_date);

            for pair in ranges.windows(2) {
                prop_assert!(pair[0].start <= pair[0].end);
                prop_assert_eq!(pair[0].end.succ_opt().unwrap(), pair[1].start);
            }
        }
    }

    /// *For any* `years_back`, the label list has `years_back + 1` entries
    /// and ends at the fiscal year containing `today`.
    #[test]
    fn prop_all_fiscal_years_ends_at_current(
        calendar in any_calendar(),
        today in any_date(),
        years_back in 0u32..10,
    ) {
        let labels = calendar.all_fiscal_years_from(today, years_back);
        prop_assert_eq!(labels.len(), years_back as usize + 1);

        let current = calendar.fiscal_year_of(today).unwrap();
        prop_assert_eq!(labels.last().unwrap(), &current.label);
    }
}
