//! Settings validation and target distribution.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::error::SettingsError;
use super::types::Settings;
use crate::fiscal::{FiscalCalendar, MONTH_NAMES, calendar_month_of};

/// Settings service for business logic.
pub struct SettingsService;

impl SettingsService {
    /// Validates settings before they are written.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule: start month, amber range, negative
    /// floor/targets/capacity, unknown or missing months, or a monthly sum
    /// that differs from the yearly target.
    pub fn validate(settings: &Settings) -> Result<(), SettingsError> {
        settings.calendar()?;

        if settings.amber_floor_fraction <= Decimal::ZERO
            || settings.amber_floor_fraction >= Decimal::ONE
        {
            return Err(SettingsError::AmberOutOfRange(
                settings.amber_floor_fraction,
            ));
        }
        if settings.baseline_floor_per_box < Decimal::ZERO {
            return Err(SettingsError::NegativeFloor);
        }
        if settings.yearly_box_target < 0 {
            return Err(SettingsError::NegativeYearlyTarget);
        }
        if settings.install_capacity_per_week < 0 {
            return Err(SettingsError::NegativeInstallCapacity);
        }

        for (name, target) in &settings.monthly_box_targets {
            if calendar_month_of(name).is_err() {
                return Err(SettingsError::UnknownMonth(name.clone()));
            }
            if *target < 0 {
                return Err(SettingsError::NegativeMonthlyTarget(name.clone()));
            }
        }
        for name in MONTH_NAMES {
            if !settings.monthly_box_targets.contains_key(name) {
                return Err(SettingsError::MissingMonth(name.to_string()));
            }
        }

        let sum: i64 = settings
            .monthly_box_targets
            .values()
            .map(|t| i64::from(*t))
            .sum();
        let yearly = i64::from(settings.yearly_box_target);
        if sum != yearly {
            return Err(SettingsError::TargetSumMismatch { sum, yearly });
        }

        Ok(())
    }

    /// Splits a yearly target evenly over the twelve fiscal months.
    ///
    /// The remainder goes one box at a time to the earliest fiscal months, so
    /// the result always sums to `yearly`.
    #[must_use]
    pub fn even_split(yearly: i32, calendar: &FiscalCalendar) -> BTreeMap<String, i32> {
        let yearly = yearly.max(0);
        let base = yearly / 12;
        let remainder = usize::try_from(yearly % 12).unwrap_or(0);

        calendar
            .month_names()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let extra = i32::from(idx < remainder);
                ((*name).to_string(), base + extra)
            })
            .collect()
    }
}
