//! Settings data type.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::{FiscalCalendar, FiscalError, MONTH_NAMES};

/// Global dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Minimum acceptable contribution per box (currency per box).
    pub baseline_floor_per_box: Decimal,
    /// Boxes targeted for the fiscal year.
    pub yearly_box_target: i32,
    /// Ratio below which a metric is below target rather than watch.
    pub amber_floor_fraction: Decimal,
    /// Box target per fiscal month name.
    pub monthly_box_targets: BTreeMap<String, i32>,
    /// Installs the team can complete per week during high season.
    pub install_capacity_per_week: i32,
    /// Calendar month the fiscal year starts in (1-12).
    pub fiscal_year_start_month: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            baseline_floor_per_box: Decimal::from(700),
            yearly_box_target: 240,
            amber_floor_fraction: Decimal::new(90, 2),
            monthly_box_targets: MONTH_NAMES
                .iter()
                .map(|name| ((*name).to_string(), 20))
                .collect(),
            install_capacity_per_week: 10,
            fiscal_year_start_month: FiscalCalendar::DEFAULT_START_MONTH,
        }
    }
}

impl Settings {
    /// The fiscal calendar these settings describe.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidStartMonth` for a start month outside 1-12.
    pub const fn calendar(&self) -> Result<FiscalCalendar, FiscalError> {
        FiscalCalendar::new(self.fiscal_year_start_month)
    }

    /// Box target for a fiscal month; 0 when the month has no entry.
    ///
    /// Month names are matched case-insensitively.
    #[must_use]
    pub fn monthly_box_target(&self, month_name: &str) -> i32 {
        let wanted = month_name.trim();
        self.monthly_box_targets
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map_or(0, |(_, target)| *target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_sum_to_yearly() {
        let settings = Settings::default();
        let sum: i32 = settings.monthly_box_targets.values().sum();
        assert_eq!(sum, settings.yearly_box_target);
        assert_eq!(settings.calendar().unwrap().start_month(), 7);
    }

    #[test]
    fn test_monthly_target_lookup() {
        let mut settings = Settings::default();
        settings.monthly_box_targets.insert("March".to_string(), 35);

        assert_eq!(settings.monthly_box_target("March"), 35);
        assert_eq!(settings.monthly_box_target("march"), 35);
        assert_eq!(settings.monthly_box_target("Smarch"), 0);
    }

    #[test]
    fn test_monthly_target_missing_map() {
        let settings = Settings {
            monthly_box_targets: BTreeMap::new(),
            ..Settings::default()
        };
        assert_eq!(settings.monthly_box_target("July"), 0);
    }
}
