//! Dashboard repository: loads a snapshot and aggregates it.
//!
//! Each call reads the settings once, fetches only the rows the requested
//! month and its trailing window need, and hands them to the pure
//! aggregation service.

use std::sync::Arc;

use forgeboard_core::dashboard::service::ROLLING_WINDOW_DAYS;
use forgeboard_core::dashboard::{
    DashboardError, DashboardService, ProductionMetrics, SalesMetrics,
};
use forgeboard_core::fiscal::DateRange;
use forgeboard_core::settings::Settings;
use forgeboard_shared::types::UserId;
use sea_orm::{DatabaseConnection, DbErr};
use tracing::debug;

use super::order::OrderRepository;
use super::production::ProductionRepository;
use super::settings::{SettingsRepoError, SettingsRepository};

/// Error types for dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum DashboardRepoError {
    /// Settings could not be loaded.
    #[error(transparent)]
    Settings(#[from] SettingsRepoError),

    /// Unknown fiscal year or month.
    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Dashboard repository for metrics queries.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    settings: SettingsRepository,
    orders: OrderRepository,
    production: ProductionRepository,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        let db = db.into();
        Self {
            settings: SettingsRepository::new(Arc::clone(&db)),
            orders: OrderRepository::new(Arc::clone(&db)),
            production: ProductionRepository::new(db),
        }
    }

    /// Sales dashboard for one fiscal month.
    ///
    /// `sales_rep` restricts the figures to one rep's orders; callers pass it
    /// for sales users, who only see their own orders.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown period or a failed query.
    pub async fn sales(
        &self,
        fiscal_year: &str,
        month: &str,
        sales_rep: Option<UserId>,
    ) -> Result<SalesMetrics, DashboardRepoError> {
        let settings = self.settings.get().await?;
        let (_, window) = snapshot_window(&settings, fiscal_year, month)?;

        let mut orders = self.orders.list_between(window).await?;
        if let Some(rep) = sales_rep {
            orders.retain(|o| o.sales_rep_id == Some(rep));
        }
        debug!(
            fiscal_year,
            month,
            orders = orders.len(),
            "Loaded sales snapshot"
        );

        Ok(DashboardService::aggregate_sales(
            &orders,
            &settings,
            fiscal_year,
            month,
        )?)
    }

    /// Production dashboard for one fiscal month.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown period or a failed query.
    pub async fn production(
        &self,
        fiscal_year: &str,
        month: &str,
    ) -> Result<ProductionMetrics, DashboardRepoError> {
        let settings = self.settings.get().await?;
        let (month_range, window) = snapshot_window(&settings, fiscal_year, month)?;

        let batches = self.production.list_between(window).await?;
        let orders = self.orders.list_until(month_range.end, None).await?;
        debug!(
            fiscal_year,
            month,
            batches = batches.len(),
            orders = orders.len(),
            "Loaded production snapshot"
        );

        Ok(DashboardService::aggregate_production(
            &batches,
            &orders,
            &settings,
            fiscal_year,
            month,
        )?)
    }
}

/// The month's range and the span covering it plus its trailing window.
fn snapshot_window(
    settings: &Settings,
    fiscal_year: &str,
    month: &str,
) -> Result<(DateRange, DateRange), DashboardError> {
    let month_range = settings.calendar()?.date_range_of(fiscal_year, month)?;
    let trailing = DateRange::trailing(month_range.end, ROLLING_WINDOW_DAYS);
    let window = DateRange::new(month_range.start.min(trailing.start), month_range.end);
    Ok((month_range, window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_covers_month_and_trailing_days() {
        let (month, window) = snapshot_window(&Settings::default(), "2025/26", "February").unwrap();
        assert_eq!(month, DateRange::new(date(2026, 2, 1), date(2026, 2, 28)));
        assert_eq!(window, month);

        let (month, window) = snapshot_window(&Settings::default(), "2023/24", "February").unwrap();
        assert_eq!(month.end, date(2024, 2, 29));
        assert_eq!(window.start, date(2024, 2, 1));

        let (month, window) = snapshot_window(&Settings::default(), "2025/26", "March").unwrap();
        assert_eq!(month, window);
    }

    #[test]
    fn test_unknown_period_rejected() {
        assert!(snapshot_window(&Settings::default(), "2025/26", "Brumaire").is_err());
    }
}
