//! Settings repository for the single settings row.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use forgeboard_core::fiscal::{FiscalCalendar, FiscalError};
use forgeboard_core::settings::{Settings, SettingsError, SettingsService};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use tracing::{info, warn};

use crate::entities::settings::{self, SETTINGS_ROW_ID};

/// Error types for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsRepoError {
    /// Settings failed validation.
    #[error("Invalid settings: {0}")]
    Invalid(#[from] SettingsError),

    /// Monthly targets could not be encoded.
    #[error("Failed to encode monthly targets: {0}")]
    Encode(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Settings repository.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    db: Arc<DatabaseConnection>,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// Loads the settings, falling back to defaults when no row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self) -> Result<Settings, SettingsRepoError> {
        let model = settings::Entity::find_by_id(SETTINGS_ROW_ID)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map_or_else(Settings::default, settings_from_model))
    }

    /// Validates and stores the settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsRepoError::Invalid` if validation fails, or a database
    /// error if the write fails.
    pub async fn save(&self, new_settings: &Settings) -> Result<Settings, SettingsRepoError> {
        SettingsService::validate(new_settings)?;

        let existing = settings::Entity::find_by_id(SETTINGS_ROW_ID)
            .one(self.db.as_ref())
            .await?;
        let model = active_settings(new_settings)?;

        let saved = if existing.is_some() {
            model.update(self.db.as_ref()).await?
        } else {
            model.insert(self.db.as_ref()).await?
        };

        info!(
            yearly_box_target = saved.yearly_box_target,
            start_month = saved.fiscal_year_start_month,
            "Settings saved"
        );
        Ok(settings_from_model(saved))
    }
}

fn active_settings(value: &Settings) -> Result<settings::ActiveModel, SettingsRepoError> {
    let start_month = i32::try_from(value.fiscal_year_start_month).map_err(|_| {
        SettingsError::Calendar(FiscalError::InvalidStartMonth(value.fiscal_year_start_month))
    })?;

    Ok(settings::ActiveModel {
        id: Set(SETTINGS_ROW_ID),
        baseline_floor_per_box: Set(value.baseline_floor_per_box),
        yearly_box_target: Set(value.yearly_box_target),
        amber_floor_fraction: Set(value.amber_floor_fraction),
        monthly_box_targets: Set(serde_json::to_value(&value.monthly_box_targets)?),
        install_capacity_per_week: Set(value.install_capacity_per_week),
        fiscal_year_start_month: Set(start_month),
        updated_at: Set(Utc::now().into()),
    })
}

/// Converts the stored row into settings.
///
/// Undecodable targets read as an empty map and an out-of-range start month
/// reads as the default.
#[must_use]
pub fn settings_from_model(model: settings::Model) -> Settings {
    let monthly_box_targets: BTreeMap<String, i32> =
        serde_json::from_value(model.monthly_box_targets).unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring undecodable monthly box targets");
            BTreeMap::new()
        });

    let fiscal_year_start_month = u32::try_from(model.fiscal_year_start_month)
        .ok()
        .filter(|m| (1..=12).contains(m))
        .unwrap_or_else(|| {
            warn!(
                stored = model.fiscal_year_start_month,
                "Stored fiscal year start month out of range, using default"
            );
            FiscalCalendar::DEFAULT_START_MONTH
        });

    Settings {
        baseline_floor_per_box: model.baseline_floor_per_box,
        yearly_box_target: model.yearly_box_target,
        amber_floor_fraction: model.amber_floor_fraction,
        monthly_box_targets,
        install_capacity_per_week: model.install_capacity_per_week,
        fiscal_year_start_month,
    }
}
