//! Application configuration management.
//!
//! Business settings (targets, floors, capacity) are stored in the database
//! settings row, not here. This module only covers process-level wiring.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Dashboard view configuration.
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// CSV import configuration.
    #[serde(default)]
    pub import: ImportConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Dashboard view configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// How many fiscal years before the current one are selectable.
    #[serde(default = "default_years_back")]
    pub years_back: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            years_back: default_years_back(),
        }
    }
}

fn default_years_back() -> u32 {
    4
}

/// Transaction granularity used when applying an imported file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitPolicy {
    /// Every row commits on its own; a failing row never undoes earlier rows.
    #[default]
    PerRow,
    /// The whole file commits once; a database error rolls everything back.
    PerFile,
}

/// How identifier columns in an imported file are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Rows with a positive `id` update that record, other rows insert.
    #[default]
    Upsert,
    /// The `id` column is ignored and every row inserts a new record.
    InsertOnly,
}

/// CSV import configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportConfig {
    /// Commit granularity.
    #[serde(default)]
    pub commit_policy: CommitPolicy,
    /// Identifier handling.
    #[serde(default)]
    pub mode: ImportMode,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "forgeboard=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FORGEBOARD").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
