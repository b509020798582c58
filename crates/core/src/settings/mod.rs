//! Dashboard settings: targets, floors, and capacity.
//!
//! Settings are a single global record. They are fetched once per operation
//! and passed explicitly into the aggregation engine.

pub mod error;
pub mod service;
pub mod types;

pub use error::SettingsError;
pub use service::SettingsService;
pub use types::Settings;
