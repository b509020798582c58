//! Core business logic for Forgeboard.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `fiscal` - Fiscal year labels, month names and date ranges
//! - `records` - Sales orders and production batches
//! - `metrics` - Per-order baseline and discount figures
//! - `status` - Threshold (RAG) classification
//! - `settings` - Targets, floors and their validation
//! - `dashboard` - Monthly sales and production KPI bundles, dashboard notes
//! - `import` - CSV import validation, export and templates
//! - `auth` - User roles and password hashing

pub mod auth;
pub mod dashboard;
pub mod fiscal;
pub mod import;
pub mod metrics;
pub mod records;
pub mod settings;
pub mod status;
