//! Shared configuration, errors, and identifier types for Forgeboard.
//!
//! This crate provides common types used across all other crates:
//! - Typed integer IDs for type-safe record references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CommitPolicy, ImportMode};
pub use error::{AppError, AppResult};
