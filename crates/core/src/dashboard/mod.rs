//! Dashboard metrics aggregation and notes.
//!
//! This module turns order and production records into per-month KPI
//! bundles:
//! - Sales: volume, baseline contribution, discount impact, revenue mix,
//!   order shape and momentum
//! - Production: output, cost compliance, rework, cost leakage, backlog and
//!   install pace
//!
//! It also defines the per-role dashboard note attached to each view.

pub mod error;
pub mod notes;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::DashboardError;
pub use notes::{DashboardNote, NoteKey};
pub use service::DashboardService;
pub use types::*;
