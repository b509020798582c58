//! Threshold (RAG) classification of dashboard metrics.
//!
//! Every metric maps to one of three statuses. Each KPI family has its own
//! ruleset; the label text of each status is fixed by policy.

pub mod classify;
pub mod types;

#[cfg(test)]
mod props;

pub use classify::{classify, classify_cost_compliance, classify_discount, classify_quality};
pub use types::{FORBIDDEN_STATUS_WORDS, ThresholdStatus, is_permitted_status_text};
