//! Threshold status types.

use serde::{Deserialize, Serialize};

/// Words that must never appear in user-facing status text.
pub const FORBIDDEN_STATUS_WORDS: [&str; 3] = ["failed", "missed", "underperformed"];

/// Three-state classification of a metric against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdStatus {
    /// Below the amber floor (red).
    BelowTarget,
    /// Between the amber floor and the target (amber).
    Watch,
    /// At or above target (green).
    OnTarget,
}

impl ThresholdStatus {
    /// The fixed label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnTarget => "On target",
            Self::Watch => "Watch",
            Self::BelowTarget => "Below target",
        }
    }
}

impl std::fmt::Display for ThresholdStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns false if `text` contains any forbidden status word (case-insensitive).
#[must_use]
pub fn is_permitted_status_text(text: &str) -> bool {
    let lowered = text.to_lowercase();
    !FORBIDDEN_STATUS_WORDS
        .iter()
        .any(|word| lowered.contains(word))
}
