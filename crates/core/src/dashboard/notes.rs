//! Per-role dashboard notes.
//!
//! One free-text note exists per (fiscal year, fiscal month, role). Writers
//! upsert the note of their own role; the director may write any.

use chrono::{DateTime, Utc};
use forgeboard_shared::types::UserId;
use serde::{Deserialize, Serialize};

use super::error::DashboardError;
use crate::auth::UserRole;
use crate::fiscal::{MONTH_NAMES, calendar_month_of, canonical_label};

/// Identity of a dashboard note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteKey {
    /// Fiscal year label.
    pub fiscal_year: String,
    /// Canonical fiscal month name.
    pub month: String,
    /// Dashboard role the note belongs to.
    pub role: UserRole,
}

impl NoteKey {
    /// Builds a key, validating the label and canonicalizing the month name.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Period` for a malformed label or unknown month.
    pub fn new(fiscal_year: &str, month: &str, role: UserRole) -> Result<Self, DashboardError> {
        let fiscal_year = canonical_label(fiscal_year)?;
        let canonical = MONTH_NAMES[(calendar_month_of(month)? - 1) as usize];

        Ok(Self {
            fiscal_year,
            month: canonical.to_string(),
            role,
        })
    }
}

/// A saved dashboard note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardNote {
    /// Which view the note annotates.
    pub key: NoteKey,
    /// Note text.
    pub body: String,
    /// Last author.
    pub updated_by: Option<UserId>,
    /// Last write.
    pub updated_at: Option<DateTime<Utc>>,
}

impl DashboardNote {
    /// Prepares a note write on behalf of `author_role`.
    ///
    /// Surrounding whitespace is trimmed; an empty body clears the note.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::NoteForbidden` if the author may not write
    /// this role's note.
    pub fn compose(
        key: NoteKey,
        body: &str,
        author: UserId,
        author_role: UserRole,
    ) -> Result<Self, DashboardError> {
        if !author_role.can_annotate(key.role) {
            return Err(DashboardError::NoteForbidden {
                author: author_role,
                note_role: key.role,
            });
        }

        Ok(Self {
            key,
            body: body.trim().to_string(),
            updated_by: Some(author),
            updated_at: Some(Utc::now()),
        })
    }
}
