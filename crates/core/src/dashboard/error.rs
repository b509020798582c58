//! Dashboard error types.

use thiserror::Error;

use crate::auth::UserRole;
use crate::fiscal::FiscalError;

/// Errors raised while resolving a dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// The fiscal year label or month could not be resolved.
    #[error(transparent)]
    Period(#[from] FiscalError),

    /// The author may not write this role's note.
    #[error("Role {author} cannot edit the {note_role} dashboard note")]
    NoteForbidden {
        /// Role of the author.
        author: UserRole,
        /// Role the note belongs to.
        note_role: UserRole,
    },
}
