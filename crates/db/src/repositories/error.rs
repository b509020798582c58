//! Errors shared by the order and production repositories.

use forgeboard_shared::types::{OrderId, ProductionBatchId};
use sea_orm::DbErr;

/// Error types for order and production batch operations.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Production batch not found.
    #[error("Production batch not found: {0}")]
    BatchNotFound(ProductionBatchId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}
