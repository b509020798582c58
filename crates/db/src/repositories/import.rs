//! Import executor: applies a decoded CSV plan to the database.
//!
//! Under [`CommitPolicy::PerRow`] every row commits on its own, so a row that
//! fails to write never undoes the rows before it. Under
//! [`CommitPolicy::PerFile`] the whole file runs in one transaction and a
//! database error rolls it all back. In both modes an update whose id does
//! not exist is recorded as a failed row.

use std::io::Read;
use std::sync::Arc;

use forgeboard_core::import::{
    ImportError, ImportKind, ImportPlan, ImportSummary, RowAction, RowError, parse_orders,
    parse_production,
};
use forgeboard_core::records::{CreateOrderInput, CreateProductionBatchInput};
use forgeboard_shared::types::{OrderId, ProductionBatchId};
use forgeboard_shared::{CommitPolicy, ImportMode};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};
use tracing::{info, warn};

use super::order::{insert_order, update_order};
use super::production::{insert_batch, update_batch};
use super::user::UserRepository;

/// Error types for import runs.
#[derive(Debug, thiserror::Error)]
pub enum ImportRunError {
    /// The file could not be decoded at all.
    #[error(transparent)]
    File(#[from] ImportError),

    /// Database error that stopped the run.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Applies import plans under a commit policy.
#[derive(Debug, Clone)]
pub struct ImportRepository {
    db: Arc<DatabaseConnection>,
    users: UserRepository,
    policy: CommitPolicy,
}

impl ImportRepository {
    /// Creates a new import repository.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>, policy: CommitPolicy) -> Self {
        let db = db.into();
        Self {
            users: UserRepository::new(Arc::clone(&db)),
            db,
            policy,
        }
    }

    /// Decodes and applies an orders CSV.
    ///
    /// Sales rep emails are resolved against the current sales accounts.
    ///
    /// # Errors
    ///
    /// Returns `ImportRunError::File` for a structurally invalid file, or
    /// `ImportRunError::Database` if the run had to stop.
    pub async fn import_orders<R: Read>(
        &self,
        reader: R,
        mode: ImportMode,
    ) -> Result<ImportSummary, ImportRunError> {
        let reps = self.users.sales_rep_directory().await?;
        let plan = parse_orders(reader, mode, &reps)?;
        self.apply::<OrderRows>(&plan).await
    }

    /// Decodes and applies a production CSV.
    ///
    /// # Errors
    ///
    /// Returns `ImportRunError::File` for a structurally invalid file, or
    /// `ImportRunError::Database` if the run had to stop.
    pub async fn import_production<R: Read>(
        &self,
        reader: R,
        mode: ImportMode,
    ) -> Result<ImportSummary, ImportRunError> {
        let plan = parse_production(reader, mode)?;
        self.apply::<BatchRows>(&plan).await
    }

    async fn apply<W: RowWriter>(
        &self,
        plan: &ImportPlan<W::Id, W::Input>,
    ) -> Result<ImportSummary, ImportRunError> {
        info!(
            kind = %W::KIND,
            rows = plan.total,
            invalid = plan.failed_rows(),
            policy = ?self.policy,
            "Starting import"
        );
        let mut summary = plan.summary();

        match self.policy {
            CommitPolicy::PerRow => {
                for planned in &plan.rows {
                    match W::write(self.db.as_ref(), &planned.action).await {
                        Ok(None) => summary.record_success(),
                        Ok(Some(message)) => {
                            summary.record_failure(RowError::new(planned.row, message));
                        }
                        Err(e) => {
                            warn!(row = planned.row, error = %e, "Import row failed to write");
                            summary.record_failure(RowError::new(
                                planned.row,
                                format!("Database error: {e}"),
                            ));
                        }
                    }
                }
            }
            CommitPolicy::PerFile => {
                let txn = self.db.begin().await?;
                for planned in &plan.rows {
                    match W::write(&txn, &planned.action).await? {
                        None => summary.record_success(),
                        Some(message) => {
                            summary.record_failure(RowError::new(planned.row, message));
                        }
                    }
                }
                txn.commit().await?;
            }
        }

        summary.errors.sort_by_key(|e| e.row);
        if summary.failed > 0 {
            warn!(
                kind = %W::KIND,
                failed = summary.failed,
                "Import finished with failed rows"
            );
        }
        info!(
            kind = %W::KIND,
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Import finished"
        );
        Ok(summary)
    }
}

/// Writes one planned row of a given record type.
trait RowWriter {
    type Id: Copy;
    type Input;
    const KIND: ImportKind;

    /// Applies the row. `Ok(Some(message))` is a row-level failure.
    async fn write<C: ConnectionTrait>(
        conn: &C,
        action: &RowAction<Self::Id, Self::Input>,
    ) -> Result<Option<String>, DbErr>;
}

struct OrderRows;

impl RowWriter for OrderRows {
    type Id = OrderId;
    type Input = CreateOrderInput;
    const KIND: ImportKind = ImportKind::Orders;

    async fn write<C: ConnectionTrait>(
        conn: &C,
        action: &RowAction<OrderId, CreateOrderInput>,
    ) -> Result<Option<String>, DbErr> {
        match action {
            RowAction::Insert(input) => insert_order(conn, input).await.map(|_| None),
            RowAction::Update(id, input) => Ok(update_order(conn, *id, input)
                .await?
                .is_none()
                .then(|| format!("Order not found: {id}"))),
        }
    }
}

struct BatchRows;

impl RowWriter for BatchRows {
    type Id = ProductionBatchId;
    type Input = CreateProductionBatchInput;
    const KIND: ImportKind = ImportKind::Production;

    async fn write<C: ConnectionTrait>(
        conn: &C,
        action: &RowAction<ProductionBatchId, CreateProductionBatchInput>,
    ) -> Result<Option<String>, DbErr> {
        match action {
            RowAction::Insert(input) => insert_batch(conn, input).await.map(|_| None),
            RowAction::Update(id, input) => Ok(update_batch(conn, *id, input)
                .await?
                .is_none()
                .then(|| format!("Production batch not found: {id}"))),
        }
    }
}
