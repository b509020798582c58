//! Production batch repository for database operations.

use std::sync::Arc;

use chrono::Utc;
use forgeboard_core::fiscal::DateRange;
use forgeboard_core::records::{CreateProductionBatchInput, OverCostReason, ProductionBatch};
use forgeboard_shared::types::ProductionBatchId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::warn;

use super::error::RecordError;
use crate::entities::production_batches;

/// Production batch repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProductionRepository {
    db: Arc<DatabaseConnection>,
}

impl ProductionRepository {
    /// Creates a new production repository.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// Lists all batches, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<ProductionBatch>, DbErr> {
        let models = production_batches::Entity::find()
            .order_by_asc(production_batches::Column::Date)
            .order_by_asc(production_batches::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(batch_from_model).collect())
    }

    /// Lists batches dated within `range` (inclusive).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_between(&self, range: DateRange) -> Result<Vec<ProductionBatch>, DbErr> {
        let models = production_batches::Entity::find()
            .filter(production_batches::Column::Date.gte(range.start))
            .filter(production_batches::Column::Date.lte(range.end))
            .order_by_asc(production_batches::Column::Date)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(batch_from_model).collect())
    }

    /// Finds a batch by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, id: ProductionBatchId) -> Result<Option<ProductionBatch>, DbErr> {
        Ok(production_batches::Entity::find_by_id(id.into_inner())
            .one(self.db.as_ref())
            .await?
            .map(batch_from_model))
    }

    /// Creates a new batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: &CreateProductionBatchInput,
    ) -> Result<ProductionBatch, DbErr> {
        insert_batch(self.db.as_ref(), input).await.map(batch_from_model)
    }

    /// Overwrites a batch's fields.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::BatchNotFound` if no batch has this ID.
    pub async fn update(
        &self,
        id: ProductionBatchId,
        input: &CreateProductionBatchInput,
    ) -> Result<ProductionBatch, RecordError> {
        update_batch(self.db.as_ref(), id, input)
            .await?
            .map(batch_from_model)
            .ok_or(RecordError::BatchNotFound(id))
    }

    /// Deletes a batch.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::BatchNotFound` if no batch has this ID.
    pub async fn delete(&self, id: ProductionBatchId) -> Result<(), RecordError> {
        let result = production_batches::Entity::delete_by_id(id.into_inner())
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RecordError::BatchNotFound(id));
        }
        Ok(())
    }
}

/// Inserts a batch on any connection or transaction.
pub(crate) async fn insert_batch<C: ConnectionTrait>(
    conn: &C,
    input: &CreateProductionBatchInput,
) -> Result<production_batches::Model, DbErr> {
    let now = Utc::now().into();
    let mut model = active_batch(input)?;
    model.created_at = Set(now);
    model.updated_at = Set(now);
    model.insert(conn).await
}

/// Updates a batch on any connection or transaction; `None` if it is missing.
pub(crate) async fn update_batch<C: ConnectionTrait>(
    conn: &C,
    id: ProductionBatchId,
    input: &CreateProductionBatchInput,
) -> Result<Option<production_batches::Model>, DbErr> {
    let Some(existing) = production_batches::Entity::find_by_id(id.into_inner())
        .one(conn)
        .await?
    else {
        return Ok(None);
    };

    let mut model = active_batch(input)?;
    model.id = Set(existing.id);
    model.created_at = Set(existing.created_at);
    model.updated_at = Set(Utc::now().into());
    model.update(conn).await.map(Some)
}

fn active_batch(
    input: &CreateProductionBatchInput,
) -> Result<production_batches::ActiveModel, DbErr> {
    let reasons = serde_json::to_value(&input.over_cost_reasons)
        .map_err(|e| DbErr::Custom(format!("Failed to encode over-cost reasons: {e}")))?;

    Ok(production_batches::ActiveModel {
        date: Set(input.date),
        boxes_built: Set(input.boxes_built),
        boxes_over_cost: Set(input.boxes_over_cost),
        over_cost_reasons: Set(reasons),
        rework_boxes: Set(input.rework_boxes),
        notes: Set(input.notes.clone()),
        ..Default::default()
    })
}

/// Converts a stored batch into the domain record.
///
/// A reasons column that does not hold a list of reasons reads as empty.
#[must_use]
pub fn batch_from_model(model: production_batches::Model) -> ProductionBatch {
    let over_cost_reasons = decode_reasons(model.id, model.over_cost_reasons);

    ProductionBatch {
        id: ProductionBatchId::new(model.id),
        date: model.date,
        boxes_built: model.boxes_built,
        boxes_over_cost: model.boxes_over_cost,
        over_cost_reasons,
        rework_boxes: model.rework_boxes,
        notes: model.notes,
        created_at: Some(model.created_at.with_timezone(&Utc)),
        updated_at: Some(model.updated_at.with_timezone(&Utc)),
    }
}

fn decode_reasons(batch_id: i64, value: serde_json::Value) -> Vec<OverCostReason> {
    if value.is_null() {
        return Vec::new();
    }
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(batch_id, error = %e, "Ignoring undecodable over-cost reasons");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;

    fn model(reasons: serde_json::Value) -> production_batches::Model {
        let at = DateTime::parse_from_rfc3339("2025-09-01T07:00:00+00:00").unwrap();
        production_batches::Model {
            id: 8,
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            boxes_built: 20,
            boxes_over_cost: 3,
            over_cost_reasons: reasons,
            rework_boxes: 1,
            notes: Some("night shift".to_string()),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_model_to_batch() {
        let batch = batch_from_model(model(json!([
            { "reason": "Steel price", "boxes": 2 },
            { "reason": "Rush freight", "boxes": 1 }
        ])));

        assert_eq!(batch.id, ProductionBatchId::new(8));
        assert_eq!(batch.over_cost_reasons.len(), 2);
        assert_eq!(batch.over_cost_reasons[0].reason, "Steel price");
        assert_eq!(batch.over_cost_reasons[1].boxes, 1);
    }

    #[test]
    fn test_undecodable_reasons_read_as_empty() {
        assert!(batch_from_model(model(json!(null))).over_cost_reasons.is_empty());
        assert!(batch_from_model(model(json!({"reason": "x"}))).over_cost_reasons.is_empty());
        assert!(batch_from_model(model(json!(["x"]))).over_cost_reasons.is_empty());
    }

    #[test]
    fn test_active_model_encodes_reasons() {
        let input = CreateProductionBatchInput {
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            boxes_built: 5,
            boxes_over_cost: 1,
            over_cost_reasons: vec![OverCostReason {
                reason: "Glass".to_string(),
                boxes: 1,
            }],
            rework_boxes: 0,
            notes: None,
        };

        let active = active_batch(&input).unwrap();
        assert!(matches!(
            active.over_cost_reasons,
            sea_orm::ActiveValue::Set(ref v) if *v == json!([{ "reason": "Glass", "boxes": 1 }])
        ));
    }

    #[tokio::test]
    async fn test_find_update_delete() {
        let rebuilt = production_batches::Model {
            boxes_built: 22,
            ..model(json!([]))
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(json!([]))]])
            .append_query_results([vec![model(json!([]))]])
            .append_query_results([vec![rebuilt]])
            .append_query_results([Vec::<production_batches::Model>::new()])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = ProductionRepository::new(db);

        let found = repo.find(ProductionBatchId::new(8)).await.unwrap().unwrap();
        assert_eq!(found.notes.as_deref(), Some("night shift"));

        let input = CreateProductionBatchInput {
            date: found.date,
            boxes_built: 22,
            boxes_over_cost: found.boxes_over_cost,
            over_cost_reasons: Vec::new(),
            rework_boxes: found.rework_boxes,
            notes: found.notes.clone(),
        };
        let batch = repo.update(ProductionBatchId::new(8), &input).await.unwrap();
        assert_eq!(batch.boxes_built, 22);

        assert!(matches!(
            repo.update(ProductionBatchId::new(9), &input).await,
            Err(RecordError::BatchNotFound(id)) if id == ProductionBatchId::new(9)
        ));

        assert!(repo.delete(ProductionBatchId::new(8)).await.is_ok());
        assert!(matches!(
            repo.delete(ProductionBatchId::new(8)).await,
            Err(RecordError::BatchNotFound(_))
        ));
    }
}
