//! Order repository for database operations.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use forgeboard_core::fiscal::DateRange;
use forgeboard_core::import::OrderExportRow;
use forgeboard_core::records::{CreateOrderInput, Order};
use forgeboard_shared::types::{OrderId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::error::RecordError;
use crate::entities::{orders, users};

/// Order repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    db: Arc<DatabaseConnection>,
}

impl OrderRepository {
    /// Creates a new order repository.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// Lists all orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<Order>, DbErr> {
        let models = orders::Entity::find()
            .order_by_asc(orders::Column::Date)
            .order_by_asc(orders::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(order_from_model).collect())
    }

    /// Lists orders dated within `range` (inclusive).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_between(&self, range: DateRange) -> Result<Vec<Order>, DbErr> {
        let models = orders::Entity::find()
            .filter(orders::Column::Date.gte(range.start))
            .filter(orders::Column::Date.lte(range.end))
            .order_by_asc(orders::Column::Date)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(order_from_model).collect())
    }

    /// Lists orders dated on or before `end`, optionally for one sales rep.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_until(
        &self,
        end: NaiveDate,
        sales_rep: Option<UserId>,
    ) -> Result<Vec<Order>, DbErr> {
        let mut query = orders::Entity::find().filter(orders::Column::Date.lte(end));
        if let Some(rep) = sales_rep {
            query = query.filter(orders::Column::SalesRepId.eq(rep.into_inner()));
        }
        let models = query.order_by_asc(orders::Column::Date).all(self.db.as_ref()).await?;
        Ok(models.into_iter().map(order_from_model).collect())
    }

    /// Lists the orders owned by one sales rep.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_rep(&self, rep: UserId) -> Result<Vec<Order>, DbErr> {
        let models = orders::Entity::find()
            .filter(orders::Column::SalesRepId.eq(rep.into_inner()))
            .order_by_asc(orders::Column::Date)
            .order_by_asc(orders::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(order_from_model).collect())
    }

    /// Finds an order by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, id: OrderId) -> Result<Option<Order>, DbErr> {
        Ok(orders::Entity::find_by_id(id.into_inner())
            .one(self.db.as_ref())
            .await?
            .map(order_from_model))
    }

    /// Creates a new order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: &CreateOrderInput) -> Result<Order, DbErr> {
        insert_order(self.db.as_ref(), input).await.map(order_from_model)
    }

    /// Overwrites an order's fields.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::OrderNotFound` if no order has this ID.
    pub async fn update(&self, id: OrderId, input: &CreateOrderInput) -> Result<Order, RecordError> {
        update_order(self.db.as_ref(), id, input)
            .await?
            .map(order_from_model)
            .ok_or(RecordError::OrderNotFound(id))
    }

    /// Deletes an order.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::OrderNotFound` if no order has this ID.
    pub async fn delete(&self, id: OrderId) -> Result<(), RecordError> {
        let result = orders::Entity::delete_by_id(id.into_inner())
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RecordError::OrderNotFound(id));
        }
        Ok(())
    }

    /// Loads every order with its sales rep's email and name, for export.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn export_rows(&self) -> Result<Vec<OrderExportRow>, DbErr> {
        let rows = orders::Entity::find()
            .find_also_related(users::Entity)
            .order_by_asc(orders::Column::Date)
            .order_by_asc(orders::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(order, rep)| OrderExportRow {
                order: order_from_model(order),
                sales_rep_email: rep.as_ref().map(|u| u.email.clone()),
                sales_rep_name: rep.map(|u| u.full_name),
            })
            .collect())
    }
}

/// Inserts an order on any connection or transaction.
pub(crate) async fn insert_order<C: ConnectionTrait>(
    conn: &C,
    input: &CreateOrderInput,
) -> Result<orders::Model, DbErr> {
    let now = Utc::now().into();
    let mut model = active_order(input);
    model.created_at = Set(now);
    model.updated_at = Set(now);
    model.insert(conn).await
}

/// Updates an order on any connection or transaction; `None` if it is missing.
pub(crate) async fn update_order<C: ConnectionTrait>(
    conn: &C,
    id: OrderId,
    input: &CreateOrderInput,
) -> Result<Option<orders::Model>, DbErr> {
    let Some(existing) = orders::Entity::find_by_id(id.into_inner()).one(conn).await? else {
        return Ok(None);
    };

    let mut model = active_order(input);
    model.id = Set(existing.id);
    model.created_at = Set(existing.created_at);
    model.updated_at = Set(Utc::now().into());
    model.update(conn).await.map(Some)
}

fn active_order(input: &CreateOrderInput) -> orders::ActiveModel {
    orders::ActiveModel {
        date: Set(input.date),
        reference: Set(input.reference.clone()),
        sales_rep_id: Set(input.sales_rep_id.map(UserId::into_inner)),
        boxes_qty: Set(input.boxes_qty),
        rrp_total: Set(input.rrp_total),
        net_total: Set(input.net_total),
        build_cost_total: Set(input.build_cost_total),
        install_revenue: Set(input.install_revenue),
        extras_revenue: Set(input.extras_revenue),
        notes: Set(input.notes.clone()),
        ..Default::default()
    }
}

/// Converts a stored order into the domain record.
#[must_use]
pub fn order_from_model(model: orders::Model) -> Order {
    Order {
        id: OrderId::new(model.id),
        date: model.date,
        reference: model.reference,
        sales_rep_id: model.sales_rep_id.map(UserId::new),
        boxes_qty: model.boxes_qty,
        rrp_total: model.rrp_total,
        net_total: model.net_total,
        build_cost_total: model.build_cost_total,
        install_revenue: model.install_revenue,
        extras_revenue: model.extras_revenue,
        notes: model.notes,
        created_at: Some(model.created_at.with_timezone(&Utc)),
        updated_at: Some(model.updated_at.with_timezone(&Utc)),
    }
}
