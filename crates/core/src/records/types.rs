//! Record types.

use chrono::{DateTime, NaiveDate, Utc};
use forgeboard_shared::types::{OrderId, ProductionBatchId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sales order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Order date.
    pub date: NaiveDate,
    /// Optional customer or job reference.
    pub reference: Option<String>,
    /// Owning sales rep; `None` once the account is deleted.
    pub sales_rep_id: Option<UserId>,
    /// Boxes sold (expected to be at least 1).
    pub boxes_qty: i32,
    /// Recommended retail total.
    pub rrp_total: Decimal,
    /// Net total after discount.
    pub net_total: Decimal,
    /// Build cost total.
    pub build_cost_total: Decimal,
    /// Install revenue.
    pub install_revenue: Decimal,
    /// Extras revenue.
    pub extras_revenue: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Creation timestamp, when persisted.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp, when persisted.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Builds an order from its input fields.
    #[must_use]
    pub fn from_input(id: OrderId, input: CreateOrderInput) -> Self {
        Self {
            id,
            date: input.date,
            reference: input.reference,
            sales_rep_id: input.sales_rep_id,
            boxes_qty: input.boxes_qty,
            rrp_total: input.rrp_total,
            net_total: input.net_total,
            build_cost_total: input.build_cost_total,
            install_revenue: input.install_revenue,
            extras_revenue: input.extras_revenue,
            notes: input.notes,
            created_at: None,
            updated_at: None,
        }
    }

    /// True if the order carries any install revenue.
    #[must_use]
    pub fn has_install(&self) -> bool {
        self.install_revenue > Decimal::ZERO
    }
}

/// Input for creating or updating an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderInput {
    /// Order date.
    pub date: NaiveDate,
    /// Optional reference.
    pub reference: Option<String>,
    /// Owning sales rep.
    pub sales_rep_id: Option<UserId>,
    /// Boxes sold.
    pub boxes_qty: i32,
    /// Recommended retail total.
    pub rrp_total: Decimal,
    /// Net total after discount.
    pub net_total: Decimal,
    /// Build cost total.
    pub build_cost_total: Decimal,
    /// Install revenue.
    pub install_revenue: Decimal,
    /// Extras revenue.
    pub extras_revenue: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// One tagged reason explaining over-cost boxes in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverCostReason {
    /// Reason name, e.g. "Material price".
    pub reason: String,
    /// Boxes attributed to this reason.
    pub boxes: i32,
}

/// A production batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionBatch {
    /// Batch ID.
    pub id: ProductionBatchId,
    /// Build date.
    pub date: NaiveDate,
    /// Boxes built.
    pub boxes_built: i32,
    /// Boxes that exceeded their target build cost.
    pub boxes_over_cost: i32,
    /// Reasons for over-cost boxes.
    pub over_cost_reasons: Vec<OverCostReason>,
    /// Boxes that needed rework.
    pub rework_boxes: i32,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Creation timestamp, when persisted.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp, when persisted.
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductionBatch {
    /// Builds a batch from its input fields.
    #[must_use]
    pub fn from_input(id: ProductionBatchId, input: CreateProductionBatchInput) -> Self {
        Self {
            id,
            date: input.date,
            boxes_built: input.boxes_built,
            boxes_over_cost: input.boxes_over_cost,
            over_cost_reasons: input.over_cost_reasons,
            rework_boxes: input.rework_boxes,
            notes: input.notes,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Input for creating or updating a production batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductionBatchInput {
    /// Build date.
    pub date: NaiveDate,
    /// Boxes built.
    pub boxes_built: i32,
    /// Boxes over cost.
    pub boxes_over_cost: i32,
    /// Reasons for over-cost boxes.
    pub over_cost_reasons: Vec<OverCostReason>,
    /// Boxes reworked.
    pub rework_boxes: i32,
    /// Free-text notes.
    pub notes: Option<String>,
}
