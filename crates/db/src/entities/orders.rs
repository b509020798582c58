//! `SeaORM` Entity for orders table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: Date,
    pub reference: Option<String>,
    pub sales_rep_id: Option<i64>,
    pub boxes_qty: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub rrp_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub net_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub build_cost_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub install_revenue: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub extras_revenue: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SalesRepId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
