//! `SeaORM` Entity for settings table.
//!
//! The table holds a single row with id 1.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Primary key of the settings row.
pub const SETTINGS_ROW_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub baseline_floor_per_box: Decimal,
    pub yearly_box_target: i32,
    #[sea_orm(column_type = "Decimal(Some((5, 4)))")]
    pub amber_floor_fraction: Decimal,
    /// JSON object of fiscal month name to box target.
    #[sea_orm(column_type = "JsonBinary")]
    pub monthly_box_targets: Json,
    pub install_capacity_per_week: i32,
    pub fiscal_year_start_month: i32,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
