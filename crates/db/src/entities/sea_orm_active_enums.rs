//! `SeaORM` active enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role as stored in the `user_role` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    /// Sales rep.
    #[sea_orm(string_value = "sales")]
    Sales,
    /// Production lead.
    #[sea_orm(string_value = "production")]
    Production,
    /// Director.
    #[sea_orm(string_value = "director")]
    Director,
}

impl From<UserRole> for forgeboard_core::auth::UserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Sales => Self::Sales,
            UserRole::Production => Self::Production,
            UserRole::Director => Self::Director,
        }
    }
}

impl From<forgeboard_core::auth::UserRole> for UserRole {
    fn from(role: forgeboard_core::auth::UserRole) -> Self {
        match role {
            forgeboard_core::auth::UserRole::Sales => Self::Sales,
            forgeboard_core::auth::UserRole::Production => Self::Production,
            forgeboard_core::auth::UserRole::Director => Self::Director,
        }
    }
}
