//! `SeaORM` entity definitions.
//!
//! The schema is provisioned outside this workspace; these entities describe
//! the tables as they exist.

pub mod dashboard_notes;
pub mod orders;
pub mod production_batches;
pub mod sea_orm_active_enums;
pub mod settings;
pub mod users;
