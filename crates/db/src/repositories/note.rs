//! Dashboard note repository.

use std::sync::Arc;

use chrono::Utc;
use forgeboard_core::dashboard::{DashboardNote, NoteKey};
use forgeboard_shared::types::UserId;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::entities::{dashboard_notes, sea_orm_active_enums::UserRole};

/// Repository for per-role dashboard notes.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    db: Arc<DatabaseConnection>,
}

impl NoteRepository {
    /// Creates a new note repository.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// Finds the note for a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, key: &NoteKey) -> Result<Option<DashboardNote>, DbErr> {
        Ok(dashboard_notes::Entity::find()
            .filter(dashboard_notes::Column::FiscalYear.eq(key.fiscal_year.as_str()))
            .filter(dashboard_notes::Column::Month.eq(key.month.as_str()))
            .filter(dashboard_notes::Column::Role.eq(UserRole::from(key.role)))
            .one(self.db.as_ref())
            .await?
            .map(note_from_model))
    }

    /// Inserts or replaces the note for its key.
    ///
    /// The note should come from [`DashboardNote::compose`], which enforces
    /// who may write it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert(&self, note: &DashboardNote) -> Result<DashboardNote, DbErr> {
        let txn = self.db.begin().await?;

        let existing = dashboard_notes::Entity::find()
            .filter(dashboard_notes::Column::FiscalYear.eq(note.key.fiscal_year.as_str()))
            .filter(dashboard_notes::Column::Month.eq(note.key.month.as_str()))
            .filter(dashboard_notes::Column::Role.eq(UserRole::from(note.key.role)))
            .one(&txn)
            .await?;

        let updated_at: DateTimeWithTimeZone = note.updated_at.unwrap_or_else(Utc::now).into();
        let updated_by = note.updated_by.map(UserId::into_inner);

        let saved = match existing {
            Some(model) => {
                let mut active: dashboard_notes::ActiveModel = model.into();
                active.body = Set(note.body.clone());
                active.updated_by = Set(updated_by);
                active.updated_at = Set(updated_at);
                active.update(&txn).await?
            }
            None => {
                dashboard_notes::ActiveModel {
                    fiscal_year: Set(note.key.fiscal_year.clone()),
                    month: Set(note.key.month.clone()),
                    role: Set(note.key.role.into()),
                    body: Set(note.body.clone()),
                    updated_by: Set(updated_by),
                    updated_at: Set(updated_at),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;
        Ok(note_from_model(saved))
    }
}

/// Converts a stored note into the domain type.
#[must_use]
pub fn note_from_model(model: dashboard_notes::Model) -> DashboardNote {
    DashboardNote {
        key: NoteKey {
            fiscal_year: model.fiscal_year,
            month: model.month,
            role: model.role.into(),
        },
        body: model.body,
        updated_by: model.updated_by.map(UserId::new),
        updated_at: Some(model.updated_at.with_timezone(&Utc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use forgeboard_core::auth;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn stored(body: &str) -> dashboard_notes::Model {
        dashboard_notes::Model {
            id: 3,
            fiscal_year: "2025/26".to_string(),
            month: "October".to_string(),
            role: UserRole::Production,
            body: body.to_string(),
            updated_by: Some(12),
            updated_at: DateTime::parse_from_rfc3339("2025-10-03T16:00:00+00:00").unwrap(),
        }
    }

    #[test]
    fn test_model_to_note() {
        let note = note_from_model(stored("Steel delivery slipped a week"));

        assert_eq!(note.key.role, auth::UserRole::Production);
        assert_eq!(note.key.month, "October");
        assert_eq!(note.updated_by, Some(UserId::new(12)));
    }

    #[test]
    fn test_role_conversion_round_trips() {
        for role in auth::UserRole::ALL {
            assert_eq!(auth::UserRole::from(UserRole::from(role)), role);
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_note() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored("old")]])
            .append_query_results([vec![stored("Press back online")]])
            .append_query_results([vec![stored("Press back online")]])
            .into_connection();
        let repo = NoteRepository::new(db);

        let key = NoteKey::new("2025/26", "October", auth::UserRole::Production).unwrap();
        let note = DashboardNote::compose(
            key.clone(),
            " Press back online ",
            UserId::new(12),
            auth::UserRole::Production,
        )
        .unwrap();

        let saved = repo.upsert(&note).await.unwrap();
        assert_eq!(saved.key, key);
        assert_eq!(saved.body, "Press back online");

        let found = repo.find(&key).await.unwrap().unwrap();
        assert_eq!(found.body, "Press back online");
    }
}
