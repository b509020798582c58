//! User repository for database operations.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use forgeboard_core::auth::{self, PasswordError, hash_password};
use forgeboard_shared::types::UserId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{sea_orm_active_enums::UserRole, users};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Email already registered.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// Password rejected or hashing failed.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Login email; stored lowercase.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Plain-text password, hashed before storage.
    pub password: String,
    /// Account role.
    pub role: auth::UserRole,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// Finds a user by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(normalize_email(email)))
            .one(self.db.as_ref())
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id.into_inner()).one(self.db.as_ref()).await
    }

    /// Lists all users by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_asc(users::Column::Email)
            .all(self.db.as_ref())
            .await
    }

    /// Creates a new user with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmailTaken` for a duplicate email,
    /// `UserError::Password` for a rejected password, or a database error.
    pub async fn create(&self, input: &CreateUserInput) -> Result<users::Model, UserError> {
        let email = normalize_email(&input.email);
        if self.email_exists(&email).await? {
            return Err(UserError::EmailTaken(email));
        }

        let password_hash = hash_password(&input.password)?;
        let now = Utc::now().into();
        let user = users::ActiveModel {
            email: Set(email),
            full_name: Set(input.full_name.trim().to_string()),
            password_hash: Set(password_hash),
            role: Set(input.role.into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(user.insert(self.db.as_ref()).await?)
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(normalize_email(email)))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }

    /// Maps each sales account's email to its ID, for resolving imported
    /// sales rep emails.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn sales_rep_directory(&self) -> Result<HashMap<String, UserId>, DbErr> {
        let reps = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Sales))
            .all(self.db.as_ref())
            .await?;

        Ok(reps
            .into_iter()
            .map(|u| (normalize_email(&u.email), UserId::new(u.id)))
            .collect())
    }
}

/// Trims and lowercases an email for storage and lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user(id: i64, email: &str, role: UserRole) -> users::Model {
        let at = DateTime::parse_from_rfc3339("2025-07-01T00:00:00+00:00").unwrap();
        users::Model {
            id,
            email: email.to_string(),
            full_name: format!("User {id}"),
            password_hash: "$argon2id$stub".to_string(),
            role,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jo.Rep@Forge.Test "), "jo.rep@forge.test");
    }

    #[tokio::test]
    async fn test_lookups() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user(2, "sales@forge.test", UserRole::Sales)]])
            .append_query_results([Vec::<users::Model>::new()])
            .append_query_results([vec![
                user(3, "director@forge.test", UserRole::Director),
                user(2, "sales@forge.test", UserRole::Sales),
            ]])
            .into_connection();
        let repo = UserRepository::new(db);

        let found = repo.find_by_id(UserId::new(2)).await.unwrap().unwrap();
        assert_eq!(found.role, UserRole::Sales);
        assert!(repo.find_by_id(UserId::new(9)).await.unwrap().is_none());

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].email, "director@forge.test");
    }

    #[tokio::test]
    async fn test_sales_rep_directory_normalizes_emails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                user(2, "Sales@Forge.Test", UserRole::Sales),
                user(5, "jo@forge.test", UserRole::Sales),
            ]])
            .into_connection();
        let repo = UserRepository::new(db);

        let directory = repo.sales_rep_directory().await.unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("sales@forge.test"), Some(&UserId::new(2)));
        assert_eq!(directory.get("jo@forge.test"), Some(&UserId::new(5)));
    }
}
