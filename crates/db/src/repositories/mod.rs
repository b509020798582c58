//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod dashboard;
pub mod error;
pub mod import;
pub mod note;
pub mod order;
pub mod production;
pub mod settings;
pub mod user;

pub use dashboard::{DashboardRepoError, DashboardRepository};
pub use error::RecordError;
pub use import::{ImportRepository, ImportRunError};
pub use note::NoteRepository;
pub use order::OrderRepository;
pub use production::ProductionRepository;
pub use settings::{SettingsRepoError, SettingsRepository};
pub use user::{CreateUserInput, UserError, UserRepository};
