//! User roles and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - User role definitions and their capabilities

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use serde::{Deserialize, Serialize};

/// Account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Logs orders; sees own orders and the sales dashboard.
    Sales,
    /// Logs build batches; sees the production dashboard.
    Production,
    /// Administers users and settings; sees everything.
    Director,
}

impl UserRole {
    /// All roles, in display order.
    pub const ALL: [Self; 3] = [Self::Sales, Self::Production, Self::Director];

    /// Returns the lowercase role name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Production => "production",
            Self::Director => "director",
        }
    }

    /// Returns true if this role can modify settings.
    #[must_use]
    pub const fn can_manage_settings(&self) -> bool {
        matches!(self, Self::Director)
    }

    /// Returns true if this role can create and remove accounts.
    #[must_use]
    pub const fn can_manage_users(&self) -> bool {
        matches!(self, Self::Director)
    }

    /// Returns true if this role can delete orders and batches.
    #[must_use]
    pub const fn can_delete_records(&self) -> bool {
        matches!(self, Self::Director)
    }

    /// Returns true if this role can see the sales dashboard.
    #[must_use]
    pub const fn can_view_sales(&self) -> bool {
        matches!(self, Self::Sales | Self::Director)
    }

    /// Returns true if this role can see the production dashboard.
    #[must_use]
    pub const fn can_view_production(&self) -> bool {
        matches!(self, Self::Production | Self::Director)
    }

    /// Returns true if this role may write the dashboard note of `note_role`.
    #[must_use]
    pub fn can_annotate(&self, note_role: Self) -> bool {
        *self == Self::Director || *self == note_role
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sales" => Ok(Self::Sales),
            "production" => Ok(Self::Production),
            "director" => Ok(Self::Director),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::Director.can_manage_settings());
        assert!(!UserRole::Sales.can_manage_settings());
        assert!(!UserRole::Production.can_manage_users());
        assert!(UserRole::Director.can_delete_records());
        assert!(!UserRole::Sales.can_delete_records());

        assert!(UserRole::Sales.can_view_sales());
        assert!(!UserRole::Sales.can_view_production());
        assert!(UserRole::Production.can_view_production());
        assert!(!UserRole::Production.can_view_sales());
        assert!(UserRole::Director.can_view_sales());
        assert!(UserRole::Director.can_view_production());
    }

    #[test]
    fn test_annotation_rights() {
        assert!(UserRole::Sales.can_annotate(UserRole::Sales));
        assert!(!UserRole::Sales.can_annotate(UserRole::Production));
        for role in UserRole::ALL {
            assert!(UserRole::Director.can_annotate(role));
        }
    }

    #[test]
    fn test_role_round_trip() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::from_str(&role.to_string()).unwrap(), role);
        }
        assert_eq!(UserRole::from_str(" Sales ").unwrap(), UserRole::Sales);
        assert!(UserRole::from_str("owner").is_err());
    }
}
