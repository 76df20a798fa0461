//! The user directory.
//!
//! Resolves who a caller is and which role they act under. There is no
//! credential check here; identity comes from the caller.

use std::collections::HashSet;

use tracing::debug;
use washflow_core::error::{DomainError, DomainResult};
use washflow_core::role::Role;

use crate::application::catalog::Catalog;
use crate::application::seed;
use crate::domain::definitions::CatalogDefinition;
use crate::domain::entities::User;

/// Read-only registry of users.
#[derive(Debug, Clone)]
pub struct Directory {
    users: Vec<User>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Directory {
    /// Builds a directory, checking that ids and emails are unique and that
    /// every partner user works for a partner in `catalog`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on any violated constraint.
    pub fn new(users: Vec<User>, catalog: &Catalog) -> DomainResult<Self> {
        let mut ids = HashSet::new();
        let mut emails = HashSet::new();
        for user in &users {
            if !ids.insert(user.id.as_str()) {
                return Err(DomainError::validation(format!(
                    "duplicate user id {}",
                    user.id
                )));
            }
            if !emails.insert(normalize_email(&user.email)) {
                return Err(DomainError::validation(format!(
                    "duplicate user email {}",
                    user.email
                )));
            }
            if let Role::Partner { partner_id } = &user.role {
                if catalog.partner(partner_id).is_none() {
                    return Err(DomainError::validation(format!(
                        "user {} works for unknown partner {partner_id}",
                        user.id
                    )));
                }
            }
        }
        Ok(Self { users })
    }

    /// Builds the directory for a catalog file. Files without a `users`
    /// section get the built-in users.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the users do not fit `catalog`.
    pub fn from_definition(definition: &CatalogDefinition, catalog: &Catalog) -> DomainResult<Self> {
        let users = if definition.users.is_empty() {
            seed::users()
        } else {
            definition.users.clone()
        };
        let directory = Self::new(users, catalog)?;
        debug!(users = directory.users.len(), "directory built");
        Ok(directory)
    }

    /// The standard directory, matching `Catalog::builtin`.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            users: seed::users(),
        }
    }

    /// Looks up a user by login email, ignoring case and surrounding spaces.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no user has that email.
    pub fn find_by_email(&self, email: &str) -> DomainResult<&User> {
        let wanted = normalize_email(email);
        let user = self
            .users
            .iter()
            .find(|u| normalize_email(&u.email) == wanted)
            .ok_or_else(|| DomainError::not_found(format!("user with email {}", email.trim())))?;
        debug!(user_id = %user.id, role = user.role.as_str(), "resolved user by email");
        Ok(user)
    }

    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no user has that id.
    pub fn find_by_id(&self, user_id: &str) -> DomainResult<&User> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DomainError::not_found(format!("user {user_id}")))
    }

    /// All users, in directory order.
    #[must_use]
    pub fn list_users(&self) -> &[User] {
        &self.users
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::builtin()
    }
}
