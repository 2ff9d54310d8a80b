//! User accessors.

use marketdeck_core::{Email, Role, UserId};

use crate::models::User;

use super::{Store, StoreError};

/// Read access to user records.
pub struct UserStore<'a> {
    store: &'a Store,
}

impl<'a> UserStore<'a> {
    pub(super) const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Look up a user by role and email.
    ///
    /// The role is part of the lookup key: the same email under a different
    /// role does not match.
    #[must_use]
    pub fn find_by_role_and_email(&self, role: Role, email: &Email) -> Option<User> {
        self.store
            .read()
            .users
            .iter()
            .find(|u| u.role == role && u.email == *email)
            .cloned()
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` if no user has this ID.
    pub fn get(&self, id: UserId) -> Result<User, StoreError> {
        self.store
            .read()
            .user(id)
            .cloned()
            .ok_or(StoreError::UserNotFound(id))
    }

    /// All users.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.store.read().users.clone()
    }

    /// Total number of users.
    #[must_use]
    pub fn count(&self) -> usize {
        self.store.read().users.len()
    }

    /// Number of users with the given role.
    #[must_use]
    pub fn count_by_role(&self, role: Role) -> usize {
        self.store
            .read()
            .users
            .iter()
            .filter(|u| u.role == role)
            .count()
    }
}
