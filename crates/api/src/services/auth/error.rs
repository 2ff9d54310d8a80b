//! Authentication errors.

use thiserror::Error;

use marketdeck_core::EmailError;

use crate::store::StoreError;

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user matches the role/email/password triple.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The submitted email is not structurally valid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Store lookup failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
