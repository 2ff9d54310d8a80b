//! Authentication service.
//!
//! Logins are a role/email/password triple: the role selects which account
//! namespace the email is looked up in, and the password is verified against
//! the stored Argon2 hash.

mod error;

pub use error::AuthError;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use marketdeck_core::{Email, Role};

use crate::models::User;
use crate::store::{Store, users::UserStore};

/// Authentication service.
pub struct AuthService<'a> {
    users: UserStore<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            users: store.users(),
        }
    }

    /// Login with role, email, and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed and
    /// `AuthError::InvalidCredentials` if the triple doesn't match a user.
    pub fn login(&self, role: Role, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let user = self
            .users
            .find_by_role_and_email(role, &email)
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        Ok(user)
    }
}

/// Hash a password using Argon2id.
///
/// Cost parameters are sized for the demo dataset (hashed at startup), well
/// below the interactive-login defaults.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    demo_hasher()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a PHC-format hash.
///
/// The hash string carries its own cost parameters, so this works for hashes
/// produced with any settings.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the hash is malformed or the
/// password doesn't match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Argon2id with demo-scale cost (4 MiB, 3 passes).
fn demo_hasher() -> Argon2<'static> {
    let params = Params::new(4096, 3, 1, None).expect("argon2 params (4096, 3, 1) are valid");
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::seed;

    #[test]
    fn test_hash_verify_roundtrip() {
        let hash = hash_password("customer123").unwrap();
        assert!(verify_password("customer123", &hash).is_ok());
        assert!(matches!(
            verify_password("customer124", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_valid_triple() {
        let store = Store::new(seed::demo());
        let auth = AuthService::new(&store);

        let user = auth
            .login(Role::Customer, "customer1@marketdeck.dev", "customer123")
            .unwrap();
        assert_eq!(user.name, "John Smith");
    }

    #[test]
    fn test_login_wrong_password() {
        let store = Store::new(seed::demo());
        let auth = AuthService::new(&store);

        assert!(matches!(
            auth.login(Role::Customer, "customer1@marketdeck.dev", "nope"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_role_mismatch() {
        let store = Store::new(seed::demo());
        let auth = AuthService::new(&store);

        // Valid credentials under the customer role, submitted as supplier.
        assert!(matches!(
            auth.login(Role::Supplier, "customer1@marketdeck.dev", "customer123"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_invalid_email() {
        let store = Store::new(seed::demo());
        let auth = AuthService::new(&store);

        assert!(matches!(
            auth.login(Role::Customer, "not-an-email", "customer123"),
            Err(AuthError::InvalidEmail(_))
        ));
    }
}
