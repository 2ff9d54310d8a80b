//! Credential commands.

use marketdeck_api::services::auth;

/// Print the Argon2 hash of `password`.
///
/// Seed files may carry a `password_hash` instead of a plaintext demo
/// `password`; this generates one.
pub fn hash(password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let hash = auth::hash_password(password)?;
    println!("{hash}");
    Ok(())
}
