//! Demo dataset loading.
//!
//! The dataset is a JSON fixture deserialized through the same types the API
//! serves. Seed files carry plaintext demo passwords; they are hashed with
//! Argon2 while building the [`Dataset`] and never kept around.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use marketdeck_core::{Email, Role, UserId};

use crate::models::{Order, Product, Profile, User};
use crate::services::auth::{self, AuthError};

use super::{Analytics, Dataset};

/// The embedded demo fixture.
pub const DEMO_SEED_JSON: &str = include_str!("seed.json");

/// Errors loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to hash seed password: {0}")]
    Hash(#[from] AuthError),
    #[error("seed user {email} has neither password nor password_hash")]
    MissingPassword { email: Email },
}

/// On-disk seed file shape: users carry either a plaintext demo `password`
/// (hashed at load) or a pre-computed `password_hash` (see
/// `mdk-cli hash-password`).
#[derive(Debug, Deserialize)]
struct SeedFile {
    users: Vec<SeedUser>,
    products: Vec<Product>,
    orders: Vec<Order>,
    analytics: Analytics,
}

#[derive(Debug, Deserialize)]
struct SeedUser {
    id: UserId,
    email: Email,
    password: Option<String>,
    password_hash: Option<String>,
    name: String,
    role: Role,
    #[serde(flatten)]
    profile: Profile,
}

/// Load the embedded demo dataset.
///
/// # Panics
///
/// Panics if the embedded fixture is malformed; that is a build defect, not
/// a runtime condition.
#[must_use]
pub fn demo() -> Dataset {
    let file = serde_json::from_str(DEMO_SEED_JSON).expect("embedded seed fixture parses");
    build(file).expect("embedded seed passwords hash")
}

/// Load a dataset from a JSON seed file.
///
/// # Errors
///
/// Returns `SeedError` if the file cannot be read, parsed, or its passwords
/// hashed.
pub fn from_path(path: &Path) -> Result<Dataset, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_owned(),
        source,
    })?;
    build(serde_json::from_str(&raw)?)
}

fn build(file: SeedFile) -> Result<Dataset, SeedError> {
    let users = file
        .users
        .into_iter()
        .map(|u| {
            let password_hash = match (u.password_hash, u.password) {
                (Some(hash), _) => hash,
                (None, Some(password)) => auth::hash_password(&password)?,
                (None, None) => {
                    return Err(SeedError::MissingPassword { email: u.email });
                }
            };
            Ok(User {
                id: u.id,
                email: u.email,
                password_hash,
                name: u.name,
                role: u.role,
                profile: u.profile,
            })
        })
        .collect::<Result<Vec<_>, SeedError>>()?;

    Ok(Dataset {
        users,
        products: file.products,
        orders: file.orders,
        analytics: file.analytics,
    })
}
