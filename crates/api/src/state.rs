//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::{Store, seed};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the seeded
/// in-memory store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    store: Store,
}

impl AppState {
    /// Create application state, loading the dataset.
    ///
    /// The embedded demo fixture is used unless the configuration points at
    /// a seed file.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if a configured seed file cannot be loaded.
    pub fn new(config: AppConfig) -> Result<Self, seed::SeedError> {
        let dataset = match &config.seed_path {
            Some(path) => seed::from_path(path)?,
            None => seed::demo(),
        };

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store: Store::new(dataset),
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }
}
