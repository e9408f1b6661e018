//! Application state shared across sessions.

use std::sync::Arc;

use quickbite_core::Catalog;

use crate::config::StorefrontConfig;
use crate::fixtures;

/// Application state shared across all sessions.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the restaurant catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// State backed by the mock catalog.
    #[must_use]
    pub fn with_fixtures(config: StorefrontConfig) -> Self {
        Self::new(config, fixtures::catalog())
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the restaurant catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("restaurants", &self.inner.catalog.restaurants().len())
            .finish()
    }
}
