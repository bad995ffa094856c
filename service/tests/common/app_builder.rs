//! Test app builder that mirrors main.rs wiring with injectable stores.
//!
//! ```ignore
//! let catalog = Arc::new(InMemoryCatalog::seeded());
//! let app = TestAppBuilder::new().with_store(catalog.clone()).build();
//! // app.oneshot(...), then inspect `catalog` directly
//! ```

use std::sync::Arc;

use axum::{http::HeaderName, Router};
use catalog_api::{
    app::build_app,
    catalog::{
        store::mock::{FailingCatalog, PanickingCatalog},
        CatalogStore, InMemoryCatalog,
    },
    http::ApiKeyGate,
};

use super::{API_KEY, API_KEY_HEADER};

/// Builder for test applications.
///
/// Defaults to an empty in-memory catalog guarded by `x-api-key: secret123`,
/// the same values main.rs uses out of the box.
pub struct TestAppBuilder {
    store: Option<Arc<dyn CatalogStore>>,
    header: &'static str,
    secret: &'static str,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            header: API_KEY_HEADER,
            secret: API_KEY,
        }
    }

    // =========================================================================
    // Preset Builders
    // =========================================================================

    /// The three sample products.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new().with_store(Arc::new(InMemoryCatalog::seeded()))
    }

    /// A store whose every call fails.
    #[must_use]
    pub fn failing() -> Self {
        Self::new().with_store(Arc::new(FailingCatalog))
    }

    /// A store whose every call panics.
    #[must_use]
    pub fn panicking() -> Self {
        Self::new().with_store(Arc::new(PanickingCatalog))
    }

    // =========================================================================
    // Component Configuration
    // =========================================================================

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn CatalogStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, header: &'static str, secret: &'static str) -> Self {
        self.header = header;
        self.secret = secret;
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    #[must_use]
    pub fn build(self) -> Router {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryCatalog::new()));
        let gate = ApiKeyGate::new(HeaderName::from_static(self.header), self.secret);
        build_app(store, gate)
    }
}
