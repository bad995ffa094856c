//! Catalog storage.
//!
//! [`CatalogStore`] is the seam handlers depend on. [`InMemoryCatalog`] is the
//! only production implementation: an ordered `Vec<Product>` behind a
//! `RwLock`, so writers are exclusive and readers take snapshots.

use std::sync::{PoisonError, RwLock};

use serde_json::Map;
use uuid::Uuid;

use super::product::{NewProduct, Product, ProductPatch};

/// Error types for catalog operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(String),
    #[error("catalog storage unavailable")]
    Unavailable,
}

impl<T> From<PoisonError<T>> for CatalogError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Unavailable
    }
}

/// Storage operations over the product catalog.
///
/// Insertion order is iteration order, and ids are unique across the catalog.
pub trait CatalogStore: Send + Sync {
    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unavailable` if the storage cannot be read.
    fn find_by_id(&self, id: &str) -> Result<Option<Product>, CatalogError>;

    /// Assign a fresh id to `product` and append it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unavailable` if the storage cannot be written.
    fn insert(&self, product: NewProduct) -> Result<Product, CatalogError>;

    /// Merge `patch` into the product with the given id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this id.
    fn update(&self, id: &str, patch: ProductPatch) -> Result<Product, CatalogError>;

    /// Remove the product with the given id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this id.
    fn delete(&self, id: &str) -> Result<(), CatalogError>;

    /// A fresh copy of every product, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unavailable` if the storage cannot be read.
    fn list(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Process-lifetime catalog held in memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding `products` in the given order.
    #[must_use]
    pub const fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    /// A catalog holding the sample products served at startup.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_products(seed_products())
    }
}

impl CatalogStore for InMemoryCatalog {
    fn find_by_id(&self, id: &str) -> Result<Option<Product>, CatalogError> {
        let products = self.products.read()?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    fn insert(&self, product: NewProduct) -> Result<Product, CatalogError> {
        let mut products = self.products.write()?;
        let mut id = Uuid::new_v4().to_string();
        while products.iter().any(|p| p.id == id) {
            id = Uuid::new_v4().to_string();
        }
        let product = product.with_id(id);
        products.push(product.clone());
        Ok(product)
    }

    fn update(&self, id: &str, patch: ProductPatch) -> Result<Product, CatalogError> {
        let mut products = self.products.write()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        product.apply(patch);
        Ok(product.clone())
    }

    fn delete(&self, id: &str) -> Result<(), CatalogError> {
        let mut products = self.products.write()?;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        products.remove(index);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.read()?.clone())
    }
}

/// The three sample products the service starts with.
#[must_use]
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Laptop".to_string(),
            description: "High-performance laptop for professionals".to_string(),
            price: 1299.99,
            category: "Electronics".to_string(),
            in_stock: true,
            extra: Map::new(),
        },
        Product {
            id: "2".to_string(),
            name: "Wireless Mouse".to_string(),
            description: "Ergonomic mouse that pairs with any laptop".to_string(),
            price: 29.99,
            category: "Electronics".to_string(),
            in_stock: true,
            extra: Map::new(),
        },
        Product {
            id: "3".to_string(),
            name: "Standing Desk".to_string(),
            description: "Adjustable height desk with memory presets".to_string(),
            price: 499.00,
            category: "Furniture".to_string(),
            in_stock: false,
            extra: Map::new(),
        },
    ]
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Store doubles for exercising the error paths of the HTTP layer.

    use super::{CatalogError, CatalogStore, NewProduct, Product, ProductPatch};

    /// Store whose every operation reports unavailable storage.
    #[derive(Debug, Default)]
    pub struct FailingCatalog;

    impl CatalogStore for FailingCatalog {
        fn find_by_id(&self, _id: &str) -> Result<Option<Product>, CatalogError> {
            Err(CatalogError::Unavailable)
        }

        fn insert(&self, _product: NewProduct) -> Result<Product, CatalogError> {
            Err(CatalogError::Unavailable)
        }

        fn update(&self, _id: &str, _patch: ProductPatch) -> Result<Product, CatalogError> {
            Err(CatalogError::Unavailable)
        }

        fn delete(&self, _id: &str) -> Result<(), CatalogError> {
            Err(CatalogError::Unavailable)
        }

        fn list(&self) -> Result<Vec<Product>, CatalogError> {
            Err(CatalogError::Unavailable)
        }
    }

    /// Store that panics on every operation.
    #[derive(Debug, Default)]
    pub struct PanickingCatalog;

    #[allow(clippy::panic)]
    impl CatalogStore for PanickingCatalog {
        fn find_by_id(&self, _id: &str) -> Result<Option<Product>, CatalogError> {
            panic!("catalog exploded at /srv/secret/path")
        }

        fn insert(&self, _product: NewProduct) -> Result<Product, CatalogError> {
            panic!("catalog exploded at /srv/secret/path")
        }

        fn update(&self, _id: &str, _patch: ProductPatch) -> Result<Product, CatalogError> {
            panic!("catalog exploded at /srv/secret/path")
        }

        fn delete(&self, _id: &str) -> Result<(), CatalogError> {
            panic!("catalog exploded at /srv/secret/path")
        }

        fn list(&self) -> Result<Vec<Product>, CatalogError> {
            panic!("catalog exploded at /srv/secret/path")
        }
    }
}
