//! Product catalog: records, storage, and read-side queries.

pub mod product;
pub mod query;
pub mod store;

pub use product::{NewProduct, Product, ProductPatch, ProductPayload, ProductValidationError};
pub use query::{filter_by_category, paginate, search, Page, PageParams, QueryError};
pub use store::{seed_products, CatalogError, CatalogStore, InMemoryCatalog};
