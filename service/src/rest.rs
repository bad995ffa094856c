//! REST handlers, the route table, and `OpenAPI` documentation.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    IntoParams, Modify, OpenApi,
};

use crate::catalog::{
    filter_by_category, paginate, search, CatalogStore, NewProduct, Page, PageParams, Product,
    ProductPatch, ProductPayload,
};
use crate::error::{AppError, ErrorBody, ErrorDetail};
use crate::http::{ApiQuery, JsonBody};

pub const GREETING: &str = "Welcome to the Product Catalog API";

/// Query parameters for `GET /api/products`.
///
/// Numeric values are taken as strings so that garbage falls back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Case-insensitive exact category match
    pub category: Option<String>,
    /// Page number, default 1
    pub page: Option<String>,
    /// Page size, default 10
    pub limit: Option<String>,
}

/// Query parameters for `GET /api/products/search`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring matched against name and description, ignoring case
    pub q: Option<String>,
}

/// Product routes, relative to the `/api/products` prefix and without
/// authentication.
///
/// `/search` is a static segment, so it always wins over the `{id}` capture
/// regardless of registration order. Unknown paths and methods under the
/// prefix get the error envelope from this router's own fallbacks.
pub fn product_routes() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
}

#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn root() -> &'static str {
    GREETING
}

#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Fallback for paths outside the route table.
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn route_not_found() -> AppError {
    AppError::not_found("Route not found")
}

/// Fallback for a known path hit with an unsupported method.
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed("Method not allowed")
}

/// List products
///
/// Optionally filtered by category, then paginated.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(ListParams),
    security(("api_key" = [])),
    responses(
        (status = 200, description = "One page of products", body = Page<Product>),
        (status = 401, description = "Missing or wrong API key")
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn list_products(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Page<Product>>, AppError> {
    let mut items = store.list()?;
    if let Some(category) = params.category.as_deref() {
        items = filter_by_category(items, category);
    }
    let page = PageParams::from_raw(params.page.as_deref(), params.limit.as_deref());
    Ok(Json(paginate(items, page)))
}

/// Search products
///
/// Returns every product whose name or description contains `q`.
#[utoipa::path(
    get,
    path = "/api/products/search",
    tag = "Products",
    params(SearchParams),
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 400, description = "Missing `q`", body = ErrorBody),
        (status = 401, description = "Missing or wrong API key")
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn search_products(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<Vec<Product>>, AppError> {
    let found = search(store.list()?, params.q.as_deref())?;
    Ok(Json(found))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id")),
    security(("api_key" = [])),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "No product with this id", body = ErrorBody),
        (status = 401, description = "Missing or wrong API key")
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn get_product(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    store
        .find_by_id(&id)?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Product not found"))
}

/// Create a product
///
/// `name` and `price` are required; any extra fields are stored as given.
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductPayload,
    security(("api_key" = [])),
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing fields or malformed body", body = ErrorBody),
        (status = 401, description = "Missing or wrong API key")
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn create_product(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let product = store.insert(NewProduct::try_from(payload)?)?;
    tracing::info!(id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
///
/// Only the fields present in the body change; the id never does.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductPayload,
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 404, description = "No product with this id", body = ErrorBody),
        (status = 401, description = "Missing or wrong API key")
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn update_product(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<ProductPatch>,
) -> Result<Json<Product>, AppError> {
    let product = store.update(&id, patch)?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id")),
    security(("api_key" = [])),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "No product with this id", body = ErrorBody),
        (status = 401, description = "Missing or wrong API key")
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn delete_product(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    store.delete(&id)?;
    tracing::info!(id = %id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Registers the `api_key` header scheme referenced by the product routes.
struct ApiKeyScheme<'a> {
    header: &'a str,
}

impl Modify for ApiKeyScheme<'_> {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(self.header))),
        );
    }
}

/// The `OpenAPI` document for a service whose key travels in `header`.
#[must_use]
pub fn api_doc(header: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    ApiKeyScheme { header }.modify(&mut doc);
    doc
}

/// `OpenAPI` documentation for the REST API.
///
/// The `api_key` scheme depends on configuration, so use [`api_doc`] for the
/// complete document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        version = "1.0.0",
        description = "CRUD and query operations over an in-memory product catalog",
        license(name = "MIT")
    ),
    paths(
        list_products,
        search_products,
        get_product,
        create_product,
        update_product,
        delete_product
    ),
    components(schemas(Product, ProductPayload, ErrorBody, ErrorDetail))
)]
pub struct ApiDoc;

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_every_product_route() {
        let doc = api_doc("x-api-key");
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert!(paths.contains(&"/api/products".to_string()));
        assert!(paths.contains(&"/api/products/search".to_string()));
        assert!(paths.contains(&"/api/products/{id}".to_string()));
    }

    #[test]
    fn openapi_registers_configured_header() {
        let json = api_doc("x-catalog-token").to_json().expect("serialize");
        assert!(json.contains("\"api_key\""));
        assert!(json.contains("x-catalog-token"));
        assert!(!json.contains("x-api-key"));
    }
}
