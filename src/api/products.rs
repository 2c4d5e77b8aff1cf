//! Product API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Local;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    AddProductRequest, AddProductResponse, HistoryEntry, Product, ProductStatus, ProductSummary,
};
use crate::AppState;

/// The single user-visible fetch failure: network errors, layout changes
/// and unparseable prices all surface as this message.
const FETCH_FAILED_MSG: &str = "Could not fetch price. Check URL or try again later.";

/// GET /api/products - List all tracked products, newest first.
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<ProductSummary>> {
    let products = state.store.list_products().await?;
    success(products.iter().map(ProductSummary::from).collect())
}

/// GET /api/products/:id - Get a single tracked product.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductSummary> {
    match state.store.get_product(&id).await? {
        Some(product) => success(ProductSummary::from(&product)),
        None => Err(AppError::NotFound(format!("Product {} not found", id))),
    }
}

/// POST /api/products - Start tracking a product.
///
/// Fetches the page once; the product and its first history entry are only
/// written when a price was found, so a failed fetch mutates nothing.
pub async fn add_product(
    State(state): State<AppState>,
    Json(request): Json<AddProductRequest>,
) -> ApiResult<AddProductResponse> {
    // Validate required fields
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("Product URL is required".to_string()));
    }
    if !(request.target_price > 0.0) {
        return Err(AppError::Validation(
            "Target price must be greater than zero".to_string(),
        ));
    }

    let quote = state.fetcher.fetch(&request.url).await;
    let Some(price) = quote.price else {
        return Err(AppError::FetchFailed(FETCH_FAILED_MSG.to_string()));
    };

    let now = Local::now();
    let product = Product::new(&quote.title, &request.url, request.target_price, price, now);
    let entry = HistoryEntry::observed_at(price, now);

    let price_dropped = product.status == ProductStatus::Dropped;
    let summary = ProductSummary::from(&product);
    state.store.add_product(product, entry).await?;

    tracing::info!(
        id = %summary.id,
        name = %summary.name,
        price,
        price_dropped,
        "Tracking started"
    );

    success(AddProductResponse {
        product: summary,
        price_dropped,
    })
}

/// POST /api/products/:id/refresh - Re-fetch the current price.
pub async fn refresh_price(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductSummary> {
    let product = state
        .store
        .get_product(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

    let quote = state.fetcher.fetch(&product.url).await;
    let Some(price) = quote.price else {
        return Err(AppError::FetchFailed(FETCH_FAILED_MSG.to_string()));
    };

    let entry = HistoryEntry::observed_at(price, Local::now());
    let updated = state.store.record_price(&id, entry).await?;

    tracing::info!(id = %id, price, status = updated.status.as_str(), "Price updated");

    success(ProductSummary::from(&updated))
}

/// DELETE /api/products/:id - Stop tracking a product.
///
/// Removes the product from the tracked list only; its history entries
/// remain in the document (see DESIGN.md).
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.store.delete_product(&id).await?;
    tracing::info!(id = %id, "Product removed");
    success(())
}

/// GET /api/products/:id/history - Price history for a product id.
///
/// Never a 404: unknown ids yield an empty list, and ids whose product was
/// deleted still yield their orphaned entries.
pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<HistoryEntry>> {
    success(state.store.get_history(&id).await?)
}
