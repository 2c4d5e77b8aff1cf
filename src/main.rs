//! Smart Price Tracker Backend
//!
//! A REST backend that scrapes product pages for prices, persists tracked
//! products and their price history in a single JSON document, and flags
//! products whose price dropped to the user's target.

mod api;
mod config;
mod errors;
mod fetch;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use fetch::PriceFetcher;
use store::Store;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub fetcher: Arc<PriceFetcher>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Smart Price Tracker Backend");
    tracing::info!("Data path: {:?}", config.data_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize the store and report what it holds
    let store = Arc::new(Store::new(&config.data_path));
    let data = store.load().await?;
    tracing::info!(
        "Store loaded: {} tracked products, {} history lists",
        data.products.len(),
        data.history.len()
    );

    // Initialize the price fetcher
    let fetcher = Arc::new(PriceFetcher::new()?);

    // Create application state
    let state = AppState {
        store,
        fetcher,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Datastore
        .route("/datastore", get(api::get_datastore))
        // Stats
        .route("/stats", get(api::get_stats))
        // Products
        .route("/products", get(api::list_products))
        .route("/products", post(api::add_product))
        .route("/products/{id}", get(api::get_product))
        .route("/products/{id}", delete(api::delete_product))
        .route("/products/{id}/refresh", post(api::refresh_price))
        .route("/products/{id}/history", get(api::get_history));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
