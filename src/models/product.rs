//! Product model matching the persisted document shape.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Product names are truncated to this length at add time.
pub const MAX_NAME_LEN: usize = 50;

/// Tracking status, always derived from the current and target price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Tracking,
    Dropped,
}

impl ProductStatus {
    /// Derive the status from a price observation. `dropped` iff the
    /// current price is at or below the target.
    pub fn derive(current_price: f64, target_price: f64) -> Self {
        if current_price <= target_price {
            ProductStatus::Dropped
        } else {
            ProductStatus::Tracking
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Tracking => "tracking",
            ProductStatus::Dropped => "dropped",
        }
    }
}

/// A tracked product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub url: String,
    pub target_price: f64,
    pub current_price: f64,
    pub added_date: String,
    pub status: ProductStatus,
}

impl Product {
    /// Build a new product from a fetched title and price observation.
    ///
    /// The id is derived from the creation timestamp (seconds plus
    /// microseconds); collisions are treated as negligible, not prevented.
    pub fn new(
        title: &str,
        url: &str,
        target_price: f64,
        current_price: f64,
        added_at: DateTime<Local>,
    ) -> Self {
        Self {
            id: format!(
                "{}.{:06}",
                added_at.timestamp(),
                added_at.timestamp_subsec_micros() % 1_000_000
            ),
            name: title.chars().take(MAX_NAME_LEN).collect(),
            url: url.to_string(),
            target_price,
            current_price,
            added_date: added_at.format("%Y-%m-%d %H:%M").to_string(),
            status: ProductStatus::derive(current_price, target_price),
        }
    }

    /// Record a new price observation, overwriting the current price and
    /// recomputing the status.
    pub fn observe_price(&mut self, price: f64) {
        self.current_price = price;
        self.status = ProductStatus::derive(price, self.target_price);
    }

    /// Amount saved versus the target, floored at zero.
    pub fn savings(&self) -> f64 {
        (self.target_price - self.current_price).max(0.0)
    }

    /// Discount relative to the target price, in percent. The add flow
    /// enforces target_price > 0 and no flow can change it afterwards.
    pub fn discount_percent(&self) -> f64 {
        (self.target_price - self.current_price) / self.target_price * 100.0
    }
}

/// Request body for adding a product to track.
#[derive(Debug, Clone, Deserialize)]
pub struct AddProductRequest {
    pub url: String,
    pub target_price: f64,
}

/// Product as returned by the API: the stored record plus derived values.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub url: String,
    pub target_price: f64,
    pub current_price: f64,
    pub added_date: String,
    pub status: ProductStatus,
    pub savings: f64,
    pub discount_percent: f64,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            url: product.url.clone(),
            target_price: product.target_price,
            current_price: product.current_price,
            added_date: product.added_date.clone(),
            status: product.status,
            savings: product.savings(),
            discount_percent: product.discount_percent(),
        }
    }
}

/// Response body for a successful add, including whether the price is
/// already at or below the target.
#[derive(Debug, Clone, Serialize)]
pub struct AddProductResponse {
    pub product: ProductSummary,
    pub price_dropped: bool,
}
