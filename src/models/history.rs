//! Price history entry model.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single observed price for a product, appended per product id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub price: f64,
    pub date: String,
}

impl HistoryEntry {
    /// Entry for a price observed at the given time (second precision).
    pub fn observed_at(price: f64, at: DateTime<Local>) -> Self {
        Self {
            price,
            date: at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
