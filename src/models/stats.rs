//! Dashboard statistics derived from the tracked products.

use serde::Serialize;

use super::{ProductStatus, TrackerData};

/// The dashboard's stat cards: product count, total savings potential and
/// the number of price alerts (products whose price dropped to target).
#[derive(Debug, Clone, Serialize)]
pub struct TrackerStats {
    pub products_tracked: usize,
    pub total_savings: f64,
    pub alerts: usize,
}

impl TrackerStats {
    pub fn from_data(data: &TrackerData) -> Self {
        Self {
            products_tracked: data.products.len(),
            total_savings: data.products.iter().map(|p| p.savings()).sum(),
            alerts: data
                .products
                .iter()
                .filter(|p| p.status == ProductStatus::Dropped)
                .count(),
        }
    }
}
