//! The persisted document: all tracked products and their price history.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{HistoryEntry, Product};

/// Root document stored as a single JSON file,
/// shape `{"products": [...], "history": {id: [...]}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerData {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub history: HashMap<String, Vec<HistoryEntry>>,
}
