//! JSON-file store module.
//!
//! The single JSON document on disk is the source of truth for all
//! application data; every mutation is a load-mutate-save cycle.

use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::{HistoryEntry, Product, TrackerData, TrackerStats};

/// Store for the tracked-products document.
///
/// Operations serialize on an internal mutex so two concurrent handlers
/// cannot interleave their read-modify-write cycles.
pub struct Store {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Store {
    /// Create a store backed by the document at `path`. The file itself is
    /// created lazily on first save; a missing file reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Load the full document. A missing backing file yields the empty
    /// document and never fails.
    pub async fn load(&self) -> Result<TrackerData, AppError> {
        let _guard = self.lock.lock().await;
        self.read_document().await
    }

    /// Persist the full document, replacing whatever is stored.
    pub async fn save(&self, data: &TrackerData) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        self.write_document(data).await
    }

    /// List all tracked products, newest first.
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.load().await?.products)
    }

    /// Get a product by id.
    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, AppError> {
        Ok(self.load().await?.products.into_iter().find(|p| p.id == id))
    }

    /// Get the price history for a product id. Unknown ids yield an empty
    /// list; ids whose product was deleted may still yield entries.
    pub async fn get_history(&self, id: &str) -> Result<Vec<HistoryEntry>, AppError> {
        Ok(self.load().await?.history.remove(id).unwrap_or_default())
    }

    /// Compute the dashboard stats from the current document.
    pub async fn get_stats(&self) -> Result<TrackerStats, AppError> {
        Ok(TrackerStats::from_data(&self.load().await?))
    }

    /// Insert a newly tracked product at the front of the list, together
    /// with its first history entry.
    pub async fn add_product(
        &self,
        product: Product,
        first_entry: HistoryEntry,
    ) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut data = self.read_document().await?;
        data.history.insert(product.id.clone(), vec![first_entry]);
        data.products.insert(0, product);
        self.write_document(&data).await
    }

    /// Record a fresh price observation: overwrite the product's current
    /// price, recompute its status and append one history entry.
    pub async fn record_price(
        &self,
        id: &str,
        entry: HistoryEntry,
    ) -> Result<Product, AppError> {
        let _guard = self.lock.lock().await;
        let mut data = self.read_document().await?;

        let product = data
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        product.observe_price(entry.price);
        let updated = product.clone();

        data.history.entry(id.to_string()).or_default().push(entry);

        self.write_document(&data).await?;
        Ok(updated)
    }

    /// Delete a product from the tracked list. Its history entries are
    /// deliberately left in place (see DESIGN.md).
    pub async fn delete_product(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut data = self.read_document().await?;

        let before = data.products.len();
        data.products.retain(|p| p.id != id);
        if data.products.len() == before {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        self.write_document(&data).await
    }

    async fn read_document(&self) -> Result<TrackerData, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(TrackerData::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Write to a sibling temp file, then rename over the target, so a
    /// crash mid-write cannot leave a truncated document behind.
    async fn write_document(&self, data: &TrackerData) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
        }

        let bytes = serde_json::to_vec_pretty(data)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}
