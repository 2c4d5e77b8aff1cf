//! Stats API endpoint.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::TrackerStats;
use crate::AppState;

/// GET /api/stats - Dashboard stat cards: products tracked, total savings
/// potential and the number of price alerts.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<TrackerStats> {
    success(state.store.get_stats().await?)
}
