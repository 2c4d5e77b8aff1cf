//! Datastore API endpoint.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::TrackerData;
use crate::AppState;

/// GET /api/datastore - Get the full persisted document.
pub async fn get_datastore(State(state): State<AppState>) -> ApiResult<TrackerData> {
    success(state.store.load().await?)
}
