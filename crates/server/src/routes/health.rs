//! Health check endpoint

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    medicines: usize,
}

/// GET /health - Report catalog availability
///
/// An empty catalog is a degraded state, not an outage, so the status
/// stays 200 with `"degraded"` in the body.
pub async fn check(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog().await;
    let status = if catalog.is_empty() { "degraded" } else { "ok" };

    Json(HealthResponse {
        status: status.to_string(),
        medicines: catalog.len(),
    })
}
