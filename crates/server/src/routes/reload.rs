//! Catalog reload endpoint

use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::AppError;
use crate::loader;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ReloadResponse {
    pub loaded: usize,
}

/// POST /admin/reload - Rebuild the catalog from the snapshot file
///
/// The new index is built completely before the swap; on failure the old
/// catalog keeps serving and the caller gets a 503.
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let index = loader::load_catalog(&state.data_file)?;
    let loaded = state.swap_catalog(index).await;
    tracing::info!(medicines = loaded, "Catalog reloaded");

    Ok(Json(ReloadResponse { loaded }))
}
