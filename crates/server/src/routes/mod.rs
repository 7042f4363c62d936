mod catalog;
mod prescription;

pub mod health;
pub mod reload;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the catalog and prescription API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/generics", get(catalog::generics))
        .route("/options", post(catalog::options))
        .route("/details", post(catalog::details))
        .route("/prescriptions", post(prescription::build))
}
