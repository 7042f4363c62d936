//! Catalog query HTTP handlers
//!
//! These drive the clinician's drill-down: generic list, then strength/form
//! options for a generic, then brand-level detail for an exact combination.

use axum::{Json, extract::State};
use rx_core::prescription::{DEFAULT_MEAL_TIME, DEFAULT_SCHEDULE};
use rx_core::price;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct GenericsResponse {
    pub generics: Vec<String>,
}

/// GET /api/generics - All generic display names
///
/// An empty list is valid and signals "no catalog loaded".
pub async fn generics(State(state): State<AppState>) -> Json<GenericsResponse> {
    let catalog = state.catalog().await;
    Json(GenericsResponse {
        generics: catalog.generics(),
    })
}

#[derive(Debug, Deserialize, Default)]
pub struct OptionsRequest {
    #[serde(default)]
    pub generic: String,
}

#[derive(Serialize)]
pub struct OptionsResponse {
    pub strengths: Vec<String>,
    pub types: Vec<String>,
}

/// POST /api/options - Strength and type options for a generic
///
/// A missing or empty generic yields empty lists, not an error.
pub async fn options(
    State(state): State<AppState>,
    Json(req): Json<OptionsRequest>,
) -> Json<OptionsResponse> {
    let catalog = state.catalog().await;
    let (strengths, types) = catalog.strengths_and_forms(&req.generic);
    Json(OptionsResponse { strengths, types })
}

#[derive(Debug, Deserialize, Default)]
pub struct DetailsRequest {
    #[serde(default)]
    pub generic: String,
    #[serde(default)]
    pub strength: String,
    #[serde(default, rename = "type")]
    pub form: String,
}

/// One brand-level candidate, pre-filled with the display defaults the
/// prescription form starts from.
#[derive(Serialize)]
pub struct DetailOption {
    pub generic: String,
    pub medicine_name: String,
    pub brand: String,
    /// Two-decimal display price.
    pub price: String,
    /// Canonical numeric price.
    pub price_raw: f64,
    pub strength: String,
    #[serde(rename = "type")]
    pub form: String,
    pub quantity: u32,
    pub time_schedule: String,
    pub meal_time: String,
}

#[derive(Serialize)]
pub struct DetailsResponse {
    pub options: Vec<DetailOption>,
}

/// POST /api/details - Brand options for an exact (generic, strength, type)
///
/// Zero matches is a 404, distinct from the empty-list responses above.
pub async fn details(
    State(state): State<AppState>,
    Json(req): Json<DetailsRequest>,
) -> Result<Json<DetailsResponse>, AppError> {
    let catalog = state.catalog().await;
    let options = catalog.brand_options(&req.generic, &req.strength, &req.form)?;

    let options = options
        .into_iter()
        .map(|o| DetailOption {
            generic: o.generic,
            medicine_name: o.name,
            brand: o.brand,
            price: price::display(o.price),
            price_raw: o.price,
            strength: o.strength,
            form: o.form,
            quantity: 1,
            time_schedule: DEFAULT_SCHEDULE.to_string(),
            meal_time: DEFAULT_MEAL_TIME.to_string(),
        })
        .collect();

    Ok(Json(DetailsResponse { options }))
}
