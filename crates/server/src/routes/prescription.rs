//! Prescription build HTTP handler

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use chrono::Local;
use rx_core::prescription::{self, LineInput, PatientInfo, PrescriberInfo, UNKNOWN_PATIENT};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/prescriptions request body.
///
/// Every field defaults; any client-supplied `total_cost` or per-line
/// subtotal is ignored and recomputed server-side.
#[derive(Debug, Deserialize, Default)]
pub struct BuildRequest {
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub reg_no: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub medicines: Vec<MedicineInput>,
    #[serde(default)]
    pub next_appointment: Option<String>,
}

/// One selected medicine as submitted by the client.
#[derive(Debug, Deserialize, Default)]
pub struct MedicineInput {
    #[serde(default, alias = "name")]
    pub medicine_name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub strength: String,
    #[serde(default, rename = "type")]
    pub form: String,
    /// Display price string, e.g. "5.00".
    #[serde(default)]
    pub price: Option<String>,
    /// Canonical numeric price, preferred over `price` when present.
    #[serde(default)]
    pub price_raw: Option<f64>,
    /// Accepted as a number or a numeric string; anything else zeroes the
    /// line downstream.
    #[serde(default)]
    pub quantity: Option<Quantity>,
    #[serde(default)]
    pub time_schedule: Option<String>,
    #[serde(default)]
    pub meal_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(i64),
    Float(f64),
    Text(String),
}

impl Quantity {
    /// Anything that is not a whole number becomes 0, which the cost
    /// calculator flags; the line is retained either way.
    fn as_i64(&self) -> i64 {
        match self {
            Quantity::Number(n) => *n,
            Quantity::Float(f) if f.fract() == 0.0 && f.is_finite() => *f as i64,
            Quantity::Float(_) => 0,
            Quantity::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

impl MedicineInput {
    fn into_line(self) -> LineInput {
        let raw_price = match (self.price_raw, self.price) {
            (Some(raw), _) => raw.to_string(),
            (None, Some(price)) => price,
            (None, None) => String::new(),
        };

        LineInput {
            name: self.medicine_name,
            brand: self.brand,
            strength: self.strength,
            form: self.form,
            raw_price,
            // The form pre-fills quantity 1; only an explicit bad value
            // should zero the line.
            quantity: self.quantity.map(|q| q.as_i64()).unwrap_or(1),
            time_schedule: self.time_schedule,
            meal_time: self.meal_time,
        }
    }
}

/// POST /api/prescriptions - Assemble, render, and return the document
///
/// The response is the rendered file with an attachment disposition; the
/// filename derives deterministically from the patient name.
pub async fn build(
    State(state): State<AppState>,
    Json(req): Json<BuildRequest>,
) -> Result<Response, AppError> {
    let patient = PatientInfo {
        name: req.patient_name,
        age: req.age,
        sex: req.sex,
        id: req.patient_id,
    };
    let prescriber = PrescriberInfo {
        name: req.doctor_name,
        specialization: req.specialization,
        reg_no: req.reg_no,
        phone: req.phone,
    };
    let lines: Vec<LineInput> = req.medicines.into_iter().map(|m| m.into_line()).collect();

    let doc = prescription::assemble(
        patient,
        prescriber,
        lines,
        req.next_appointment,
        Local::now().date_naive(),
    );

    for line in doc.lines.iter().filter(|l| l.flagged) {
        tracing::warn!(
            medicine = %line.name,
            quantity = line.quantity,
            "Zeroed prescription line with malformed price or quantity"
        );
    }

    let rendered = state.renderer.render(&doc)?;

    if let Some(archive) = &state.archive {
        // Archival is best-effort; the clinician still gets their document.
        if let Err(e) = archive.store(&doc, &rendered) {
            tracing::error!(error = %e, document = %doc.id, "Failed to archive prescription");
        }
    }

    let filename = download_filename(&doc.patient_name, state.renderer.file_extension());
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(state.renderer.content_type()),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
            .map_err(|e| AppError::Internal(format!("Invalid download filename: {}", e)))?,
    );

    Ok((headers, rendered).into_response())
}

/// Deterministic download name: sanitized patient name, or a fixed default
/// for the unknown-patient sentinel.
fn download_filename(patient_name: &str, extension: &str) -> String {
    let stem: String = patient_name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if stem.is_empty() || patient_name == UNKNOWN_PATIENT {
        format!("prescription.{}", extension)
    } else {
        format!("prescription_{}.{}", stem, extension)
    }
}
