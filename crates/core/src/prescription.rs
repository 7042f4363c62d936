//! Prescription assembly
//!
//! `assemble` is a pure function of its inputs; the date is injected by the
//! caller so assembly stays decoupled from the wall clock. Missing identity
//! fields are defaulted by policy, never rejected.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cost;
use crate::price;

/// Sentinel for a missing patient name.
pub const UNKNOWN_PATIENT: &str = "Unknown";
/// Sentinel for a missing prescriber name.
pub const UNKNOWN_DOCTOR: &str = "Dr. Unknown";
/// Sentinel for a missing next appointment.
pub const AS_ADVISED: &str = "As Advised";

/// Default dosage schedule shown when the clinician leaves it blank.
pub const DEFAULT_SCHEDULE: &str = "1+1+1";
/// Default meal timing shown when the clinician leaves it blank.
pub const DEFAULT_MEAL_TIME: &str = "After Meal";

/// Patient identity fields. All free text, all optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: Option<String>,
    pub age: Option<String>,
    pub sex: Option<String>,
    pub id: Option<String>,
}

/// Prescriber identity fields. All free text, all optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrescriberInfo {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub reg_no: Option<String>,
    pub phone: Option<String>,
}

/// One selected medicine as submitted by the client, before costing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineInput {
    pub name: String,
    pub brand: String,
    pub strength: String,
    pub form: String,
    /// Raw price text; normalized during costing, never trusted as numeric.
    pub raw_price: String,
    pub quantity: i64,
    pub time_schedule: Option<String>,
    pub meal_time: Option<String>,
}

/// One costed line within an assembled prescription.
#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionLine {
    pub name: String,
    pub brand: String,
    pub strength: String,
    pub form: String,
    pub price: f64,
    pub quantity: i64,
    pub time_schedule: String,
    pub meal_time: String,
    pub subtotal: f64,
    /// True when the price or quantity failed to parse and the subtotal was
    /// zeroed.
    pub flagged: bool,
}

/// A complete, internally consistent prescription ready for rendering.
///
/// One-shot value: assembled per request, handed to the rendering (and
/// optionally archival) collaborator, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionDocument {
    pub id: Uuid,
    pub patient_name: String,
    pub age: String,
    pub sex: String,
    pub patient_id: String,
    pub doctor_name: String,
    pub specialization: String,
    pub reg_no: String,
    pub phone: String,
    /// Prescription date, `%d-%m-%Y`.
    pub date: String,
    pub next_appointment: String,
    pub lines: Vec<PrescriptionLine>,
    pub total_cost: f64,
}

impl PrescriptionDocument {
    /// Number of lines whose cost was zeroed due to malformed input.
    pub fn flagged_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.flagged).count()
    }
}

/// Assemble a prescription document from its parts.
///
/// Per-line subtotals and the total are recomputed here from `(price,
/// quantity)`; any client-side figures are ignored upstream. `today` is the
/// injected current date.
pub fn assemble(
    patient: PatientInfo,
    prescriber: PrescriberInfo,
    lines: Vec<LineInput>,
    next_appointment: Option<String>,
    today: NaiveDate,
) -> PrescriptionDocument {
    let lines: Vec<PrescriptionLine> = lines
        .into_iter()
        .map(|input| {
            let cost = cost::price_line(&input.raw_price, input.quantity);
            PrescriptionLine {
                name: input.name,
                brand: input.brand,
                strength: input.strength,
                form: input.form,
                price: price::normalize(&input.raw_price),
                quantity: input.quantity,
                time_schedule: or_default(input.time_schedule, DEFAULT_SCHEDULE),
                meal_time: or_default(input.meal_time, DEFAULT_MEAL_TIME),
                subtotal: cost.subtotal,
                flagged: cost.flagged,
            }
        })
        .collect();

    let total_cost = cost::total(lines.iter().map(|l| l.subtotal));

    PrescriptionDocument {
        id: Uuid::new_v4(),
        patient_name: or_default(patient.name, UNKNOWN_PATIENT),
        age: or_default(patient.age, ""),
        sex: or_default(patient.sex, ""),
        patient_id: or_default(patient.id, ""),
        doctor_name: or_default(prescriber.name, UNKNOWN_DOCTOR),
        specialization: or_default(prescriber.specialization, ""),
        reg_no: or_default(prescriber.reg_no, ""),
        phone: or_default(prescriber.phone, ""),
        date: today.format("%d-%m-%Y").to_string(),
        next_appointment: or_default(next_appointment, AS_ADVISED),
        lines,
        total_cost,
    }
}

/// A blank or whitespace-only field counts as missing.
fn or_default(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn napa_line(quantity: i64) -> LineInput {
        LineInput {
            name: "Napa 500mg".into(),
            brand: "Napa".into(),
            strength: "500mg".into(),
            form: "Tablet".into(),
            raw_price: "৳ 5.00".into(),
            quantity,
            time_schedule: None,
            meal_time: None,
        }
    }

    #[test]
    fn totals_are_recomputed_from_lines() {
        let doc = assemble(
            PatientInfo::default(),
            PrescriberInfo::default(),
            vec![napa_line(2)],
            None,
            today(),
        );
        assert_eq!(doc.lines.len(), 1);
        assert_eq!(doc.lines[0].subtotal, 10.0);
        assert_eq!(doc.total_cost, 10.0);
        assert_eq!(doc.flagged_lines(), 0);
    }

    #[test]
    fn missing_identity_fields_get_sentinels() {
        let doc = assemble(
            PatientInfo::default(),
            PrescriberInfo::default(),
            Vec::new(),
            None,
            today(),
        );
        assert_eq!(doc.patient_name, UNKNOWN_PATIENT);
        assert_eq!(doc.doctor_name, UNKNOWN_DOCTOR);
        assert_eq!(doc.next_appointment, AS_ADVISED);
        assert_eq!(doc.total_cost, 0.0);
    }

    #[test]
    fn blank_patient_name_counts_as_missing() {
        let doc = assemble(
            PatientInfo {
                name: Some("   ".into()),
                ..Default::default()
            },
            PrescriberInfo::default(),
            Vec::new(),
            None,
            today(),
        );
        assert_eq!(doc.patient_name, UNKNOWN_PATIENT);
    }

    #[test]
    fn line_defaults_fill_schedule_and_meal_time() {
        let doc = assemble(
            PatientInfo::default(),
            PrescriberInfo::default(),
            vec![napa_line(1)],
            None,
            today(),
        );
        assert_eq!(doc.lines[0].time_schedule, DEFAULT_SCHEDULE);
        assert_eq!(doc.lines[0].meal_time, DEFAULT_MEAL_TIME);
    }

    #[test]
    fn malformed_line_is_retained_and_flagged() {
        let mut bad = napa_line(3);
        bad.raw_price = "abc".into();
        let doc = assemble(
            PatientInfo::default(),
            PrescriberInfo::default(),
            vec![bad, napa_line(2)],
            None,
            today(),
        );
        assert_eq!(doc.lines.len(), 2);
        assert!(doc.lines[0].flagged);
        assert_eq!(doc.lines[0].subtotal, 0.0);
        assert_eq!(doc.total_cost, 10.0);
        assert_eq!(doc.flagged_lines(), 1);
    }

    #[test]
    fn date_uses_injected_provider() {
        let doc = assemble(
            PatientInfo::default(),
            PrescriberInfo::default(),
            Vec::new(),
            None,
            today(),
        );
        assert_eq!(doc.date, "14-03-2025");
    }

    #[test]
    fn next_appointment_is_kept_when_given() {
        let doc = assemble(
            PatientInfo::default(),
            PrescriberInfo::default(),
            Vec::new(),
            Some("21-03-2025".into()),
            today(),
        );
        assert_eq!(doc.next_appointment, "21-03-2025");
    }
}
