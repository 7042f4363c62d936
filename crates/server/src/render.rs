//! Document rendering collaborator
//!
//! Turning an assembled [`PrescriptionDocument`] into downloadable bytes is
//! outside the domain core; the core hands the document over unchanged and
//! the route layer surfaces any failure as a generic 500.

use rx_core::PrescriptionDocument;
use rx_core::price;
use thiserror::Error;

/// Rendering failure, propagated to the caller layer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template rendering failed: {0}")]
    Template(String),
}

/// Renders a prescription document into a downloadable file body.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, doc: &PrescriptionDocument) -> Result<Vec<u8>, RenderError>;
    fn content_type(&self) -> &'static str;
    fn file_extension(&self) -> &'static str;
}

/// Renders the printable prescription page as standalone HTML.
pub struct HtmlRenderer;

impl DocumentRenderer for HtmlRenderer {
    fn render(&self, doc: &PrescriptionDocument) -> Result<Vec<u8>, RenderError> {
        let mut rows = String::new();
        for (i, line) in doc.lines.iter().enumerate() {
            rows.push_str(&format!(
                "<tr>\
                 <td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 </tr>\n",
                i + 1,
                escape(&line.name),
                escape(&line.strength),
                escape(&line.form),
                escape(&line.time_schedule),
                escape(&line.meal_time),
                line.quantity,
                price::display(line.subtotal),
            ));
        }

        let html = format!(
            include_str!("templates/prescription.html"),
            patient_name = escape(&doc.patient_name),
            age = escape(&doc.age),
            sex = escape(&doc.sex),
            patient_id = escape(&doc.patient_id),
            doctor_name = escape(&doc.doctor_name),
            specialization = escape(&doc.specialization),
            reg_no = escape(&doc.reg_no),
            phone = escape(&doc.phone),
            date = escape(&doc.date),
            next_appointment = escape(&doc.next_appointment),
            rows = rows,
            total_cost = price::display(doc.total_cost),
        );

        Ok(html.into_bytes())
    }

    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }
}

/// Minimal HTML escaping for interpolated free-text fields.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
