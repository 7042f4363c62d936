use thiserror::Error;

/// Prescription domain error types
///
/// Malformed per-line input (price/quantity) is not represented here: it is
/// recovered in place with a zero value and a flag on the affected line, so
/// only structural conditions surface as errors.
#[derive(Debug, Error)]
pub enum RxError {
    /// The source snapshot is missing or empty; callers render a degraded
    /// "no data" state rather than failing the process.
    #[error("Catalog data unavailable: {0}")]
    DataUnavailable(String),

    /// A filter/detail query matched zero records. Distinct from
    /// `DataUnavailable` so the caller can pick the right message.
    #[error("No matching records: {0}")]
    NotFound(String),
}
