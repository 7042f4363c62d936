//! Snapshot loading
//!
//! The catalog source is a JSON array export of medicine records (the shape
//! a document-store dump produces). Loading is the only blocking I/O in the
//! request path's vicinity and happens at startup or on explicit reload,
//! never per request.

use std::fs;
use std::path::Path;

use rx_core::{CatalogIndex, RawMedicine, RxError};

/// Read the raw snapshot records from disk.
///
/// A missing file or unreadable JSON is `DataUnavailable`; callers degrade
/// to an empty catalog rather than crashing.
pub fn load_snapshot(path: &Path) -> Result<Vec<RawMedicine>, RxError> {
    let bytes = fs::read(path).map_err(|e| {
        RxError::DataUnavailable(format!("cannot read {}: {}", path.display(), e))
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        RxError::DataUnavailable(format!("cannot parse {}: {}", path.display(), e))
    })
}

/// Load the snapshot and build a fresh catalog index from it.
pub fn load_catalog(path: &Path) -> Result<CatalogIndex, RxError> {
    CatalogIndex::build(load_snapshot(path)?)
}
