//! rx-core: Prescription catalog and costing domain types
//!
//! This crate provides the pure domain logic shared by the prescription
//! server: price normalization, the medicine catalog index, line costing,
//! and prescription assembly. It performs no I/O and holds no global state.

pub mod catalog;
pub mod cost;
pub mod error;
pub mod prescription;
pub mod price;

// Re-export our types
pub use catalog::{BrandOption, CatalogIndex, MedicineRecord, RawMedicine};
pub use cost::LineCost;
pub use error::RxError;
pub use prescription::{
    LineInput, PatientInfo, PrescriberInfo, PrescriptionDocument, PrescriptionLine,
};
