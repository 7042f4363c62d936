//! Medicine catalog index
//!
//! The catalog is built once from a snapshot of raw medicine records and is
//! read-only afterwards. Queries drive the clinician's drill-down: generic
//! name → strength/form combinations → brand-level candidates.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::RxError;
use crate::price;

/// A medicine row as it appears in the source snapshot.
///
/// Field names follow the snapshot export's column headers, with lower-case
/// aliases accepted; every field defaults to empty when absent so a sparse
/// row deserializes rather than failing the whole load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMedicine {
    #[serde(rename = "Medicine Name", alias = "medicine_name", alias = "name", default)]
    pub name: String,

    #[serde(rename = "Generic", alias = "generic", default)]
    pub generic: String,

    #[serde(rename = "Strength", alias = "strength", default)]
    pub strength: String,

    #[serde(rename = "Type", alias = "type", default)]
    pub form: String,

    #[serde(rename = "Brand", alias = "brand", default)]
    pub brand: String,

    #[serde(rename = "Price", alias = "price", default)]
    pub price: String,
}

/// An indexed, normalized medicine record. Immutable after the build step.
#[derive(Debug, Clone, Serialize)]
pub struct MedicineRecord {
    pub name: String,
    pub brand: String,
    /// Display generic as it appeared in the source, trimmed.
    pub generic: String,
    /// Lookup key: trimmed and lower-cased generic.
    pub generic_key: String,
    pub strength: String,
    /// Dosage form ("Type" in the source data).
    pub form: String,
    /// Canonical non-negative price.
    pub price: f64,
}

/// A brand-level line candidate returned by a detail query.
#[derive(Debug, Clone, Serialize)]
pub struct BrandOption {
    pub generic: String,
    pub name: String,
    pub brand: String,
    pub strength: String,
    pub form: String,
    pub price: f64,
}

/// Read-only index over the loaded medicine snapshot.
///
/// Maps `generic_key` to its records, preserving snapshot order within each
/// key. Never mutated after `build`; a reload produces a fresh value.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    by_generic: BTreeMap<String, Vec<MedicineRecord>>,
    len: usize,
}

impl CatalogIndex {
    /// Build an index from raw snapshot records.
    ///
    /// Records with an empty strength are dropped. An empty snapshot is
    /// `DataUnavailable` so callers can render a degraded state instead of
    /// serving a silently empty catalog.
    pub fn build(raw: Vec<RawMedicine>) -> Result<Self, RxError> {
        if raw.is_empty() {
            return Err(RxError::DataUnavailable(
                "medicine snapshot contains no records".into(),
            ));
        }

        let mut by_generic: BTreeMap<String, Vec<MedicineRecord>> = BTreeMap::new();
        let mut len = 0;

        for row in raw {
            let strength = row.strength.trim().to_string();
            if strength.is_empty() {
                continue;
            }

            let generic = row.generic.trim().to_string();
            let generic_key = generic.to_lowercase();
            let record = MedicineRecord {
                name: row.name.trim().to_string(),
                brand: row.brand.trim().to_string(),
                generic,
                generic_key: generic_key.clone(),
                strength,
                form: row.form.trim().to_string(),
                price: price::normalize(&row.price),
            };

            by_generic.entry(generic_key).or_default().push(record);
            len += 1;
        }

        Ok(Self { by_generic, len })
    }

    /// An empty catalog, used when no snapshot could be loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sorted, de-duplicated, title-cased generic display names.
    pub fn generics(&self) -> Vec<String> {
        self.by_generic.keys().map(|k| title_case(k)).collect()
    }

    /// Sorted unique strengths and dosage forms for a generic.
    ///
    /// The input is normalized like a lookup key; an empty generic yields
    /// empty lists rather than an error.
    pub fn strengths_and_forms(&self, generic: &str) -> (Vec<String>, Vec<String>) {
        let key = generic.trim().to_lowercase();
        if key.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let mut strengths = BTreeSet::new();
        let mut forms = BTreeSet::new();
        for record in self.by_generic.get(&key).into_iter().flatten() {
            strengths.insert(record.strength.clone());
            forms.insert(record.form.clone());
        }

        (
            strengths.into_iter().collect(),
            forms.into_iter().collect(),
        )
    }

    /// Brand-level candidates for an exact (generic, strength, form) match.
    ///
    /// Candidates keep snapshot order. Zero matches is `NotFound`, which is
    /// distinct from an empty successful listing elsewhere in the API.
    pub fn brand_options(
        &self,
        generic: &str,
        strength: &str,
        form: &str,
    ) -> Result<Vec<BrandOption>, RxError> {
        let key = generic.trim().to_lowercase();
        let strength = strength.trim();
        let form = form.trim();

        let options: Vec<BrandOption> = self
            .by_generic
            .get(&key)
            .into_iter()
            .flatten()
            .filter(|r| r.strength == strength && r.form == form)
            .map(|r| BrandOption {
                generic: title_case(&r.generic_key),
                name: r.name.clone(),
                brand: r.brand.clone(),
                strength: r.strength.clone(),
                form: r.form.clone(),
                price: r.price,
            })
            .collect();

        if options.is_empty() {
            return Err(RxError::NotFound(format!(
                "no brands for {key} {strength} {form}"
            )));
        }
        Ok(options)
    }
}

/// Title-case a lower-cased lookup key for display ("amoxicillin" →
/// "Amoxicillin").
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, generic: &str, strength: &str, form: &str, brand: &str, price: &str) -> RawMedicine {
        RawMedicine {
            name: name.into(),
            generic: generic.into(),
            strength: strength.into(),
            form: form.into(),
            brand: brand.into(),
            price: price.into(),
        }
    }

    fn sample_index() -> CatalogIndex {
        CatalogIndex::build(vec![
            row("Napa 500mg", " Paracetamol ", "500mg", "Tablet", "Napa", "৳ 5.00"),
            row("Ace 500mg", "paracetamol", "500mg", "Tablet", "Ace", "৳ 4.50"),
            row("Napa Syrup", "Paracetamol", "120mg/5ml", "Syrup", "Napa", "৳ 35.00"),
            row("Amoxil 250", "amoxicillin", "250mg", "Capsule", "Amoxil", "৳ 8.00"),
        ])
        .unwrap()
    }

    #[test]
    fn empty_snapshot_is_data_unavailable() {
        let err = CatalogIndex::build(Vec::new()).unwrap_err();
        assert!(matches!(err, RxError::DataUnavailable(_)));
    }

    #[test]
    fn records_without_strength_are_dropped() {
        let index = CatalogIndex::build(vec![
            row("Napa", "Paracetamol", "500mg", "Tablet", "Napa", "5"),
            row("Mystery", "Paracetamol", "  ", "Tablet", "X", "5"),
        ])
        .unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn generics_are_sorted_deduped_and_title_cased() {
        let index = sample_index();
        assert_eq!(index.generics(), vec!["Amoxicillin", "Paracetamol"]);
    }

    #[test]
    fn strengths_and_forms_are_sorted_unique() {
        let index = sample_index();
        let (strengths, forms) = index.strengths_and_forms("PARACETAMOL");
        assert_eq!(strengths, vec!["120mg/5ml", "500mg"]);
        assert_eq!(forms, vec!["Syrup", "Tablet"]);
    }

    #[test]
    fn empty_generic_yields_empty_lists() {
        let index = sample_index();
        assert_eq!(index.strengths_and_forms(""), (Vec::new(), Vec::new()));
        assert_eq!(index.strengths_and_forms("   "), (Vec::new(), Vec::new()));
    }

    #[test]
    fn unknown_generic_yields_empty_lists() {
        let index = sample_index();
        assert_eq!(
            index.strengths_and_forms("ibuprofen"),
            (Vec::new(), Vec::new())
        );
    }

    #[test]
    fn brand_options_match_exactly_and_keep_order() {
        let index = sample_index();
        let options = index.brand_options("paracetamol", "500mg", "Tablet").unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].brand, "Napa");
        assert_eq!(options[0].price, 5.0);
        assert_eq!(options[0].generic, "Paracetamol");
        assert_eq!(options[1].brand, "Ace");
    }

    #[test]
    fn zero_matches_is_not_found() {
        let index = sample_index();
        let err = index
            .brand_options("paracetamol", "500mg", "Syrup")
            .unwrap_err();
        assert!(matches!(err, RxError::NotFound(_)));
    }

    #[test]
    fn snapshot_field_aliases_deserialize() {
        let json = r#"[
            {"Medicine Name": "Napa", "Generic": "Paracetamol", "Strength": "500mg",
             "Type": "Tablet", "Brand": "Napa", "Price": "৳ 5.00"},
            {"name": "Ace", "generic": "Paracetamol", "strength": "500mg",
             "type": "Tablet", "brand": "Ace", "price": "4.50"}
        ]"#;
        let rows: Vec<RawMedicine> = serde_json::from_str(json).unwrap();
        let index = CatalogIndex::build(rows).unwrap();
        assert_eq!(index.len(), 2);
    }
}
