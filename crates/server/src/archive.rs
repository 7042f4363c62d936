//! Archival collaborator
//!
//! Optional, write-only persistence of rendered prescriptions. One JSON
//! document per prescription, keyed by the document id, with the rendered
//! bytes carried as base64. The core never reads these back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use rx_core::PrescriptionDocument;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The persisted shape of an archived prescription.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArchivedPrescription {
    pub id: Uuid,
    pub patient_name: String,
    pub doctor_name: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// Rendered document bytes, base64-encoded.
    pub content: String,
}

/// Filesystem-backed prescription archive.
pub struct FileArchive {
    dir: PathBuf,
}

impl FileArchive {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Persist a rendered prescription alongside its identity fields.
    pub fn store(&self, doc: &PrescriptionDocument, rendered: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let record = ArchivedPrescription {
            id: doc.id,
            patient_name: doc.patient_name.clone(),
            doctor_name: doc.doctor_name.clone(),
            created_at: Utc::now().to_rfc3339(),
            content: BASE64.encode(rendered),
        };

        let path = self.dir.join(format!("{}.json", doc.id));
        let json = serde_json::to_vec_pretty(&record).map_err(io::Error::other)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
