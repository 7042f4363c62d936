//! Server configuration

use std::path::PathBuf;

/// Server configuration loaded from environment variables
pub struct Config {
    /// Path to the medicine snapshot (JSON array export).
    pub data_file: PathBuf,
    pub bind_address: String,
    pub cors_origins: Vec<String>,
    /// Directory for archived prescriptions; unset disables archival.
    pub archive_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            data_file: std::env::var("MEDICINE_DATA")
                .unwrap_or_else(|_| "data/medicines.json".into())
                .into(),
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| v.split(',').map(|o| o.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            archive_dir: std::env::var("ARCHIVE_DIR").ok().map(PathBuf::from),
        }
    }
}
