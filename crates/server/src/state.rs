//! Shared application state
//!
//! The catalog lives behind an atomically swappable `Arc`: handlers clone
//! the current reference and never hold the lock across an await, so a
//! reload can swap in a fully built replacement without readers ever seeing
//! a partial index.

use std::path::PathBuf;
use std::sync::Arc;

use rx_core::CatalogIndex;
use tokio::sync::RwLock;

use crate::archive::FileArchive;
use crate::config::Config;
use crate::loader;
use crate::render::{DocumentRenderer, HtmlRenderer};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<RwLock<Arc<CatalogIndex>>>,
    /// Snapshot path, kept for explicit reloads.
    pub data_file: PathBuf,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub archive: Option<Arc<FileArchive>>,
}

impl AppState {
    /// Build the state from configuration, loading the catalog snapshot.
    ///
    /// A failed load degrades to the empty catalog with an error log; the
    /// process never refuses to start over missing data.
    pub fn from_config(config: &Config) -> Self {
        let catalog = match loader::load_catalog(&config.data_file) {
            Ok(index) => {
                tracing::info!(medicines = index.len(), "Loaded medicine catalog");
                index
            }
            Err(e) => {
                tracing::error!(error = %e, "Catalog load failed, serving empty catalog");
                CatalogIndex::empty()
            }
        };

        Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
            data_file: config.data_file.clone(),
            renderer: Arc::new(HtmlRenderer),
            archive: config
                .archive_dir
                .as_ref()
                .map(|dir| Arc::new(FileArchive::new(dir.clone()))),
        }
    }

    /// Current catalog reference. Cloning the `Arc` keeps the read cheap and
    /// consistent for the whole request.
    pub async fn catalog(&self) -> Arc<CatalogIndex> {
        self.catalog.read().await.clone()
    }

    /// Swap in a freshly built catalog; returns the record count.
    pub async fn swap_catalog(&self, index: CatalogIndex) -> usize {
        let len = index.len();
        *self.catalog.write().await = Arc::new(index);
        len
    }
}
