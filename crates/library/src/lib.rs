//! bookden orchestration layer
//!
//! Coordinates the catalog, core, and database crates: imports external
//! records as local books, resolves author and genre entities, rejects
//! duplicates, and enriches stored books with missing fields.

pub mod dedup;
pub mod enrich;
pub mod error;
pub mod importer;
pub mod manager;
pub mod resolver;

pub use dedup::DuplicateDetector;
pub use enrich::EnrichmentEngine;
pub use error::{LibraryError, LibraryResult};
pub use importer::BookImporter;
pub use manager::LibraryManager;
pub use resolver::{EntityResolver, GENERAL_GENRE, UNKNOWN_AUTHOR};

use bookden_catalog::CatalogConfig;

/// Library configuration
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// Database file path
    pub database_path: String,
    /// External catalog settings
    pub catalog: CatalogConfig,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            database_path: "bookden.db".to_string(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl LibraryConfig {
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            ..Default::default()
        }
    }

    pub fn with_catalog(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = catalog;
        self
    }
}
