//! External catalog access for bookden
//!
//! Talks to the Google Books volumes API and maps its heterogeneous schema
//! into the canonical book draft. Owns request timeouts and error
//! translation; performs no retries and no caching.

mod google_books;
mod mapper;
mod record;
mod traits;

pub use google_books::{CatalogConfig, GoogleBooksSource};
pub use mapper::to_draft;
pub use record::{ExternalBookRecord, ExternalIdentifier};
pub use traits::CatalogSource;

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from the external catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Blank or malformed caller argument; never retried
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Transport failure reaching the catalog service
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The request exceeded the configured timeout
    #[error("Catalog request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The catalog service answered with a non-2xx status
    #[error("Catalog service returned HTTP {status}")]
    Http { status: u16 },

    /// The response body could not be decoded
    #[error("Invalid catalog response: {0}")]
    Parse(String),

    /// The catalog has no record with the given external id
    #[error("No catalog record with id '{0}'")]
    NotFound(String),

    /// The external record cannot be mapped into a canonical draft
    #[error("Unusable catalog record: {0}")]
    Mapping(String),
}

impl CatalogError {
    /// Helper to create a network error from any error type
    pub fn network<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
