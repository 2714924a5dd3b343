//! Catalog source seam

use crate::{CatalogResult, ExternalBookRecord};
use async_trait::async_trait;

/// An external book catalog
///
/// The orchestration layer depends on this trait rather than on a concrete
/// HTTP client, so tests can substitute a canned source.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Free-text search; empty result list on zero matches, never an error
    async fn search(&self, query: &str) -> CatalogResult<Vec<ExternalBookRecord>>;

    /// Search scoped to titles
    async fn search_by_title(&self, title: &str) -> CatalogResult<Vec<ExternalBookRecord>>;

    /// Search scoped to author names
    async fn search_by_author(&self, author: &str) -> CatalogResult<Vec<ExternalBookRecord>>;

    /// ISBN lookup; at most one record
    async fn search_by_isbn(&self, isbn: &str) -> CatalogResult<Option<ExternalBookRecord>>;

    /// Fetch a single record by external id
    async fn fetch_by_id(&self, external_id: &str) -> CatalogResult<ExternalBookRecord>;
}
