//! Google Books volumes API client

use crate::record::{ExternalBookRecord, ExternalIdentifier};
use crate::traits::CatalogSource;
use crate::{CatalogError, CatalogResult};
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use std::time::Duration;

/// Catalog client configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the volumes API
    pub base_url: String,
    /// Optional API key, sent as the `key` query parameter
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Result-count bound for searches
    pub max_results: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/books/v1".to_string(),
            api_key: None,
            timeout: Duration::from_secs(5),
            max_results: 20,
        }
    }
}

impl CatalogConfig {
    /// Sets the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the result-count bound
    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = max;
        self
    }
}

/// Google Books content source
#[derive(Clone)]
pub struct GoogleBooksSource {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl GoogleBooksSource {
    /// Creates a source with the default configuration
    pub fn new() -> CatalogResult<Self> {
        Self::with_config(CatalogConfig::default())
    }

    /// Creates a source with a custom configuration
    pub fn with_config(config: CatalogConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
            ))
            .build()
            .map_err(|e| CatalogError::network("Failed to build HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// Checks whether the catalog service answers at all
    pub async fn is_available(&self) -> bool {
        self.run_search("the", 1).await.is_ok()
    }

    /// Issues a volumes search and converts the hits
    async fn run_search(&self, q: &str, limit: u32) -> CatalogResult<Vec<ExternalBookRecord>> {
        let url = format!("{}/volumes", self.config.base_url);
        debug!("Catalog search: {}", q);

        let mut request = self
            .client
            .get(&url)
            .query(&[("q", q)])
            .query(&[("maxResults", limit)]);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(CatalogError::Http {
                status: response.status().as_u16(),
            });
        }

        let body: VolumesResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(format!("JSON decode failed: {}", e)))?;

        // totalItems == 0 comes back with no `items` array at all
        Ok(body.items.into_iter().map(Volume::into_record).collect())
    }

    fn transport_error(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::Timeout {
                seconds: self.config.timeout.as_secs(),
            }
        } else {
            CatalogError::network("Catalog request failed", err)
        }
    }
}

#[async_trait]
impl CatalogSource for GoogleBooksSource {
    async fn search(&self, query: &str) -> CatalogResult<Vec<ExternalBookRecord>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidQuery("Empty query".to_string()));
        }
        self.run_search(query, self.config.max_results).await
    }

    async fn search_by_title(&self, title: &str) -> CatalogResult<Vec<ExternalBookRecord>> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CatalogError::InvalidQuery("Empty title".to_string()));
        }
        self.run_search(&title_query(title), self.config.max_results)
            .await
    }

    async fn search_by_author(&self, author: &str) -> CatalogResult<Vec<ExternalBookRecord>> {
        let author = author.trim();
        if author.is_empty() {
            return Err(CatalogError::InvalidQuery("Empty author".to_string()));
        }
        self.run_search(&author_query(author), self.config.max_results)
            .await
    }

    async fn search_by_isbn(&self, isbn: &str) -> CatalogResult<Option<ExternalBookRecord>> {
        let isbn = isbn.trim();
        if isbn.is_empty() {
            return Err(CatalogError::InvalidQuery("Empty ISBN".to_string()));
        }
        let mut records = self.run_search(&isbn_query(isbn), 1).await?;
        Ok(if records.is_empty() {
            None
        } else {
            Some(records.remove(0))
        })
    }

    async fn fetch_by_id(&self, external_id: &str) -> CatalogResult<ExternalBookRecord> {
        let external_id = external_id.trim();
        if external_id.is_empty() {
            return Err(CatalogError::InvalidQuery("Empty external id".to_string()));
        }

        let url = format!("{}/volumes/{}", self.config.base_url, external_id);
        debug!("Catalog fetch: {}", external_id);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(external_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(CatalogError::Http {
                status: response.status().as_u16(),
            });
        }

        let volume: Volume = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(format!("JSON decode failed: {}", e)))?;

        Ok(volume.into_record())
    }
}

/// Builds the field-scoped query for a title search
fn title_query(title: &str) -> String {
    format!("intitle:\"{}\"", title)
}

/// Builds the field-scoped query for an author search
fn author_query(author: &str) -> String {
    format!("inauthor:\"{}\"", author)
}

/// Builds the field-scoped query for an ISBN lookup
fn isbn_query(isbn: &str) -> String {
    format!("isbn:{}", isbn)
}

// ---------------------------------------------------------------------------
// Wire format

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(rename = "totalItems", default)]
    #[allow(dead_code)]
    total_items: i64,
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    id: String,
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VolumeInfo {
    title: Option<String>,
    authors: Vec<String>,
    description: Option<String>,
    page_count: Option<u32>,
    published_date: Option<String>,
    publisher: Option<String>,
    categories: Vec<String>,
    industry_identifiers: Vec<IndustryIdentifier>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct IndustryIdentifier {
    #[serde(rename = "type")]
    kind: String,
    identifier: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

impl Volume {
    fn into_record(self) -> ExternalBookRecord {
        let info = self.volume_info;
        let (thumbnail, small_thumbnail) = match info.image_links {
            Some(links) => (links.thumbnail, links.small_thumbnail),
            None => (None, None),
        };

        ExternalBookRecord {
            external_id: self.id,
            title: info.title.unwrap_or_default(),
            authors: info.authors,
            description: info.description,
            page_count: info.page_count,
            published_date: info.published_date,
            publisher: info.publisher,
            categories: info.categories,
            identifiers: info
                .industry_identifiers
                .into_iter()
                .map(|i| ExternalIdentifier::new(i.kind, i.identifier))
                .collect(),
            cover_thumbnail: thumbnail,
            cover_small_thumbnail: small_thumbnail,
        }
    }
}
