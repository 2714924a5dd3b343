//! Canonical book draft
//!
//! The catalog-agnostic shape an external record is mapped into before
//! duplicate detection and persistence. Transient; built per request and
//! discarded after use.

use serde::{Deserialize, Serialize};

/// Canonical representation of an externally-sourced book
///
/// Author and genre names are plain strings in external order; entity
/// resolution and name normalization happen later, in the library layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalBookDraft {
    pub title: String,
    /// ISBN-13 when the record carries one, else ISBN-10, else none
    pub isbn: Option<String>,
    pub total_pages: Option<u32>,
    /// Opaque string; external date formats are not normalized
    pub published_date: Option<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub authors: Vec<String>,
    pub genres: Vec<String>,
}

impl CanonicalBookDraft {
    /// Creates a draft with only a title set
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            isbn: None,
            total_pages: None,
            published_date: None,
            publisher: None,
            description: None,
            cover_url: None,
            authors: Vec::new(),
            genres: Vec::new(),
        }
    }
}
