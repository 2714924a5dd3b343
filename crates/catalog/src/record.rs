//! Catalog-agnostic external record

/// One (type, value) identifier pair from an external record
///
/// Known types are "ISBN_13" and "ISBN_10"; anything else is carried
/// through untouched and ignored by the mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentifier {
    pub kind: String,
    pub value: String,
}

impl ExternalIdentifier {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// An immutable book record as returned by the external catalog
///
/// Never persisted directly; the mapper turns it into a
/// `CanonicalBookDraft` first.
#[derive(Debug, Clone)]
pub struct ExternalBookRecord {
    pub external_id: String,
    pub title: String,
    /// Author display names, in the order the service returned them
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    /// Free-form date string; not guaranteed ISO
    pub published_date: Option<String>,
    pub publisher: Option<String>,
    pub categories: Vec<String>,
    pub identifiers: Vec<ExternalIdentifier>,
    pub cover_thumbnail: Option<String>,
    pub cover_small_thumbnail: Option<String>,
}

impl ExternalBookRecord {
    /// Creates a record with only id and title set, for tests and fixtures
    pub fn new(external_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            title: title.into(),
            authors: Vec::new(),
            description: None,
            page_count: None,
            published_date: None,
            publisher: None,
            categories: Vec::new(),
            identifiers: Vec::new(),
            cover_thumbnail: None,
            cover_small_thumbnail: None,
        }
    }
}
