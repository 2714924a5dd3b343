//! Schema mapper: external record -> canonical draft

use crate::record::{ExternalBookRecord, ExternalIdentifier};
use crate::{CatalogError, CatalogResult};
use bookden_core::CanonicalBookDraft;

/// Maps an external record into the canonical draft shape
///
/// Fails only when the record has no usable title. Everything else is
/// copied as-is: the published date stays an opaque string, and author and
/// category names keep external order with exact-string dedup only. Name
/// normalization is the entity resolver's job, not the mapper's.
pub fn to_draft(record: &ExternalBookRecord) -> CatalogResult<CanonicalBookDraft> {
    if record.title.trim().is_empty() {
        return Err(CatalogError::Mapping(format!(
            "record '{}' has no title",
            record.external_id
        )));
    }

    Ok(CanonicalBookDraft {
        title: record.title.clone(),
        isbn: pick_isbn(&record.identifiers),
        total_pages: record.page_count,
        published_date: record.published_date.clone(),
        publisher: record.publisher.clone(),
        description: record.description.clone(),
        cover_url: record
            .cover_thumbnail
            .clone()
            .or_else(|| record.cover_small_thumbnail.clone()),
        authors: dedup_exact(&record.authors),
        genres: dedup_exact(&record.categories),
    })
}

/// Picks the ISBN from the identifier pairs: ISBN_13 preferred over
/// ISBN_10, first match wins in the order the service returned them.
fn pick_isbn(identifiers: &[ExternalIdentifier]) -> Option<String> {
    identifiers
        .iter()
        .find(|i| i.kind == "ISBN_13")
        .or_else(|| identifiers.iter().find(|i| i.kind == "ISBN_10"))
        .map(|i| i.value.clone())
}

/// Drops exact-string repeats, preserving first-occurrence order
fn dedup_exact(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}
