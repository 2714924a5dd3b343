//! Enrichment engine
//!
//! Fills missing fields on an already-persisted book from an external
//! catalog record. Populated fields are never overwritten, and when the
//! external record adds nothing the book is returned as-is without a
//! database write.

use crate::error::{LibraryError, LibraryResult};
use bookden_catalog::{to_draft, CatalogSource};
use bookden_core::{AppError, Book, BookId, Timestamp};
use bookden_database::queries::books;
use bookden_database::DbPool;
use log::{debug, info};

/// Merges external catalog data into existing books
pub struct EnrichmentEngine<S: CatalogSource> {
    source: S,
    pool: DbPool,
}

impl<S: CatalogSource> EnrichmentEngine<S> {
    pub fn new(source: S, pool: DbPool) -> Self {
        Self { source, pool }
    }

    /// Enriches the book `book_id` from the external record `external_id`
    ///
    /// Only empty fields are filled. Returns the stored book unchanged
    /// when the record contributes nothing new.
    pub async fn enrich(&self, book_id: BookId, external_id: &str) -> LibraryResult<Book> {
        let mut book = books::get_book(&self.pool, book_id)
            .await
            .map_err(|e| match e {
                AppError::RecordNotFound { .. } => LibraryError::BookNotFound(book_id.to_string()),
                other => LibraryError::Database(other),
            })?;
        let record = self.source.fetch_by_id(external_id).await?;
        let draft = to_draft(&record)?;

        let mut changed = false;

        if is_blank(&book.description) {
            if let Some(description) = draft.description {
                book.description = Some(description);
                changed = true;
            }
        }
        if is_blank(&book.isbn) {
            if let Some(isbn) = draft.isbn {
                book.isbn = Some(isbn);
                changed = true;
            }
        }
        if book.total_pages.unwrap_or(0) == 0 {
            if let Some(pages) = draft.total_pages.filter(|&p| p > 0) {
                book.total_pages = Some(pages);
                changed = true;
            }
        }
        if is_blank(&book.publisher) {
            if let Some(publisher) = draft.publisher {
                book.publisher = Some(publisher);
                changed = true;
            }
        }
        if is_blank(&book.published_date) {
            if let Some(date) = draft.published_date {
                book.published_date = Some(date);
                changed = true;
            }
        }
        if is_blank(&book.cover_url) {
            if let Some(url) = draft.cover_url {
                book.cover_url = Some(url);
                changed = true;
            }
        }

        if !changed {
            debug!("Nothing to enrich for '{}'", book.title);
            return Ok(book);
        }

        book.updated_date = Some(Timestamp::now());
        books::update_book(&self.pool, &book).await?;
        info!("Enriched '{}' from record '{}'", book.title, external_id);
        Ok(book)
    }
}

fn is_blank(field: &Option<String>) -> bool {
    match field {
        Some(s) => s.trim().is_empty(),
        None => true,
    }
}
