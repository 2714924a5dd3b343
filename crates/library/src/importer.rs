//! Import orchestration
//!
//! Drives a single external record through the full pipeline: fetch,
//! map to a canonical draft, duplicate check, entity resolution, then a
//! transactional insert. Author and genre resolution failures degrade to
//! the sentinels rather than aborting the whole import.

use crate::dedup::DuplicateDetector;
use crate::error::{LibraryError, LibraryResult};
use crate::resolver::EntityResolver;
use bookden_catalog::{to_draft, CatalogSource};
use bookden_core::{AppError, AuthorId, Book, BookStatus, CanonicalBookDraft, GenreId};
use bookden_database::queries::books;
use bookden_database::DbPool;
use log::{info, warn};

/// Imports books from an external catalog into the local database
pub struct BookImporter<S: CatalogSource> {
    source: S,
    pool: DbPool,
    resolver: EntityResolver,
    detector: DuplicateDetector,
}

impl<S: CatalogSource> BookImporter<S> {
    pub fn new(source: S, pool: DbPool) -> Self {
        let resolver = EntityResolver::new(pool.clone());
        let detector = DuplicateDetector::new(pool.clone());
        Self {
            source,
            pool,
            resolver,
            detector,
        }
    }

    /// Imports the external record identified by `external_id`
    ///
    /// The new book starts at page zero with the caller's chosen status.
    /// A duplicate (by ISBN or normalized title) rejects the import and
    /// names the conflicting local title.
    pub async fn import_by_id(
        &self,
        external_id: &str,
        status: BookStatus,
    ) -> LibraryResult<Book> {
        let record = self.source.fetch_by_id(external_id).await?;
        let draft = to_draft(&record)?;
        self.import_draft(draft, status).await
    }

    /// Imports an already-mapped canonical draft
    pub async fn import_draft(
        &self,
        draft: CanonicalBookDraft,
        status: BookStatus,
    ) -> LibraryResult<Book> {
        if let Some(existing) = self.detector.find_conflict(&draft).await? {
            info!(
                "Rejecting import of '{}': duplicate of '{}'",
                draft.title, existing
            );
            return Err(LibraryError::Duplicate { title: existing });
        }

        let author_ids = self.resolve_authors(&draft).await?;
        let genre_ids = self.resolve_genres(&draft).await?;

        let mut book = Book::new(&draft.title, status);
        book.isbn = draft.isbn;
        book.total_pages = draft.total_pages;
        book.published_date = draft.published_date;
        book.publisher = draft.publisher;
        book.description = draft.description;
        book.cover_url = draft.cover_url;
        book.author_ids = author_ids;
        book.genre_ids = genre_ids;

        match books::create_book(&self.pool, &book).await {
            Ok(()) => {
                info!("Imported '{}' ({})", book.title, book.id);
                Ok(book)
            }
            // lost a race with a concurrent import of the same ISBN
            Err(AppError::DuplicateBook { title }) => Err(LibraryError::Duplicate { title }),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolves author display names, falling back to the sentinel when
    /// none of them can be resolved
    async fn resolve_authors(&self, draft: &CanonicalBookDraft) -> Result<Vec<AuthorId>, AppError> {
        let mut ids = Vec::new();
        for name in &draft.authors {
            match self.resolver.resolve_author(name).await {
                Ok(author) => {
                    if !ids.contains(&author.id) {
                        ids.push(author.id);
                    }
                }
                Err(e) => {
                    warn!("Skipping unresolvable author '{}': {}", name, e);
                }
            }
        }
        if ids.is_empty() {
            let fallback = self.resolver.fallback_author().await?;
            ids.push(fallback.id);
        }
        Ok(ids)
    }

    async fn resolve_genres(&self, draft: &CanonicalBookDraft) -> Result<Vec<GenreId>, AppError> {
        let mut ids = Vec::new();
        for name in &draft.genres {
            match self.resolver.find_or_create_genre(name).await {
                Ok(genre) => {
                    if !ids.contains(&genre.id) {
                        ids.push(genre.id);
                    }
                }
                Err(e) => {
                    warn!("Skipping unresolvable genre '{}': {}", name, e);
                }
            }
        }
        if ids.is_empty() {
            let fallback = self.resolver.fallback_genre().await?;
            ids.push(fallback.id);
        }
        Ok(ids)
    }
}
