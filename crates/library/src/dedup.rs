//! Duplicate detection for incoming drafts
//!
//! Rule 1: exact ISBN match. Rule 2: normalized-title equality or
//! substring containment in either direction. Rule 2 is intentionally
//! conservative and will false-positive on legitimate distinct titles
//! where one contains the other (a direct sequel, say "Dune Messiah"
//! against an existing "Dune"). That matching behavior is a known
//! fragility kept on purpose; callers see it as a rejected import naming
//! the conflicting title.

use bookden_core::normalize::normalize_title;
use bookden_core::{AppError, CanonicalBookDraft};
use bookden_database::queries::books;
use bookden_database::DbPool;

/// Decides whether a canonical draft already exists in the local catalog
pub struct DuplicateDetector {
    pool: DbPool,
}

impl DuplicateDetector {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Returns the title of the conflicting local book, if any
    ///
    /// Check-then-insert: only the ISBN path has a storage-level unique
    /// index backstopping it against concurrent imports. The title path
    /// stays read-then-write, so two simultaneous imports of the same
    /// ISBN-less title can both pass this check.
    pub async fn find_conflict(
        &self,
        draft: &CanonicalBookDraft,
    ) -> Result<Option<String>, AppError> {
        if let Some(isbn) = draft.isbn.as_deref().filter(|s| !s.trim().is_empty()) {
            if let Some(title) = books::find_title_by_isbn(&self.pool, isbn).await? {
                return Ok(Some(title));
            }
        }

        let normalized = normalize_title(&draft.title);
        if normalized.is_empty() {
            return Ok(None);
        }

        books::find_title_conflict(&self.pool, &normalized).await
    }

    /// Plain boolean form of the duplicate check
    pub async fn is_duplicate(&self, draft: &CanonicalBookDraft) -> Result<bool, AppError> {
        Ok(self.find_conflict(draft).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookden_core::{Book, BookStatus};
    use bookden_database::{connect, run_migrations, DatabaseConfig};
    use tempfile::NamedTempFile;

    async fn setup() -> (DbPool, NamedTempFile) {
        let temp = NamedTempFile::new().expect("temp file");
        let path = temp.path().to_str().expect("utf-8 path").to_string();
        let pool = connect(DatabaseConfig::new(path)).await.expect("connect");
        run_migrations(&pool).await.expect("migrate");
        (pool, temp)
    }

    async fn seed_book(pool: &DbPool, title: &str, isbn: Option<&str>) {
        let mut book = Book::new(title, BookStatus::Finished);
        book.isbn = isbn.map(String::from);
        books::create_book(pool, &book).await.unwrap();
    }

    #[tokio::test]
    async fn test_isbn_match_wins_over_title() {
        let (pool, _temp) = setup().await;
        seed_book(&pool, "Dune", Some("9780441172719")).await;

        let detector = DuplicateDetector::new(pool);
        let mut draft = CanonicalBookDraft::new("Completely Different Title");
        draft.isbn = Some("9780441172719".to_string());

        assert_eq!(
            detector.find_conflict(&draft).await.unwrap(),
            Some("Dune".to_string())
        );
    }

    #[tokio::test]
    async fn test_normalized_title_equality() {
        let (pool, _temp) = setup().await;
        seed_book(&pool, "Clean Code!", None).await;

        let detector = DuplicateDetector::new(pool);
        let draft = CanonicalBookDraft::new("clean CODE");
        assert!(detector.is_duplicate(&draft).await.unwrap());
    }

    #[tokio::test]
    async fn test_substring_containment_flags_sequels() {
        let (pool, _temp) = setup().await;
        seed_book(&pool, "Dune", None).await;

        let detector = DuplicateDetector::new(pool);
        // known fragility: the sequel contains the original title
        let draft = CanonicalBookDraft::new("Dune Messiah");
        assert!(detector.is_duplicate(&draft).await.unwrap());
    }

    #[tokio::test]
    async fn test_unrelated_title_is_not_duplicate() {
        let (pool, _temp) = setup().await;
        seed_book(&pool, "Dune", Some("9780441172719")).await;

        let detector = DuplicateDetector::new(pool);
        let mut draft = CanonicalBookDraft::new("Emma");
        draft.isbn = Some("9780141439587".to_string());
        assert!(!detector.is_duplicate(&draft).await.unwrap());
    }

    #[tokio::test]
    async fn test_different_isbn_same_title_still_matches_on_title() {
        let (pool, _temp) = setup().await;
        seed_book(&pool, "Dune", Some("9780441172719")).await;

        let detector = DuplicateDetector::new(pool);
        let mut draft = CanonicalBookDraft::new("Dune");
        draft.isbn = Some("9780340960196".to_string());
        assert!(detector.is_duplicate(&draft).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_catalog_has_no_duplicates() {
        let (pool, _temp) = setup().await;
        let detector = DuplicateDetector::new(pool);
        let draft = CanonicalBookDraft::new("Anything");
        assert!(!detector.is_duplicate(&draft).await.unwrap());
    }
}
