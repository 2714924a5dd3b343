//! Entity resolution: author and genre names to stored entities
//!
//! Normalizes incoming names into identity keys and delegates the
//! find-or-create to the storage layer's atomic upserts. Resolution never
//! fails on a malformed name; it degrades to the "Unknown Author" or
//! "General" sentinel instead, so one bad name cannot sink an import.

use bookden_core::normalize::{normalize_genre_name, normalize_person_name, split_display_name};
use bookden_core::{AppError, Author, Genre};
use bookden_database::queries::{authors, genres};
use bookden_database::DbPool;

/// Sentinel author used when no real author can be resolved
pub const UNKNOWN_AUTHOR: (&str, &str) = ("Unknown", "Author");

/// Sentinel genre used when no real genre can be resolved
pub const GENERAL_GENRE: &str = "General";

/// Resolves external name strings to persisted Author/Genre entities
pub struct EntityResolver {
    pool: DbPool,
}

impl EntityResolver {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Finds or creates the author for an external display name
    ///
    /// The name is split last-token-is-last-name, both parts normalized,
    /// then looked up by the normalized pair. A blank name resolves to the
    /// sentinel rather than failing.
    pub async fn resolve_author(&self, display_name: &str) -> Result<Author, AppError> {
        let (first, last) = split_display_name(display_name);
        let first = normalize_person_name(&first);
        let last = normalize_person_name(&last);

        if last.is_empty() {
            return self.fallback_author().await;
        }

        self.find_or_create_author(&first, &last).await
    }

    /// Finds or creates an author by name parts; both are normalized here
    pub async fn find_or_create_author(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Author, AppError> {
        let first = normalize_person_name(first_name);
        let last = normalize_person_name(last_name);

        if last.is_empty() && first.is_empty() {
            return self.fallback_author().await;
        }

        // Single usable token lands in last_name, matching the split rule
        let (first, last) = if last.is_empty() {
            (String::new(), first)
        } else {
            (first, last)
        };

        authors::find_or_create_author(&self.pool, &first, &last).await
    }

    /// Finds or creates the genre for an external category name
    pub async fn find_or_create_genre(&self, name: &str) -> Result<Genre, AppError> {
        let normalized = normalize_genre_name(name);
        if normalized.is_empty() {
            return self.fallback_genre().await;
        }
        genres::find_or_create_genre(&self.pool, &normalized).await
    }

    /// Returns the "Unknown Author" sentinel, creating it on first use
    pub async fn fallback_author(&self) -> Result<Author, AppError> {
        authors::find_or_create_author(&self.pool, UNKNOWN_AUTHOR.0, UNKNOWN_AUTHOR.1).await
    }

    /// Returns the "General" sentinel genre, creating it on first use
    pub async fn fallback_genre(&self) -> Result<Genre, AppError> {
        genres::find_or_create_genre(&self.pool, GENERAL_GENRE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookden_database::{connect, run_migrations, DatabaseConfig};
    use tempfile::NamedTempFile;

    async fn setup() -> (DbPool, NamedTempFile) {
        let temp = NamedTempFile::new().expect("temp file");
        let path = temp.path().to_str().expect("utf-8 path").to_string();
        let pool = connect(DatabaseConfig::new(path)).await.expect("connect");
        run_migrations(&pool).await.expect("migrate");
        (pool, temp)
    }

    #[tokio::test]
    async fn test_case_and_whitespace_variants_resolve_to_same_author() {
        let (pool, _temp) = setup().await;
        let resolver = EntityResolver::new(pool);

        let a = resolver.resolve_author("robert c. martin").await.unwrap();
        let b = resolver.resolve_author("  ROBERT   C.  MARTIN ").await.unwrap();

        assert_eq!(a.id, b.id);
        assert_eq!(a.first_name, "Robert C.");
        assert_eq!(a.last_name, "Martin");
    }

    #[tokio::test]
    async fn test_single_token_is_last_name_only() {
        let (pool, _temp) = setup().await;
        let resolver = EntityResolver::new(pool);

        let author = resolver.resolve_author("plato").await.unwrap();
        assert_eq!(author.first_name, "");
        assert_eq!(author.last_name, "Plato");
        assert_eq!(author.display_name(), "Plato");
    }

    #[tokio::test]
    async fn test_blank_name_degrades_to_sentinel() {
        let (pool, _temp) = setup().await;
        let resolver = EntityResolver::new(pool);

        let author = resolver.resolve_author("   ").await.unwrap();
        assert_eq!(author.display_name(), "Unknown Author");

        let sentinel = resolver.fallback_author().await.unwrap();
        assert_eq!(author.id, sentinel.id);
    }

    #[tokio::test]
    async fn test_genre_aliases_resolve_to_same_entity() {
        let (pool, _temp) = setup().await;
        let resolver = EntityResolver::new(pool);

        let a = resolver.find_or_create_genre("sci-fi").await.unwrap();
        let b = resolver.find_or_create_genre("Science Fiction").await.unwrap();

        assert_eq!(a.id, b.id);
        assert_eq!(a.name, "Science Fiction");
    }

    #[tokio::test]
    async fn test_blank_genre_degrades_to_general() {
        let (pool, _temp) = setup().await;
        let resolver = EntityResolver::new(pool);

        let genre = resolver.find_or_create_genre("  ").await.unwrap();
        assert_eq!(genre.name, "General");
    }

    #[tokio::test]
    async fn test_find_or_create_author_parts_normalized() {
        let (pool, _temp) = setup().await;
        let resolver = EntityResolver::new(pool);

        let a = resolver.find_or_create_author("jane", "austen").await.unwrap();
        let b = resolver.find_or_create_author(" JANE ", "AUSTEN").await.unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(b.first_name, "Jane");
    }
}
