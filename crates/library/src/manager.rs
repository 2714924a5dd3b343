use crate::enrich::EnrichmentEngine;
use crate::error::{LibraryError, LibraryResult};
use crate::importer::BookImporter;
pub use crate::LibraryConfig;
use bookden_catalog::{CatalogSource, ExternalBookRecord, GoogleBooksSource};
use bookden_core::{AppError, Book, BookId, BookStatus};
use bookden_database::{
    connection::{connect, DatabaseConfig},
    migrations::run_migrations,
    queries::books,
    DbPool,
};
use log::info;

/// High-level library management
pub struct LibraryManager {
    pool: DbPool,
    source: GoogleBooksSource,
    importer: BookImporter<GoogleBooksSource>,
    enricher: EnrichmentEngine<GoogleBooksSource>,
}

impl LibraryManager {
    /// Create a new library manager
    pub async fn new(config: LibraryConfig) -> LibraryResult<Self> {
        info!(
            "Initializing library with database: {}",
            config.database_path
        );

        let db_config = DatabaseConfig::new(&config.database_path);
        let pool = connect(db_config).await?;
        run_migrations(&pool).await?;

        let source = GoogleBooksSource::with_config(config.catalog.clone())?;
        let importer = BookImporter::new(source.clone(), pool.clone());
        let enricher = EnrichmentEngine::new(source.clone(), pool.clone());

        Ok(Self {
            pool,
            source,
            importer,
            enricher,
        })
    }

    /// Import the external catalog record `external_id` as a new book
    pub async fn import_from_catalog(
        &self,
        external_id: &str,
        status: BookStatus,
    ) -> LibraryResult<Book> {
        self.importer.import_by_id(external_id, status).await
    }

    /// Fill missing fields of a stored book from an external record
    pub async fn enrich_from_catalog(
        &self,
        book_id: BookId,
        external_id: &str,
    ) -> LibraryResult<Book> {
        self.enricher.enrich(book_id, external_id).await
    }

    /// Free-text search against the external catalog
    pub async fn search_catalog(&self, query: &str) -> LibraryResult<Vec<ExternalBookRecord>> {
        Ok(self.source.search(query).await?)
    }

    /// External catalog search scoped to titles
    pub async fn search_catalog_by_title(
        &self,
        title: &str,
    ) -> LibraryResult<Vec<ExternalBookRecord>> {
        Ok(self.source.search_by_title(title).await?)
    }

    /// External catalog search scoped to author names
    pub async fn search_catalog_by_author(
        &self,
        author: &str,
    ) -> LibraryResult<Vec<ExternalBookRecord>> {
        Ok(self.source.search_by_author(author).await?)
    }

    /// External catalog lookup by ISBN
    pub async fn search_catalog_by_isbn(
        &self,
        isbn: &str,
    ) -> LibraryResult<Option<ExternalBookRecord>> {
        Ok(self.source.search_by_isbn(isbn).await?)
    }

    /// Get all books in the library
    pub async fn list_books(&self) -> LibraryResult<Vec<Book>> {
        Ok(books::list_books(&self.pool).await?)
    }

    /// Get a specific book by ID
    pub async fn get_book(&self, id: BookId) -> LibraryResult<Book> {
        books::get_book(&self.pool, id).await.map_err(|e| match e {
            AppError::RecordNotFound { .. } => LibraryError::BookNotFound(id.to_string()),
            other => LibraryError::Database(other),
        })
    }

    /// Search stored books by title substring
    pub async fn search_local_by_title(&self, title: &str) -> LibraryResult<Vec<Book>> {
        Ok(books::search_by_title(&self.pool, title).await?)
    }

    /// Update a book
    pub async fn update_book(&self, book: &Book) -> LibraryResult<()> {
        Ok(books::update_book(&self.pool, book).await?)
    }

    /// Get database pool for advanced operations
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
