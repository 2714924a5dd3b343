//! Book database operations

use crate::DbPool;
use bookden_core::normalize::normalize_title;
use bookden_core::{AppError, AuthorId, Book, BookId, BookStatus, GenreId, Timestamp};
use std::str::FromStr;

const BOOK_COLUMNS: &str = "id, title, normalized_title, isbn, total_pages, current_page, \
                            status, description, publisher, published_date, cover_url, \
                            added_date, updated_date";

/// Creates a new book together with its author and genre links
///
/// Runs in a single transaction so a failure leaves no partial book behind.
/// The unique index on `isbn` backstops the duplicate check performed
/// before import: if two concurrent imports of the same record both pass
/// that check, the second insert lands here as `DuplicateBook`.
pub async fn create_book(pool: &DbPool, book: &Book) -> Result<(), AppError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::database("Failed to begin transaction", e))?;

    let insert = sqlx::query(
        r#"
        INSERT INTO books (
            id, title, normalized_title, isbn, total_pages, current_page,
            status, description, publisher, published_date, cover_url,
            added_date, updated_date
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(book.id.as_string())
    .bind(&book.title)
    .bind(normalize_title(&book.title))
    .bind(&book.isbn)
    .bind(book.total_pages.map(|p| p as i64))
    .bind(book.current_page as i64)
    .bind(book.status.as_str())
    .bind(&book.description)
    .bind(&book.publisher)
    .bind(&book.published_date)
    .bind(&book.cover_url)
    .bind(book.added_date.as_millis())
    .bind(book.updated_date.map(|t| t.as_millis()))
    .execute(&mut *tx)
    .await;

    if let Err(e) = insert {
        if is_unique_violation(&e) {
            return Err(AppError::DuplicateBook {
                title: book.title.clone(),
            });
        }
        return Err(AppError::database("Failed to create book", e));
    }

    for author_id in &book.author_ids {
        sqlx::query("INSERT OR IGNORE INTO book_authors (book_id, author_id) VALUES (?, ?)")
            .bind(book.id.as_string())
            .bind(author_id.as_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database("Failed to link author", e))?;
    }

    for genre_id in &book.genre_ids {
        sqlx::query("INSERT OR IGNORE INTO book_genres (book_id, genre_id) VALUES (?, ?)")
            .bind(book.id.as_string())
            .bind(genre_id.as_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database("Failed to link genre", e))?;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::database("Failed to commit book", e))?;

    Ok(())
}

/// Gets a book by ID
pub async fn get_book(pool: &DbPool, id: BookId) -> Result<Book, AppError> {
    let row = sqlx::query(&format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS))
        .bind(id.as_string())
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::database("Failed to fetch book", e))?
        .ok_or_else(|| AppError::not_found("Book", id.as_string()))?;

    let mut book = row_to_book(row)?;
    load_links(pool, &mut book).await?;
    Ok(book)
}

/// Updates an existing book and its links
pub async fn update_book(pool: &DbPool, book: &Book) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE books SET
            title = ?, normalized_title = ?, isbn = ?, total_pages = ?,
            current_page = ?, status = ?, description = ?, publisher = ?,
            published_date = ?, cover_url = ?, updated_date = ?
        WHERE id = ?
        "#,
    )
    .bind(&book.title)
    .bind(normalize_title(&book.title))
    .bind(&book.isbn)
    .bind(book.total_pages.map(|p| p as i64))
    .bind(book.current_page as i64)
    .bind(book.status.as_str())
    .bind(&book.description)
    .bind(&book.publisher)
    .bind(&book.published_date)
    .bind(&book.cover_url)
    .bind(book.updated_date.map(|t| t.as_millis()))
    .bind(book.id.as_string())
    .execute(pool)
    .await;

    let result = match result {
        Ok(r) => r,
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::DuplicateBook {
                title: book.title.clone(),
            })
        }
        Err(e) => return Err(AppError::database("Failed to update book", e)),
    };

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Book", book.id.as_string()));
    }

    Ok(())
}

/// Lists all books, newest first
pub async fn list_books(pool: &DbPool) -> Result<Vec<Book>, AppError> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM books ORDER BY added_date DESC",
        BOOK_COLUMNS
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::database("Failed to list books", e))?;

    let mut books = Vec::with_capacity(rows.len());
    for row in rows {
        let mut book = row_to_book(row)?;
        load_links(pool, &mut book).await?;
        books.push(book);
    }
    Ok(books)
}

/// Checks whether any book carries the given ISBN
pub async fn exists_by_isbn(pool: &DbPool, isbn: &str) -> Result<bool, AppError> {
    let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = ?)")
        .bind(isbn)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database("Failed to check ISBN", e))?;

    Ok(exists != 0)
}

/// Returns the title of the book carrying the given ISBN, if any
pub async fn find_title_by_isbn(pool: &DbPool, isbn: &str) -> Result<Option<String>, AppError> {
    sqlx::query_scalar("SELECT title FROM books WHERE isbn = ?")
        .bind(isbn)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::database("Failed to look up ISBN", e))
}

/// Finds an existing title that equals or contains (either direction) the
/// given normalized title; returns the stored display title
///
/// Uses the indexed `normalized_title` column instead of scanning the
/// table in memory. Rows whose normalized title is empty are excluded so
/// punctuation-only titles cannot match everything.
pub async fn find_title_conflict(
    pool: &DbPool,
    normalized: &str,
) -> Result<Option<String>, AppError> {
    if normalized.is_empty() {
        return Ok(None);
    }

    sqlx::query_scalar(
        r#"
        SELECT title FROM books
        WHERE normalized_title <> ''
          AND (normalized_title = ?
               OR instr(normalized_title, ?) > 0
               OR instr(?, normalized_title) > 0)
        LIMIT 1
        "#,
    )
    .bind(normalized)
    .bind(normalized)
    .bind(normalized)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::database("Failed to check title conflict", e))
}

/// Searches books whose title contains the given fragment
pub async fn search_by_title(pool: &DbPool, title: &str) -> Result<Vec<Book>, AppError> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM books WHERE title LIKE '%' || ? || '%' ORDER BY title",
        BOOK_COLUMNS
    ))
    .bind(title)
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::database("Failed to search books", e))?;

    let mut books = Vec::with_capacity(rows.len());
    for row in rows {
        let mut book = row_to_book(row)?;
        load_links(pool, &mut book).await?;
        books.push(book);
    }
    Ok(books)
}

/// Loads author and genre ids for a book, in link insertion order
async fn load_links(pool: &DbPool, book: &mut Book) -> Result<(), AppError> {
    let author_ids: Vec<String> =
        sqlx::query_scalar("SELECT author_id FROM book_authors WHERE book_id = ? ORDER BY rowid")
            .bind(book.id.as_string())
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::database("Failed to load book authors", e))?;

    let genre_ids: Vec<String> =
        sqlx::query_scalar("SELECT genre_id FROM book_genres WHERE book_id = ? ORDER BY rowid")
            .bind(book.id.as_string())
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::database("Failed to load book genres", e))?;

    book.author_ids = author_ids
        .iter()
        .map(|s| AuthorId::from_string(s))
        .collect::<Result<_, _>>()
        .map_err(|e| AppError::database("Invalid author id", e))?;
    book.genre_ids = genre_ids
        .iter()
        .map(|s| GenreId::from_string(s))
        .collect::<Result<_, _>>()
        .map_err(|e| AppError::database("Invalid genre id", e))?;

    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Converts a database row to a Book (links loaded separately)
pub(crate) fn row_to_book(row: sqlx::sqlite::SqliteRow) -> Result<Book, AppError> {
    use sqlx::Row;

    let id_str: String = row
        .try_get("id")
        .map_err(|e| AppError::database("Missing book ID", e))?;
    let id = BookId::from_string(&id_str).map_err(|e| AppError::database("Invalid book ID", e))?;

    let status_str: String = row
        .try_get("status")
        .map_err(|e| AppError::database("Missing status", e))?;
    let status = BookStatus::from_str(&status_str).map_err(|_| AppError::InvalidStoredValue {
        field: "status".to_string(),
        value: status_str,
    })?;

    let total_pages: Option<i64> = row.try_get("total_pages").ok().flatten();
    let current_page: i64 = row
        .try_get("current_page")
        .map_err(|e| AppError::database("Missing current page", e))?;
    let added_date_ms: i64 = row
        .try_get("added_date")
        .map_err(|e| AppError::database("Missing added date", e))?;
    let updated_date_ms: Option<i64> = row.try_get("updated_date").ok().flatten();

    Ok(Book {
        id,
        title: row
            .try_get("title")
            .map_err(|e| AppError::database("Missing title", e))?,
        isbn: row.try_get("isbn").ok().flatten(),
        total_pages: total_pages.map(|p| p as u32),
        current_page: current_page as u32,
        status,
        description: row.try_get("description").ok().flatten(),
        publisher: row.try_get("publisher").ok().flatten(),
        published_date: row.try_get("published_date").ok().flatten(),
        cover_url: row.try_get("cover_url").ok().flatten(),
        added_date: Timestamp::from_millis(added_date_ms),
        updated_date: updated_date_ms.map(Timestamp::from_millis),
        author_ids: Vec::new(),
        genre_ids: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::create_test_db;
    use crate::migrations::run_migrations;
    use crate::queries::{authors, genres};

    async fn setup() -> DbPool {
        let pool = create_test_db().await.expect("Failed to create test db");
        run_migrations(&pool).await.expect("Failed to migrate");
        pool
    }

    fn test_book(title: &str, isbn: Option<&str>) -> Book {
        let mut book = Book::new(title, BookStatus::Wishlist);
        book.isbn = isbn.map(String::from);
        book
    }

    #[tokio::test]
    async fn test_create_and_get_book_with_links() {
        let pool = setup().await;

        let author = authors::find_or_create_author(&pool, "Frank", "Herbert")
            .await
            .unwrap();
        let genre = genres::find_or_create_genre(&pool, "Science Fiction")
            .await
            .unwrap();

        let mut book = test_book("Dune", Some("9780441172719"));
        book.author_ids.push(author.id);
        book.genre_ids.push(genre.id);

        create_book(&pool, &book).await.unwrap();

        let retrieved = get_book(&pool, book.id).await.unwrap();
        assert_eq!(retrieved.title, "Dune");
        assert_eq!(retrieved.isbn.as_deref(), Some("9780441172719"));
        assert_eq!(retrieved.author_ids, vec![author.id]);
        assert_eq!(retrieved.genre_ids, vec![genre.id]);
        assert_eq!(retrieved.status, BookStatus::Wishlist);
    }

    #[tokio::test]
    async fn test_duplicate_isbn_rejected_with_title() {
        let pool = setup().await;

        create_book(&pool, &test_book("Dune", Some("9780441172719")))
            .await
            .unwrap();

        let result = create_book(&pool, &test_book("Dune (reissue)", Some("9780441172719"))).await;
        match result {
            Err(AppError::DuplicateBook { title }) => assert_eq!(title, "Dune (reissue)"),
            other => panic!("expected DuplicateBook, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_missing_book_is_not_found() {
        let pool = setup().await;
        let result = get_book(&pool, BookId::new()).await;
        assert!(matches!(result, Err(AppError::RecordNotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_book() {
        let pool = setup().await;

        let mut book = test_book("Dune", None);
        create_book(&pool, &book).await.unwrap();

        book.description = Some("Desert planet".to_string());
        book.updated_date = Some(Timestamp::now());
        update_book(&pool, &book).await.unwrap();

        let retrieved = get_book(&pool, book.id).await.unwrap();
        assert_eq!(retrieved.description.as_deref(), Some("Desert planet"));
        assert!(retrieved.updated_date.is_some());
    }

    #[tokio::test]
    async fn test_update_missing_book_is_not_found() {
        let pool = setup().await;
        let book = test_book("Ghost", None);
        let result = update_book(&pool, &book).await;
        assert!(matches!(result, Err(AppError::RecordNotFound { .. })));
    }

    #[tokio::test]
    async fn test_exists_by_isbn() {
        let pool = setup().await;
        create_book(&pool, &test_book("Dune", Some("9780441172719")))
            .await
            .unwrap();

        assert!(exists_by_isbn(&pool, "9780441172719").await.unwrap());
        assert!(!exists_by_isbn(&pool, "9999999999999").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_title_by_isbn() {
        let pool = setup().await;
        create_book(&pool, &test_book("Dune", Some("9780441172719")))
            .await
            .unwrap();

        assert_eq!(
            find_title_by_isbn(&pool, "9780441172719").await.unwrap(),
            Some("Dune".to_string())
        );
        assert_eq!(find_title_by_isbn(&pool, "123").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_title_conflict_equality() {
        let pool = setup().await;
        create_book(&pool, &test_book("Clean Code!", None)).await.unwrap();

        let hit = find_title_conflict(&pool, "clean code").await.unwrap();
        assert_eq!(hit, Some("Clean Code!".to_string()));
    }

    #[tokio::test]
    async fn test_find_title_conflict_containment_both_directions() {
        let pool = setup().await;
        create_book(&pool, &test_book("Dune", None)).await.unwrap();

        // incoming longer than stored
        assert!(find_title_conflict(&pool, "dune messiah")
            .await
            .unwrap()
            .is_some());
        // incoming shorter than stored
        create_book(&pool, &test_book("The Lord of the Rings", None))
            .await
            .unwrap();
        assert!(find_title_conflict(&pool, "lord of the rings")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_find_title_conflict_miss() {
        let pool = setup().await;
        create_book(&pool, &test_book("Dune", None)).await.unwrap();

        assert!(find_title_conflict(&pool, "emma").await.unwrap().is_none());
        assert!(find_title_conflict(&pool, "").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_by_title() {
        let pool = setup().await;
        create_book(&pool, &test_book("Dune", None)).await.unwrap();
        create_book(&pool, &test_book("Dune Messiah", None))
            .await
            .unwrap();
        create_book(&pool, &test_book("Emma", None)).await.unwrap();

        let hits = search_by_title(&pool, "Dune").await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_list_books() {
        let pool = setup().await;
        create_book(&pool, &test_book("A", None)).await.unwrap();
        create_book(&pool, &test_book("B", None)).await.unwrap();

        let books = list_books(&pool).await.unwrap();
        assert_eq!(books.len(), 2);
    }
}
