//! Author database operations
//!
//! Authors are stored with their names already normalized; the UNIQUE
//! (first_name, last_name) constraint makes find-or-create atomic via
//! upsert, so two concurrent resolutions of the same name cannot create
//! two rows.

use crate::DbPool;
use bookden_core::{AppError, Author, AuthorId};

/// Finds the author with the given normalized name pair, creating it if
/// absent. Idempotent.
pub async fn find_or_create_author(
    pool: &DbPool,
    first_name: &str,
    last_name: &str,
) -> Result<Author, AppError> {
    let candidate_id = AuthorId::new();
    let row = sqlx::query(
        r#"
        INSERT INTO authors (id, first_name, last_name)
        VALUES (?, ?, ?)
        ON CONFLICT (first_name, last_name) DO UPDATE SET first_name = first_name
        RETURNING id, first_name, last_name, biography, nationality, birth_date
        "#,
    )
    .bind(candidate_id.as_string())
    .bind(first_name)
    .bind(last_name)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::database("Failed to find or create author", e))?;

    row_to_author(row)
}

/// Gets an author by ID
pub async fn get_author(pool: &DbPool, id: AuthorId) -> Result<Author, AppError> {
    let row = sqlx::query(
        "SELECT id, first_name, last_name, biography, nationality, birth_date \
         FROM authors WHERE id = ?",
    )
    .bind(id.as_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::database("Failed to fetch author", e))?
    .ok_or_else(|| AppError::not_found("Author", id.as_string()))?;

    row_to_author(row)
}

fn row_to_author(row: sqlx::sqlite::SqliteRow) -> Result<Author, AppError> {
    use sqlx::Row;

    let id_str: String = row
        .try_get("id")
        .map_err(|e| AppError::database("Missing author ID", e))?;
    let id =
        AuthorId::from_string(&id_str).map_err(|e| AppError::database("Invalid author ID", e))?;

    Ok(Author {
        id,
        first_name: row
            .try_get("first_name")
            .map_err(|e| AppError::database("Missing first name", e))?,
        last_name: row
            .try_get("last_name")
            .map_err(|e| AppError::database("Missing last name", e))?,
        biography: row.try_get("biography").ok().flatten(),
        nationality: row.try_get("nationality").ok().flatten(),
        birth_date: row.try_get("birth_date").ok().flatten(),
    })
}
