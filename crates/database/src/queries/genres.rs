//! Genre database operations
//!
//! Genre names are stored already normalized; the case-insensitive UNIQUE
//! constraint on `name` makes find-or-create atomic via upsert. On a
//! conflict the stored casing wins over the incoming one.

use crate::DbPool;
use bookden_core::{AppError, Genre, GenreId};

/// Finds the genre with the given normalized name (case-insensitively),
/// creating it if absent. Idempotent.
pub async fn find_or_create_genre(pool: &DbPool, name: &str) -> Result<Genre, AppError> {
    let candidate_id = GenreId::new();
    let row = sqlx::query(
        r#"
        INSERT INTO genres (id, name)
        VALUES (?, ?)
        ON CONFLICT (name) DO UPDATE SET name = name
        RETURNING id, name, description
        "#,
    )
    .bind(candidate_id.as_string())
    .bind(name)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::database("Failed to find or create genre", e))?;

    row_to_genre(row)
}

/// Gets a genre by ID
pub async fn get_genre(pool: &DbPool, id: GenreId) -> Result<Genre, AppError> {
    let row = sqlx::query("SELECT id, name, description FROM genres WHERE id = ?")
        .bind(id.as_string())
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::database("Failed to fetch genre", e))?
        .ok_or_else(|| AppError::not_found("Genre", id.as_string()))?;

    row_to_genre(row)
}

fn row_to_genre(row: sqlx::sqlite::SqliteRow) -> Result<Genre, AppError> {
    use sqlx::Row;

    let id_str: String = row
        .try_get("id")
        .map_err(|e| AppError::database("Missing genre ID", e))?;
    let id = GenreId::from_string(&id_str).map_err(|e| AppError::database("Invalid genre ID", e))?;

    Ok(Genre {
        id,
        name: row
            .try_get("name")
            .map_err(|e| AppError::database("Missing genre name", e))?,
        description: row.try_get("description").ok().flatten(),
    })
}
