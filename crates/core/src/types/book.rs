//! Book domain model

use crate::types::{AuthorId, BookStatus, GenreId, Timestamp, Validator};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    /// Creates a new random BookId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a BookId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Returns the BookId as a string
    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A book in the local library
///
/// The ISBN, when present, is unique across the whole catalog; the storage
/// layer enforces this with a unique index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub isbn: Option<String>,
    pub total_pages: Option<u32>,
    pub current_page: u32,
    pub status: BookStatus,
    pub description: Option<String>,
    pub publisher: Option<String>,
    /// External catalogs return free-form dates; stored opaquely
    pub published_date: Option<String>,
    pub cover_url: Option<String>,
    pub added_date: Timestamp,
    pub updated_date: Option<Timestamp>,
    pub author_ids: Vec<AuthorId>,
    pub genre_ids: Vec<GenreId>,
}

impl Book {
    /// Creates a new book with required fields
    pub fn new(title: impl Into<String>, status: BookStatus) -> Self {
        Self {
            id: BookId::new(),
            title: title.into(),
            isbn: None,
            total_pages: None,
            current_page: 0,
            status,
            description: None,
            publisher: None,
            published_date: None,
            cover_url: None,
            added_date: Timestamp::now(),
            updated_date: None,
            author_ids: Vec::new(),
            genre_ids: Vec::new(),
        }
    }

    /// Returns reading progress in the 0.0..=1.0 range, if page counts allow
    pub fn progress(&self) -> Option<f32> {
        match self.total_pages {
            Some(total) if total > 0 => Some((self.current_page as f32 / total as f32).min(1.0)),
            _ => None,
        }
    }
}

impl Validator for Book {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }

        if let Some(isbn) = &self.isbn {
            if isbn.trim().is_empty() {
                errors.push("ISBN cannot be blank when present".to_string());
            }
        }

        if let Some(total) = self.total_pages {
            if self.current_page > total {
                errors.push("Current page cannot exceed total pages".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_id_creation() {
        assert_ne!(BookId::new(), BookId::new());
    }

    #[test]
    fn test_book_id_from_string() {
        let id = BookId::new();
        let parsed = BookId::from_string(&id.as_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_book_new() {
        let book = Book::new("The Dispossessed", BookStatus::Wishlist);
        assert_eq!(book.title, "The Dispossessed");
        assert_eq!(book.current_page, 0);
        assert_eq!(book.status, BookStatus::Wishlist);
        assert!(book.author_ids.is_empty());
        assert!(book.is_valid());
    }

    #[test]
    fn test_book_validation_empty_title() {
        let book = Book::new("   ", BookStatus::Wishlist);
        assert!(!book.is_valid());
    }

    #[test]
    fn test_book_validation_blank_isbn() {
        let mut book = Book::new("Test", BookStatus::Wishlist);
        book.isbn = Some("  ".to_string());
        assert!(!book.is_valid());
    }

    #[test]
    fn test_book_validation_page_overflow() {
        let mut book = Book::new("Test", BookStatus::Reading);
        book.total_pages = Some(100);
        book.current_page = 150;
        assert!(!book.is_valid());
    }

    #[test]
    fn test_progress() {
        let mut book = Book::new("Test", BookStatus::Reading);
        assert_eq!(book.progress(), None);

        book.total_pages = Some(200);
        book.current_page = 50;
        assert_eq!(book.progress(), Some(0.25));

        book.current_page = 400;
        assert_eq!(book.progress(), Some(1.0));
    }
}
