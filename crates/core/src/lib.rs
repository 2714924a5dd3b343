//! Core domain types and errors for bookden

pub mod error;
pub mod normalize;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorSeverity, Result};
pub use types::{
    Author, AuthorId, Book, BookId, BookStatus, CanonicalBookDraft, Genre, GenreId, Timestamp,
    Validator,
};
