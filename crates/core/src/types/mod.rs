//! Domain types for bookden
//!
//! This module contains all domain models organized by responsibility:
//! - `book`: Book and its identifier
//! - `author`: Author and its identifier
//! - `genre`: Genre and its identifier
//! - `draft`: the canonical draft an external record maps into
//! - `status`: reading status
//! - `common`: shared traits and utilities

mod author;
mod book;
mod common;
mod draft;
mod genre;
mod status;

// Re-export all public types
pub use author::{Author, AuthorId};
pub use book::{Book, BookId};
pub use common::{Timestamp, Validator};
pub use draft::CanonicalBookDraft;
pub use genre::{Genre, GenreId};
pub use status::BookStatus;
