//! Library-level errors
//!
//! The import pipeline surfaces one failure kind per branch a caller may
//! take: duplicates carry the conflicting local title, catalog and
//! database failures wrap their source untouched.

use bookden_catalog::CatalogError;
use bookden_core::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    /// The book already exists in the local catalog
    #[error("Already in library: '{title}'")]
    Duplicate { title: String },

    /// A local book id did not resolve
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// Catalog lookup, transport, or mapping failure
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Persistence collaborator failure
    #[error(transparent)]
    Database(#[from] AppError),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_names_conflicting_title() {
        let err = LibraryError::Duplicate {
            title: "Dune".to_string(),
        };
        assert!(err.to_string().contains("Dune"));
    }

    #[test]
    fn test_catalog_errors_pass_through() {
        let err: LibraryError = CatalogError::NotFound("vol1".to_string()).into();
        assert!(matches!(
            err,
            LibraryError::Catalog(CatalogError::NotFound(_))
        ));
    }
}
