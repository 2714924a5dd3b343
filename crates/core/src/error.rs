//! Error types for bookden
//!
//! One closed set of error kinds shared by the database and library layers,
//! so callers can branch on the failure kind instead of parsing message
//! strings. Catalog (HTTP) failures carry their own type in the catalog
//! crate and are wrapped at the library layer.

use std::fmt;
use thiserror::Error;

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Transient; the caller may simply try again
    Recoverable,
    /// The operation failed but the library is intact
    Degraded,
    /// Data integrity is at risk; requires user intervention
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "Recoverable"),
            Self::Degraded => write!(f, "Degraded"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Main error type for bookden
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid argument provided by the caller
    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// Database operation failed
    #[error("Database error: {message}")]
    DatabaseError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database is locked by another writer
    #[error("Database locked: {operation}")]
    DatabaseLocked { operation: String },

    /// Database migration failed
    #[error("Migration failed: {version} - {reason}")]
    MigrationFailed { version: String, reason: String },

    /// Record not found in the local catalog
    #[error("Record not found: {entity} with {identifier}")]
    RecordNotFound { entity: String, identifier: String },

    /// Unique constraint rejected a book write (duplicate ISBN)
    #[error("Duplicate book: '{title}' already exists in the library")]
    DuplicateBook { title: String },

    /// Stored value could not be interpreted
    #[error("Invalid stored value: {field} has invalid value '{value}'")]
    InvalidStoredValue { field: String, value: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl AppError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DatabaseLocked { .. } => ErrorSeverity::Recoverable,

            Self::InvalidArgument { .. }
            | Self::RecordNotFound { .. }
            | Self::DuplicateBook { .. } => ErrorSeverity::Degraded,

            Self::MigrationFailed { .. } | Self::InvalidStoredValue { .. } => ErrorSeverity::Fatal,

            _ => ErrorSeverity::Degraded,
        }
    }

    /// Returns true if this error can be automatically retried
    pub fn is_retryable(&self) -> bool {
        self.severity() == ErrorSeverity::Recoverable
    }

    /// Returns a user-friendly error message suitable for display in the UI
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidArgument { .. } => "Invalid input provided.".to_string(),
            Self::DatabaseError { .. } | Self::DatabaseLocked { .. } => {
                "The library database is temporarily unavailable. Please try again.".to_string()
            }
            Self::MigrationFailed { .. } => {
                "Failed to update the library database.".to_string()
            }
            Self::RecordNotFound { .. } => "The requested item was not found.".to_string(),
            Self::DuplicateBook { title } => {
                format!("'{}' is already in your library.", title)
            }
            Self::InvalidStoredValue { .. } => {
                "The library contains data that cannot be read.".to_string()
            }
            Self::InternalError { .. } => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }

    /// Helper to create a database error from any error type
    pub fn database<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::DatabaseError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create an invalid-argument error
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Helper to create a record-not-found error
    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::RecordNotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Recoverable < ErrorSeverity::Degraded);
        assert!(ErrorSeverity::Degraded < ErrorSeverity::Fatal);
    }

    #[test]
    fn test_locked_is_retryable() {
        let err = AppError::DatabaseLocked {
            operation: "create_book".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_duplicate_book_carries_title() {
        let err = AppError::DuplicateBook {
            title: "Clean Code".to_string(),
        };
        assert!(err.to_string().contains("Clean Code"));
        assert!(err.user_message().contains("Clean Code"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_not_found_helper() {
        let err = AppError::not_found("Book", "1234");
        assert!(matches!(err, AppError::RecordNotFound { .. }));
        let display = err.to_string();
        assert!(display.contains("Book"));
        assert!(display.contains("1234"));
    }

    #[test]
    fn test_database_helper_preserves_source() {
        let inner = io::Error::other("disk unplugged");
        let err = AppError::database("Query failed", inner);
        assert!(matches!(err, AppError::DatabaseError { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let err = AppError::database(
            "UNIQUE constraint failed: books.isbn",
            io::Error::other("sqlite"),
        );
        let msg = err.user_message();
        assert!(!msg.contains("UNIQUE"));
        assert!(!msg.contains("sqlite"));
    }

    #[test]
    fn test_migration_failed_is_fatal() {
        let err = AppError::MigrationFailed {
            version: "2".to_string(),
            reason: "syntax error".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }
}
