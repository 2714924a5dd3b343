//! Author domain model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorId(Uuid);

impl AuthorId {
    /// Creates a new random AuthorId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an AuthorId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Returns the AuthorId as a string
    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for AuthorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AuthorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A book author
///
/// Identity is the normalized (first_name, last_name) pair; two authors are
/// the same entity iff those pairs match. Names are stored already
/// normalized by the entity resolver. A single-token display name yields an
/// empty first name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    pub biography: Option<String>,
    pub nationality: Option<String>,
    pub birth_date: Option<String>,
}

impl Author {
    /// Creates a new author with the given name parts
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: AuthorId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            biography: None,
            nationality: None,
            birth_date: None,
        }
    }

    /// Returns the display name, skipping an empty first-name placeholder
    pub fn display_name(&self) -> String {
        if self.first_name.is_empty() {
            self.last_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}
