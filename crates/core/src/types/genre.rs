//! Genre domain model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenreId(Uuid);

impl GenreId {
    /// Creates a new random GenreId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a GenreId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Returns the GenreId as a string
    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for GenreId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GenreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A book genre
///
/// The name is unique case-insensitively across the catalog and is stored
/// already normalized by the entity resolver ("sci-fi" never reaches
/// storage; "Science Fiction" does).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub description: Option<String>,
}

impl Genre {
    /// Creates a new genre with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GenreId::new(),
            name: name.into(),
            description: None,
        }
    }
}
