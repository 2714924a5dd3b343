//! Reading status of a library book
//!
//! The wishlist -> reading -> finished transitions are driven by the CRUD
//! layer's page-progress bookkeeping; this crate only defines the type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a book sits in the owner's reading life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    /// Not yet acquired or not yet started
    Wishlist,
    /// Currently being read
    Reading,
    /// Read to the end
    Finished,
}

impl BookStatus {
    /// Returns the canonical storage string for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wishlist => "wishlist",
            Self::Reading => "reading",
            Self::Finished => "finished",
        }
    }
}

impl Default for BookStatus {
    fn default() -> Self {
        Self::Wishlist
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wishlist" => Ok(Self::Wishlist),
            "reading" => Ok(Self::Reading),
            "finished" => Ok(Self::Finished),
            other => Err(format!("unknown book status '{}'", other)),
        }
    }
}
