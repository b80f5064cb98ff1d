//! Book records and their availability state.

use serde::{Deserialize, Serialize};

/// Handle to a book owned by a [`Catalog`](crate::core::Catalog).
///
/// Books are never removed, so a handle stays valid for the lifetime of the
/// catalog that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookRef(pub(crate) usize);

impl BookRef {
    /// Position of the book in catalog insertion order
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Whether a book is on the shelf or out with a patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    /// On the shelf
    Available,

    /// Held by the patron with this ID
    CheckedOut { patron_id: String },
}

impl Default for Availability {
    fn default() -> Self {
        Self::Available
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "Available"),
            Availability::CheckedOut { .. } => write!(f, "Checked Out"),
        }
    }
}

/// A single book in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Lookup key (matched case-insensitively)
    pub title: String,

    pub author: String,

    pub publication_year: i32,

    /// Current circulation state
    pub availability: Availability,
}

impl Book {
    /// Create a new book that is available for checkout
    pub fn new(title: impl Into<String>, author: impl Into<String>, publication_year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year,
            availability: Availability::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.availability, Availability::Available)
    }

    /// ID of the patron holding this book, if it is checked out
    pub fn held_by(&self) -> Option<&str> {
        match &self.availability {
            Availability::Available => None,
            Availability::CheckedOut { patron_id } => Some(patron_id),
        }
    }
}
