//! Patron records.

use serde::{Deserialize, Serialize};

use super::same_key;

/// Handle to a patron owned by a [`Roster`](crate::core::Roster)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatronRef(pub(crate) usize);

impl PatronRef {
    /// Position of the patron in roster insertion order
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A registered library patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patron {
    pub name: String,

    /// Lookup key (matched case-insensitively, not required unique)
    pub id: String,

    /// Titles currently checked out, in checkout order
    #[serde(default)]
    pub holdings: Vec<String>,
}

impl Patron {
    /// Create a patron with no holdings
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            holdings: Vec::new(),
        }
    }

    /// Whether this patron currently holds a book with the given title
    pub fn holds(&self, title: &str) -> bool {
        self.holdings.iter().any(|held| same_key(held, title))
    }

    pub(crate) fn take_out(&mut self, title: impl Into<String>) {
        self.holdings.push(title.into());
    }

    /// Drop the first holding matching `title`; returns whether one was found
    pub(crate) fn give_back(&mut self, title: &str) -> bool {
        match self.holdings.iter().position(|held| same_key(held, title)) {
            Some(pos) => {
                self.holdings.remove(pos);
                true
            }
            None => false,
        }
    }
}
