//! The library: one catalog, one roster and the circulation journal.
//!
//! A single `Library` is built at startup and passed by `&mut` to whatever
//! drives it. All circulation goes through here so successful transitions
//! are journaled.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::circulation::{self, Circulation, CirculationError, ConsistencyError, HoldingsReport, Receipt};
use super::{Catalog, Roster};
use crate::domain::{BookRef, CirculationEvent, EventType, PatronRef};

/// A book entry in the startup seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedBook {
    pub title: String,
    pub author: String,
    pub year: i32,
}

/// A patron entry in the startup seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPatron {
    pub name: String,
    pub id: String,
}

/// Records added to a fresh library before the first command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub books: Vec<SeedBook>,
    #[serde(default)]
    pub patrons: Vec<SeedPatron>,
}

/// Seed entries that cannot be loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSeed {
    #[error("seed book #{position} has an empty title")]
    EmptyTitle { position: usize },

    #[error("seed patron #{position} has an empty ID")]
    EmptyPatronId { position: usize },
}

impl Default for Seed {
    fn default() -> Self {
        Self::standard()
    }
}

impl Seed {
    /// The demo collection every run starts with unless configured otherwise
    pub fn standard() -> Self {
        let book = |title: &str, author: &str, year| SeedBook {
            title: title.to_string(),
            author: author.to_string(),
            year,
        };
        let patron = |name: &str, id: &str| SeedPatron {
            name: name.to_string(),
            id: id.to_string(),
        };

        Self {
            books: vec![
                book("The Lord of the Rings", "J.R.R. Tolkien", 1954),
                book("1984", "George Orwell", 1949),
                book("Dune", "Frank Herbert", 1965),
            ],
            patrons: vec![patron("Alice", "P101"), patron("Bob", "P102")],
        }
    }

    /// No books, no patrons
    pub fn empty() -> Self {
        Self {
            books: Vec::new(),
            patrons: Vec::new(),
        }
    }

    /// Reject entries the interactive shell would never let through.
    /// Positions are 1-based.
    pub fn validate(&self) -> Result<(), InvalidSeed> {
        if let Some(idx) = self.books.iter().position(|b| b.title.trim().is_empty()) {
            return Err(InvalidSeed::EmptyTitle { position: idx + 1 });
        }
        if let Some(idx) = self.patrons.iter().position(|p| p.id.trim().is_empty()) {
            return Err(InvalidSeed::EmptyPatronId { position: idx + 1 });
        }
        Ok(())
    }
}

/// Catalog, roster and journal for one process run
#[derive(Debug, Clone, Default)]
pub struct Library {
    catalog: Catalog,
    roster: Roster,
    journal: Vec<CirculationEvent>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library pre-populated from a seed
    pub fn seeded(seed: &Seed) -> Result<Self, InvalidSeed> {
        seed.validate()?;

        let mut library = Self::new();
        for book in &seed.books {
            library.add_book(&book.title, &book.author, book.year);
        }
        for patron in &seed.patrons {
            library.add_patron(&patron.name, &patron.id);
        }

        info!(
            books = library.catalog.len(),
            patrons = library.roster.len(),
            "Library seeded"
        );
        Ok(library)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Successful checkouts and returns, oldest first
    pub fn journal(&self) -> &[CirculationEvent] {
        &self.journal
    }

    pub fn add_book(&mut self, title: &str, author: &str, publication_year: i32) -> BookRef {
        self.catalog.add_book(title, author, publication_year)
    }

    pub fn add_patron(&mut self, name: &str, id: &str) -> PatronRef {
        self.roster.add_patron(name, id)
    }

    fn circulation(&mut self) -> Circulation<'_> {
        Circulation::new(&mut self.catalog, &mut self.roster)
    }

    pub fn checkout(&mut self, patron_id: &str, title: &str) -> Result<Receipt, CirculationError> {
        let receipt = self.circulation().checkout(patron_id, title)?;
        self.record(EventType::CheckedOut, &receipt);
        Ok(receipt)
    }

    pub fn return_book(&mut self, patron_id: &str, title: &str) -> Result<Receipt, CirculationError> {
        let receipt = self.circulation().return_book(patron_id, title)?;
        self.record(EventType::Returned, &receipt);
        Ok(receipt)
    }

    pub fn holdings_report(&self, patron_id: &str) -> Result<HoldingsReport, CirculationError> {
        circulation::holdings_report(&self.roster, patron_id)
    }

    /// Check the availability/holdings invariant across the whole library
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        circulation::check_consistency(&self.catalog, &self.roster)
    }

    fn record(&mut self, event_type: EventType, receipt: &Receipt) {
        self.journal.push(CirculationEvent::new(
            event_type,
            &receipt.patron_id,
            &receipt.patron_name,
            &receipt.title,
        ));
    }
}
