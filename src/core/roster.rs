//! Roster of registered patrons.

use tracing::debug;

use crate::domain::{same_key, Patron, PatronRef};

/// Ordered collection of patrons.
///
/// IDs are not enforced unique; lookup returns the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    patrons: Vec<Patron>,
}

impl Roster {
    /// Create a new empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a patron with no holdings
    pub fn add_patron(&mut self, name: impl Into<String>, id: impl Into<String>) -> PatronRef {
        let patron = Patron::new(name, id);
        debug!(name = %patron.name, patron_id = %patron.id, "Adding patron");

        self.patrons.push(patron);
        PatronRef(self.patrons.len() - 1)
    }

    /// Get a patron by handle
    pub fn get(&self, patron: PatronRef) -> &Patron {
        &self.patrons[patron.0]
    }

    pub(crate) fn get_mut(&mut self, patron: PatronRef) -> &mut Patron {
        &mut self.patrons[patron.0]
    }

    /// Find the first patron whose ID matches (case-insensitive)
    pub fn find_by_id(&self, id: &str) -> Option<PatronRef> {
        self.patrons
            .iter()
            .position(|patron| same_key(&patron.id, id))
            .map(PatronRef)
    }

    /// All patrons in insertion order
    pub fn list_all(&self) -> impl Iterator<Item = PatronRef> + '_ {
        (0..self.patrons.len()).map(PatronRef)
    }

    /// Titles currently held by a patron, in checkout order
    pub fn holdings_of(&self, patron: PatronRef) -> &[String] {
        &self.get(patron).holdings
    }

    /// Borrow the underlying records, in insertion order
    pub fn patrons(&self) -> &[Patron] {
        &self.patrons
    }

    pub fn len(&self) -> usize {
        self.patrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patrons.is_empty()
    }
}
