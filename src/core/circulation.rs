//! Checkout and return transactions.
//!
//! Each book moves between two states:
//!
//! ```text
//! Available --checkout(p)--> CheckedOut(p) --return(p)--> Available
//! ```
//!
//! Every precondition is checked before anything is written, so a failed
//! transition leaves both the catalog and the roster untouched.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::{Catalog, Roster};
use crate::domain::{same_key, Availability, BookRef, PatronRef};

/// Reasons a circulation request is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CirculationError {
    #[error("Patron not found: {patron_id}")]
    PatronNotFound { patron_id: String },

    #[error("Book not found: {title}")]
    BookNotFound { title: String },

    #[error("'{title}' is already checked out")]
    AlreadyCheckedOut { title: String },

    #[error("'{title}' was not checked out to patron {patron_id}")]
    NotCheckedOutByThisPatron { title: String, patron_id: String },
}

/// Outcome of a successful checkout or return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub book: BookRef,
    pub patron: PatronRef,

    /// Title as stored in the catalog
    pub title: String,

    /// Patron ID as stored on the roster
    pub patron_id: String,

    pub patron_name: String,
}

/// A patron's current holdings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoldingsReport {
    pub patron_name: String,
    pub patron_id: String,
    pub titles: Vec<String>,
}

/// Coordinates one catalog and one roster for the length of a borrow.
///
/// Holds no state of its own.
pub struct Circulation<'a> {
    catalog: &'a mut Catalog,
    roster: &'a mut Roster,
}

impl<'a> Circulation<'a> {
    pub fn new(catalog: &'a mut Catalog, roster: &'a mut Roster) -> Self {
        Self { catalog, roster }
    }

    /// Lend a book to a patron
    pub fn checkout(&mut self, patron_id: &str, title: &str) -> Result<Receipt, CirculationError> {
        let (patron, book) = self.resolve(patron_id, title)?;

        if !self.catalog.get(book).is_available() {
            debug!(patron_id, title, "Checkout refused: already checked out");
            return Err(CirculationError::AlreadyCheckedOut {
                title: title.to_string(),
            });
        }

        let receipt = self.receipt(book, patron);

        self.catalog.get_mut(book).availability = Availability::CheckedOut {
            patron_id: receipt.patron_id.clone(),
        };
        self.roster.get_mut(patron).take_out(receipt.title.clone());

        debug!(patron_id = %receipt.patron_id, title = %receipt.title, "Book checked out");
        Ok(receipt)
    }

    /// Take a book back from the patron holding it
    pub fn return_book(&mut self, patron_id: &str, title: &str) -> Result<Receipt, CirculationError> {
        let (patron, book) = self.resolve(patron_id, title)?;

        let held_by_caller = self
            .catalog
            .get(book)
            .held_by()
            .is_some_and(|holder| same_key(holder, patron_id));

        if !held_by_caller {
            debug!(patron_id, title, "Return refused: not held by this patron");
            return Err(CirculationError::NotCheckedOutByThisPatron {
                title: title.to_string(),
                patron_id: patron_id.to_string(),
            });
        }

        let receipt = self.receipt(book, patron);

        self.catalog.get_mut(book).availability = Availability::Available;
        self.roster.get_mut(patron).give_back(&receipt.title);

        debug!(patron_id = %receipt.patron_id, title = %receipt.title, "Book returned");
        Ok(receipt)
    }

    /// Titles currently held by a patron
    pub fn holdings_report(&self, patron_id: &str) -> Result<HoldingsReport, CirculationError> {
        holdings_report(self.roster, patron_id)
    }

    fn find_patron(&self, patron_id: &str) -> Result<PatronRef, CirculationError> {
        find_patron(self.roster, patron_id)
    }

    /// Patron first, then book, matching the order failures are reported in
    fn resolve(&self, patron_id: &str, title: &str) -> Result<(PatronRef, BookRef), CirculationError> {
        let patron = self.find_patron(patron_id)?;

        let book = self.catalog.find_by_title(title).ok_or_else(|| {
            debug!(title, "Book lookup failed");
            CirculationError::BookNotFound {
                title: title.to_string(),
            }
        })?;

        Ok((patron, book))
    }

    fn receipt(&self, book: BookRef, patron: PatronRef) -> Receipt {
        let record = self.roster.get(patron);
        Receipt {
            book,
            patron,
            title: self.catalog.get(book).title.clone(),
            patron_id: record.id.clone(),
            patron_name: record.name.clone(),
        }
    }
}

fn find_patron(roster: &Roster, patron_id: &str) -> Result<PatronRef, CirculationError> {
    roster.find_by_id(patron_id).ok_or_else(|| {
        debug!(patron_id, "Patron lookup failed");
        CirculationError::PatronNotFound {
            patron_id: patron_id.to_string(),
        }
    })
}

/// Titles currently held by a patron. Read-only, so it needs no catalog.
pub fn holdings_report(roster: &Roster, patron_id: &str) -> Result<HoldingsReport, CirculationError> {
    let record = roster.get(find_patron(roster, patron_id)?);

    Ok(HoldingsReport {
        patron_name: record.name.clone(),
        patron_id: record.id.clone(),
        titles: record.holdings.clone(),
    })
}

/// Broken link between a book's availability and a patron's holdings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("'{title}' is held by unknown patron {patron_id}")]
    UnknownHolder { title: String, patron_id: String },

    #[error("patron {patron_id} holds '{title}' {held} time(s) but {checked_out} copy(ies) are checked out to them")]
    HoldingsMismatch {
        patron_id: String,
        title: String,
        held: usize,
        checked_out: usize,
    },
}

/// Verify that every checked-out book is reflected in exactly one holding of
/// its holder, and that no patron holds a title that is not checked out to
/// them.
pub fn check_consistency(catalog: &Catalog, roster: &Roster) -> Result<(), ConsistencyError> {
    // (patron index, lowercased title) -> copies checked out to that patron
    let mut lent: HashMap<(usize, String), usize> = HashMap::new();

    for book in catalog.books() {
        if let Some(holder_id) = book.held_by() {
            let holder = roster
                .find_by_id(holder_id)
                .ok_or_else(|| ConsistencyError::UnknownHolder {
                    title: book.title.clone(),
                    patron_id: holder_id.to_string(),
                })?;
            *lent
                .entry((holder.index(), book.title.to_lowercase()))
                .or_default() += 1;
        }
    }

    for patron_ref in roster.list_all() {
        let patron = roster.get(patron_ref);

        let mut held: HashMap<String, usize> = HashMap::new();
        for title in &patron.holdings {
            *held.entry(title.to_lowercase()).or_default() += 1;
        }

        for (title, &count) in &held {
            let checked_out = lent
                .remove(&(patron_ref.index(), title.clone()))
                .unwrap_or(0);
            if count != checked_out {
                return Err(ConsistencyError::HoldingsMismatch {
                    patron_id: patron.id.clone(),
                    title: title.clone(),
                    held: count,
                    checked_out,
                });
            }
        }
    }

    // Anything left was lent without a matching holding
    if let Some(((idx, title), checked_out)) = lent.into_iter().next() {
        return Err(ConsistencyError::HoldingsMismatch {
            patron_id: roster.patrons()[idx].id.clone(),
            title,
            held: 0,
            checked_out,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Catalog, Roster) {
        let mut catalog = Catalog::new();
        catalog.add_book("Dune", "Frank Herbert", 1965);
        catalog.add_book("1984", "George Orwell", 1949);

        let mut roster = Roster::new();
        roster.add_patron("Alice", "P101");
        roster.add_patron("Bob", "P102");

        (catalog, roster)
    }

    #[test]
    fn test_checkout_stores_canonical_keys() {
        let (mut catalog, mut roster) = setup();
        let receipt = Circulation::new(&mut catalog, &mut roster)
            .checkout("p101", "DUNE")
            .unwrap();

        assert_eq!(receipt.title, "Dune");
        assert_eq!(receipt.patron_id, "P101");
        assert_eq!(receipt.patron_name, "Alice");
        assert_eq!(catalog.get(receipt.book).held_by(), Some("P101"));
        assert_eq!(roster.holdings_of(receipt.patron), ["Dune"]);
        assert!(check_consistency(&catalog, &roster).is_ok());
    }

    #[test]
    fn test_patron_checked_before_book() {
        let (mut catalog, mut roster) = setup();
        let err = Circulation::new(&mut catalog, &mut roster)
            .checkout("P999", "Missing")
            .unwrap_err();

        assert_eq!(
            err,
            CirculationError::PatronNotFound {
                patron_id: "P999".to_string()
            }
        );
    }

    #[test]
    fn test_return_by_other_patron_refused() {
        let (mut catalog, mut roster) = setup();
        let mut circulation = Circulation::new(&mut catalog, &mut roster);
        circulation.checkout("P101", "Dune").unwrap();

        let err = circulation.return_book("P102", "Dune").unwrap_err();
        assert!(matches!(err, CirculationError::NotCheckedOutByThisPatron { .. }));

        assert_eq!(catalog.find_by_title("Dune").map(|b| catalog.get(b).held_by()), Some(Some("P101")));
    }

    #[test]
    fn test_return_is_case_insensitive() {
        let (mut catalog, mut roster) = setup();
        let mut circulation = Circulation::new(&mut catalog, &mut roster);
        circulation.checkout("P101", "1984").unwrap();

        assert!(circulation.return_book("p101", "1984").is_ok());
        assert!(roster.patrons()[0].holdings.is_empty());
    }

    #[test]
    fn test_holdings_report() {
        let (mut catalog, mut roster) = setup();
        let mut circulation = Circulation::new(&mut catalog, &mut roster);
        circulation.checkout("P102", "1984").unwrap();
        circulation.checkout("P102", "Dune").unwrap();

        let report = circulation.holdings_report("p102").unwrap();
        assert_eq!(report.patron_name, "Bob");
        assert_eq!(report.titles, vec!["1984", "Dune"]);

        assert!(matches!(
            circulation.holdings_report("nobody"),
            Err(CirculationError::PatronNotFound { .. })
        ));
    }

    #[test]
    fn test_consistency_detects_orphan_holding() {
        let (catalog, mut roster) = setup();
        roster.get_mut(PatronRef(0)).take_out("Dune");

        let err = check_consistency(&catalog, &roster).unwrap_err();
        assert!(matches!(
            err,
            ConsistencyError::HoldingsMismatch { held: 1, checked_out: 0, .. }
        ));
    }

    #[test]
    fn test_consistency_detects_unknown_holder() {
        let (mut catalog, roster) = setup();
        catalog.get_mut(BookRef(0)).availability = Availability::CheckedOut {
            patron_id: "P404".to_string(),
        };

        assert!(matches!(
            check_consistency(&catalog, &roster),
            Err(ConsistencyError::UnknownHolder { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = CirculationError::AlreadyCheckedOut {
            title: "Dune".to_string(),
        };
        assert_eq!(err.to_string(), "'Dune' is already checked out");
    }
}
