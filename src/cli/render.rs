//! Text rendering for listings and circulation outcomes.

use std::io::{self, Write};

use crate::core::{Catalog, CirculationError, HoldingsReport, Receipt, Roster};
use crate::domain::{Book, CirculationEvent, EventType};

const RULE: &str = "------------------------------------";

/// Which desk action produced an outcome; failure wording differs slightly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Checkout,
    Return,
    Holdings,
}

fn write_book(out: &mut impl Write, book: &Book, with_status: bool) -> io::Result<()> {
    writeln!(out, "  Title: {}", book.title)?;
    writeln!(out, "  Author: {}", book.author)?;
    writeln!(out, "  Year: {}", book.publication_year)?;
    if with_status {
        writeln!(out, "  Status: {}", book.availability)?;
        if let Some(holder) = book.held_by() {
            writeln!(out, "  Checked out by Patron ID: {}", holder)?;
        }
    }
    writeln!(out, "{}", RULE)
}

pub fn books(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    if catalog.is_empty() {
        return writeln!(out, "The library has no books.");
    }

    writeln!(out, "\n--- Current Library Collection ---")?;
    for book in catalog.list_all() {
        write_book(out, catalog.get(book), true)?;
    }
    Ok(())
}

pub fn author_search(out: &mut impl Write, catalog: &Catalog, author: &str) -> io::Result<()> {
    writeln!(out, "Searching for books by: {}", author)?;

    let mut found = false;
    for book in catalog.find_all_by_author(author) {
        write_book(out, catalog.get(book), false)?;
        found = true;
    }

    if !found {
        writeln!(out, "No books found by that author.")?;
    }
    Ok(())
}

pub fn patrons(out: &mut impl Write, roster: &Roster) -> io::Result<()> {
    if roster.is_empty() {
        return writeln!(out, "No patrons registered yet.");
    }

    writeln!(out, "\n--- Registered Patrons ---")?;
    for patron in roster.list_all() {
        let patron = roster.get(patron);
        writeln!(out, "Patron Name: {} | ID: {}", patron.name, patron.id)?;
    }
    Ok(())
}

pub fn holdings(out: &mut impl Write, report: &HoldingsReport) -> io::Result<()> {
    writeln!(out, "\n--- Books checked out by {} ---", report.patron_name)?;
    if report.titles.is_empty() {
        return writeln!(out, "This patron has no books checked out.");
    }

    for title in &report.titles {
        writeln!(out, "- {}", title)?;
    }
    Ok(())
}

pub fn journal(out: &mut impl Write, events: &[CirculationEvent]) -> io::Result<()> {
    if events.is_empty() {
        return writeln!(out, "No circulation activity yet.");
    }

    writeln!(out, "\n--- Circulation History ---")?;
    for event in events {
        writeln!(
            out,
            "{} {} ({}) {} '{}'",
            event.timestamp.format("%Y-%m-%d %H:%M:%S"),
            event.patron_name,
            event.patron_id,
            event.event_type,
            event.title
        )?;
    }
    Ok(())
}

/// Confirmation line for a successful checkout or return
pub fn receipt(kind: EventType, receipt: &Receipt) -> String {
    match kind {
        EventType::CheckedOut => format!(
            "Successfully checked out '{}' to {}.",
            receipt.title, receipt.patron_name
        ),
        EventType::Returned => format!(
            "Successfully returned '{}' from {}.",
            receipt.title, receipt.patron_name
        ),
    }
}

/// User-facing message for a refused request
pub fn failure(action: Action, err: &CirculationError) -> String {
    match (action, err) {
        (Action::Checkout, CirculationError::PatronNotFound { .. }) => {
            "Patron not found. Please add the patron first.".to_string()
        }
        (Action::Holdings, CirculationError::PatronNotFound { .. }) => {
            "Error: Patron not found.".to_string()
        }
        (_, CirculationError::PatronNotFound { .. }) => "Patron not found.".to_string(),
        (_, CirculationError::BookNotFound { .. }) => "Book not found.".to_string(),
        (_, CirculationError::AlreadyCheckedOut { title }) => {
            format!("Sorry, '{}' is already checked out.", title)
        }
        (_, CirculationError::NotCheckedOutByThisPatron { .. }) => {
            "This book was not checked out to this patron.".to_string()
        }
    }
}
