//! Domain types for bookdesk.
//!
//! This module contains the core data structures:
//! - Book: Catalog records and their availability
//! - Patron: Roster records and their holdings
//! - Events: Successful circulation transitions

pub mod book;
pub mod events;
pub mod patron;

// Re-export commonly used types
pub use book::{Availability, Book, BookRef};
pub use events::{CirculationEvent, EventType};
pub use patron::{Patron, PatronRef};

/// Case-insensitive key comparison used for titles, authors and patron IDs
pub fn same_key(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
