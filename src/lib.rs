//! bookdesk - In-memory library catalog with checkout tracking
//!
//! Tracks books and patrons for a single interactive session and keeps a
//! book's availability in step with the holdings of the patron who has it.
//!
//! # Architecture
//!
//! - Catalog and Roster own the records and are searched linearly
//! - Circulation borrows both for one checkout or return at a time, checking
//!   every precondition before writing anything
//! - Library composes the two with an in-memory journal of successful
//!   transitions
//!
//! Nothing is persisted; state is discarded when the process exits.
//!
//! # Modules
//!
//! - `domain`: Data structures (Book, Patron, CirculationEvent)
//! - `core`: Catalog, Roster, Circulation, Library
//! - `config`: Seed and shell settings
//! - `cli`: Command-line interface and interactive menu
//!
//! # Usage
//!
//! ```bash
//! # Interactive menu
//! bookdesk
//!
//! # One-shot views of the seeded library
//! bookdesk books --json
//! bookdesk search --author "Frank Herbert"
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use self::core::{Catalog, Circulation, CirculationError, Library, Roster, Seed};
pub use domain::{Availability, Book, BookRef, CirculationEvent, EventType, Patron, PatronRef};
