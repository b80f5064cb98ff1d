//! Core record store and checkout state machine.
//!
//! This module contains:
//! - Catalog: Ordered book records
//! - Roster: Ordered patron records
//! - Circulation: Checkout/return transitions across both
//! - Library: Composition root with the circulation journal

pub mod catalog;
pub mod circulation;
pub mod library;
pub mod roster;

// Re-export commonly used types
pub use catalog::Catalog;
pub use circulation::{
    check_consistency, holdings_report, Circulation, CirculationError, ConsistencyError, HoldingsReport, Receipt,
};
pub use library::{InvalidSeed, Library, Seed, SeedBook, SeedPatron};
pub use roster::Roster;
