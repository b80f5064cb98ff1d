//! Circulation events recorded by the library journal.
//!
//! Only successful transitions are recorded. The journal lives in memory and
//! is discarded when the process exits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single checkout or return that changed library state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CirculationEvent {
    /// Unique identifier for this event
    pub id: Uuid,

    /// When the transition happened (ISO 8601)
    pub timestamp: DateTime<Utc>,

    /// Which transition happened
    pub event_type: EventType,

    /// ID of the patron as stored on the roster
    pub patron_id: String,

    /// Patron display name at the time of the event
    pub patron_name: String,

    /// Book title as stored in the catalog
    pub title: String,
}

impl CirculationEvent {
    /// Create a new event with the current timestamp
    pub fn new(
        event_type: EventType,
        patron_id: impl Into<String>,
        patron_name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event_type,
            patron_id: patron_id.into(),
            patron_name: patron_name.into(),
            title: title.into(),
        }
    }
}

/// Kinds of circulation transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Available -> CheckedOut
    CheckedOut,

    /// CheckedOut -> Available
    Returned,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::CheckedOut => write!(f, "checked out"),
            EventType::Returned => write!(f, "returned"),
        }
    }
}
