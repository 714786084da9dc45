//! Error types for the mela engine.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in mela operations.
#[derive(Error, Debug)]
pub enum MelaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Event '{id}' ends on {end} before it starts on {start}")]
    InvalidEvent {
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Duplicate event id in catalog: {0}")]
    DuplicateEvent(String),

    #[error("Event not found: {0}")]
    UnknownEvent(String),

    #[error("Reminder window must be between {min} and {max} days, got {got}")]
    InvalidReminderWindow { got: i64, min: i64, max: i64 },

    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Preference store error: {0}")]
    PreferenceStore(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for mela operations.
pub type MelaResult<T> = Result<T, MelaError>;
