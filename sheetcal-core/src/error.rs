//! Error types for sheetcal.

use thiserror::Error;

/// Errors that can occur while resolving or submitting rows.
#[derive(Error, Debug)]
pub enum SheetCalError {
    #[error("Event must contain a {0}")]
    MissingRequiredField(String),

    #[error("No writable calendar named '{0}'")]
    UnresolvedCalendarName(String),

    #[error("Unknown time zone '{0}'")]
    InvalidTimeZone(String),

    #[error("Could not read '{value}' in column '{column}'")]
    InvalidCell { column: String, value: String },

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Calendar service error: {0}")]
    RemoteService(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Table error: {0}")]
    Table(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for SheetCalError {
    fn from(e: csv::Error) -> Self {
        SheetCalError::Table(e.to_string())
    }
}

impl From<calamine::Error> for SheetCalError {
    fn from(e: calamine::Error) -> Self {
        SheetCalError::Table(e.to_string())
    }
}

/// Result type alias for sheetcal operations.
pub type SheetCalResult<T> = Result<T, SheetCalError>;
