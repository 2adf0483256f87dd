//! Error types for the labor-day calendar.
//!
//! Pay calculation itself never fails: malformed numbers are coerced to zero
//! and missing entries are skipped. The variants here cover the layers around
//! it (configuration, date-key parsing, snapshot files and the remote mirror).

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the labor-day calendar.
///
/// # Example
///
/// ```
/// use gongsu_calendar::error::CalendarError;
///
/// let error = CalendarError::ConfigNotFound {
///     path: "/missing/gongsu.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/gongsu.yaml");
/// ```
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A date key was not a valid `YYYY-MM-DD` calendar date.
    #[error("Invalid date key '{key}': expected YYYY-MM-DD")]
    InvalidDateKey {
        /// The rejected key.
        key: String,
    },

    /// A month number outside 1..=12 was requested.
    #[error("Invalid month {month} for year {year}: expected 1-12")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The rejected month.
        month: u32,
    },

    /// No entry exists for the requested date.
    #[error("No work entry recorded for {date}")]
    EntryNotFound {
        /// The date that was looked up.
        date: NaiveDate,
    },

    /// Reading or writing the local snapshot failed.
    #[error("Storage error at '{path}': {message}")]
    StorageError {
        /// The snapshot path involved.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// An imported document was not a date-keyed JSON object.
    #[error("Import rejected: {message}")]
    ImportError {
        /// Why the document was rejected.
        message: String,
    },

    /// The remote mirror rejected a request or could not be reached.
    #[error("Remote mirror error: {message}")]
    RemoteError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return CalendarError.
pub type CalendarResult<T> = Result<T, CalendarError>;

impl From<reqwest::Error> for CalendarError {
    fn from(error: reqwest::Error) -> Self {
        CalendarError::RemoteError {
            message: error.to_string(),
        }
    }
}
