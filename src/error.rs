//! Error types for the Attendance Engine.
//!
//! The aggregation functions themselves cannot fail on valid input; these errors
//! come from the layers around them: configuration loading, session validation
//! at the ledger boundary and outbox persistence.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A session was invalid or contained inconsistent data.
    #[error("Invalid session '{session_id}': {message}")]
    InvalidSession {
        /// The ID of the invalid session.
        session_id: String,
        /// A description of what made the session invalid.
        message: String,
    },

    /// A clock time was not in canonical `HH:mm` form.
    #[error("Invalid time '{value}': expected HH:mm")]
    InvalidTime {
        /// The rejected value.
        value: String,
    },

    /// A commitment value was out of range.
    #[error("Invalid commitment: {message}")]
    InvalidCommitment {
        /// A description of the problem.
        message: String,
    },

    /// The user already has a session in progress.
    #[error("User '{user_id}' already has an open session on {date}")]
    SessionAlreadyOpen {
        /// The user attempting to check in.
        user_id: String,
        /// The date of the session that is still open.
        date: NaiveDate,
    },

    /// Check-out was requested but nothing is open.
    #[error("User '{user_id}' has no open session")]
    NoOpenSession {
        /// The user attempting to check out.
        user_id: String,
    },

    /// A session would overlap another session for the same user and date.
    #[error("Session conflict for user '{user_id}' on {date}: {message}")]
    SessionConflict {
        /// The user owning the sessions.
        user_id: String,
        /// The date of the conflict.
        date: NaiveDate,
        /// A description of the conflict.
        message: String,
    },

    /// No session exists with the given ID.
    #[error("Session not found: {session_id}")]
    SessionNotFound {
        /// The ID that was looked up.
        session_id: String,
    },

    /// The entry is older than the editable window.
    #[error("Entries dated {date} are older than {months} months and can no longer be edited")]
    EditWindowExceeded {
        /// The date of the rejected entry.
        date: NaiveDate,
        /// The configured window in months.
        months: u32,
    },

    /// A custom report range covers more days than the configured limit.
    #[error("Report range {start_date} to {end_date} spans {days} days, more than the limit of {max_days}")]
    ReportRangeTooLong {
        /// First date of the requested range.
        start_date: NaiveDate,
        /// Last date of the requested range.
        end_date: NaiveDate,
        /// Number of days requested.
        days: i64,
        /// The configured limit.
        max_days: u32,
    },

    /// Reading or writing persisted state failed.
    #[error("Storage error at '{path}': {message}")]
    StorageError {
        /// The file involved.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
