//! Attendance session model.
//!
//! A session is one check-in/check-out pair on one calendar date. The open/closed
//! distinction is a tagged variant ([`SessionState`]); on the wire a session is
//! the flat record collaborators store, with an optional check-out time and a
//! cached worked-minutes value that is recomputed whenever a record is accepted.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// Canonical clock-time format for check-in and check-out.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses a canonical `HH:mm` time.
///
/// # Example
///
/// ```
/// use attendance_engine::models::parse_clock_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_clock_time("09:05").unwrap(), NaiveTime::from_hms_opt(9, 5, 0).unwrap());
/// assert!(parse_clock_time("9:5pm").is_err());
/// ```
pub fn parse_clock_time(value: &str) -> EngineResult<NaiveTime> {
    if value.len() != 5 {
        return Err(EngineError::InvalidTime {
            value: value.to_string(),
        });
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| EngineError::InvalidTime {
        value: value.to_string(),
    })
}

/// Formats a time as `HH:mm`.
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Returns `max(0, check_out - check_in)` in whole minutes.
pub fn worked_minutes_between(check_in: NaiveTime, check_out: NaiveTime) -> i64 {
    let minutes = (check_out - check_in).num_minutes();
    if minutes < 0 {
        warn!(
            check_in = %check_in,
            check_out = %check_out,
            "Check-out precedes check-in, clamping worked minutes to 0"
        );
        return 0;
    }
    minutes
}

/// Lifecycle label of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Checked in, not yet checked out.
    Incomplete,
    /// Closed by a regular check-out.
    Complete,
    /// Closed, with at least one field edited by the user.
    Manual,
}

/// Open/closed state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Checked in with no check-out yet.
    Open {
        /// Check-in time.
        check_in: NaiveTime,
    },
    /// Checked in and out.
    Closed {
        /// Check-in time.
        check_in: NaiveTime,
        /// Check-out time.
        check_out: NaiveTime,
        /// `max(0, check_out - check_in)` in minutes.
        worked_minutes: i64,
    },
}

impl SessionState {
    /// Builds a closed state, deriving the worked minutes.
    pub fn closed(check_in: NaiveTime, check_out: NaiveTime) -> Self {
        SessionState::Closed {
            check_in,
            check_out,
            worked_minutes: worked_minutes_between(check_in, check_out),
        }
    }
}

/// One check-in/check-out pair for a user on one calendar date.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceSession, SessionStatus};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let session = AttendanceSession::closed(
///     "att_001",
///     "user_001",
///     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
/// );
/// assert_eq!(session.worked_minutes(), 510);
/// assert_eq!(session.status(), SessionStatus::Complete);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord", into = "SessionRecord")]
pub struct AttendanceSession {
    /// Unique identifier for the session.
    pub id: String,
    /// The user who checked in.
    pub user_id: String,
    /// Calendar date the session belongs to.
    pub date: NaiveDate,
    /// Open or closed state with its times.
    pub state: SessionState,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Whether the session was entered or edited by hand.
    pub is_manual: bool,
}

impl AttendanceSession {
    /// Creates an open session (a check-in).
    pub fn open(
        id: impl Into<String>,
        user_id: impl Into<String>,
        date: NaiveDate,
        check_in: NaiveTime,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            date,
            state: SessionState::Open { check_in },
            notes: None,
            is_manual: false,
        }
    }

    /// Creates a closed session.
    pub fn closed(
        id: impl Into<String>,
        user_id: impl Into<String>,
        date: NaiveDate,
        check_in: NaiveTime,
        check_out: NaiveTime,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            date,
            state: SessionState::closed(check_in, check_out),
            notes: None,
            is_manual: false,
        }
    }

    /// Returns the check-in time.
    pub fn check_in(&self) -> NaiveTime {
        match self.state {
            SessionState::Open { check_in } | SessionState::Closed { check_in, .. } => check_in,
        }
    }

    /// Returns the check-out time, if the session is closed.
    pub fn check_out(&self) -> Option<NaiveTime> {
        match self.state {
            SessionState::Open { .. } => None,
            SessionState::Closed { check_out, .. } => Some(check_out),
        }
    }

    /// Returns true while the session has no check-out.
    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open { .. })
    }

    /// Worked minutes of a closed session; 0 while open.
    pub fn worked_minutes(&self) -> i64 {
        match self.state {
            SessionState::Open { .. } => 0,
            SessionState::Closed { worked_minutes, .. } => worked_minutes,
        }
    }

    /// Minutes elapsed since check-in at `now`, never negative.
    ///
    /// Only meaningful for open sessions; closed sessions return 0.
    pub fn elapsed_minutes(&self, now: NaiveDateTime) -> i64 {
        match self.state {
            SessionState::Open { check_in } => {
                let started = self.date.and_time(check_in);
                (now - started).num_minutes().max(0)
            }
            SessionState::Closed { .. } => 0,
        }
    }

    /// Derived lifecycle status.
    pub fn status(&self) -> SessionStatus {
        match (self.state, self.is_manual) {
            (SessionState::Open { .. }, _) => SessionStatus::Incomplete,
            (SessionState::Closed { .. }, true) => SessionStatus::Manual,
            (SessionState::Closed { .. }, false) => SessionStatus::Complete,
        }
    }

    /// Returns the session with notes attached.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns the session flagged as manually entered.
    pub fn as_manual(mut self) -> Self {
        self.is_manual = true;
        self
    }
}

/// Flat wire shape of a session as stored by collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    id: String,
    user_id: String,
    date: NaiveDate,
    check_in_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    check_out_time: Option<String>,
    /// Cached value; recomputed on input.
    #[serde(default)]
    total_worked_minutes: i64,
    /// Derived; ignored on input.
    #[serde(default)]
    status: Option<SessionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default)]
    is_manual: bool,
}

impl TryFrom<SessionRecord> for AttendanceSession {
    type Error = EngineError;

    fn try_from(record: SessionRecord) -> EngineResult<Self> {
        let check_in = parse_clock_time(&record.check_in_time)?;
        let state = match record.check_out_time.as_deref() {
            None | Some("") => SessionState::Open { check_in },
            Some(out) => SessionState::closed(check_in, parse_clock_time(out)?),
        };

        Ok(AttendanceSession {
            id: record.id,
            user_id: record.user_id,
            date: record.date,
            state,
            notes: record.notes,
            is_manual: record.is_manual,
        })
    }
}

impl From<AttendanceSession> for SessionRecord {
    fn from(session: AttendanceSession) -> Self {
        SessionRecord {
            check_in_time: format_clock_time(session.check_in()),
            check_out_time: session.check_out().map(format_clock_time),
            total_worked_minutes: session.worked_minutes(),
            status: Some(session.status()),
            id: session.id,
            user_id: session.user_id,
            date: session.date,
            notes: session.notes,
            is_manual: session.is_manual,
        }
    }
}
