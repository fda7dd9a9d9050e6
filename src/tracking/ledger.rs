//! In-memory session ledger.
//!
//! The [`SessionLedger`] is the session-creation boundary: it owns the
//! sessions of any number of users and rejects every mutation that would
//! break what the aggregation engine relies on (at most one open session per
//! user, check-out after check-in, no overlapping sessions on a date).

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceSession, SessionState, format_clock_time};

use super::validation::{ensure_within_edit_window, validate_manual_entry};

/// Fields of a session that a manual edit may change. `None` keeps the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUpdate {
    /// New check-in time.
    pub check_in: Option<NaiveTime>,
    /// New check-out time.
    pub check_out: Option<NaiveTime>,
    /// New notes; an empty string clears them.
    pub notes: Option<String>,
}

/// Holds sessions and enforces the invariants around creating and editing them.
///
/// # Example
///
/// ```
/// use attendance_engine::config::EngineSettings;
/// use attendance_engine::tracking::SessionLedger;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let mut ledger = SessionLedger::new(EngineSettings::default());
/// let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
///
/// ledger.check_in("user_001", date, NaiveTime::from_hms_opt(9, 0, 0).unwrap()).unwrap();
/// assert!(ledger.check_in("user_001", date, NaiveTime::from_hms_opt(9, 5, 0).unwrap()).is_err());
///
/// let closed = ledger.check_out("user_001", NaiveTime::from_hms_opt(17, 0, 0).unwrap()).unwrap();
/// assert_eq!(closed.worked_minutes(), 480);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionLedger {
    settings: EngineSettings,
    sessions: Vec<AttendanceSession>,
}

fn new_session_id() -> String {
    format!("att_{}", Uuid::new_v4().simple())
}

/// Returns true if two sessions on the same date share any minute.
/// An open session extends to the end of its day.
fn overlaps(a: &AttendanceSession, b: &AttendanceSession) -> bool {
    let starts_before_end = |start: NaiveTime, other: &AttendanceSession| match other.check_out() {
        Some(end) => start < end,
        None => true,
    };
    starts_before_end(a.check_in(), b) && starts_before_end(b.check_in(), a)
}

impl SessionLedger {
    /// Creates an empty ledger.
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            sessions: Vec::new(),
        }
    }

    /// Creates a ledger holding existing sessions, trusted as already valid.
    pub fn with_sessions(settings: EngineSettings, sessions: Vec<AttendanceSession>) -> Self {
        Self { settings, sessions }
    }

    /// All sessions, in insertion order.
    pub fn sessions(&self) -> &[AttendanceSession] {
        &self.sessions
    }

    /// Returns a session by ID.
    pub fn get(&self, session_id: &str) -> Option<&AttendanceSession> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    /// Returns the user's open session, if any.
    pub fn open_session(&self, user_id: &str) -> Option<&AttendanceSession> {
        self.sessions
            .iter()
            .find(|s| s.user_id == user_id && s.is_open())
    }

    /// Returns the user's sessions, newest date first and latest check-in
    /// first within a date.
    pub fn sessions_for_user(&self, user_id: &str) -> Vec<&AttendanceSession> {
        let mut sessions: Vec<&AttendanceSession> = self
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .collect();
        sessions.sort_by(|a, b| b.date.cmp(&a.date).then(b.check_in().cmp(&a.check_in())));
        sessions
    }

    /// Opens a session for the user.
    ///
    /// Fails with `SessionAlreadyOpen` while the user has any open session,
    /// whatever its date.
    pub fn check_in(
        &mut self,
        user_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> EngineResult<&AttendanceSession> {
        if let Some(open) = self.open_session(user_id) {
            return Err(EngineError::SessionAlreadyOpen {
                user_id: user_id.to_string(),
                date: open.date,
            });
        }

        let session = AttendanceSession::open(new_session_id(), user_id, date, time);
        self.ensure_no_overlap(&session)?;

        info!(
            user_id = %user_id,
            session_id = %session.id,
            date = %date,
            check_in = %format_clock_time(time),
            "Checked in"
        );
        self.sessions.push(session);
        Ok(&self.sessions[self.sessions.len() - 1])
    }

    /// Closes the user's open session at `time`.
    pub fn check_out(&mut self, user_id: &str, time: NaiveTime) -> EngineResult<&AttendanceSession> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.user_id == user_id && s.is_open())
            .ok_or_else(|| EngineError::NoOpenSession {
                user_id: user_id.to_string(),
            })?;

        let session = &mut self.sessions[index];
        let check_in = session.check_in();
        if time <= check_in {
            return Err(EngineError::InvalidSession {
                session_id: session.id.clone(),
                message: format!(
                    "check-out {} must be after check-in {}",
                    format_clock_time(time),
                    format_clock_time(check_in)
                ),
            });
        }

        session.state = SessionState::closed(check_in, time);
        info!(
            user_id = %user_id,
            session_id = %session.id,
            worked_minutes = session.worked_minutes(),
            "Checked out"
        );
        Ok(&self.sessions[index])
    }

    /// Adds a closed, manually entered session.
    pub fn add_manual_entry(
        &mut self,
        user_id: &str,
        date: NaiveDate,
        check_in: NaiveTime,
        check_out: NaiveTime,
        notes: Option<String>,
        today: NaiveDate,
    ) -> EngineResult<&AttendanceSession> {
        let id = new_session_id();
        validate_manual_entry(&id, date, check_in, check_out, today, &self.settings)?;

        let mut session = AttendanceSession::closed(id, user_id, date, check_in, check_out).as_manual();
        session.notes = notes.filter(|n| !n.trim().is_empty());
        self.ensure_no_overlap(&session)?;

        info!(
            user_id = %user_id,
            session_id = %session.id,
            date = %date,
            worked_minutes = session.worked_minutes(),
            "Added manual entry"
        );
        self.sessions.push(session);
        Ok(&self.sessions[self.sessions.len() - 1])
    }

    /// Applies a manual edit to a session.
    ///
    /// The edited session is flagged as manual. With a check-out (from the
    /// update or the session) it is re-validated and its worked minutes are
    /// recomputed. Without one it stays open and only the edit window is
    /// checked.
    pub fn update_session(
        &mut self,
        session_id: &str,
        update: SessionUpdate,
        today: NaiveDate,
    ) -> EngineResult<&AttendanceSession> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == session_id)
            .ok_or_else(|| EngineError::SessionNotFound {
                session_id: session_id.to_string(),
            })?;

        let current = &self.sessions[index];
        let check_in = update.check_in.unwrap_or_else(|| current.check_in());
        let state = match update.check_out.or_else(|| current.check_out()) {
            Some(check_out) => {
                validate_manual_entry(
                    session_id,
                    current.date,
                    check_in,
                    check_out,
                    today,
                    &self.settings,
                )?;
                SessionState::closed(check_in, check_out)
            }
            None => {
                ensure_within_edit_window(current.date, today, self.settings.edit_window_months)?;
                SessionState::Open { check_in }
            }
        };

        let mut edited = current.clone();
        edited.state = state;
        edited.is_manual = true;
        if let Some(notes) = update.notes {
            edited.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }
        self.ensure_no_overlap(&edited)?;

        info!(
            session_id = %session_id,
            worked_minutes = edited.worked_minutes(),
            "Updated session"
        );
        self.sessions[index] = edited;
        Ok(&self.sessions[index])
    }

    /// Removes a session. Returns false when no session has the ID.
    pub fn delete_session(&mut self, session_id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != session_id);
        let removed = self.sessions.len() < before;
        if removed {
            info!(session_id = %session_id, "Deleted session");
        }
        removed
    }

    fn ensure_no_overlap(&self, candidate: &AttendanceSession) -> EngineResult<()> {
        let conflict = self.sessions.iter().find(|s| {
            s.id != candidate.id
                && s.user_id == candidate.user_id
                && s.date == candidate.date
                && overlaps(s, candidate)
        });

        match conflict {
            Some(existing) => Err(EngineError::SessionConflict {
                user_id: candidate.user_id.clone(),
                date: candidate.date,
                message: format!("overlaps session '{}'", existing.id),
            }),
            None => Ok(()),
        }
    }
}
