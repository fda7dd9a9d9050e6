//! Report diagnostics.
//!
//! Inspects report input for data the session-creation layer should have
//! rejected. Warnings are informational; they never alter computed figures.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{AttendanceSession, CommitmentChange, ReportWarning, format_clock_time};

/// Two commitment changes share an effective date.
pub const AMBIGUOUS_COMMITMENT: &str = "AMBIGUOUS_COMMITMENT";
/// An open session is dated before today.
pub const STALE_OPEN_SESSION: &str = "STALE_OPEN_SESSION";
/// Two sessions on one date overlap in time.
pub const OVERLAPPING_SESSIONS: &str = "OVERLAPPING_SESSIONS";

fn warning(code: &str, message: String, severity: &str) -> ReportWarning {
    ReportWarning {
        code: code.to_string(),
        message,
        severity: severity.to_string(),
    }
}

/// Collects diagnostics for one user's report input.
///
/// Warnings are ordered by kind (ambiguous commitments, stale open sessions,
/// overlapping sessions) and by date within a kind.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::collect_warnings;
/// use attendance_engine::models::AttendanceSession;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let yesterday = NaiveDate::from_ymd_opt(2024, 6, 11).unwrap();
/// let sessions = vec![AttendanceSession::open(
///     "att_001",
///     "user_001",
///     yesterday,
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
/// )];
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
/// let warnings = collect_warnings("user_001", &sessions, &[], today);
/// assert_eq!(warnings[0].code, "STALE_OPEN_SESSION");
/// ```
pub fn collect_warnings(
    user_id: &str,
    sessions: &[AttendanceSession],
    commitment_history: &[CommitmentChange],
    today: NaiveDate,
) -> Vec<ReportWarning> {
    let mut warnings = Vec::new();

    let mut by_effective_date: BTreeMap<NaiveDate, Vec<&CommitmentChange>> = BTreeMap::new();
    for change in commitment_history {
        by_effective_date
            .entry(change.effective_from)
            .or_default()
            .push(change);
    }
    for (date, changes) in by_effective_date.iter().filter(|(_, c)| c.len() > 1) {
        let ids: Vec<&str> = changes.iter().map(|c| c.id.as_str()).collect();
        warn!(
            user_id = %user_id,
            effective_from = %date,
            entries = ?ids,
            "Ambiguous commitment history"
        );
        warnings.push(warning(
            AMBIGUOUS_COMMITMENT,
            format!(
                "{} commitment changes take effect on {}; using '{}'",
                changes.len(),
                date,
                ids[0]
            ),
            "medium",
        ));
    }

    let mut by_date: BTreeMap<NaiveDate, Vec<&AttendanceSession>> = BTreeMap::new();
    for session in sessions.iter().filter(|s| s.user_id == user_id) {
        by_date.entry(session.date).or_default().push(session);
    }

    for session in by_date.values().flatten().filter(|s| s.is_open() && s.date < today) {
        warnings.push(warning(
            STALE_OPEN_SESSION,
            format!(
                "Session '{}' checked in on {} at {} was never checked out",
                session.id,
                session.date,
                format_clock_time(session.check_in())
            ),
            "high",
        ));
    }

    for (date, day_sessions) in by_date.iter_mut() {
        day_sessions.sort_by_key(|s| s.check_in());
        for pair in day_sessions.windows(2) {
            let (earlier, later) = (pair[0], pair[1]);
            let overlaps = match earlier.check_out() {
                Some(check_out) => later.check_in() < check_out,
                None => true,
            };
            if overlaps {
                warnings.push(warning(
                    OVERLAPPING_SESSIONS,
                    format!(
                        "Sessions '{}' and '{}' overlap on {}",
                        earlier.id, later.id, date
                    ),
                    "medium",
                ));
            }
        }
    }

    warnings
}
