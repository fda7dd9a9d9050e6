//! Range summarization.
//!
//! This module walks every calendar date of an inclusive range, aggregates each
//! date with [`build_day_stats`] and folds the results into a [`ReportSummary`].

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{
    AttendanceSession, CommitmentChange, DayKind, Holiday, ReportSummary, RoundingRule, User,
};

use super::commitment::resolve_commitment;
use super::day_aggregation::build_day_stats;

/// Returns every date from `start` to `end` inclusive, ascending.
///
/// An inverted range yields no dates.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::dates_in_range;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(dates_in_range(start, end).len(), 3); // leap year
/// assert!(dates_in_range(end, start).is_empty());
/// ```
pub fn dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    start.iter_days().take_while(|date| *date <= end).collect()
}

/// Sums closed-session worked minutes per date for one user.
///
/// Sessions belonging to other users are ignored. Open sessions contribute 0.
pub fn worked_minutes_by_date(
    user_id: &str,
    sessions: &[AttendanceSession],
) -> HashMap<NaiveDate, i64> {
    let mut totals: HashMap<NaiveDate, i64> = HashMap::new();
    for session in sessions.iter().filter(|s| s.user_id == user_id) {
        *totals.entry(session.date).or_insert(0) += session.worked_minutes();
    }
    totals
}

/// Builds the report summary for an inclusive date range.
///
/// # Arguments
///
/// * `user_id` - Sessions are filtered to this user
/// * `start` / `end` - The inclusive range; `start > end` gives an empty summary
/// * `sessions` - The attendance history (any users, any dates)
/// * `user` - Default commitment and weekly off days
/// * `holidays` - The user's holiday entries
/// * `commitment_history` - The user's effective-dated commitment changes
/// * `rounding` - Rounding applied to each day's worked minutes
///
/// # Returns
///
/// A [`ReportSummary`] whose `days` hold one entry per date in ascending order
/// and whose totals are the sums of the per-day fields. Each date is counted
/// as exactly one of working day, holiday or off day, based on the cause of
/// its commitment rather than on its status.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::build_report_summary;
/// use attendance_engine::models::{AttendanceSession, RoundingRule, User};
/// use chrono::{NaiveDate, NaiveTime, Weekday};
/// use rust_decimal::Decimal;
///
/// let user = User {
///     id: "user_001".to_string(),
///     name: String::new(),
///     committed_hours_per_day: Decimal::new(8, 0),
///     weekly_off_days: vec![Weekday::Sat, Weekday::Sun],
///     timezone: "UTC".to_string(),
/// };
/// let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let sessions = vec![AttendanceSession::closed(
///     "att_001",
///     "user_001",
///     date,
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
/// )];
///
/// let summary = build_report_summary(
///     "user_001", date, date, &sessions, &user, &[], &[], RoundingRule::None,
/// );
/// assert_eq!(summary.total_worked_minutes, 510);
/// assert_eq!(summary.overtime_minutes, 30);
/// assert_eq!(summary.working_days, 1);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn build_report_summary(
    user_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    sessions: &[AttendanceSession],
    user: &User,
    holidays: &[Holiday],
    commitment_history: &[CommitmentChange],
    rounding: RoundingRule,
) -> ReportSummary {
    let worked_by_date = worked_minutes_by_date(user_id, sessions);
    let mut summary = ReportSummary::empty(start, end);

    for date in dates_in_range(start, end) {
        let commitment = resolve_commitment(user, date, holidays, commitment_history);
        let worked_raw = worked_by_date.get(&date).copied().unwrap_or(0);
        let stats = build_day_stats(date, worked_raw, commitment, rounding);

        match commitment.kind {
            DayKind::Working => summary.working_days += 1,
            DayKind::Holiday => summary.holidays += 1,
            DayKind::OffDay => summary.off_days += 1,
        }

        summary.total_worked_minutes += stats.worked_minutes;
        summary.total_committed_minutes += stats.committed_minutes;
        summary.overtime_minutes += stats.overtime_minutes;
        summary.short_minutes += stats.short_minutes;
        summary.days.push(stats);
    }

    debug!(
        user_id = %user_id,
        start = %start,
        end = %end,
        days = summary.days.len(),
        worked = summary.total_worked_minutes,
        committed = summary.total_committed_minutes,
        "Built report summary"
    );

    summary
}
