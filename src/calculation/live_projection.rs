//! Live session projection.
//!
//! Folds the elapsed time of today's open sessions into today's entry of an
//! already computed [`ReportSummary`]. The result is advisory and must not be
//! persisted.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AttendanceSession, ReportSummary, RoundingRule};

use super::day_aggregation::build_day_stats;

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    /// The current naive local timestamp.
    fn now(&self) -> NaiveDateTime;

    /// The current calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the system's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant. Used by tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// A summary with today's open sessions folded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveProjection {
    /// The patched summary.
    pub summary: ReportSummary,
    /// Minutes elapsed across today's open sessions that were folded in.
    pub live_minutes: i64,
    /// The date that was projected.
    pub date: NaiveDate,
}

/// Projects today's open sessions into the summary.
///
/// `live_minutes` is the sum of elapsed minutes since check-in over the
/// user's open sessions dated today. When it is positive and today lies in
/// the summary's range, today's [`DayStats`](crate::models::DayStats) is
/// recomputed from the closed-session total plus the live minutes and the
/// range totals are patched in place. Otherwise the summary is returned
/// unchanged with `live_minutes` of 0.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{FixedClock, build_report_summary, project_live_day};
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
/// let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let sessions = vec![AttendanceSession::open(
///     "att_001",
///     "user_001",
///     today,
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
/// )];
/// let summary = build_report_summary(
///     "user_001", today, today, &sessions, &user, &[], &[], RoundingRule::None,
/// );
///
/// let clock = FixedClock(today.and_hms_opt(10, 30, 0).unwrap());
/// let projection = project_live_day(summary, "user_001", &sessions, RoundingRule::None, &clock);
/// assert_eq!(projection.live_minutes, 90);
/// assert_eq!(projection.summary.total_worked_minutes, 90);
/// ```
pub fn project_live_day(
    mut summary: ReportSummary,
    user_id: &str,
    sessions: &[AttendanceSession],
    rounding: RoundingRule,
    clock: &dyn Clock,
) -> LiveProjection {
    let now = clock.now();
    let today = now.date();

    let todays: Vec<&AttendanceSession> = sessions
        .iter()
        .filter(|s| s.user_id == user_id && s.date == today)
        .collect();

    let live_minutes: i64 = todays
        .iter()
        .filter(|s| s.is_open())
        .map(|s| s.elapsed_minutes(now))
        .sum();

    let Some(commitment) = summary.day(today).map(|d| d.commitment()) else {
        return LiveProjection {
            summary,
            live_minutes: 0,
            date: today,
        };
    };

    if live_minutes <= 0 {
        return LiveProjection {
            summary,
            live_minutes: 0,
            date: today,
        };
    }

    let closed_minutes: i64 = todays.iter().map(|s| s.worked_minutes()).sum();
    let stats = build_day_stats(today, closed_minutes + live_minutes, commitment, rounding);
    summary.replace_day(stats);

    debug!(
        user_id = %user_id,
        date = %today,
        closed_minutes,
        live_minutes,
        "Projected open sessions into today"
    );

    LiveProjection {
        summary,
        live_minutes,
        date: today,
    }
}
