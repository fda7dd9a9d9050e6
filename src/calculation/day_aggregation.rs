//! Day aggregation.
//!
//! Turns the summed worked minutes of one date and that date's commitment into
//! a [`DayStats`] record: rounded worked minutes, a status and the
//! overtime/shortfall split.

use chrono::NaiveDate;

use crate::models::{DayCommitment, DayKind, DayStats, DayStatus, RoundingRule};

use super::rounding::round_minutes;

/// Classifies a day. The first matching rule wins:
///
/// - zero commitment with work: [`DayStatus::Overtime`]
/// - zero commitment without work: [`DayStatus::Holiday`] or [`DayStatus::Off`]
///   depending on the cause
/// - no worked minutes: [`DayStatus::Short`]
/// - worked above commitment: [`DayStatus::Overtime`]; equal: [`DayStatus::Complete`]
/// - otherwise [`DayStatus::Short`]
pub fn classify_day(
    worked_minutes: i64,
    has_work: bool,
    commitment: DayCommitment,
) -> DayStatus {
    let committed = commitment.minutes;

    if committed == 0 {
        return match (has_work, commitment.kind) {
            (true, _) => DayStatus::Overtime,
            (false, DayKind::Holiday) => DayStatus::Holiday,
            (false, _) => DayStatus::Off,
        };
    }

    if worked_minutes == 0 {
        DayStatus::Short
    } else if worked_minutes > committed {
        DayStatus::Overtime
    } else if worked_minutes == committed {
        DayStatus::Complete
    } else {
        DayStatus::Short
    }
}

/// Builds the statistics for one date.
///
/// `worked_minutes_raw` is the sum over the day's closed sessions; a day with a
/// raw sum of 0 counts as a day without sessions. Overtime and shortfall are
/// computed from the rounded worked minutes and only on days with a non-zero
/// commitment.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::build_day_stats;
/// use attendance_engine::models::{DayCommitment, DayStatus, RoundingRule};
/// use chrono::NaiveDate;
///
/// let stats = build_day_stats(
///     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
///     210,
///     DayCommitment::working(480),
///     RoundingRule::None,
/// );
/// assert_eq!(stats.status, DayStatus::Short);
/// assert_eq!(stats.short_minutes, 270);
/// ```
pub fn build_day_stats(
    date: NaiveDate,
    worked_minutes_raw: i64,
    commitment: DayCommitment,
    rounding: RoundingRule,
) -> DayStats {
    let worked = round_minutes(worked_minutes_raw, rounding);
    let committed = commitment.minutes;
    let status = classify_day(worked, worked_minutes_raw > 0, commitment);

    let (overtime_minutes, short_minutes) = if committed > 0 {
        ((worked - committed).max(0), (committed - worked).max(0))
    } else {
        (0, 0)
    };

    DayStats {
        date,
        worked_minutes: worked,
        committed_minutes: committed,
        status,
        overtime_minutes,
        short_minutes,
        is_off_day: commitment.kind == DayKind::OffDay,
        is_holiday: commitment.kind == DayKind::Holiday,
    }
}
