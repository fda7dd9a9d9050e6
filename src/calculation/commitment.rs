//! Commitment resolution.
//!
//! Determines how many minutes a user is expected to work on a given date from
//! their weekly off days, holidays and effective-dated commitment history.
//! Off days and holidays always win over the history lookup.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::models::{CommitmentChange, DayCommitment, Holiday, User, is_holiday, weekday_name};

/// Converts hours per day to whole minutes.
///
/// Fractional minutes round half away from zero; negative values and values
/// too large to represent clamp to 0.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::hours_to_minutes;
/// use rust_decimal::Decimal;
///
/// assert_eq!(hours_to_minutes(Decimal::new(75, 1)), 450); // 7.5h
/// assert_eq!(hours_to_minutes(Decimal::new(-1, 0)), 0);
/// ```
pub fn hours_to_minutes(hours: Decimal) -> i64 {
    hours
        .checked_mul(Decimal::from(60))
        .and_then(|minutes| {
            minutes
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .unwrap_or(0)
        .max(0)
}

/// Returns the commitment-history entry in effect on `date`.
///
/// The entry with the greatest `effective_from` on or before `date` wins. When
/// several entries share that date, the first one in slice order is returned.
pub fn effective_commitment(
    history: &[CommitmentChange],
    date: NaiveDate,
) -> Option<&CommitmentChange> {
    history
        .iter()
        .filter(|c| c.applies_on(date))
        .fold(None, |best: Option<&CommitmentChange>, candidate| match best {
            Some(b) if candidate.effective_from <= b.effective_from => Some(b),
            _ => Some(candidate),
        })
}

/// Resolves the committed minutes for `date` together with their cause.
///
/// Days with a non-zero commitment are [`DayKind::Working`](crate::models::DayKind::Working).
/// Zero-commitment days are holidays when a holiday entry matches the date
/// (even if the weekday is also an off day), otherwise off days.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::resolve_commitment;
/// use attendance_engine::models::{DayKind, User};
/// use chrono::{NaiveDate, Weekday};
/// use rust_decimal::Decimal;
///
/// let user = User {
///     id: "user_001".to_string(),
///     name: String::new(),
///     committed_hours_per_day: Decimal::new(8, 0),
///     weekly_off_days: vec![Weekday::Sat, Weekday::Sun],
///     timezone: "UTC".to_string(),
/// };
///
/// // 2024-06-15 is a Saturday
/// let saturday = resolve_commitment(&user, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(), &[], &[]);
/// assert_eq!(saturday.minutes, 0);
/// assert_eq!(saturday.kind, DayKind::OffDay);
/// ```
pub fn resolve_commitment(
    user: &User,
    date: NaiveDate,
    holidays: &[Holiday],
    commitment_history: &[CommitmentChange],
) -> DayCommitment {
    let minutes = committed_minutes_for_date(user, date, holidays, commitment_history);

    if minutes > 0 {
        DayCommitment::working(minutes)
    } else if is_holiday(holidays, date) {
        DayCommitment::holiday()
    } else {
        DayCommitment::off_day()
    }
}

/// Returns the committed minutes for a single date.
///
/// 1. The date's weekday is a weekly off day: 0.
/// 2. A holiday entry matches the date: 0.
/// 3. Otherwise the most recent commitment change effective on or before the
///    date, falling back to the user's default commitment.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::committed_minutes_for_date;
/// use attendance_engine::models::{CommitmentChange, User};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let user = User {
///     id: "user_001".to_string(),
///     name: String::new(),
///     committed_hours_per_day: Decimal::new(8, 0),
///     weekly_off_days: vec![],
///     timezone: "UTC".to_string(),
/// };
/// let history = vec![CommitmentChange {
///     id: "cmt_001".to_string(),
///     user_id: "user_001".to_string(),
///     hours_per_day: Decimal::new(5, 0),
///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// }];
///
/// let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
/// assert_eq!(committed_minutes_for_date(&user, date, &[], &history), 300);
/// ```
pub fn committed_minutes_for_date(
    user: &User,
    date: NaiveDate,
    holidays: &[Holiday],
    commitment_history: &[CommitmentChange],
) -> i64 {
    if user.is_off_day(date.weekday()) {
        debug!(user_id = %user.id, date = %date, weekday = weekday_name(date), "Weekly off day");
        return 0;
    }

    if is_holiday(holidays, date) {
        return 0;
    }

    let hours = match effective_commitment(commitment_history, date) {
        Some(change) => {
            debug!(
                user_id = %user.id,
                date = %date,
                effective_from = %change.effective_from,
                hours_per_day = %change.hours_per_day,
                "Using commitment change"
            );
            change.hours_per_day
        }
        None => user.committed_hours_per_day,
    };

    hours_to_minutes(hours)
}
