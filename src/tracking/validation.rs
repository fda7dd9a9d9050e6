//! Session and commitment validation.
//!
//! These checks guard the data the aggregation engine assumes to be valid.

use chrono::{Months, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::worked_minutes_between;

/// Returns the oldest date that may still be edited on `today`.
pub fn edit_window_start(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Rejects dates older than `months` before `today`.
pub fn ensure_within_edit_window(date: NaiveDate, today: NaiveDate, months: u32) -> EngineResult<()> {
    if date < edit_window_start(today, months) {
        return Err(EngineError::EditWindowExceeded { date, months });
    }
    Ok(())
}

/// Validates a manually entered or edited session.
///
/// # Returns
///
/// The worked minutes of the entry, or an error if:
/// - `date` is older than `edit_window_months` before `today` (`EditWindowExceeded`)
/// - check-out is not after check-in (`InvalidSession`)
/// - the session is longer than `max_session_minutes` (`InvalidSession`)
///
/// # Example
///
/// ```
/// use attendance_engine::config::EngineSettings;
/// use attendance_engine::tracking::validate_manual_entry;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
/// let minutes = validate_manual_entry(
///     "att_001",
///     today,
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     today,
///     &EngineSettings::default(),
/// )
/// .unwrap();
/// assert_eq!(minutes, 480);
/// ```
pub fn validate_manual_entry(
    session_id: &str,
    date: NaiveDate,
    check_in: NaiveTime,
    check_out: NaiveTime,
    today: NaiveDate,
    settings: &EngineSettings,
) -> EngineResult<i64> {
    ensure_within_edit_window(date, today, settings.edit_window_months)?;

    if check_out <= check_in {
        return Err(EngineError::InvalidSession {
            session_id: session_id.to_string(),
            message: "check-out must be after check-in".to_string(),
        });
    }

    let minutes = worked_minutes_between(check_in, check_out);
    if minutes > settings.max_session_minutes {
        return Err(EngineError::InvalidSession {
            session_id: session_id.to_string(),
            message: format!(
                "worked time of {} minutes exceeds the limit of {} minutes",
                minutes, settings.max_session_minutes
            ),
        });
    }

    Ok(minutes)
}

/// Validates a daily commitment: 0 to 24 hours inclusive.
///
/// # Example
///
/// ```
/// use attendance_engine::tracking::validate_commitment_hours;
/// use rust_decimal::Decimal;
///
/// assert!(validate_commitment_hours(Decimal::new(75, 1)).is_ok());
/// assert!(validate_commitment_hours(Decimal::new(25, 0)).is_err());
/// ```
pub fn validate_commitment_hours(hours: Decimal) -> EngineResult<Decimal> {
    if hours < Decimal::ZERO || hours > Decimal::from(24) {
        return Err(EngineError::InvalidCommitment {
            message: format!("hours per day must be between 0 and 24, got {}", hours),
        });
    }
    Ok(hours)
}
