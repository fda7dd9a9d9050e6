//! Holiday and commitment-history models.
//!
//! This module contains the [`Holiday`] and [`CommitmentChange`] types that,
//! together with a user's weekly off days, define the commitment calendar.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A specific calendar date with no commitment, regardless of weekday.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     id: "hol_001".to_string(),
///     user_id: "user_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
///     title: "Christmas Day".to_string(),
/// };
/// assert!(holiday.falls_on(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Unique identifier for the holiday.
    pub id: String,
    /// The user this holiday belongs to.
    pub user_id: String,
    /// The holiday date.
    pub date: NaiveDate,
    /// Title shown to the user. Not used by the engine.
    #[serde(default)]
    pub title: String,
}

impl Holiday {
    /// Returns true if the holiday is on the given date.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

/// Returns true if any holiday in the slice falls on `date`.
pub fn is_holiday(holidays: &[Holiday], date: NaiveDate) -> bool {
    holidays.iter().any(|h| h.falls_on(date))
}

/// An effective-dated change of the daily commitment.
///
/// Starting on `effective_from`, the user's daily commitment is `hours_per_day`
/// until a later change supersedes it.
///
/// # Example
///
/// ```
/// use attendance_engine::models::CommitmentChange;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let change = CommitmentChange {
///     id: "cmt_001".to_string(),
///     user_id: "user_001".to_string(),
///     hours_per_day: Decimal::new(6, 0),
///     effective_from: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
/// };
/// assert!(change.applies_on(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
/// assert!(!change.applies_on(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentChange {
    /// Unique identifier for the change.
    pub id: String,
    /// The user whose commitment changed.
    pub user_id: String,
    /// New daily commitment in hours.
    pub hours_per_day: Decimal,
    /// First date the new commitment applies (inclusive).
    pub effective_from: NaiveDate,
}

impl CommitmentChange {
    /// Returns true if the change is in effect on `date` (ignoring later changes).
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date
    }
}
