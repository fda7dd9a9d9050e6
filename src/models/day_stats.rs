//! Per-day statistics models.
//!
//! [`DayStats`] is derived, never persisted: it is recomputed from sessions and
//! the commitment calendar on every report request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Why a day carries the commitment it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// Non-zero commitment.
    Working,
    /// Zero commitment because a holiday entry matches the date.
    Holiday,
    /// Zero commitment for any other reason (weekly off day, zero-hour commitment).
    OffDay,
}

/// Committed minutes for one date together with their cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCommitment {
    /// Expected worked minutes.
    pub minutes: i64,
    /// Cause of the commitment.
    pub kind: DayKind,
}

impl DayCommitment {
    /// A working day with the given commitment.
    pub fn working(minutes: i64) -> Self {
        Self {
            minutes,
            kind: DayKind::Working,
        }
    }

    /// A holiday (zero commitment).
    pub fn holiday() -> Self {
        Self {
            minutes: 0,
            kind: DayKind::Holiday,
        }
    }

    /// An off day (zero commitment).
    pub fn off_day() -> Self {
        Self {
            minutes: 0,
            kind: DayKind::OffDay,
        }
    }
}

/// Outcome of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Worked exactly the committed minutes.
    Complete,
    /// Worked less than committed.
    Short,
    /// Worked more than committed, or any work on a zero-commitment day.
    Overtime,
    /// Weekly off day without work.
    Off,
    /// Holiday without work.
    Holiday,
}

/// Aggregated attendance for one calendar date.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{DayStats, DayStatus};
/// use chrono::NaiveDate;
///
/// let stats = DayStats {
///     date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
///     worked_minutes: 510,
///     committed_minutes: 480,
///     status: DayStatus::Overtime,
///     overtime_minutes: 30,
///     short_minutes: 0,
///     is_off_day: false,
///     is_holiday: false,
/// };
/// assert_eq!(stats.balance_minutes(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStats {
    /// The calendar date.
    pub date: NaiveDate,
    /// Worked minutes after rounding.
    pub worked_minutes: i64,
    /// Committed minutes for the date.
    pub committed_minutes: i64,
    /// Day outcome.
    pub status: DayStatus,
    /// Minutes above commitment (0 on zero-commitment days).
    pub overtime_minutes: i64,
    /// Minutes below commitment (0 on zero-commitment days).
    pub short_minutes: i64,
    /// True when the date is a weekly off day.
    pub is_off_day: bool,
    /// True when the date is a holiday.
    pub is_holiday: bool,
}

impl DayStats {
    /// Overtime minus shortfall.
    pub fn balance_minutes(&self) -> i64 {
        self.overtime_minutes - self.short_minutes
    }

    /// Reconstructs the commitment this day was aggregated against.
    pub fn commitment(&self) -> DayCommitment {
        let kind = if self.committed_minutes > 0 {
            DayKind::Working
        } else if self.is_holiday {
            DayKind::Holiday
        } else {
            DayKind::OffDay
        };
        DayCommitment {
            minutes: self.committed_minutes,
            kind,
        }
    }
}
