//! Report models for the Attendance Engine.
//!
//! This module contains the [`ReportSummary`] produced by the range summarizer
//! and the types around it: the rounding preference, the requested period, the
//! diagnostic warnings, export rows and the [`ReportResult`] envelope returned
//! by the HTTP API.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DayStats, DayStatus};

/// Rounding applied to a day's worked minutes before classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingRule {
    /// Worked minutes are used as-is.
    #[default]
    #[serde(rename = "none")]
    None,
    /// Round to the nearest 5 minutes.
    #[serde(rename = "5")]
    FiveMinutes,
    /// Round to the nearest 10 minutes.
    #[serde(rename = "10")]
    TenMinutes,
}

impl RoundingRule {
    /// The rounding step in minutes, or `None` when rounding is disabled.
    pub fn step(self) -> Option<i64> {
        match self {
            RoundingRule::None => None,
            RoundingRule::FiveMinutes => Some(5),
            RoundingRule::TenMinutes => Some(10),
        }
    }
}

/// Requested report period, tagged by `view`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ReportPeriod;
///
/// let period: ReportPeriod = serde_json::from_str(r#"{"view": "weekly"}"#).unwrap();
/// assert_eq!(period, ReportPeriod::Weekly);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ReportPeriod {
    /// Today only.
    Daily,
    /// The week containing today.
    Weekly,
    /// The month containing today.
    Monthly,
    /// An explicit inclusive range.
    Custom {
        /// First date of the range.
        start_date: NaiveDate,
        /// Last date of the range.
        end_date: NaiveDate,
    },
}

/// Totals and per-day statistics for an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// First date of the range.
    pub start_date: NaiveDate,
    /// Last date of the range.
    pub end_date: NaiveDate,
    /// Sum of rounded worked minutes.
    pub total_worked_minutes: i64,
    /// Sum of committed minutes.
    pub total_committed_minutes: i64,
    /// Sum of overtime minutes.
    pub overtime_minutes: i64,
    /// Sum of short minutes.
    pub short_minutes: i64,
    /// Days with a non-zero commitment.
    pub working_days: u32,
    /// Zero-commitment days caused by a holiday entry.
    pub holidays: u32,
    /// Zero-commitment days not caused by a holiday entry.
    pub off_days: u32,
    /// One entry per date of the range, ascending.
    pub days: Vec<DayStats>,
}

impl ReportSummary {
    /// An empty summary over the range.
    pub fn empty(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            total_worked_minutes: 0,
            total_committed_minutes: 0,
            overtime_minutes: 0,
            short_minutes: 0,
            working_days: 0,
            holidays: 0,
            off_days: 0,
            days: Vec::new(),
        }
    }

    /// Returns the statistics for `date`, if it is part of the summary.
    pub fn day(&self, date: NaiveDate) -> Option<&DayStats> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Replaces the entry for `stats.date` and patches the minute totals by
    /// removing the old entry's contribution and adding the new one.
    ///
    /// Returns the replaced entry, or `None` (leaving the summary untouched)
    /// when the date is not part of the summary.
    pub fn replace_day(&mut self, stats: DayStats) -> Option<DayStats> {
        let slot = self.days.iter_mut().find(|d| d.date == stats.date)?;

        self.total_worked_minutes += stats.worked_minutes - slot.worked_minutes;
        self.total_committed_minutes += stats.committed_minutes - slot.committed_minutes;
        self.overtime_minutes += stats.overtime_minutes - slot.overtime_minutes;
        self.short_minutes += stats.short_minutes - slot.short_minutes;

        Some(std::mem::replace(slot, stats))
    }

    /// Overtime minus shortfall over the whole range.
    pub fn balance_minutes(&self) -> i64 {
        self.overtime_minutes - self.short_minutes
    }
}

/// A diagnostic raised while preparing a report.
///
/// Warnings never change the computed numbers; they flag input that the
/// session-creation layer should have prevented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// One spreadsheet row per reported day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    /// The calendar date.
    pub date: NaiveDate,
    /// Earliest check-in of the day (`HH:mm`).
    pub check_in: Option<String>,
    /// Latest check-out of the day (`HH:mm`).
    pub check_out: Option<String>,
    /// Worked hours, two decimal places.
    pub worked_hours: Decimal,
    /// Day outcome.
    pub status: DayStatus,
    /// Session notes joined with "; ".
    pub notes: String,
}

/// The complete result of a report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResult {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The user the report is for.
    pub user_id: String,
    /// Rounding applied to worked minutes.
    pub rounding: RoundingRule,
    /// Range totals and per-day statistics.
    pub summary: ReportSummary,
    /// In-progress minutes projected into today's entry (0 when none).
    pub live_minutes: i64,
    /// Diagnostics about the input data.
    pub warnings: Vec<ReportWarning>,
    /// Time spent computing the report in microseconds.
    pub duration_us: u64,
}
