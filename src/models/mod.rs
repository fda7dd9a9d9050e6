//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calendar;
mod day_stats;
mod report;
mod session;
mod user;

pub use calendar::{CommitmentChange, Holiday, is_holiday};
pub use day_stats::{DayCommitment, DayKind, DayStats, DayStatus};
pub use report::{
    ExportRow, ReportPeriod, ReportResult, ReportSummary, ReportWarning, RoundingRule,
};
pub use session::{
    AttendanceSession, SessionState, SessionStatus, TIME_FORMAT, format_clock_time,
    parse_clock_time, worked_minutes_between,
};
pub use user::{User, WEEKDAY_NAMES, parse_weekday_name, weekday_name};
