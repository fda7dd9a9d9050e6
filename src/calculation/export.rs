//! Spreadsheet export rows.
//!
//! Maps each day of a summary, plus that day's session records, to one
//! [`ExportRow`]. Encoding the rows into a file format is left to the caller.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{AttendanceSession, ExportRow, ReportSummary, format_clock_time};

/// Separator placed between the notes of a day's sessions.
pub const NOTES_SEPARATOR: &str = "; ";

/// Converts minutes to hours rounded to two decimal places.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::minutes_to_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(minutes_to_hours(510), Decimal::new(850, 2));
/// assert_eq!(minutes_to_hours(100), Decimal::new(167, 2));
/// ```
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Builds one export row per day of the summary.
///
/// `sessions` should already be restricted to the summary's user. Check-in is
/// the day's earliest check-in, check-out the latest check-out among closed
/// sessions. Notes are joined in check-in order, skipping empty ones.
pub fn export_rows(summary: &ReportSummary, sessions: &[AttendanceSession]) -> Vec<ExportRow> {
    summary
        .days
        .iter()
        .map(|day| {
            let mut todays: Vec<&AttendanceSession> =
                sessions.iter().filter(|s| s.date == day.date).collect();
            todays.sort_by_key(|s| s.check_in());

            let check_in = todays.first().map(|s| format_clock_time(s.check_in()));
            let check_out = todays
                .iter()
                .filter_map(|s| s.check_out())
                .max()
                .map(format_clock_time);
            let notes = todays
                .iter()
                .filter_map(|s| s.notes.as_deref())
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
                .join(NOTES_SEPARATOR);

            ExportRow {
                date: day.date,
                check_in,
                check_out,
                worked_hours: minutes_to_hours(day.worked_minutes),
                status: day.status,
                notes,
            }
        })
        .collect()
}
