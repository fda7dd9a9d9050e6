//! Report window resolution.
//!
//! Maps a [`ReportPeriod`] and the current date onto the inclusive date range
//! the summarizer walks.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::models::ReportPeriod;

/// Returns the first date of the week containing `date`.
pub fn week_start(date: NaiveDate, week_starts_on: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() - week_starts_on.num_days_from_monday()) % 7;
    date - Days::new(u64::from(offset))
}

/// Returns the first and last date of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    (first, last)
}

/// Resolves a report period to an inclusive `(start, end)` range.
///
/// Custom ranges are returned unchanged, including inverted ones.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::report_window;
/// use attendance_engine::models::ReportPeriod;
/// use chrono::{NaiveDate, Weekday};
///
/// // 2024-06-12 is a Wednesday
/// let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
/// let (start, end) = report_window(ReportPeriod::Weekly, today, Weekday::Sun);
/// assert_eq!(start, NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
/// ```
pub fn report_window(
    period: ReportPeriod,
    today: NaiveDate,
    week_starts_on: Weekday,
) -> (NaiveDate, NaiveDate) {
    match period {
        ReportPeriod::Daily => (today, today),
        ReportPeriod::Weekly => {
            let start = week_start(today, week_starts_on);
            (start, start + Days::new(6))
        }
        ReportPeriod::Monthly => month_bounds(today),
        ReportPeriod::Custom {
            start_date,
            end_date,
        } => (start_date, end_date),
    }
}
