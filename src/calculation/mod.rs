//! Calculation logic for the Attendance Engine.
//!
//! This module contains the aggregation pipeline: commitment resolution for a
//! single date, worked-minutes rounding, per-day aggregation and status
//! classification, range summarization, live projection of open sessions,
//! report window resolution, export rows and input diagnostics.
//!
//! Everything here is a pure function of its inputs. The only time source is
//! the [`Clock`] passed into [`project_live_day`].

mod commitment;
mod day_aggregation;
mod diagnostics;
mod export;
mod live_projection;
mod range_summary;
mod report_window;
mod rounding;

pub use commitment::{
    committed_minutes_for_date, effective_commitment, hours_to_minutes, resolve_commitment,
};
pub use day_aggregation::{build_day_stats, classify_day};
pub use diagnostics::{
    AMBIGUOUS_COMMITMENT, OVERLAPPING_SESSIONS, STALE_OPEN_SESSION, collect_warnings,
};
pub use export::{NOTES_SEPARATOR, export_rows, minutes_to_hours};
pub use live_projection::{Clock, FixedClock, LiveProjection, SystemClock, project_live_day};
pub use range_summary::{build_report_summary, dates_in_range, worked_minutes_by_date};
pub use report_window::{month_bounds, report_window, week_start};
pub use rounding::round_minutes;
