//! Request types for the Attendance Engine API.
//!
//! This module defines the JSON request body shared by the `/report` and
//! `/export` endpoints.

use serde::{Deserialize, Serialize};

use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceSession, CommitmentChange, Holiday, ReportPeriod, RoundingRule, User};
use crate::tracking::validate_commitment_hours;

/// Request body for the `/report` and `/export` endpoints.
///
/// Carries everything the engine needs: the user, the requested period and
/// the user's sessions, holidays and commitment history as fetched by the
/// caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The user the report is for.
    pub user: User,
    /// The requested period.
    pub period: ReportPeriod,
    /// Attendance sessions. Sessions of other users are ignored.
    #[serde(default)]
    pub sessions: Vec<AttendanceSession>,
    /// The user's holidays.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// The user's commitment changes.
    #[serde(default)]
    pub commitment_history: Vec<CommitmentChange>,
    /// Rounding rule; the configured default when absent.
    #[serde(default)]
    pub rounding: Option<RoundingRule>,
    /// Fold today's open sessions into today's entry.
    #[serde(default)]
    pub include_live: bool,
}

impl ReportRequest {
    /// Checks the values the engine would otherwise trust: commitment hours
    /// and the length of a custom range.
    ///
    /// Inverted custom ranges pass; they produce an empty report.
    pub fn validate(&self, settings: &EngineSettings) -> EngineResult<()> {
        validate_commitment_hours(self.user.committed_hours_per_day)?;
        for change in &self.commitment_history {
            validate_commitment_hours(change.hours_per_day)?;
        }

        if let ReportPeriod::Custom {
            start_date,
            end_date,
        } = self.period
        {
            let days = (end_date - start_date).num_days() + 1;
            if days > i64::from(settings.max_report_days) {
                return Err(EngineError::ReportRangeTooLong {
                    start_date,
                    end_date,
                    days,
                    max_days: settings.max_report_days,
                });
            }
        }
        Ok(())
    }

    /// Sessions belonging to the request's user.
    pub fn user_sessions(&self) -> Vec<AttendanceSession> {
        self.sessions
            .iter()
            .filter(|s| s.user_id == self.user.id)
            .cloned()
            .collect()
    }
}
