//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed settings structure that is
//! deserialized from `engine.yaml`.

use chrono::Weekday;
use serde::{Deserialize, Deserializer};

use crate::models::{RoundingRule, parse_weekday_name};

/// Engine-wide settings.
///
/// Every field has a default, so a partial `engine.yaml` only overrides what
/// it names.
///
/// # Example
///
/// ```
/// use attendance_engine::config::EngineSettings;
/// use attendance_engine::models::RoundingRule;
/// use chrono::Weekday;
///
/// let settings: EngineSettings =
///     serde_yaml::from_str("default_rounding: \"5\"\nweek_starts_on: Monday\n").unwrap();
/// assert_eq!(settings.default_rounding, RoundingRule::FiveMinutes);
/// assert_eq!(settings.week_starts_on, Weekday::Mon);
/// assert_eq!(settings.max_session_minutes, 1440);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Rounding used when a report request does not name one.
    pub default_rounding: RoundingRule,
    /// Longest accepted manual session, in minutes.
    pub max_session_minutes: i64,
    /// How many months back manual entries may be added or edited.
    pub edit_window_months: u32,
    /// Longest custom report range, in days.
    pub max_report_days: u32,
    /// First day of a weekly report window.
    #[serde(deserialize_with = "deserialize_weekday")]
    pub week_starts_on: Weekday,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_rounding: RoundingRule::None,
            max_session_minutes: 24 * 60,
            edit_window_months: 3,
            max_report_days: 731,
            week_starts_on: Weekday::Sun,
        }
    }
}

fn deserialize_weekday<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
    let name = String::deserialize(deserializer)?;
    parse_weekday_name(&name)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown weekday '{}'", name)))
}
