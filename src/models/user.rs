//! User model and weekday naming.
//!
//! This module defines the [`User`] struct that owns a daily commitment and a
//! set of weekly off days, plus the Sunday-first weekday naming used wherever
//! weekdays cross the serialization boundary.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Weekday names in Sunday-first order (index = days from Sunday).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Returns the full weekday name of a date.
///
/// # Example
///
/// ```
/// use attendance_engine::models::weekday_name;
/// use chrono::NaiveDate;
///
/// // 2024-06-10 is a Monday
/// assert_eq!(weekday_name(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()), "Monday");
/// ```
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

/// Parses a full weekday name ("Saturday"), ignoring case.
pub fn parse_weekday_name(name: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .position(|n| n.eq_ignore_ascii_case(name.trim()))
        .map(|idx| WEEKDAYS_FROM_SUNDAY[idx])
}

/// A person whose attendance is tracked.
///
/// The engine treats users as read-only input; the identity system owns them.
///
/// # Example
///
/// ```
/// use attendance_engine::models::User;
/// use chrono::Weekday;
/// use rust_decimal::Decimal;
///
/// let user = User {
///     id: "user_001".to_string(),
///     name: "Ada".to_string(),
///     committed_hours_per_day: Decimal::new(8, 0),
///     weekly_off_days: vec![Weekday::Sat, Weekday::Sun],
///     timezone: "UTC".to_string(),
/// };
/// assert!(user.is_off_day(Weekday::Sun));
/// assert!(!user.is_off_day(Weekday::Mon));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Default commitment, used when no commitment change applies.
    pub committed_hours_per_day: Decimal,
    /// Weekdays with no commitment.
    #[serde(default, with = "weekday_names")]
    pub weekly_off_days: Vec<Weekday>,
    /// Timezone label. Informational only; all dates are naive calendar dates.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl User {
    /// Returns true if the weekday is one of the user's weekly off days.
    pub fn is_off_day(&self, weekday: Weekday) -> bool {
        self.weekly_off_days.contains(&weekday)
    }
}

/// Serializes weekday sets as full names ("Saturday") rather than chrono's
/// three-letter form.
mod weekday_names {
    use chrono::Weekday;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{WEEKDAY_NAMES, parse_weekday_name};

    pub fn serialize<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            days.iter()
                .map(|d| WEEKDAY_NAMES[d.num_days_from_sunday() as usize]),
        )
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Weekday>, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        let mut days = Vec::with_capacity(names.len());
        for name in names {
            let day = parse_weekday_name(&name)
                .ok_or_else(|| D::Error::custom(format!("unknown weekday '{}'", name)))?;
            if !days.contains(&day) {
                days.push(day);
            }
        }
        Ok(days)
    }
}
