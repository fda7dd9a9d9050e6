//! Worked-minutes rounding.

use crate::models::RoundingRule;

/// Rounds minutes to the nearest multiple of the rule's step, halves rounding up.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::round_minutes;
/// use attendance_engine::models::RoundingRule;
///
/// assert_eq!(round_minutes(212, RoundingRule::None), 212);
/// assert_eq!(round_minutes(212, RoundingRule::FiveMinutes), 210);
/// assert_eq!(round_minutes(215, RoundingRule::TenMinutes), 220);
/// ```
pub fn round_minutes(minutes: i64, rule: RoundingRule) -> i64 {
    match rule.step() {
        None => minutes,
        // floor(m / step + 1/2) * step, in integers
        Some(step) => (2 * minutes + step).div_euclid(2 * step) * step,
    }
}
