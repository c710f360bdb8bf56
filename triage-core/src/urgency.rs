//! Urgency model: due-date proximity -> score.
//!
//! Curve (days until due, relative to the reference date):
//! - overdue: 1.0 + 0.1 per day late, no ceiling
//! - due today: 1.0
//! - 1..=7 days: 0.8 down to 0.2
//! - 8..=30 days: ~0.29 down to 0.1
//! - beyond 30 days, undated, or unparseable: 0.1

use chrono::NaiveDate;

use crate::time::parse_calendar_date;

/// Score for tasks without a (parseable) due date.
pub const UNDATED_URGENCY: f64 = 0.1;

pub fn urgency_score(due_date: Option<&str>, today: NaiveDate) -> f64 {
    let Some(due) = due_date.and_then(|s| parse_calendar_date(s).ok()) else {
        return UNDATED_URGENCY;
    };
    urgency_for_days((due - today).num_days())
}

/// Urgency for a signed day distance (`due - today`).
pub fn urgency_for_days(days_diff: i64) -> f64 {
    match days_diff {
        d if d < 0 => 1.0 + d.unsigned_abs() as f64 * 0.1,
        0 => 1.0,
        1..=7 => 0.9 - days_diff as f64 * 0.1,
        8..=30 => 0.3 - (days_diff - 7) as f64 / 23.0 * 0.2,
        _ => (0.1 - (days_diff - 30) as f64 / 365.0 * 0.05).max(UNDATED_URGENCY),
    }
}
