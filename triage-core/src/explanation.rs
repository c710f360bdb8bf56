//! Human-readable reasons for a task's score.

use chrono::NaiveDate;

use crate::task::{ComponentScores, Task};
use crate::time::parse_calendar_date;

pub const URGENT_THRESHOLD: f64 = 0.8;
pub const IMPORTANT_THRESHOLD: f64 = 0.7;
pub const QUICK_WIN_THRESHOLD: f64 = 0.7;
pub const BLOCKING_THRESHOLD: f64 = 0.5;

const FALLBACK_REASON: &str = "Standard priority task";

/// List every qualifying reason, in fixed order, joined with "; ".
///
/// `scores` must be the unrounded component scores.
pub fn explain(scores: &ComponentScores, task: &Task, today: NaiveDate) -> String {
    reasons(scores, task, today).join("; ")
}

fn reasons(scores: &ComponentScores, task: &Task, today: NaiveDate) -> Vec<String> {
    let mut out = Vec::new();

    if scores.urgency >= URGENT_THRESHOLD {
        let due = task
            .due_date
            .as_deref()
            .and_then(|s| parse_calendar_date(s).ok());
        out.push(match due {
            Some(d) if d < today => format!("Overdue by {} day(s)", (today - d).num_days()),
            Some(_) => "Due very soon".to_string(),
            None => "High urgency".to_string(),
        });
    }

    if scores.importance >= IMPORTANT_THRESHOLD {
        out.push(format!("High importance ({}/10)", task.importance));
    }

    if scores.effort >= QUICK_WIN_THRESHOLD {
        out.push(format!("Quick win ({}h estimated)", task.estimated_hours));
    }

    if scores.dependencies >= BLOCKING_THRESHOLD {
        out.push("Blocks other tasks".to_string());
    }

    if out.is_empty() {
        out.push(FALLBACK_REASON.to_string());
    }

    out
}
