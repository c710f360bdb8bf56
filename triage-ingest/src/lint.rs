//! Strict record checks.
//!
//! The engine accepts anything and degrades gracefully; linting tells the
//! user which records were degraded and why. Never blocks analysis.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use triage_core::time::parse_calendar_date;
use triage_core::TaskRecord;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MIN_HOURS: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIssue {
    /// Position in the input batch (0-based).
    pub index: usize,
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task #{} {}: {}", self.index, self.field, self.message)
    }
}

const EARLIEST_DUE_DATE: NaiveDate = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

pub fn lint_records(records: &[TaskRecord]) -> Vec<RecordIssue> {
    let known: HashSet<String> = records.iter().filter_map(TaskRecord::declared_id).collect();
    let mut out = Vec::new();

    for (index, r) in records.iter().enumerate() {
        let mut issue = |field: &'static str, message: String| {
            out.push(RecordIssue {
                index,
                field,
                message,
            })
        };

        match r.title_text() {
            None => issue("title", "missing; task will be dropped".into()),
            Some(t) if t.chars().count() > MAX_TITLE_CHARS => issue(
                "title",
                format!("longer than {MAX_TITLE_CHARS} characters"),
            ),
            Some(_) => {}
        }

        if let Some(v) = &r.importance {
            let ok = v
                .as_i64()
                .map(|i| (1..=10).contains(&i))
                .unwrap_or(false);
            if !ok {
                issue("importance", format!("{v} is not an integer in 1-10"));
            }
        }

        if let Some(v) = &r.estimated_hours {
            match v.as_f64() {
                Some(h) if h >= MIN_HOURS => {}
                Some(h) => issue("estimated_hours", format!("{h} is below {MIN_HOURS}")),
                None => issue("estimated_hours", format!("{v} is not a number")),
            }
        }

        match &r.due_date {
            None => {}
            Some(Value::String(s)) => match parse_calendar_date(s) {
                Ok(d) if d < EARLIEST_DUE_DATE => {
                    issue("due_date", format!("{s} is before 2020-01-01"))
                }
                Ok(_) => {}
                Err(_) => issue("due_date", format!("'{s}' is not a YYYY-MM-DD date")),
            },
            Some(v) => issue("due_date", format!("{v} is not a date string")),
        }

        match &r.dependencies {
            None | Some(Value::Array(_)) => {
                for dep in r.dependency_ids() {
                    if !known.contains(&dep) {
                        issue("dependencies", format!("unknown task '{dep}'"));
                    }
                }
            }
            Some(v) => issue("dependencies", format!("{v} is not a list")),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> TaskRecord {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_clean_batch_has_no_issues() {
        let records = vec![
            TaskRecord::new("A").with_id("a").with_importance(3).with_hours(1.0),
            TaskRecord::new("B")
                .with_due_date("2026-01-01")
                .with_dependencies(&["a"]),
        ];
        assert!(lint_records(&records).is_empty());
    }

    #[test]
    fn test_flags_each_rule() {
        let records = vec![
            record(json!({"importance": 11})),
            record(json!({"title": "x".repeat(201), "estimated_hours": 0.05})),
            record(json!({"title": "C", "due_date": "2019-12-31", "dependencies": "a"})),
            record(json!({"title": "D", "due_date": "tomorrow", "dependencies": ["ghost"]})),
        ];
        let issues = lint_records(&records);
        let fields: Vec<(usize, &str)> = issues.iter().map(|i| (i.index, i.field)).collect();
        assert_eq!(
            fields,
            vec![
                (0, "title"),
                (0, "importance"),
                (1, "title"),
                (1, "estimated_hours"),
                (2, "due_date"),
                (2, "dependencies"),
                (3, "due_date"),
                (3, "dependencies"),
            ]
        );
    }

    #[test]
    fn test_dependencies_may_reference_titles() {
        let records = vec![
            TaskRecord::new("Write docs"),
            TaskRecord::new("Publish").with_dependencies(&["Write docs"]),
        ];
        assert!(lint_records(&records).is_empty());
    }

    #[test]
    fn test_display() {
        let i = RecordIssue {
            index: 2,
            field: "title",
            message: "missing; task will be dropped".into(),
        };
        assert_eq!(i.to_string(), "task #2 title: missing; task will be dropped");
    }
}
