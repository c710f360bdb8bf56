//! CSV task files.
//!
//! Header row names the columns (any order, unknown columns ignored):
//!   id,title,due_date,estimated_hours,importance,dependencies
//!
//! - empty cells are absent
//! - numeric cells become JSON numbers; anything else is kept as text
//! - dependencies are split on `;`, `,` or `|`
//! - MM/DD/YYYY due dates are normalized to ISO

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use triage_core::TaskRecord;

use crate::types::TaskFile;

const COLUMNS: [&str; 6] = [
    "id",
    "title",
    "due_date",
    "estimated_hours",
    "importance",
    "dependencies",
];

pub fn parse_csv_tasks_text(text: &str) -> Result<TaskFile> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = rdr.headers().context("read CSV header")?.clone();
    let columns: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| {
            let h = h.to_ascii_lowercase();
            COLUMNS.iter().find(|c| **c == h).map(|c| (*c, i))
        })
        .collect();

    let dep_split = Regex::new(r"\s*[;,|]\s*")?;
    let mut tasks = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        // +2: header is line 1
        let record = result.with_context(|| format!("read CSV line {}", row + 2))?;
        let cell = |name: &str| {
            columns
                .get(name)
                .and_then(|&i| record.get(i))
                .filter(|s| !s.is_empty())
        };

        tasks.push(TaskRecord {
            id: cell("id").map(|s| Value::String(s.to_string())),
            title: cell("title").map(|s| Value::String(s.to_string())),
            due_date: cell("due_date").map(|s| Value::String(normalize_date(s))),
            estimated_hours: cell("estimated_hours").map(numeric_cell),
            importance: cell("importance").map(numeric_cell),
            dependencies: cell("dependencies").map(|s| {
                Value::Array(
                    dep_split
                        .split(s)
                        .filter(|d| !d.is_empty())
                        .map(|d| Value::String(d.to_string()))
                        .collect(),
                )
            }),
        });
    }

    Ok(TaskFile {
        tasks,
        ..TaskFile::default()
    })
}

/// "3" -> 3, "0.5" -> 0.5, "lots" -> "lots".
fn numeric_cell(s: &str) -> Value {
    if let Ok(i) = s.parse::<i64>() {
        return Value::from(i);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::from(f),
        _ => Value::String(s.to_string()),
    }
}

/// Rewrite US-style dates to ISO; leave everything else untouched.
fn normalize_date(s: &str) -> String {
    match NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        Ok(d) => d.format("%Y-%m-%d").to_string(),
        Err(_) => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_basic_rows() {
        let text = "\
title,importance,estimated_hours,due_date,dependencies,notes
Write spec,8,2.5,03/20/2026,,ignored
Review,,,2026-03-21,\"a; b | c\",
";
        let f = parse_csv_tasks_text(text).unwrap();
        assert_eq!(f.tasks.len(), 2);

        let first = &f.tasks[0];
        assert_eq!(first.importance, Some(Value::from(8)));
        assert_eq!(first.estimated_hours, Some(Value::from(2.5)));
        assert_eq!(first.due_date, Some(Value::from("2026-03-20")));
        assert!(first.dependencies.is_none());
        assert!(first.id.is_none());

        let second = &f.tasks[1];
        assert!(second.importance.is_none());
        assert_eq!(second.dependency_ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_non_numeric_cells_are_kept() {
        assert_eq!(numeric_cell("lots"), Value::from("lots"));
        assert_eq!(numeric_cell("4"), Value::from(4));
        assert_eq!(normalize_date("soon"), "soon");
    }
}
