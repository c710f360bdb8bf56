//! JSON task files.
//!
//! Two shapes are accepted:
//!   [ {"title": "..."}, ... ]
//!   {"tasks": [ ... ], "strategy": "high_impact", "weights": {...}}

use anyhow::{bail, Context, Result};
use serde_json::Value;
use triage_core::TaskRecord;

use crate::types::TaskFile;

pub fn parse_json_tasks_text(text: &str) -> Result<TaskFile> {
    let v: Value = serde_json::from_str(text).context("parse task JSON")?;

    match v {
        Value::Array(_) => {
            let tasks: Vec<TaskRecord> =
                serde_json::from_value(v).context("task list entries must be objects")?;
            Ok(TaskFile {
                tasks,
                ..TaskFile::default()
            })
        }
        Value::Object(ref obj) if obj.contains_key("tasks") => {
            Ok(serde_json::from_value(v).context("invalid task request object")?)
        }
        _ => bail!("expected a JSON array of tasks or an object with a \"tasks\" field"),
    }
}
