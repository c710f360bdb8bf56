//! triage-ingest: task-file loading (JSON/CSV) and strict record linting.

pub mod lint;
pub mod parsers;
pub mod types;

pub use lint::{lint_records, RecordIssue};
pub use parsers::csv_tasks::parse_csv_tasks_text;
pub use parsers::json_tasks::parse_json_tasks_text;
pub use types::{TaskFile, TaskFileFormat};

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Read a task file, picking the parser from the extension.
pub fn load_task_file(path: impl AsRef<Path>) -> Result<TaskFile> {
    let path = path.as_ref();
    let format = TaskFileFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;

    let file = match format {
        TaskFileFormat::Json => parse_json_tasks_text(&text),
        TaskFileFormat::Csv => parse_csv_tasks_text(&text),
    }
    .with_context(|| format!("parsing {}", path.display()))?;

    debug!(path = %path.display(), tasks = file.tasks.len(), ?format, "loaded task file");
    Ok(file)
}
