use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use triage_core::{StrategyWeights, TaskRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskFileFormat {
    Json,
    Csv,
}

impl TaskFileFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(TaskFileFormat::Json),
            Some("csv") => Ok(TaskFileFormat::Csv),
            _ => bail!(
                "unsupported task file '{}' (expected .json or .csv)",
                path.display()
            ),
        }
    }
}

/// Normalized output of the task-file parsers (format-agnostic).
///
/// `strategy` and `weights` are only ever set by JSON request files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFile {
    pub tasks: Vec<TaskRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<StrategyWeights>,
}
