//! Task model for the priority engine.
//!
//! Callers hand us loosely-typed [`TaskRecord`]s (straight from JSON or CSV).
//! The engine turns each one into a validated [`Task`] before any scoring
//! model sees it, so the models themselves only ever deal with `Option`s.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw task record as supplied by a collaborator.
///
/// Every field is optional. Numeric fields are kept as JSON values so that a
/// non-numeric importance or effort degrades to a neutral score instead of
/// failing the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,

    /// ISO calendar date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<Value>,

    /// 1-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Value>,

    /// Identifiers this task is blocked by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Value>,
}

impl TaskRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(Value::String(title.into())),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(Value::String(id.into()));
        self
    }

    pub fn with_due_date(mut self, due: impl Into<String>) -> Self {
        self.due_date = Some(Value::String(due.into()));
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(Value::from(hours));
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(Value::from(importance));
        self
    }

    pub fn with_dependencies(mut self, deps: &[&str]) -> Self {
        self.dependencies = Some(Value::Array(
            deps.iter().map(|d| Value::String(d.to_string())).collect(),
        ));
        self
    }

    /// Title, if present as a non-empty string.
    pub fn title_text(&self) -> Option<&str> {
        match &self.title {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Identifier the record declares for itself: `id`, else a non-blank title.
    pub fn declared_id(&self) -> Option<String> {
        self.id
            .as_ref()
            .and_then(identifier_from_value)
            .or_else(|| {
                self.title_text()
                    .filter(|t| !t.trim().is_empty())
                    .map(str::to_string)
            })
    }

    /// Dependency identifiers. Anything other than a list yields nothing.
    pub fn dependency_ids(&self) -> Vec<String> {
        match &self.dependencies {
            Some(Value::Array(items)) => items.iter().filter_map(identifier_from_value).collect(),
            _ => Vec::new(),
        }
    }
}

/// Interpret a JSON value as a task identifier.
///
/// Strings are taken as-is (empty strings are not identifiers), numbers are
/// stringified, everything else is rejected.
pub fn identifier_from_value(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A validated task: unique identifier, non-empty title, defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub due_date: Option<String>,

    /// Raw value, echoed back unchanged. Scored through [`Task::hours`].
    pub estimated_hours: Value,

    /// Raw value, echoed back unchanged. Scored through [`Task::importance_rating`].
    pub importance: Value,

    pub dependencies: Vec<String>,
}

impl Task {
    pub const DEFAULT_HOURS: i64 = 4;
    pub const DEFAULT_IMPORTANCE: i64 = 5;

    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date: None,
            estimated_hours: Value::from(Self::DEFAULT_HOURS),
            importance: Value::from(Self::DEFAULT_IMPORTANCE),
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, deps: &[&str]) -> Self {
        self.dependencies = deps.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Build a task from a raw record. `id` is decided by the caller, which
    /// owns uniqueness across the batch. Returns `None` when there is no title.
    pub fn from_record(record: &TaskRecord, id: String) -> Option<Self> {
        let title = record.title_text()?.to_string();

        let due_date = match &record.due_date {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        };

        Some(Self {
            id,
            title,
            due_date,
            estimated_hours: record
                .estimated_hours
                .clone()
                .unwrap_or_else(|| Value::from(Self::DEFAULT_HOURS)),
            importance: record
                .importance
                .clone()
                .unwrap_or_else(|| Value::from(Self::DEFAULT_IMPORTANCE)),
            dependencies: record.dependency_ids(),
        })
    }

    /// Estimated hours, if numeric.
    pub fn hours(&self) -> Option<f64> {
        self.estimated_hours.as_f64()
    }

    /// Importance rating, if numeric.
    pub fn importance_rating(&self) -> Option<f64> {
        self.importance.as_f64()
    }
}

/// The four per-factor scores, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependencies: f64,
}

impl ComponentScores {
    pub fn rounded(&self) -> Self {
        Self {
            urgency: round3(self.urgency),
            importance: round3(self.importance),
            effort: round3(self.effort),
            dependencies: round3(self.dependencies),
        }
    }
}

/// A task with its priority score attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub priority_score: f64,
    pub component_scores: ComponentScores,
    pub explanation: String,
}

/// Round to 3 decimal places.
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_deserializes_with_loose_types() {
        let r: TaskRecord = serde_json::from_value(json!({
            "id": 7,
            "title": "Ship it",
            "importance": "high",
            "dependencies": "not-a-list"
        }))
        .unwrap();

        assert_eq!(r.declared_id().as_deref(), Some("7"));
        assert!(r.dependency_ids().is_empty());

        let t = Task::from_record(&r, "7".into()).unwrap();
        assert_eq!(t.importance_rating(), None);
        assert_eq!(t.hours(), Some(4.0));
    }

    #[test]
    fn missing_title_yields_no_task() {
        let r = TaskRecord {
            id: Some(json!("x")),
            ..TaskRecord::default()
        };
        assert!(Task::from_record(&r, "x".into()).is_none());
    }

    #[test]
    fn dependency_entries_are_filtered() {
        let r: TaskRecord = serde_json::from_value(json!({
            "title": "t",
            "dependencies": ["a", 3, null, "", {"x": 1}]
        }))
        .unwrap();
        assert_eq!(r.dependency_ids(), vec!["a".to_string(), "3".to_string()]);
    }

    #[test]
    fn scored_task_flattens_task_fields() {
        let scored = ScoredTask {
            task: Task::new("a", "Alpha"),
            priority_score: 0.5,
            component_scores: ComponentScores {
                urgency: 0.1,
                importance: 0.444,
                effort: 0.7,
                dependencies: 0.0,
            },
            explanation: "Standard priority task".into(),
        };
        let v = serde_json::to_value(&scored).unwrap();
        assert_eq!(v["id"], "a");
        assert_eq!(v["importance"], 5);
        assert_eq!(v["component_scores"]["effort"], 0.7);
    }

    #[test]
    fn round3_keeps_three_places() {
        assert_eq!(round3(0.4444), 0.444);
        assert_eq!(round3(2.0 / 3.0), 0.667);
        assert_eq!(round3(1.3), 1.3);
    }
}
