//! triage-core: multi-factor task prioritization and dependency-cycle detection.
//!
//! Pipeline for one batch:
//! raw `TaskRecord`s -> `validate_batch` -> per task: urgency / importance /
//! effort / fan-in -> weighted sum -> explanation -> ranked `AnalysisResult`.
//! The `DependencyGraph` is built once per batch and its cycles ride along.

pub mod dependency_graph;
pub mod effort;
pub mod engine;
pub mod explanation;
pub mod importance;
pub mod strategy;
pub mod suggest;
pub mod task;
pub mod time;
pub mod urgency;

pub use dependency_graph::{fan_in_bucket, Cycle, DependencyGraph};
pub use effort::effort_score;
pub use engine::{validate_batch, AnalysisResult, PriorityEngine, ValidatedBatch};
pub use explanation::explain;
pub use importance::importance_score;
pub use strategy::{Strategy, StrategyWeights, WeightProfile};
pub use suggest::{SuggestedTask, Suggestion, SuggestionReport, DEFAULT_SUGGESTIONS};
pub use task::{ComponentScores, ScoredTask, Task, TaskRecord};
pub use urgency::urgency_score;
