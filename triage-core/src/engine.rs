//! PriorityEngine: validate a batch, score every task, rank, and report
//! dependency cycles alongside the ranking.
//!
//! The engine is an immutable value (just the reference date), so one
//! instance can serve any number of batches. `analyze` borrows the raw
//! records and works on private validated copies.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::dependency_graph::{Cycle, DependencyGraph};
use crate::effort::effort_score;
use crate::explanation::explain;
use crate::importance::importance_score;
use crate::strategy::{StrategyWeights, WeightProfile};
use crate::task::{round3, ComponentScores, ScoredTask, Task, TaskRecord};
use crate::time::today_local;
use crate::urgency::urgency_score;

/// Ranked output of one `analyze` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub tasks: Vec<ScoredTask>,
    pub circular_dependencies: Vec<Cycle>,
    pub strategy: String,
    pub total_tasks: usize,
    pub dropped_tasks: usize,
    pub message: String,
}

/// Validated tasks plus the number of records that had to be dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedBatch {
    pub tasks: Vec<Task>,
    pub dropped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityEngine {
    today: NaiveDate,
}

impl Default for PriorityEngine {
    fn default() -> Self {
        Self::new(today_local())
    }
}

impl PriorityEngine {
    /// Engine scoring against a fixed reference date.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Score and rank a batch.
    ///
    /// `strategy` is looked up leniently; `weights`, when given, replace the
    /// strategy entirely. Never fails: bad records are defaulted or dropped.
    pub fn analyze(
        &self,
        tasks: &[TaskRecord],
        strategy: &str,
        weights: Option<&StrategyWeights>,
    ) -> AnalysisResult {
        let profile = WeightProfile::resolve(strategy, weights);

        if tasks.is_empty() {
            return AnalysisResult {
                tasks: Vec::new(),
                circular_dependencies: Vec::new(),
                strategy: profile.name().to_string(),
                total_tasks: 0,
                dropped_tasks: 0,
                message: "No tasks provided".to_string(),
            };
        }

        let batch = validate_batch(tasks);
        let graph = DependencyGraph::build(&batch.tasks);
        debug!(
            strategy = profile.name(),
            tasks = batch.tasks.len(),
            edges = graph.edge_count(),
            "analyzing batch"
        );

        let cycles = graph.detect_cycles();
        if !cycles.is_empty() {
            info!(count = cycles.len(), "circular dependencies detected");
        }

        let w = profile.weights();
        let mut scored: Vec<ScoredTask> = batch
            .tasks
            .iter()
            .map(|t| self.score_task(t, &graph, &w))
            .collect();

        // Stable: equal scores keep batch order.
        scored.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));

        let total = scored.len();
        AnalysisResult {
            tasks: scored,
            circular_dependencies: cycles,
            strategy: profile.name().to_string(),
            total_tasks: total,
            dropped_tasks: batch.dropped,
            message: format!("Analyzed {} tasks using {} strategy", total, profile.name()),
        }
    }

    /// Run the four models for one task and combine them.
    ///
    /// `graph` must be built from the same validated batch `task` belongs to.
    pub fn score_task(
        &self,
        task: &Task,
        graph: &DependencyGraph,
        weights: &StrategyWeights,
    ) -> ScoredTask {
        let scores = self.component_scores(task, graph);
        let total = weights.combine(&scores);

        ScoredTask {
            task: task.clone(),
            priority_score: round3(total),
            component_scores: scores.rounded(),
            explanation: explain(&scores, task, self.today),
        }
    }

    pub fn component_scores(&self, task: &Task, graph: &DependencyGraph) -> ComponentScores {
        ComponentScores {
            urgency: urgency_score(task.due_date.as_deref(), self.today),
            importance: importance_score(task.importance_rating()),
            effort: effort_score(task.hours()),
            dependencies: graph.fan_in_score(&task.id),
        }
    }
}

/// Validate and default a raw batch, in batch order.
///
/// - records without a title are dropped (and counted)
/// - identifier: `id`, else title, else `task_{index}`
/// - an identifier already taken earlier in the batch becomes `{id}_{index}`
///   (with a further `_2`, `_3`, ... if that is taken too)
pub fn validate_batch(records: &[TaskRecord]) -> ValidatedBatch {
    let mut out = ValidatedBatch::default();
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        if record.title_text().is_none() {
            warn!(index = i, "dropping task without a title");
            out.dropped += 1;
            continue;
        }

        let mut id = record.declared_id().unwrap_or_else(|| format!("task_{i}"));
        if seen.contains(&id) {
            let unique = unique_id(&id, i, &seen);
            warn!(index = i, id = %id, renamed = %unique, "duplicate task identifier");
            id = unique;
        }

        if let Some(task) = Task::from_record(record, id) {
            seen.insert(task.id.clone());
            out.tasks.push(task);
        }
    }

    out
}

/// `{id}_{index}`, suffixed `_2`, `_3`, ... until nothing earlier holds it.
fn unique_id(id: &str, index: usize, seen: &HashSet<String>) -> String {
    let base = format!("{id}_{index}");
    let mut candidate = base.clone();
    let mut n = 2;
    while seen.contains(&candidate) {
        candidate = format!("{base}_{n}");
        n += 1;
    }
    candidate
}
