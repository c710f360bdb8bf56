//! Top-N "what should I do next" view built on top of `analyze`.

use chrono::Duration;
use serde::Serialize;
use serde_json::Value;

use crate::engine::PriorityEngine;
use crate::strategy::StrategyWeights;
use crate::task::{ComponentScores, TaskRecord};

pub const DEFAULT_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestedTask {
    pub title: String,
    pub due_date: Option<String>,
    pub estimated_hours: Value,
    pub importance: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// 1-based.
    pub rank: usize,
    pub task: SuggestedTask,
    pub priority_score: f64,
    pub why_this_task: String,
    pub component_scores: ComponentScores,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionReport {
    pub suggestions: Vec<Suggestion>,
    pub strategy_used: String,
    pub message: String,
    pub circular_dependencies_detected: bool,
}

impl PriorityEngine {
    /// Rank the batch and keep the top `limit` entries.
    ///
    /// An empty batch is replaced by [`PriorityEngine::sample_batch`].
    pub fn suggest(
        &self,
        tasks: &[TaskRecord],
        strategy: &str,
        weights: Option<&StrategyWeights>,
        limit: usize,
    ) -> SuggestionReport {
        let (result, message) = if tasks.is_empty() {
            (
                self.analyze(&self.sample_batch(), strategy, weights),
                "Using sample tasks. Provide a task file for real analysis.",
            )
        } else {
            (
                self.analyze(tasks, strategy, weights),
                "Analyzed provided tasks.",
            )
        };

        let suggestions = result
            .tasks
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, st)| Suggestion {
                rank: i + 1,
                task: SuggestedTask {
                    title: st.task.title,
                    due_date: st.task.due_date,
                    estimated_hours: st.task.estimated_hours,
                    importance: st.task.importance,
                },
                priority_score: st.priority_score,
                why_this_task: st.explanation,
                component_scores: st.component_scores,
            })
            .collect();

        SuggestionReport {
            suggestions,
            strategy_used: result.strategy,
            message: message.to_string(),
            circular_dependencies_detected: !result.circular_dependencies.is_empty(),
        }
    }

    /// Demonstration batch dated relative to the engine's reference date.
    pub fn sample_batch(&self) -> Vec<TaskRecord> {
        let iso = |offset: i64| {
            (self.today() + Duration::days(offset))
                .format("%Y-%m-%d")
                .to_string()
        };

        vec![
            TaskRecord::new("Review pull requests")
                .with_id("task_1")
                .with_due_date(iso(0))
                .with_hours(2.0)
                .with_importance(7),
            TaskRecord::new("Fix critical bug")
                .with_id("task_2")
                .with_due_date(iso(-1))
                .with_hours(4.0)
                .with_importance(9),
            TaskRecord::new("Update documentation")
                .with_id("task_3")
                .with_due_date(iso(7))
                .with_hours(1.0)
                .with_importance(5),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn engine() -> PriorityEngine {
        PriorityEngine::new(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
    }

    #[test]
    fn empty_input_uses_samples() {
        let r = engine().suggest(&[], "smart_balance", None, DEFAULT_SUGGESTIONS);
        assert_eq!(r.suggestions.len(), 3);
        assert!(r.message.starts_with("Using sample tasks"));
        assert_eq!(r.suggestions[0].task.title, "Fix critical bug");
        assert!(r.suggestions[0].why_this_task.starts_with("Overdue by 1 day(s)"));
        assert!(!r.circular_dependencies_detected);
    }

    #[test]
    fn ranks_start_at_one_and_respect_limit() {
        let records: Vec<TaskRecord> = (0..6)
            .map(|i| TaskRecord::new(format!("t{i}")).with_importance(i + 1))
            .collect();
        let r = engine().suggest(&records, "high_impact", None, 2);
        let ranks: Vec<usize> = r.suggestions.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
        assert_eq!(r.suggestions[0].task.title, "t5");
        assert_eq!(r.strategy_used, "high_impact");
        assert_eq!(r.message, "Analyzed provided tasks.");
    }

    #[test]
    fn cycle_flag_is_set() {
        let records = vec![
            TaskRecord::new("A").with_id("a").with_dependencies(&["a"]),
        ];
        let r = engine().suggest(&records, "smart_balance", None, 3);
        assert!(r.circular_dependencies_detected);
    }
}
