use chrono::NaiveDate;
use std::path::PathBuf;
use triage_core::PriorityEngine;
use triage_ingest::{lint_records, load_task_file};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

fn engine() -> PriorityEngine {
    PriorityEngine::new(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
}

#[test]
fn test_json_request_file() {
    let f = load_task_file(fixture("sprint.json")).unwrap();
    assert_eq!(f.tasks.len(), 9);
    assert_eq!(f.strategy.as_deref(), Some("smart_balance"));
}

/// Real-data regression: the CSV export of the sprint ranks exactly like the JSON one.
#[test]
fn test_csv_and_json_rank_identically() {
    let json = load_task_file(fixture("sprint.json")).unwrap();
    let csv = load_task_file(fixture("sprint.csv")).unwrap();
    assert_eq!(csv.tasks.len(), json.tasks.len());

    let a = engine().analyze(&json.tasks, "smart_balance", None);
    let b = engine().analyze(&csv.tasks, "smart_balance", None);

    let summary = |r: &triage_core::AnalysisResult| -> Vec<(String, f64)> {
        r.tasks
            .iter()
            .map(|t| (t.task.id.clone(), t.priority_score))
            .collect()
    };
    assert_eq!(summary(&a), summary(&b));
    assert_eq!(a.circular_dependencies, b.circular_dependencies);
    assert_eq!(b.dropped_tasks, 1);
}

#[test]
fn test_lint_sprint_fixture() {
    let f = load_task_file(fixture("sprint.json")).unwrap();
    let issues = lint_records(&f.tasks);
    let lines: Vec<String> = issues.iter().map(|i| i.to_string()).collect();

    assert!(lines.iter().any(|l| l.contains("unknown task 'vendor-sdk'")));
    assert!(lines.iter().any(|l| l.starts_with("task #6 importance")));
    assert!(lines.iter().any(|l| l.starts_with("task #7 due_date")));
    assert!(lines.iter().any(|l| l.starts_with("task #8 title")));
}

#[test]
fn test_unsupported_extension() {
    let err = load_task_file(fixture("sprint.txt")).unwrap_err();
    assert!(err.to_string().contains("unsupported task file"));
}
