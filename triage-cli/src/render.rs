//! Plain-text output for the terminal.

use triage_core::{AnalysisResult, Strategy, SuggestionReport};
use triage_ingest::RecordIssue;

const TITLE_WIDTH: usize = 40;

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn print_analysis(result: &AnalysisResult, limit: Option<usize>) {
    println!("# {}\n", result.message);

    let shown = limit.unwrap_or(result.tasks.len());
    for (i, t) in result.tasks.iter().take(shown).enumerate() {
        let c = &t.component_scores;
        println!(
            "{:>3}. [{:.3}] {:<width$} ({})",
            i + 1,
            t.priority_score,
            clip(&t.task.title, TITLE_WIDTH),
            t.task.id,
            width = TITLE_WIDTH
        );
        println!(
            "      urgency={:.3} importance={:.3} effort={:.3} deps={:.3} | {}",
            c.urgency, c.importance, c.effort, c.dependencies, t.explanation
        );
    }
    if shown < result.tasks.len() {
        println!("\n({} more not shown)", result.tasks.len() - shown);
    }

    if result.dropped_tasks > 0 {
        println!(
            "\nDropped {} task(s) without a title (run `triage check` for details)",
            result.dropped_tasks
        );
    }

    if result.circular_dependencies.is_empty() {
        println!("\nNo circular dependencies.");
    } else {
        println!("\n## Circular dependencies\n");
        for c in &result.circular_dependencies {
            println!("- {}", c);
        }
    }
}

pub fn print_suggestions(report: &SuggestionReport) {
    println!("# Suggestions ({})\n", report.strategy_used);

    for s in &report.suggestions {
        let due = s.task.due_date.as_deref().unwrap_or("no due date");
        println!(
            "{}. {} [{:.3}] | due {} | {}h | importance {}",
            s.rank, s.task.title, s.priority_score, due, s.task.estimated_hours, s.task.importance
        );
        println!("   why: {}", s.why_this_task);
    }

    println!("\n{}", report.message);
    if report.circular_dependencies_detected {
        println!("Warning: circular dependencies detected (run `triage analyze` to list them)");
    }
}

pub fn print_strategies() {
    for s in Strategy::ALL {
        let w = s.weights();
        println!("{}", s.name());
        println!(
            "  urgency={:.2} importance={:.2} effort={:.2} dependencies={:.2}",
            w.urgency, w.importance, w.effort, w.dependencies
        );
        println!("  {}\n", s.description());
    }
}

pub fn print_issues(issues: &[RecordIssue]) {
    for i in issues {
        println!("- {}", i);
    }
}
