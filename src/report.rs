//! Report formatting for staging plans and outcomes.
//!
//! Pure functions: (StagePlan | StageOutcome, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::types::{OutputFormat, StageOutcome, StagePlan};

/// Format a plan, as printed by a dry run.
pub fn format_plan(plan: &StagePlan, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_plan_human(plan),
        OutputFormat::Json => format_json(plan),
    }
}

/// Format the result of applying a plan.
pub fn format_outcome(outcome: &StageOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_outcome_human(outcome),
        OutputFormat::Json => format_json(outcome),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn push_section(out: &mut String, title: &str, marker: &str, paths: &[String]) {
    if paths.is_empty() {
        return;
    }
    out.push_str(&format!("=== {} ===\n", title));
    for path in paths {
        out.push_str(&format!("  {} {}\n", marker, path));
    }
    out.push('\n');
}

fn format_plan_human(plan: &StagePlan) -> String {
    let mut out = String::new();

    push_section(&mut out, "Stage", "+", &plan.stage);
    push_section(&mut out, "Unstage", "-", &plan.unstage);

    out.push_str("=== Summary ===\n");
    out.push_str(&format!("To stage:   {}\n", plan.stage.len()));
    out.push_str(&format!("To unstage: {}\n", plan.unstage.len()));
    out.push_str(&format!("Unchanged:  {}\n", plan.unchanged.len()));

    out
}

fn format_outcome_human(outcome: &StageOutcome) -> String {
    let mut out = String::new();

    push_section(&mut out, "Staged", "+", &outcome.staged);
    push_section(&mut out, "Unstaged", "-", &outcome.unstaged);

    if !outcome.failed.is_empty() {
        out.push_str("=== Failed ===\n");
        for (path, error) in &outcome.failed {
            out.push_str(&format!("  {} - {}\n", path, error.trim()));
        }
        out.push('\n');
    }

    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Staged:   {}\n", outcome.staged.len()));
    out.push_str(&format!("Unstaged: {}\n", outcome.unstaged.len()));
    if !outcome.failed.is_empty() {
        out.push_str(&format!("Failed:   {}\n", outcome.failed.len()));
    }

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

// ============================================================================
// TESTS
// ============================================================================
