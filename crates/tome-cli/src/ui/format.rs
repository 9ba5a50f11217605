//! Formatting utilities for durations, validation issues and build summaries.

use console::Term;
use owo_colors::OwoColorize;
use std::time::Duration;

use super::colors_enabled;
use crate::pipeline::{BuildSummary, Severity, ValidationIssue};

/// Format duration in human-readable format.
///
/// Converts to the most appropriate unit (ms, s, m:s).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tome_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}

/// Print validation issues to stderr, errors first.
pub fn print_issues(issues: &[ValidationIssue]) {
    let mut ordered: Vec<&ValidationIssue> = issues.iter().collect();
    ordered.sort_by_key(|issue| (issue.severity != Severity::Error, issue.file.clone()));

    for issue in ordered {
        let file = issue.file.display().to_string();
        match (issue.severity, colors_enabled()) {
            (Severity::Error, true) => {
                eprintln!("  {} {} {}", "error".red().bold(), file.bold(), issue.message)
            }
            (Severity::Warning, true) => eprintln!(
                "  {} {} {}",
                "warning".yellow().bold(),
                file.bold(),
                issue.message
            ),
            (severity, false) => eprintln!("  {} {} {}", severity.label(), file, issue.message),
        }
    }
}

/// Print a build summary table to stderr.
pub fn print_build_summary(summary: &BuildSummary) {
    let term = Term::stderr();
    let width = (term.size().1 as usize).min(80);

    let rows = [
        ("documents", summary.documents),
        ("parsed", summary.parsed),
        ("reused", summary.reused),
        ("skipped", summary.skipped),
        ("kept", summary.kept),
        ("warnings", summary.warnings),
        ("components", summary.components),
        ("assets", summary.assets),
    ];

    if colors_enabled() {
        eprintln!("\n{}", "Build Summary".bold().underline());
        eprintln!("{}", "─".repeat(width));
        for (label, count) in rows {
            eprintln!("  {} {:<12} {}", "▸".blue(), label, count.bright_white().bold());
        }
    } else {
        eprintln!("\nBuild Summary");
        eprintln!("{}", "─".repeat(width));
        for (label, count) in rows {
            eprintln!("  ▸ {:<12} {}", label, count);
        }
    }
    eprintln!("{}", "─".repeat(width));
}
