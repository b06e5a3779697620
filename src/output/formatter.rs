use std::io::IsTerminal;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{Width, terminal_size};

use crate::scoring::ValidationResult;

/// A validated sprint with its display label
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CheckedSprint<'a> {
    pub label: &'a str,
    #[serde(flatten)]
    pub result: &'a ValidationResult,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with one decimal ("87.5", "0.0")
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// "PASS" for a counted sprint, "FAIL" otherwise
pub fn format_verdict(is_valid: bool, use_colors: bool) -> String {
    match (is_valid, use_colors) {
        (true, true) => "PASS".green().bold().to_string(),
        (false, true) => "FAIL".red().bold().to_string(),
        (true, false) => "PASS".to_string(),
        (false, false) => "FAIL".to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format sprints as a table with columns: Index, Score, Verdict, Label, Duration
/// No headers
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column is right-aligned, 5 chars wide (fits "100.0")
pub fn format_results_table(sprints: &[CheckedSprint], use_colors: bool) -> String {
    if sprints.is_empty() {
        return "No sprints checked.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 3;
    let score_width = 5;
    let verdict_width = 4;
    let separator = "  ";

    sprints
        .iter()
        .enumerate()
        .map(|(idx, sprint)| {
            // 1-based index, right-aligned with trailing dot
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!(
                "{:>width$}",
                format_score(sprint.result.validation_score),
                width = score_width
            );
            let verdict = format_verdict(sprint.result.is_valid, use_colors);
            let duration = humantime::format_duration(sprint.result.duration).to_string();

            let fixed_width = index_width
                + 1
                + score_width
                + verdict_width
                + separator.len() * 3
                + duration.len();

            let label = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_label(sprint.label, width - fixed_width)
                } else {
                    // Very narrow terminal, show truncated
                    truncate_label(sprint.label, 20)
                }
            } else {
                // No terminal (pipe), don't truncate
                sprint.label.to_string()
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    verdict,
                    separator,
                    label,
                    separator,
                    duration.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, score_str, separator, verdict, separator, label, separator, duration
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single sprint with its full score breakdown (for verbose mode)
pub fn format_result_detail(sprint: &CheckedSprint, use_colors: bool) -> String {
    let result = sprint.result;
    let mut lines = Vec::new();

    let title = if use_colors {
        sprint.label.bold().to_string()
    } else {
        sprint.label.to_string()
    };
    lines.push(format!(
        "{}  {} ({})",
        title,
        format_verdict(result.is_valid, use_colors),
        format_score(result.validation_score)
    ));
    lines.push(format!(
        "  Heart rate: baseline {} BPM, peak {:.0} BPM",
        result.baseline_hr, result.peak_hr
    ));
    lines.push(format!(
        "  Cadence: peak {:.0} SPM, average {:.1} SPM",
        result.peak_cadence, result.average_cadence
    ));
    lines.push(format!(
        "  Duration: {}",
        humantime::format_duration(result.duration)
    ));

    for sub in &result.breakdown.sub_scores {
        lines.push(format!(
            "  {}: {} x {:.2}",
            sub.label,
            format_score(sub.score),
            sub.weight
        ));
        for component in &sub.components {
            let credit = format!("{:>3.0}%", component.value * 100.0);
            if use_colors {
                lines.push(format!(
                    "    {} {}: {}",
                    credit.dimmed(),
                    component.label,
                    component.description
                ));
            } else {
                lines.push(format!(
                    "    {} {}: {}",
                    credit, component.label, component.description
                ));
            }
        }
    }

    lines.join("\n")
}

/// Format sprints as tab-separated values for scripting
/// Columns: score, verdict, label (no headers, no colors)
pub fn format_tsv(sprints: &[CheckedSprint]) -> String {
    sprints
        .iter()
        .map(|sprint| {
            format!(
                "{}\t{}\t{}",
                format_score(sprint.result.validation_score),
                format_verdict(sprint.result.is_valid, false),
                sprint.label
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format sprints as a pretty-printed JSON array
pub fn format_json(sprints: &[CheckedSprint]) -> Result<String> {
    serde_json::to_string_pretty(sprints).context("Failed to serialize results")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::SprintValidator;
    use crate::sprint::SprintData;
    use chrono::Utc;
    use std::time::Duration;

    fn passing_result() -> ValidationResult {
        let hr: Vec<f64> = (0..20).map(|i| (120.0 + i as f64 * 4.0).min(175.0)).collect();
        let cadence = vec![150.0, 150.0, 150.0, 170.0, 180.0];
        let data = SprintData::new(Utc::now(), Duration::from_secs(30), 120, hr, cadence);
        SprintValidator::new().validate(&data, 190)
    }

    fn failing_result() -> ValidationResult {
        let data = SprintData::new(Utc::now(), Duration::from_secs(20), 120, vec![], vec![]);
        SprintValidator::new().validate(&data, 190)
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(87.46), "87.5");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(100.0), "100.0");
    }

    #[test]
    fn test_format_verdict_plain() {
        assert_eq!(format_verdict(true, false), "PASS");
        assert_eq!(format_verdict(false, false), "FAIL");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Short", 20), "Short");
        assert_eq!(truncate_label("tuesday-intervals-3", 10), "tuesday...");
        assert_eq!(truncate_label("Hello world", 3), "Hel");
    }

    #[test]
    fn test_format_results_table_empty() {
        let sprints: Vec<CheckedSprint> = vec![];
        assert_eq!(format_results_table(&sprints, false), "No sprints checked.");
    }

    #[test]
    fn test_format_results_table_multiple() {
        let pass = passing_result();
        let fail = failing_result();
        let sprints = vec![
            CheckedSprint { label: "morning-sprint", result: &pass },
            CheckedSprint { label: "empty-sprint", result: &fail },
        ];
        let result = format_results_table(&sprints, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("PASS"));
        assert!(lines[0].contains("morning-sprint"));
        assert!(lines[0].ends_with("30s"));
        assert!(lines[1].starts_with(" 2."));
        assert!(lines[1].contains("  0.0"));
        assert!(lines[1].contains("FAIL"));
    }

    #[test]
    fn test_format_result_detail() {
        let pass = passing_result();
        let sprint = CheckedSprint { label: "morning-sprint", result: &pass };
        let detail = format_result_detail(&sprint, false);
        assert!(detail.starts_with("morning-sprint  PASS"));
        assert!(detail.contains("Heart rate: baseline 120 BPM, peak 175 BPM"));
        assert!(detail.contains("Cadence: peak 180 SPM"));
        assert!(detail.contains("HR rise rate:"));
        assert!(detail.contains("Target zone"));
    }

    #[test]
    fn test_format_tsv() {
        let pass = passing_result();
        let sprints = vec![CheckedSprint { label: "morning-sprint", result: &pass }];
        let tsv = format_tsv(&sprints);
        assert_eq!(tsv.split('\t').count(), 3);
        assert!(tsv.ends_with("\tPASS\tmorning-sprint"));
    }

    #[test]
    fn test_format_json_flattens_result() {
        let fail = failing_result();
        let sprints = vec![CheckedSprint { label: "empty-sprint", result: &fail }];
        let json = format_json(&sprints).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["label"], "empty-sprint");
        assert_eq!(parsed[0]["is_valid"], false);
        assert_eq!(parsed[0]["validation_score"], 0.0);
        assert_eq!(parsed[0]["duration"], "20s");
    }
}
