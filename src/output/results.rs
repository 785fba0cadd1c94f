//! Render TestResult/DetailSection to text

use crate::models::{CheckStatus, DetailSection, TestResult};
use console::style;

/// Format a full test result to a string, detail sections included
pub fn format_test_result(result: &TestResult) -> String {
    let mut out = String::new();
    let icon = status_icon(result.status);
    out.push_str(&format!(
        "  {} {} {}\n",
        icon,
        style(&result.title).bold(),
        summary_style(result.status, &result.summary)
    ));

    for section in &result.details {
        out.push_str(&format_detail_section(section));
    }

    if !result.test_steps.is_empty() {
        out.push('\n');
        for step in &result.test_steps {
            let icon = status_icon(step.status);
            out.push_str(&format!("    {} {}", icon, step.description));
            if let Some(details) = &step.details {
                out.push_str(&format!(" {}", style(format!("({})", details)).dim()));
            }
            out.push('\n');
        }
    }

    if !result.recommendations.is_empty() {
        out.push('\n');
        out.push_str(&format!(
            "    {}\n",
            style("Recommendations:").yellow().bold()
        ));
        for rec in &result.recommendations {
            out.push_str(&format!("    {} {}\n", style("→").yellow(), rec));
        }
    }

    out
}

fn format_detail_section(section: &DetailSection) -> String {
    let mut out = String::new();
    match section {
        DetailSection::KeyValue { title, pairs } => {
            if let Some(t) = title {
                out.push('\n');
                out.push_str(&format!("    {}\n", style(t).bold()));
            }
            let max_key_len = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            for (key, value) in pairs {
                let dots = ".".repeat(max_key_len.saturating_sub(key.len()) + 2);
                out.push_str(&format!(
                    "    {} {} {}\n",
                    style(key).dim(),
                    style(dots).dim(),
                    value
                ));
            }
        }
        DetailSection::Text { title, content } => {
            if let Some(t) = title {
                out.push('\n');
                out.push_str(&format!("    {}\n", style(t).bold()));
            }
            // raw transcript, no trimming beyond the trailing newline
            for line in content.trim_end_matches('\n').lines() {
                out.push_str(&format!("      {}\n", line));
            }
        }
    }
    out
}

fn summary_style(status: CheckStatus, summary: &str) -> console::StyledObject<&str> {
    match status {
        CheckStatus::Pass => style(summary).green().bold(),
        CheckStatus::Warning => style(summary).yellow().bold(),
        CheckStatus::Fail => style(summary).red().bold(),
    }
}

fn status_icon(status: CheckStatus) -> console::StyledObject<&'static str> {
    match status {
        CheckStatus::Pass => style(status.icon()).green(),
        CheckStatus::Warning => style(status.icon()).yellow(),
        CheckStatus::Fail => style(status.icon()).red(),
    }
}
