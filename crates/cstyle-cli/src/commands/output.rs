//! Rendering of lint results.

use anyhow::Result;
use cstyle_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use miette::{GraphicalReportHandler, GraphicalTheme};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Prints lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    print!("{}", render(result, format)?);
    Ok(())
}

/// Renders lint results in the specified format.
pub fn render(result: &LintResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => render_json(result),
        OutputFormat::Compact => Ok(render_compact(result)),
        OutputFormat::Pretty => Ok(render_pretty(result)),
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();
    for v in &result.violations {
        out.push_str(&v.format_with(severity_label(v.severity)));
        out.push('\n');
    }
    let _ = writeln!(out, "{}", summary_line(result));
    out
}

fn summary_line(result: &LintResult) -> String {
    let (errors, warnings, infos) = result.count_by_severity();
    let color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    format!(
        "{color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s); {} fixable\x1b[0m",
        result.files_checked,
        result.fixable_count(),
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    violations: &'a [Violation],
    files_checked: usize,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    errors: usize,
    warnings: usize,
    infos: usize,
    fixable: usize,
}

fn render_json(result: &LintResult) -> Result<String> {
    let (errors, warnings, infos) = result.count_by_severity();
    let report = JsonReport {
        violations: &result.violations,
        files_checked: result.files_checked,
        summary: JsonSummary {
            errors,
            warnings,
            infos,
            fixable: result.fixable_count(),
        },
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

fn render_compact(result: &LintResult) -> String {
    result.violations.iter().fold(String::new(), |mut out, v| {
        let _ = writeln!(out, "{v}");
        out
    })
}

fn render_pretty(result: &LintResult) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut sources: HashMap<PathBuf, String> = HashMap::new();
    let mut out = String::new();

    for v in &result.violations {
        let source = sources
            .entry(v.location.file.clone())
            .or_insert_with(|| read_lossy(&v.location.file))
            .clone();
        let diagnostic = ViolationDiagnostic::new(v, source);
        if handler.render_report(&mut out, &diagnostic).is_err() {
            let _ = writeln!(out, "{v}");
        }
    }
    let _ = writeln!(out, "{}", summary_line(result));
    out
}

fn read_lossy(path: &Path) -> String {
    std::fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}
