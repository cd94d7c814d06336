//! Check command implementation.

use anyhow::{anyhow, Context, Result};
use cstyle_core::{Analyzer, Config, LintResult, RuleBox, SourceMap, TranslationUnit};
use cstyle_rules::{rule_set, rules_by_names, Preset};
use cstyle_ts::{CppFrontend, FrontendError, SyntaxTreeSource};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Arguments of `cstyle check`.
pub struct CheckOptions {
    /// Files or directories to analyze.
    pub paths: Vec<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Check included headers too.
    pub include_all_files: bool,
}

/// Runs the check command.
pub fn run(options: &CheckOptions, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let threshold = config.fail_threshold().context("Invalid fail_on")?;

    let result = execute(options, config)?;
    super::output::print(&result, options.format)?;

    if result.has_violations_at(threshold) {
        std::process::exit(1);
    }
    Ok(())
}

/// Discovers, parses and analyzes the sources, with severity overrides applied.
pub fn execute(options: &CheckOptions, config: Config) -> Result<LintResult> {
    let files = crate::discover::discover(&options.paths, &config.analyzer, &options.exclude)?;
    let rules = select_rules(options.rules.as_deref(), &config)?;

    let frontend = CppFrontend::new().include_dirs(config.analyzer.include_dirs.iter().cloned());
    let analyzer = Analyzer::builder()
        .rules(rules)
        .include_all_files(options.include_all_files)
        .config(config.clone())
        .build();

    tracing::info!(
        "Analyzing {} file(s) with {} rules",
        files.len(),
        analyzer.rule_count()
    );

    let mut result = LintResult::new();
    for path in &files {
        let Some(unit) = load_unit(&frontend, path) else {
            continue;
        };
        result.extend(analyzer.analyze(&unit));
    }
    config.apply_severity_overrides(&mut result.violations);
    Ok(result)
}

fn select_rules(filter: Option<&str>, config: &Config) -> Result<Vec<RuleBox>> {
    if let Some(filter) = filter {
        let names: Vec<&str> = filter
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        return rules_by_names(&names, config).map_err(|unknown| anyhow!("Unknown rule: {unknown}"));
    }
    let preset = config
        .preset
        .as_deref()
        .map_or(Ok(Preset::default()), str::parse::<Preset>)
        .map_err(|e| anyhow!(e))?;
    Ok(rule_set(preset, config))
}

/// Parses one file. Unreadable files become a unit without contents so that
/// buffer rules can report them; parse failures are skipped.
fn load_unit(frontend: &CppFrontend, path: &Path) -> Option<TranslationUnit> {
    match frontend.parse_file(path) {
        Ok(unit) => Some(unit),
        Err(FrontendError::Io { path, source }) => {
            tracing::warn!("Failed to read {}: {source}", path.display());
            let mut map = SourceMap::new();
            let id = map.add_unreadable(path);
            Some(TranslationUnit::new(map, id, Vec::new()))
        }
        Err(e) => {
            tracing::warn!("Skipping {}: {e}", path.display());
            None
        }
    }
}
