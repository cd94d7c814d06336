//! Core analyzer for orchestrating a style check run.

use crate::config::Config;
use crate::context::CheckContext;
use crate::dispatch::{Role, RuleDispatcher};
use crate::rule::{Rule, RuleBox};
use crate::scope::ScopeFilter;
use crate::sink::DiagnosticSink;
use crate::tree::{Node, TranslationUnit};
use crate::types::LintResult;

use tracing::{debug, trace};

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    include_all_files: bool,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Checks nodes from every file, not only the primary one (default: false).
    #[must_use]
    pub fn include_all_files(mut self, include: bool) -> Self {
        self.include_all_files = include;
        self
    }

    /// Sets the configuration.
    ///
    /// Rules the configuration disables are dropped at build time, and
    /// `analyzer.include_all_files` is honored.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    #[must_use]
    pub fn build(self) -> Analyzer {
        let mut include_all_files = self.include_all_files;
        let rules = match &self.config {
            Some(config) => {
                include_all_files |= config.analyzer.include_all_files;
                self.rules
                    .into_iter()
                    .filter(|rule| {
                        let enabled = config.is_rule_enabled(rule.name());
                        if !enabled {
                            debug!("Skipping disabled rule: {}", rule.name());
                        }
                        enabled
                    })
                    .collect()
            }
            None => self.rules,
        };

        Analyzer {
            dispatcher: RuleDispatcher::new(rules),
            include_all_files,
        }
    }
}

/// The main analyzer that runs rules over a translation unit.
///
/// Use [`Analyzer::builder()`] to construct an instance. An analyzer holds
/// no per-run state, so one instance can check any number of units.
#[derive(Debug)]
pub struct Analyzer {
    dispatcher: RuleDispatcher,
    include_all_files: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.dispatcher.len()
    }

    /// Checks one translation unit.
    ///
    /// Nodes are visited once in pre-order. Nodes outside the scope are
    /// skipped together with their subtree. Buffer rules run on the primary
    /// file after the traversal.
    #[must_use]
    pub fn analyze(&self, unit: &TranslationUnit) -> LintResult {
        let ctx = CheckContext::new(&unit.source_map, unit.primary);
        let scope = ScopeFilter::new(unit.primary, self.include_all_files);
        let mut sink = DiagnosticSink::new();

        debug!(
            "Checking {} top-level nodes with {} rules",
            unit.nodes.len(),
            self.dispatcher.len()
        );

        let mut stack: Vec<&Node> = unit.nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if !scope.node_in_scope(node) {
                trace!(file = node.span().file.0, "out of scope, skipping subtree");
                continue;
            }
            self.dispatcher.dispatch(&ctx, node, &mut sink);
            stack.extend(node.children().rev());
        }

        self.scan_buffers(&ctx, &mut sink);

        debug!("Run complete: {} violations", sink.len());

        LintResult {
            violations: sink.into_violations(),
            files_checked: 1,
        }
    }

    fn scan_buffers(&self, ctx: &CheckContext<'_>, sink: &mut DiagnosticSink) {
        let contents = ctx
            .source_map
            .file(ctx.primary)
            .and_then(|file| file.contents());
        for rule in self.dispatcher.rules_for(Role::SourceBuffer) {
            match contents {
                Some(bytes) => sink.extend(rule.check_buffer(ctx, ctx.primary, bytes)),
                None => {
                    debug!("No buffer for primary file, {} reports it", rule.name());
                    sink.push(rule.unreadable_buffer(ctx, ctx.primary));
                }
            }
        }
    }
}
