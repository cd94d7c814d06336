//! # cstyle-core
//!
//! Rule-checking engine for C and C++ style linting.
//!
//! The engine consumes a syntax tree that a front end has already lowered
//! into [`TranslationUnit`] form and never parses source text itself. It
//! provides:
//!
//! - [`Rule`] trait for stateless, role-dispatched checks
//! - [`RuleDispatcher`] and the role table ([`roles_for`])
//! - [`ScopeFilter`] for restricting a run to the primary file
//! - [`Analyzer`] for orchestrating one run
//! - [`Violation`] and [`FixSuggestion`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use cstyle_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .include_all_files(false)
//!     .build();
//!
//! let result = analyzer.analyze(&unit);
//! for v in &result.violations {
//!     println!("{v}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod dispatch;
mod rule;
mod scope;
mod sink;
mod source_map;
mod tree;
mod types;

/// Fix computation helpers shared by rules.
pub mod fix;

pub use analyzer::{Analyzer, AnalyzerBuilder};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::CheckContext;
pub use dispatch::{is_exempt, roles_for, Role, RuleDispatcher};
pub use rule::{Rule, RuleBox};
pub use scope::ScopeFilter;
pub use sink::DiagnosticSink;
pub use source_map::{SourceFile, SourceMap};
pub use tree::{
    CallNode, DeclKind, DeclarationNode, FileId, FunctionBody, LiteralNode, LiteralQuoting, Node,
    SourceSpan, StatementKind, StatementNode, TranslationUnit,
};
pub use types::{FixSuggestion, LintResult, Location, Severity, Violation, ViolationDiagnostic};
