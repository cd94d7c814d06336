//! Rule trait for defining style checks.

use crate::context::CheckContext;
use crate::dispatch::Role;
use crate::tree::{CallNode, DeclarationNode, FileId, LiteralNode};
use crate::types::{Severity, Violation};

/// A stateless style check.
///
/// A rule declares the [`Role`]s it handles; the dispatcher only calls the
/// `check_*` method matching the node that carries one of those roles. All
/// methods default to "no violation", so a rule implements only the ones
/// relevant to its roles.
///
/// # Example
///
/// ```ignore
/// use cstyle_core::{CheckContext, DeclarationNode, Role, Rule, Violation};
///
/// pub struct NoShortTypeNames;
///
/// impl Rule for NoShortTypeNames {
///     fn name(&self) -> &'static str { "no-short-type-names" }
///     fn code(&self) -> &'static str { "CSC100" }
///     fn roles(&self) -> &'static [Role] { &[Role::TypeName] }
///
///     fn check_declaration(
///         &self,
///         ctx: &CheckContext<'_>,
///         decl: &DeclarationNode,
///         _role: Role,
///     ) -> Option<Violation> {
///         (decl.name.len() < 3).then(|| ctx.violation(self, decl.span, "type name too short"))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "upper-camel-case-types").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CSC001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Roles this rule is dispatched for.
    fn roles(&self) -> &'static [Role];

    /// Checks a declaration that carries `role`.
    fn check_declaration(
        &self,
        _ctx: &CheckContext<'_>,
        _decl: &DeclarationNode,
        _role: Role,
    ) -> Option<Violation> {
        None
    }

    /// Checks a string literal.
    fn check_literal(&self, _ctx: &CheckContext<'_>, _literal: &LiteralNode) -> Option<Violation> {
        None
    }

    /// Checks a call expression.
    fn check_call(&self, _ctx: &CheckContext<'_>, _call: &CallNode) -> Option<Violation> {
        None
    }

    /// Checks the raw bytes of a whole file.
    fn check_buffer(&self, _ctx: &CheckContext<'_>, _file: FileId, _bytes: &[u8]) -> Vec<Violation> {
        Vec::new()
    }

    /// Violation reported when a buffer rule cannot read its file.
    fn unreadable_buffer(&self, ctx: &CheckContext<'_>, file: FileId) -> Violation {
        let span = crate::tree::SourceSpan::new(file, 0, 0);
        ctx.violation(self, span, format!("unable to read source for {}", self.name()))
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
