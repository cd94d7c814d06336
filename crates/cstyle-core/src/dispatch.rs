//! Role table and rule fan-out.
//!
//! Every node is classified into zero or more [`Role`]s by [`roles_for`].
//! The [`RuleDispatcher`] then hands the node to each registered rule that
//! declares one of those roles, in registration order.

use crate::context::CheckContext;
use crate::rule::{Rule, RuleBox};
use crate::sink::DiagnosticSink;
use crate::tree::{DeclKind, DeclarationNode, Node};
use tracing::trace;

/// Syntactic role a rule is dispatched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Name of a record or enum type.
    TypeName,
    /// Name of an ordinary function.
    FunctionName,
    /// Name of a non-constant variable or a label.
    VariableName,
    /// Name of a constant-qualified variable or an enumerator.
    ConstantName,
    /// Any function, variable or constant name.
    DeclaredIdentifier,
    /// Definition of the global `main`.
    EntryPoint,
    /// A call expression.
    CallSite,
    /// The content of a string literal.
    StringLiteral,
    /// The raw bytes of the primary file.
    SourceBuffer,
}

impl Role {
    /// Returns true for the roles that select a naming convention.
    #[must_use]
    pub fn is_naming(self) -> bool {
        matches!(
            self,
            Self::TypeName | Self::FunctionName | Self::VariableName | Self::ConstantName
        )
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::TypeName => "type-name",
            Self::FunctionName => "function-name",
            Self::VariableName => "variable-name",
            Self::ConstantName => "constant-name",
            Self::DeclaredIdentifier => "declared-identifier",
            Self::EntryPoint => "entry-point",
            Self::CallSite => "call-site",
            Self::StringLiteral => "string-literal",
            Self::SourceBuffer => "source-buffer",
        };
        f.write_str(s)
    }
}

/// Returns true if a declaration never receives a role.
#[must_use]
pub fn is_exempt(decl: &DeclarationNode) -> bool {
    decl.is_anonymous
        || decl.name.is_empty()
        || decl.is_conversion_function
        || decl.is_special_member
}

/// Roles of a node, at most one of them a naming role.
#[must_use]
pub fn roles_for(node: &Node) -> &'static [Role] {
    match node {
        Node::Declaration(decl) => declaration_roles(decl),
        Node::Literal(_) => &[Role::StringLiteral],
        Node::Call(_) => &[Role::CallSite],
        Node::Statement(_) => &[],
    }
}

fn declaration_roles(decl: &DeclarationNode) -> &'static [Role] {
    if is_exempt(decl) {
        return &[];
    }
    match decl.kind {
        DeclKind::Type => &[Role::TypeName],
        DeclKind::Function if decl.is_entry_point && decl.body.is_some() => &[
            Role::FunctionName,
            Role::DeclaredIdentifier,
            Role::EntryPoint,
        ],
        DeclKind::Function => &[Role::FunctionName, Role::DeclaredIdentifier],
        DeclKind::Variable if decl.is_constant_qualified => {
            &[Role::ConstantName, Role::DeclaredIdentifier]
        }
        DeclKind::Variable => &[Role::VariableName, Role::DeclaredIdentifier],
        DeclKind::Constant => &[Role::ConstantName, Role::DeclaredIdentifier],
        DeclKind::Label => &[Role::VariableName],
        DeclKind::Field => &[],
    }
}

/// Registry of rules, queried per node.
#[derive(Default)]
pub struct RuleDispatcher {
    rules: Vec<RuleBox>,
}

impl RuleDispatcher {
    /// Creates a dispatcher over `rules`, keeping their order.
    #[must_use]
    pub fn new(rules: Vec<RuleBox>) -> Self {
        Self { rules }
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules that handle `role`, in registration order.
    pub fn rules_for(&self, role: Role) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.rules
            .iter()
            .map(|rule| &**rule)
            .filter(move |rule| rule.roles().contains(&role))
    }

    /// Applicable `(rule, role)` pairs for a node: registration order
    /// first, then the node's role order.
    pub fn applicable<'a>(&'a self, node: &Node) -> impl Iterator<Item = (&'a dyn Rule, Role)> {
        let roles = roles_for(node);
        self.rules.iter().flat_map(move |rule| {
            roles
                .iter()
                .filter(move |role| rule.roles().contains(*role))
                .map(move |role| (&**rule, *role))
        })
    }

    /// Runs every applicable rule on `node` and records the findings.
    pub fn dispatch(&self, ctx: &CheckContext<'_>, node: &Node, sink: &mut DiagnosticSink) {
        for (rule, role) in self.applicable(node) {
            let found = match node {
                Node::Declaration(decl) => rule.check_declaration(ctx, decl, role),
                Node::Literal(literal) => rule.check_literal(ctx, literal),
                Node::Call(call) => rule.check_call(ctx, call),
                Node::Statement(_) => None,
            };
            match found {
                Some(violation) => sink.push(violation),
                None => trace!(rule = rule.name(), %role, "clean"),
            }
        }
    }
}

impl std::fmt::Debug for RuleDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| r.name()))
            .finish()
    }
}
