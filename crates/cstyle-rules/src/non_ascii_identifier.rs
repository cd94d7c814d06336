//! Rule requiring identifiers spelled with ASCII characters only.
//!
//! Applies to function, variable and constant names. The violation points
//! at the first non-ASCII character and carries no fix.

use cstyle_core::{CheckContext, DeclKind, DeclarationNode, Role, Rule, Violation};

/// Rule code for non-ascii-identifier.
pub const CODE: &str = "CSC007";

/// Rule name for non-ascii-identifier.
pub const NAME: &str = "non-ascii-identifier";

/// Forbids non-ASCII characters in declared names.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonAsciiIdentifier;

impl NonAsciiIdentifier {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NonAsciiIdentifier {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires function, variable and constant names in English (ASCII)"
    }

    fn roles(&self) -> &'static [Role] {
        &[Role::DeclaredIdentifier]
    }

    fn check_declaration(
        &self,
        ctx: &CheckContext<'_>,
        decl: &DeclarationNode,
        _role: Role,
    ) -> Option<Violation> {
        let (offset, c) = decl.name.char_indices().find(|(_, c)| !c.is_ascii())?;
        let what = match decl.kind {
            DeclKind::Function => "function",
            DeclKind::Constant => "constant",
            _ => "variable",
        };
        Some(
            ctx.violation(
                self,
                decl.span.sub(offset, c.len_utf8()),
                format!("{what} name contains non-English characters"),
            )
            .with_doc_ref("R3.2"),
        )
    }
}
