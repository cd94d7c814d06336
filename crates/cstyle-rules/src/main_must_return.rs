//! Rule requiring `main` to end with an explicit `return`.
//!
//! Only the statements directly inside the body of `main` are searched; a
//! `return` nested in a block or a branch does not count.

use cstyle_core::{CheckContext, DeclarationNode, Role, Rule, Violation};

/// Rule code for main-must-return.
pub const CODE: &str = "CSC008";

/// Rule name for main-must-return.
pub const NAME: &str = "main-must-return";

/// Requires a direct `return` statement in `main`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainMustReturn;

impl MainMustReturn {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MainMustReturn {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires main to end with a return statement"
    }

    fn roles(&self) -> &'static [Role] {
        &[Role::EntryPoint]
    }

    fn check_declaration(
        &self,
        ctx: &CheckContext<'_>,
        decl: &DeclarationNode,
        _role: Role,
    ) -> Option<Violation> {
        let body = decl.body.as_ref()?;
        if body.has_direct_return() {
            return None;
        }
        Some(
            ctx.violation(
                self,
                decl.span,
                "function 'main' must end with 'return 0;' statement",
            )
            .with_doc_ref("R5.7"),
        )
    }
}
