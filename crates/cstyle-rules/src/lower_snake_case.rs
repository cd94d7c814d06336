//! Rule requiring function, variable and label names in `lower_snake_case`.
//!
//! # Detected Patterns
//!
//! - `void Some_Function(void);` (suggests `some_function`)
//! - `int SOME_VAR;` (suggests `some_var`)
//! - `LABEL:` (suggests `label`)
//!
//! The correction is a plain lower-case fold: `doThing` becomes `dothing`,
//! word boundaries are not guessed.

use crate::naming;
use cstyle_core::fix::to_lower_snake_case;
use cstyle_core::{CheckContext, DeclKind, DeclarationNode, Role, Rule, Violation};

/// Rule code for lower-snake-case-names.
pub const CODE: &str = "CSC002";

/// Rule name for lower-snake-case-names.
pub const NAME: &str = "lower-snake-case-names";

/// Requires function, variable and label names in `lower_snake_case`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerSnakeCaseNames;

impl LowerSnakeCaseNames {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for LowerSnakeCaseNames {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires function, variable and label names in lower_snake_case"
    }

    fn roles(&self) -> &'static [Role] {
        &[Role::FunctionName, Role::VariableName]
    }

    fn check_declaration(
        &self,
        ctx: &CheckContext<'_>,
        decl: &DeclarationNode,
        _role: Role,
    ) -> Option<Violation> {
        let candidate = to_lower_snake_case(&decl.name);
        let anchor = decl
            .name
            .find(|c: char| c.is_ascii_uppercase())
            .unwrap_or(0);
        let what = match decl.kind {
            DeclKind::Function => "function",
            DeclKind::Label => "label",
            _ => "variable",
        };
        naming::report(
            self,
            ctx,
            decl,
            candidate,
            anchor,
            format!("{what} name must be in lower_snake_case"),
            "R3.4",
        )
    }
}
