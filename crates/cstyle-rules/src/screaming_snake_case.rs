//! Rule requiring constant names in `SCREAMING_SNAKE_CASE`.
//!
//! Applies to `const` / `constexpr` objects and to enumerators.

use crate::naming;
use cstyle_core::fix::to_screaming_snake_case;
use cstyle_core::{CheckContext, DeclarationNode, Role, Rule, Violation};

/// Rule code for screaming-snake-case-constants.
pub const CODE: &str = "CSC003";

/// Rule name for screaming-snake-case-constants.
pub const NAME: &str = "screaming-snake-case-constants";

/// Requires constant names in `SCREAMING_SNAKE_CASE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreamingSnakeCaseConstants;

impl ScreamingSnakeCaseConstants {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ScreamingSnakeCaseConstants {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires constants and enumerators in UPPER_CASE"
    }

    fn roles(&self) -> &'static [Role] {
        &[Role::ConstantName]
    }

    fn check_declaration(
        &self,
        ctx: &CheckContext<'_>,
        decl: &DeclarationNode,
        _role: Role,
    ) -> Option<Violation> {
        let candidate = to_screaming_snake_case(&decl.name);
        let anchor = decl
            .name
            .find(|c: char| c.is_ascii_lowercase())
            .unwrap_or(0);
        naming::report(
            self,
            ctx,
            decl,
            candidate,
            anchor,
            "constant name should be in UPPER_CASE",
            "R3.3",
        )
    }
}
