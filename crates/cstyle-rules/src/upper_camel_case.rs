//! Rule requiring type names in `UpperCamelCase`.
//!
//! # Rationale
//!
//! Record and enum names are spelled `FooBar` so they read differently from
//! functions and variables.
//!
//! # Detected Patterns
//!
//! - `struct node_ { };` (suggests `Node`)
//! - `class binary_operation { };` (suggests `BinaryOperation`)
//! - `enum colour { };` (suggests `Colour`)
//!
//! Anonymous records are never checked.

use crate::naming;
use cstyle_core::fix::to_upper_camel_case;
use cstyle_core::{CheckContext, DeclarationNode, Role, Rule, Violation};

/// Rule code for upper-camel-case-types.
pub const CODE: &str = "CSC001";

/// Rule name for upper-camel-case-types.
pub const NAME: &str = "upper-camel-case-types";

/// Requires type names in `UpperCamelCase`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperCamelCaseTypes;

impl UpperCamelCaseTypes {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for UpperCamelCaseTypes {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires record and enum names in UpperCamelCase"
    }

    fn roles(&self) -> &'static [Role] {
        &[Role::TypeName]
    }

    fn check_declaration(
        &self,
        ctx: &CheckContext<'_>,
        decl: &DeclarationNode,
        _role: Role,
    ) -> Option<Violation> {
        let candidate = to_upper_camel_case(&decl.name);
        let anchor = decl.name.find('_').unwrap_or(0);
        naming::report(
            self,
            ctx,
            decl,
            candidate,
            anchor,
            "type name must be in UpperCamelCase (`_` is not allowed)",
            "R3.6",
        )
    }
}
