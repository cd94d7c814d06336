//! Rule forbidding control characters inside string literals.
//!
//! # Detected Patterns
//!
//! - `"a\x7Fb"`: invalid character, fix `"ab"`
//! - `"col1\tcol2"`: tab, reported without a fix
//!
//! A literal produces at most one violation, however many offending bytes
//! it contains. LF and CR are allowed.
//!
//! # Configuration
//!
//! - `fix_tabs`: also offer the stripping fix for literals whose only
//!   offending bytes are tabs (default: false)

use cstyle_core::fix::{is_forbidden_control, requote, strip_control_bytes, TAB};
use cstyle_core::{CheckContext, LiteralNode, Role, Rule, Violation};

/// Rule code for literal-control-character.
pub const CODE: &str = "CSC004";

/// Rule name for literal-control-character.
pub const NAME: &str = "literal-control-character";

/// Forbids control characters in string literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralControlCharacter {
    /// Offer a fix for tab-only literals too.
    pub fix_tabs: bool,
}

impl LiteralControlCharacter {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether tab-only literals get a fix.
    #[must_use]
    pub fn fix_tabs(mut self, fix: bool) -> Self {
        self.fix_tabs = fix;
        self
    }
}

impl Rule for LiteralControlCharacter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids control characters other than LF and CR in string literals"
    }

    fn roles(&self) -> &'static [Role] {
        &[Role::StringLiteral]
    }

    fn check_literal(&self, ctx: &CheckContext<'_>, literal: &LiteralNode) -> Option<Violation> {
        let mut has_tab = false;
        let mut has_other = false;
        for &b in &literal.bytes {
            if b == TAB {
                has_tab = true;
            } else if is_forbidden_control(b) {
                has_other = true;
            }
        }
        if !has_tab && !has_other {
            return None;
        }

        let anchor = literal.span.sub(0, 1);
        let (message, doc_ref, offer_fix) = if has_other {
            ("string literal contains invalid character", "R1.1", true)
        } else {
            ("string literal contains '\\t'", "R1.2", self.fix_tabs)
        };
        let fix = offer_fix.then(|| {
            let cleaned = strip_control_bytes(&literal.bytes);
            ctx.fix(literal.span, requote(&literal.quoting, &cleaned))
        });

        Some(
            ctx.violation(self, anchor, message)
                .with_optional_fix(fix)
                .with_doc_ref(doc_ref),
        )
    }
}
