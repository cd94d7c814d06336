//! Rule forbidding calls to unsafe C library functions.
//!
//! # Detected Patterns
//!
//! - `gets(buf)`
//! - `strcpy(dst, src)`
//! - `sprintf(buf, fmt, ...)`
//! - `std::strcpy(dst, src)` (the last component of the name is compared)
//!
//! Calls through pointers or member access have no resolved callee and are
//! not reported.
//!
//! # Configuration
//!
//! - `functions`: replaces the forbidden set

use cstyle_core::{CallNode, CheckContext, Role, Rule, Violation};

/// Rule code for forbidden-call.
pub const CODE: &str = "CSC006";

/// Rule name for forbidden-call.
pub const NAME: &str = "forbidden-call";

/// Forbidden by default.
pub const DEFAULT_FUNCTIONS: &[&str] = &["gets", "strcpy", "sprintf"];

/// Forbids calls to functions with buffer overflow risks.
#[derive(Debug, Clone)]
pub struct ForbiddenCall {
    /// Names that must not be called.
    pub functions: Vec<String>,
}

impl Default for ForbiddenCall {
    fn default() -> Self {
        Self::new()
    }
}

impl ForbiddenCall {
    /// Creates a new rule with the default forbidden set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            functions: DEFAULT_FUNCTIONS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Replaces the forbidden set.
    #[must_use]
    pub fn with_functions<I, S>(mut self, functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.functions = functions.into_iter().map(Into::into).collect();
        self
    }

    fn is_forbidden(&self, name: &str) -> bool {
        self.functions.iter().any(|f| f == name)
    }
}

impl Rule for ForbiddenCall {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids gets, strcpy, sprintf and other unbounded buffer functions"
    }

    fn roles(&self) -> &'static [Role] {
        &[Role::CallSite]
    }

    fn check_call(&self, ctx: &CheckContext<'_>, call: &CallNode) -> Option<Violation> {
        let callee = call.callee.as_deref()?;
        if !self.is_forbidden(callee) {
            return None;
        }
        Some(
            ctx.violation(
                self,
                call.span,
                format!("function '{callee}' is forbidden due to buffer overflow risks"),
            )
            .with_doc_ref("R5.8"),
        )
    }
}
