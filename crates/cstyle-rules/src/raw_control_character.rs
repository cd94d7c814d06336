//! Rule scanning the raw bytes of the primary file for control characters.
//!
//! Unlike [`LiteralControlCharacter`](crate::LiteralControlCharacter) this
//! looks at every byte of the file, including comments and whitespace, so
//! tabs used for indentation are reported too. Each offending byte yields its
//! own violation; none carries a fix.

use cstyle_core::fix::is_forbidden_control;
use cstyle_core::{CheckContext, FileId, Role, Rule, SourceSpan, Violation};

/// Rule code for raw-control-character.
pub const CODE: &str = "CSC005";

/// Rule name for raw-control-character.
pub const NAME: &str = "raw-control-character";

/// Reports control characters anywhere in the primary file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawControlCharacter;

impl RawControlCharacter {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for RawControlCharacter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids control characters other than LF and CR anywhere in the file"
    }

    fn roles(&self) -> &'static [Role] {
        &[Role::SourceBuffer]
    }

    fn check_buffer(&self, ctx: &CheckContext<'_>, file: FileId, bytes: &[u8]) -> Vec<Violation> {
        bytes
            .iter()
            .enumerate()
            .filter(|(_, b)| is_forbidden_control(**b))
            .map(|(offset, b)| {
                ctx.violation(
                    self,
                    SourceSpan::new(file, offset, offset + 1),
                    format!("file contains invalid control character 0x{b:02X}"),
                )
                .with_doc_ref("R1.1")
            })
            .collect()
    }

    fn unreadable_buffer(&self, ctx: &CheckContext<'_>, file: FileId) -> Violation {
        ctx.violation(
            self,
            SourceSpan::new(file, 0, 0),
            "unable to read source for control-character scan",
        )
    }
}
