//! Context types for rule execution.

use crate::rule::Rule;
use crate::source_map::SourceMap;
use crate::tree::{FileId, SourceSpan};
use crate::types::{FixSuggestion, Location, Violation};

/// Context provided to rules while a translation unit is checked.
///
/// Gives rules read access to the source map so they can resolve spans into
/// diagnostic locations without touching the file system.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// Files of the translation unit.
    pub source_map: &'a SourceMap,
    /// The file handed to the front end.
    pub primary: FileId,
}

impl<'a> CheckContext<'a> {
    /// Creates a new check context.
    #[must_use]
    pub fn new(source_map: &'a SourceMap, primary: FileId) -> Self {
        Self {
            source_map,
            primary,
        }
    }

    /// Resolves a span into a location.
    #[must_use]
    pub fn location(&self, span: SourceSpan) -> Location {
        self.source_map.location(span)
    }

    /// Builds a fix replacing exactly `span` with `replacement`.
    #[must_use]
    pub fn fix(&self, span: SourceSpan, replacement: impl Into<String>) -> FixSuggestion {
        FixSuggestion::new(self.location(span), replacement)
    }

    /// Builds a violation of `rule` anchored at `span`, with the rule's
    /// default severity.
    #[must_use]
    pub fn violation<R: Rule + ?Sized>(
        &self,
        rule: &R,
        span: SourceSpan,
        message: impl Into<String>,
    ) -> Violation {
        Violation::new(
            rule.code(),
            rule.name(),
            rule.default_severity(),
            self.location(span),
            message,
        )
    }
}
