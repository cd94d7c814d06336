//! Helpers for rule unit tests.

use cstyle_core::{CheckContext, DeclKind, DeclarationNode, FileId, SourceMap, SourceSpan};

/// One in-memory source file.
pub(crate) struct Fixture {
    source: String,
    map: SourceMap,
    file: FileId,
}

impl Fixture {
    pub(crate) fn new(source: &str) -> Self {
        let mut map = SourceMap::new();
        let file = map.add("test.c", source);
        Self {
            source: source.to_string(),
            map,
            file,
        }
    }

    pub(crate) fn ctx(&self) -> CheckContext<'_> {
        CheckContext::new(&self.map, self.file)
    }

    pub(crate) fn file(&self) -> FileId {
        self.file
    }

    /// Span of the first occurrence of `needle`.
    pub(crate) fn span_of(&self, needle: &str) -> SourceSpan {
        let start = self
            .source
            .find(needle)
            .unwrap_or_else(|| panic!("`{needle}` not in fixture"));
        SourceSpan::new(self.file, start, start + needle.len())
    }

    pub(crate) fn decl(&self, name: &str, kind: DeclKind) -> DeclarationNode {
        DeclarationNode::new(name, kind, self.span_of(name))
    }
}
