//! Decides which nodes are checked.

use crate::tree::{FileId, Node, SourceSpan};

/// Gate applied before any rule dispatch.
///
/// By default only nodes spelled in the primary file are checked; nodes that
/// come from included files are skipped together with their subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeFilter {
    main_file: FileId,
    include_all_files: bool,
}

impl ScopeFilter {
    /// Creates a filter for one run.
    #[must_use]
    pub fn new(main_file: FileId, include_all_files: bool) -> Self {
        Self {
            main_file,
            include_all_files,
        }
    }

    /// Returns true if a span is checked during this run.
    #[must_use]
    pub fn in_scope(&self, span: &SourceSpan) -> bool {
        self.include_all_files || span.file == self.main_file
    }

    /// Returns true if a node is checked during this run.
    #[must_use]
    pub fn node_in_scope(&self, node: &Node) -> bool {
        self.in_scope(&node.span())
    }
}
