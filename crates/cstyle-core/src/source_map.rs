//! Registry of the files a translation unit refers to.

use crate::tree::{FileId, SourceSpan};
use crate::types::Location;
use std::path::{Path, PathBuf};

/// One file known to the source map.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path as reported in diagnostics.
    pub path: PathBuf,
    contents: Option<Vec<u8>>,
    line_starts: Vec<usize>,
}

impl SourceFile {
    fn new(path: PathBuf, contents: Option<Vec<u8>>) -> Self {
        let line_starts = contents.as_deref().map_or_else(
            || vec![0],
            |bytes| {
                std::iter::once(0)
                    .chain(
                        bytes
                            .iter()
                            .enumerate()
                            .filter(|(_, b)| **b == b'\n')
                            .map(|(i, _)| i + 1),
                    )
                    .collect()
            },
        );
        Self {
            path,
            contents,
            line_starts,
        }
    }

    /// Raw bytes of the file, if the front end kept them.
    #[must_use]
    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    /// Converts a byte offset to a 1-indexed `(line, column)` pair.
    ///
    /// Columns count bytes. Without contents, everything is on line 1.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let start = self.line_starts.get(line).copied().unwrap_or(0);
        (line + 1, offset - start + 1)
    }
}

/// All files a translation unit touches, indexed by [`FileId`].
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    /// Creates an empty source map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file together with its contents.
    pub fn add(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> FileId {
        self.push(SourceFile::new(path.into(), Some(contents.into())))
    }

    /// Registers a file whose contents are not available.
    pub fn add_unreadable(&mut self, path: impl Into<PathBuf>) -> FileId {
        self.push(SourceFile::new(path.into(), None))
    }

    fn push(&mut self, file: SourceFile) -> FileId {
        let id = FileId(u32::try_from(self.files.len()).unwrap_or(u32::MAX));
        self.files.push(file);
        id
    }

    /// Looks up a file.
    #[must_use]
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0 as usize)
    }

    /// Finds the id of an already registered path.
    #[must_use]
    pub fn find(&self, path: &Path) -> Option<FileId> {
        self.files
            .iter()
            .position(|f| f.path == path)
            .and_then(|i| u32::try_from(i).ok())
            .map(FileId)
    }

    /// Number of registered files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no file is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolves a span into a diagnostic location.
    #[must_use]
    pub fn location(&self, span: SourceSpan) -> Location {
        let Some(file) = self.file(span.file) else {
            return Location::new(PathBuf::new(), 0, 0)
                .with_file_id(span.file)
                .with_span(span.start, span.len());
        };
        let (line, column) = file.line_col(span.start);
        Location::new(file.path.clone(), line, column)
            .with_file_id(span.file)
            .with_span(span.start, span.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_from_one() {
        let mut map = SourceMap::new();
        let id = map.add("a.c", "ab\ncd\n\nx");
        let file = map.file(id).unwrap();
        assert_eq!(file.line_col(0), (1, 1));
        assert_eq!(file.line_col(1), (1, 2));
        assert_eq!(file.line_col(3), (2, 1));
        assert_eq!(file.line_col(4), (2, 2));
        assert_eq!(file.line_col(7), (4, 1));
    }

    #[test]
    fn location_carries_span() {
        let mut map = SourceMap::new();
        let id = map.add("src/main.c", "int x;\nint Bad;\n");
        let loc = map.location(SourceSpan::new(id, 11, 14));
        assert_eq!(loc.file, PathBuf::from("src/main.c"));
        assert_eq!((loc.line, loc.column), (2, 5));
        assert_eq!((loc.offset, loc.length), (11, 3));
        assert_eq!(loc.file_id, id);
    }

    #[test]
    fn unreadable_file_has_no_contents() {
        let mut map = SourceMap::new();
        let id = map.add_unreadable("gone.h");
        assert!(map.file(id).unwrap().contents().is_none());
        assert_eq!(map.find(Path::new("gone.h")), Some(id));
        assert_eq!(map.location(SourceSpan::new(id, 5, 6)).column, 6);
    }
}
