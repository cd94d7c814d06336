//! Front-end trait and errors.
//!
//! `SyntaxTreeSource` is the extension point for adding new languages.
//! Implement it to turn source files into the [`TranslationUnit`] the
//! engine checks.

use cstyle_core::TranslationUnit;
use std::path::{Path, PathBuf};

/// Errors raised while producing a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    /// The primary file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The grammar could not be loaded into the parser.
    #[error("Failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser produced no tree.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },
}

/// Supplies syntax trees to the engine.
pub trait SyntaxTreeSource: Send + Sync {
    /// Language identifier (e.g., `"cpp"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this source handles, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Parses in-memory source text registered under `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or parsing fails.
    fn parse_source(&self, path: &Path, source: Vec<u8>) -> Result<TranslationUnit, FrontendError>;

    /// Reads and parses a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    fn parse_file(&self, path: &Path) -> Result<TranslationUnit, FrontendError> {
        let source = std::fs::read(path).map_err(|e| FrontendError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse_source(path, source)
    }

    /// Returns true if `path` has one of [`extensions`](Self::extensions).
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().iter().any(|known| known.eq_ignore_ascii_case(ext)))
    }
}
