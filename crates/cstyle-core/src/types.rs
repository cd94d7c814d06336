//! Core types for style violations and results.

use crate::tree::{FileId, SourceSpan};
use miette::{Diagnostic, NamedSource, SourceSpan as MietteSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for style violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            other => Err(format!(
                "unknown severity `{other}`. Valid values: error, warning, info"
            )),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as registered by the front end.
    pub file: PathBuf,
    /// File id inside the translation unit's source map.
    pub file_id: FileId,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
    /// Byte offset in file.
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            file_id: FileId(0),
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }

    /// Sets the file id for this location.
    #[must_use]
    pub fn with_file_id(mut self, file_id: FileId) -> Self {
        self.file_id = file_id;
        self
    }

    /// The byte range this location covers.
    #[must_use]
    pub fn span(&self) -> SourceSpan {
        SourceSpan::new(self.file_id, self.offset, self.offset + self.length)
    }
}

/// A proposed text replacement that makes a violation disappear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSuggestion {
    /// Replaced region.
    pub location: Location,
    /// Text to put in place of the region.
    pub replacement: String,
}

impl FixSuggestion {
    /// Creates a new fix.
    #[must_use]
    pub fn new(location: Location, replacement: impl Into<String>) -> Self {
        Self {
            location,
            replacement: replacement.into(),
        }
    }

    /// The exact byte range replaced.
    #[must_use]
    pub fn span(&self) -> SourceSpan {
        self.location.span()
    }

    /// Applies this fix to the text of the file it belongs to.
    ///
    /// Returns `None` if the range is outside `text` or splits a character.
    #[must_use]
    pub fn apply(&self, text: &str) -> Option<String> {
        let span = self.span();
        let head = text.get(..span.start)?;
        let tail = text.get(span.end..)?;
        Some(format!("{head}{}{tail}", self.replacement))
    }
}

/// A style violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "CSC001").
    pub code: String,
    /// Rule name (e.g., "upper-camel-case-types").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Anchor of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional fix-it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<FixSuggestion>,
    /// Reference into the style guide (e.g., "R3.6").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_ref: Option<String>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            fix: None,
            doc_ref: None,
        }
    }

    /// Adds a style guide reference to this violation.
    #[must_use]
    pub fn with_doc_ref(mut self, doc_ref: impl Into<String>) -> Self {
        self.doc_ref = Some(doc_ref.into());
        self
    }

    /// Adds a fix to this violation.
    #[must_use]
    pub fn with_fix(mut self, fix: FixSuggestion) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Adds a fix if one was computed.
    #[must_use]
    pub fn with_optional_fix(mut self, fix: Option<FixSuggestion>) -> Self {
        self.fix = fix;
        self
    }

    /// Formats the violation for terminal output, with `severity` as the
    /// severity label (for example a coloured one).
    #[must_use]
    pub fn format_with(&self, severity: &str) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {severity}: {}", self.message);
        if let Some(fix) = &self.fix {
            let _ = writeln!(output, "  = help: replace with `{}`", fix.replacement);
        }
        if let Some(doc_ref) = &self.doc_ref {
            let _ = writeln!(output, "  = see: {doc_ref}");
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )?;
        if let Some(doc_ref) = &self.doc_ref {
            write!(f, " ({doc_ref})")?;
        }
        Ok(())
    }
}

/// A violation paired with its source text, for rich display through miette.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("[{code}] {message}")]
pub struct ViolationDiagnostic {
    code: String,
    message: String,
    #[help]
    help: Option<String>,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label_message}")]
    span: MietteSpan,
    label_message: String,
}

impl ViolationDiagnostic {
    /// Builds a diagnostic for `violation` over the text of its file.
    #[must_use]
    pub fn new(violation: &Violation, source: String) -> Self {
        let name = violation.location.file.display().to_string();
        let help = match (&violation.fix, &violation.doc_ref) {
            (Some(fix), _) => Some(format!("replace with `{}`", fix.replacement)),
            (None, Some(doc_ref)) => Some(format!("see style guide {doc_ref}")),
            (None, None) => None,
        };
        Self {
            code: violation.code.clone(),
            message: violation.message.clone(),
            help,
            source_code: NamedSource::new(name, source),
            span: MietteSpan::from((violation.location.offset, violation.location.length.max(1))),
            label_message: violation.rule.clone(),
        }
    }
}

/// Result of running style analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found, in traversal order.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for v in &self.violations {
            match v.severity {
                Severity::Error => counts.0 += 1,
                Severity::Warning => counts.1 += 1,
                Severity::Info => counts.2 += 1,
            }
        }
        counts
    }

    /// Number of violations that carry a fix.
    #[must_use]
    pub fn fixable_count(&self) -> usize {
        self.violations.iter().filter(|v| v.fix.is_some()).count()
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.files_checked += other.files_checked;
    }
}
