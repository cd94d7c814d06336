//! Syntax tree model consumed by the engine.
//!
//! Front ends lower their native parse trees into these types. Every node is
//! owned by the [`TranslationUnit`] and is never mutated by the engine.

use crate::source_map::SourceMap;
use serde::{Deserialize, Serialize};

/// Identifier of a file registered in a [`SourceMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub u32);

/// Half-open byte range `[start, end)` in one file's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    /// File the range belongs to.
    pub file: FileId,
    /// First byte of the range.
    pub start: usize,
    /// One past the last byte of the range.
    pub end: usize,
}

impl SourceSpan {
    /// Creates a new span.
    #[must_use]
    pub fn new(file: FileId, start: usize, end: usize) -> Self {
        Self { file, start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a sub-span starting `offset` bytes into this span.
    ///
    /// The result is clamped to this span.
    #[must_use]
    pub fn sub(&self, offset: usize, len: usize) -> Self {
        let start = (self.start + offset).min(self.end);
        let end = (start + len).min(self.end);
        Self {
            file: self.file,
            start,
            end,
        }
    }

    /// Returns true if `other` lies entirely inside this span.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.file == other.file && self.start <= other.start && other.end <= self.end
    }
}

/// Syntactic role of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    /// `struct`, `class`, `union` or `enum` definition.
    Type,
    /// Function definition or prototype.
    Function,
    /// Variable, parameter or static data member.
    Variable,
    /// Non-static data member.
    Field,
    /// Enumerator or other named compile-time constant.
    Constant,
    /// Statement label.
    Label,
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Type => "type",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Field => "field",
            Self::Constant => "constant",
            Self::Label => "label",
        };
        f.write_str(s)
    }
}

/// A named entity read from the parsed program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationNode {
    /// Spelled name; empty for synthesized anonymous entities.
    pub name: String,
    /// Syntactic role.
    pub kind: DeclKind,
    /// Span of the name token.
    pub span: SourceSpan,
    /// Anonymous record, bit-field or parameter.
    pub is_anonymous: bool,
    /// User-defined conversion operator (`operator int()`).
    pub is_conversion_function: bool,
    /// The object itself is `const` or `constexpr`.
    pub is_constant_qualified: bool,
    /// Constructor or destructor, whose name is dictated by its class.
    pub is_special_member: bool,
    /// The program's global `main`.
    pub is_entry_point: bool,
    /// Parameters, members and initializer nodes, in document order.
    pub children: Vec<Node>,
    /// Direct statement list of a function definition.
    pub body: Option<FunctionBody>,
}

impl DeclarationNode {
    /// Creates a plain, named declaration without children.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeclKind, span: SourceSpan) -> Self {
        let name = name.into();
        Self {
            is_anonymous: name.is_empty(),
            name,
            kind,
            span,
            is_conversion_function: false,
            is_constant_qualified: false,
            is_special_member: false,
            is_entry_point: false,
            children: Vec::new(),
            body: None,
        }
    }

    /// Marks the declaration as anonymous.
    #[must_use]
    pub fn anonymous(mut self) -> Self {
        self.is_anonymous = true;
        self
    }

    /// Marks the declaration as a conversion function.
    #[must_use]
    pub fn conversion(mut self) -> Self {
        self.is_conversion_function = true;
        self
    }

    /// Marks the declaration as constant-qualified.
    #[must_use]
    pub fn constant(mut self) -> Self {
        self.is_constant_qualified = true;
        self
    }

    /// Marks the declaration as a constructor or destructor.
    #[must_use]
    pub fn special_member(mut self) -> Self {
        self.is_special_member = true;
        self
    }

    /// Marks the declaration as the program entry function.
    #[must_use]
    pub fn entry_point(mut self) -> Self {
        self.is_entry_point = true;
        self
    }

    /// Appends a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Sets the function body.
    #[must_use]
    pub fn with_body(mut self, body: FunctionBody) -> Self {
        self.body = Some(body);
        self
    }
}

/// Body of a function definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionBody {
    /// Statements directly inside the outermost braces.
    pub statements: Vec<Node>,
}

impl FunctionBody {
    /// Creates a body from its direct statements.
    #[must_use]
    pub fn new(statements: Vec<Node>) -> Self {
        Self { statements }
    }

    /// Returns true if one of the direct statements is a `return`.
    #[must_use]
    pub fn has_direct_return(&self) -> bool {
        self.statements.iter().any(|node| {
            matches!(node, Node::Statement(stmt) if stmt.kind == StatementKind::Return)
        })
    }
}

/// How a string literal was spelled, so a fix can re-wrap its content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralQuoting {
    /// Encoding prefix (`L`, `u8`, `u`, `U`) or empty.
    pub prefix: String,
    /// Delimiter of a raw string literal (`R"delim(...)delim"`).
    pub raw_delimiter: Option<String>,
}

impl LiteralQuoting {
    /// Plain `"..."` quoting.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Raw string quoting with the given prefix and delimiter.
    #[must_use]
    pub fn raw(prefix: impl Into<String>, delimiter: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            raw_delimiter: Some(delimiter.into()),
        }
    }
}

/// A string literal with its decoded content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralNode {
    /// Decoded content bytes, escapes resolved, quotes excluded.
    pub bytes: Vec<u8>,
    /// Span of the whole literal token, quotes and prefix included.
    pub span: SourceSpan,
    /// Original quoting.
    pub quoting: LiteralQuoting,
}

impl LiteralNode {
    /// Creates a plain-quoted literal.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>, span: SourceSpan) -> Self {
        Self {
            bytes: bytes.into(),
            span,
            quoting: LiteralQuoting::plain(),
        }
    }

    /// Sets the quoting.
    #[must_use]
    pub fn with_quoting(mut self, quoting: LiteralQuoting) -> Self {
        self.quoting = quoting;
        self
    }
}

/// A call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallNode {
    /// Name of the directly called function, if the callee is a plain or
    /// qualified identifier.
    pub callee: Option<String>,
    /// Span of the callee token.
    pub span: SourceSpan,
    /// Nodes found in the arguments.
    pub arguments: Vec<Node>,
}

impl CallNode {
    /// Creates a call to a named function.
    #[must_use]
    pub fn new(callee: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            callee: Some(callee.into()),
            span,
            arguments: Vec::new(),
        }
    }

    /// Appends an argument node.
    #[must_use]
    pub fn with_argument(mut self, arg: impl Into<Node>) -> Self {
        self.arguments.push(arg.into());
        self
    }
}

/// Statement kinds relevant to the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `return ...;`
    Return,
    /// `{ ... }`
    Compound,
    /// Anything else.
    Other,
}

/// A statement inside a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementNode {
    /// Statement kind.
    pub kind: StatementKind,
    /// Span of the whole statement.
    pub span: SourceSpan,
    /// Nested nodes in document order.
    pub children: Vec<Node>,
}

impl StatementNode {
    /// Creates a statement without children.
    #[must_use]
    pub fn new(kind: StatementKind, span: SourceSpan) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    /// Appends a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// Any node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Named declaration.
    Declaration(DeclarationNode),
    /// String literal.
    Literal(LiteralNode),
    /// Call expression.
    Call(CallNode),
    /// Statement of a function body.
    Statement(StatementNode),
}

impl Node {
    /// Span used by the scope filter and for anchoring.
    #[must_use]
    pub fn span(&self) -> SourceSpan {
        match self {
            Self::Declaration(d) => d.span,
            Self::Literal(l) => l.span,
            Self::Call(c) => c.span,
            Self::Statement(s) => s.span,
        }
    }

    /// Direct children visited after this node, in document order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Node> {
        let (first, second): (&[Node], &[Node]) = match self {
            Self::Declaration(d) => (
                d.children.as_slice(),
                d.body.as_ref().map_or(&[][..], |b| b.statements.as_slice()),
            ),
            Self::Literal(_) => (&[][..], &[][..]),
            Self::Call(c) => (c.arguments.as_slice(), &[][..]),
            Self::Statement(s) => (s.children.as_slice(), &[][..]),
        };
        first.iter().chain(second.iter())
    }
}

impl From<DeclarationNode> for Node {
    fn from(node: DeclarationNode) -> Self {
        Self::Declaration(node)
    }
}

impl From<LiteralNode> for Node {
    fn from(node: LiteralNode) -> Self {
        Self::Literal(node)
    }
}

impl From<CallNode> for Node {
    fn from(node: CallNode) -> Self {
        Self::Call(node)
    }
}

impl From<StatementNode> for Node {
    fn from(node: StatementNode) -> Self {
        Self::Statement(node)
    }
}

/// A parsed program: the tree plus the files its spans refer to.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    /// Every file the tree touches.
    pub source_map: SourceMap,
    /// The file that was handed to the front end.
    pub primary: FileId,
    /// Top-level nodes in document order.
    pub nodes: Vec<Node>,
}

impl TranslationUnit {
    /// Creates a translation unit.
    #[must_use]
    pub fn new(source_map: SourceMap, primary: FileId, nodes: Vec<Node>) -> Self {
        Self {
            source_map,
            primary,
            nodes,
        }
    }
}
