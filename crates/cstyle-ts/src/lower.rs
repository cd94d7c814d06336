//! Lowering of tree-sitter C/C++ parse trees into engine nodes.

use crate::literal;
use cstyle_core::{
    CallNode, DeclKind, DeclarationNode, FileId, FunctionBody, LiteralNode, Node, SourceSpan,
    StatementKind, StatementNode,
};
use tree_sitter::Node as TsNode;

/// Resolves quoted `#include` directives into spliced nodes.
pub(crate) trait IncludeHandler {
    /// Nodes of the file named by `path`, or nothing if it is not followed.
    fn include(&mut self, path: &str) -> Vec<Node>;
}

/// How a declarator names its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameKind {
    Plain,
    Destructor,
    Conversion,
}

#[derive(Debug, Clone, Copy)]
struct NameRef<'t> {
    node: TsNode<'t>,
    kind: NameKind,
}

/// What a declarator chain says about the declared entity.
#[derive(Debug, Default)]
struct DeclaratorInfo<'t> {
    name: Option<NameRef<'t>>,
    /// Last `A::` component before the name.
    scope: Option<TsNode<'t>>,
    /// Innermost function declarator not behind a pointer.
    function: Option<TsNode<'t>>,
    behind_pointer: bool,
    pointer_const: Option<bool>,
    reference: bool,
    value: Option<TsNode<'t>>,
}

impl DeclaratorInfo<'_> {
    fn is_function(&self) -> bool {
        self.function.is_some() && !self.behind_pointer
    }
}

/// Lowers one file's tree.
pub(crate) struct Lowerer<'a, H> {
    src: &'a [u8],
    file: FileId,
    includes: &'a mut H,
    classes: Vec<String>,
    namespaces: usize,
}

impl<'a, H: IncludeHandler> Lowerer<'a, H> {
    pub(crate) fn new(src: &'a [u8], file: FileId, includes: &'a mut H) -> Self {
        Self {
            src,
            file,
            includes,
            classes: Vec::new(),
            namespaces: 0,
        }
    }

    /// Lowers a `translation_unit` root.
    pub(crate) fn lower_root(&mut self, root: TsNode<'_>) -> Vec<Node> {
        let mut out = Vec::new();
        self.lower_children(root, &mut out);
        out
    }

    fn span(&self, node: TsNode<'_>) -> SourceSpan {
        SourceSpan::new(self.file, node.start_byte(), node.end_byte())
    }

    fn text(&self, node: TsNode<'_>) -> &'a str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn lower_children(&mut self, node: TsNode<'_>, out: &mut Vec<Node>) {
        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        for child in children {
            self.lower(child, out);
        }
    }

    fn lower_field(&mut self, node: TsNode<'_>, field: &str, out: &mut Vec<Node>) {
        if let Some(child) = node.child_by_field_name(field) {
            self.lower(child, out);
        }
    }

    fn lower(&mut self, node: TsNode<'_>, out: &mut Vec<Node>) {
        match node.kind() {
            "function_definition"
            | "operator_cast_definition"
            | "inline_method_definition"
            | "constructor_or_destructor_definition" => self.lower_function(node, out),
            "declaration" => self.lower_declaration(node, false, out),
            "field_declaration" => self.lower_declaration(node, true, out),
            "struct_specifier" | "class_specifier" | "union_specifier" | "enum_specifier" => {
                self.lower_type(node, out);
            }
            "namespace_definition" => {
                self.namespaces += 1;
                self.lower_children(node, out);
                self.namespaces -= 1;
            }
            "parameter_list" => self.lower_parameter_list(node, out),
            "for_range_loop" => self.lower_range_for(node, out),
            "labeled_statement" => self.lower_label(node, out),
            "call_expression" => self.lower_call(node, out),
            "string_literal" | "raw_string_literal" => {
                let token = &self.src[node.byte_range()];
                let (bytes, quoting) = literal::decode(token);
                out.push(LiteralNode::new(bytes, self.span(node)).with_quoting(quoting).into());
            }
            "compound_statement" => out.push(self.statement(node, StatementKind::Compound).into()),
            "return_statement" => out.push(self.statement(node, StatementKind::Return).into()),
            "preproc_include" => self.lower_include(node, out),
            "comment" | "preproc_def" | "preproc_function_def" | "preproc_call"
            | "char_literal" | "system_lib_string" => {}
            _ => self.lower_children(node, out),
        }
    }

    fn statement(&mut self, node: TsNode<'_>, kind: StatementKind) -> StatementNode {
        let mut stmt = StatementNode::new(kind, self.span(node));
        self.lower_children(node, &mut stmt.children);
        stmt
    }

    fn lower_include(&mut self, node: TsNode<'_>, out: &mut Vec<Node>) {
        let Some(path) = node.child_by_field_name("path") else {
            return;
        };
        if path.kind() != "string_literal" {
            return;
        }
        let (bytes, _) = literal::decode(&self.src[path.byte_range()]);
        let name = String::from_utf8_lossy(&bytes).into_owned();
        out.extend(self.includes.include(&name));
    }

    fn lower_function(&mut self, node: TsNode<'_>, out: &mut Vec<Node>) {
        let Some(declarator) = node.child_by_field_name("declarator") else {
            self.lower_children(node, out);
            return;
        };
        let info = analyze_declarator(declarator);
        let Some(name) = info.name else {
            self.lower_children(node, out);
            return;
        };

        let mut decl = self.function_decl(&info, name);
        if let Some(function) = info.function {
            self.lower_parameters(function, &mut decl.children);
        }

        let mut cursor = node.walk();
        let extra: Vec<_> = node
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "field_initializer_list")
            .collect();
        for init in extra {
            self.lower_children(init, &mut decl.children);
        }

        if let Some(body) = node.child_by_field_name("body") {
            decl.body = Some(self.function_body(body));
        }
        out.push(decl.into());
    }

    fn function_decl(&self, info: &DeclaratorInfo<'_>, name: NameRef<'_>) -> DeclarationNode {
        let text = self.text(name.node);
        let mut decl = DeclarationNode::new(text, DeclKind::Function, self.span(name.node));
        match name.kind {
            NameKind::Conversion => decl = decl.conversion(),
            NameKind::Destructor => decl = decl.special_member(),
            NameKind::Plain => {
                let scope = info.scope.map(|s| self.text(s));
                let enclosing = self.classes.last().map(String::as_str);
                if scope == Some(text) || (scope.is_none() && enclosing == Some(text)) {
                    decl = decl.special_member();
                } else if text == "main"
                    && scope.is_none()
                    && enclosing.is_none()
                    && self.namespaces == 0
                {
                    decl = decl.entry_point();
                }
            }
        }
        decl
    }

    fn function_body(&mut self, body: TsNode<'_>) -> FunctionBody {
        if body.kind() != "compound_statement" {
            let stmt = self.statement(body, StatementKind::Other);
            return FunctionBody::new(vec![stmt.into()]);
        }
        let mut statements = Vec::new();
        let mut cursor = body.walk();
        let children: Vec<_> = body.named_children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "comment" => {}
                "return_statement" => {
                    statements.push(self.statement(child, StatementKind::Return).into());
                }
                "compound_statement" => {
                    statements.push(self.statement(child, StatementKind::Compound).into());
                }
                _ => {
                    let mut stmt = StatementNode::new(StatementKind::Other, self.span(child));
                    self.lower(child, &mut stmt.children);
                    statements.push(stmt.into());
                }
            }
        }
        FunctionBody::new(statements)
    }

    fn lower_parameters(&mut self, function: TsNode<'_>, out: &mut Vec<Node>) {
        if let Some(list) = function.child_by_field_name("parameters") {
            self.lower_parameter_list(list, out);
        }
    }

    /// Parameters of a function, lambda or `catch` handler.
    fn lower_parameter_list(&mut self, list: TsNode<'_>, out: &mut Vec<Node>) {
        let mut cursor = list.walk();
        let params: Vec<_> = list.named_children(&mut cursor).collect();
        for param in params {
            match param.kind() {
                "parameter_declaration" | "optional_parameter_declaration" => {
                    let name = param
                        .child_by_field_name("declarator")
                        .map(analyze_declarator)
                        .and_then(|info| info.name);
                    let mut decl = match name {
                        Some(name) => DeclarationNode::new(
                            self.text(name.node),
                            DeclKind::Variable,
                            self.span(name.node),
                        ),
                        None => {
                            let at = self.span(param).sub(0, 0);
                            DeclarationNode::new("", DeclKind::Variable, at).anonymous()
                        }
                    };
                    self.lower_field(param, "default_value", &mut decl.children);
                    out.push(decl.into());
                }
                "variadic_parameter_declaration" | "comment" => {}
                _ => self.lower(param, out),
            }
        }
    }

    fn lower_declaration(&mut self, node: TsNode<'_>, member: bool, out: &mut Vec<Node>) {
        self.lower_field(node, "type", out);

        let is_static = has_child(node, self.src, "storage_class_specifier", &["static"]);
        let constexpr = has_qualifier(node, self.src, &["constexpr"]);
        let type_const = has_qualifier(node, self.src, &["const"]);

        let mut cursor = node.walk();
        let declarators: Vec<_> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();

        if member && declarators.is_empty() && has_named_child(node, "bitfield_clause") {
            let at = self.span(node).sub(0, 0);
            out.push(DeclarationNode::new("", DeclKind::Field, at).anonymous().into());
            return;
        }

        for declarator in declarators {
            let info = analyze_declarator(declarator);
            let Some(name) = info.name else {
                self.lower(declarator, out);
                continue;
            };

            if info.is_function() {
                let mut decl = self.function_decl(&info, name);
                if let Some(function) = info.function {
                    self.lower_parameters(function, &mut decl.children);
                }
                out.push(decl.into());
                continue;
            }

            let kind = if member && !is_static {
                DeclKind::Field
            } else {
                DeclKind::Variable
            };
            let constant = if constexpr {
                true
            } else if info.reference {
                false
            } else {
                info.pointer_const.unwrap_or(type_const)
            };
            let mut decl = DeclarationNode::new(self.text(name.node), kind, self.span(name.node));
            if constant {
                decl = decl.constant();
            }
            if let Some(value) = info.value {
                self.lower(value, &mut decl.children);
            }
            out.push(decl.into());
        }

        self.lower_field(node, "default_value", out);
    }

    /// The loop variable is declared like a local; the range and body follow it.
    fn lower_range_for(&mut self, node: TsNode<'_>, out: &mut Vec<Node>) {
        self.lower_field(node, "initializer", out);
        self.lower_declaration(node, false, out);
        self.lower_field(node, "right", out);
        self.lower_field(node, "body", out);
    }

    fn lower_type(&mut self, node: TsNode<'_>, out: &mut Vec<Node>) {
        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        let name = node.child_by_field_name("name").map(type_name_leaf);
        let mut decl = match name {
            Some(name) => {
                DeclarationNode::new(self.text(name), DeclKind::Type, self.span(name))
            }
            None => {
                let at = self.span(node).sub(0, 0);
                DeclarationNode::new("", DeclKind::Type, at).anonymous()
            }
        };

        if node.kind() == "enum_specifier" {
            let mut cursor = body.walk();
            let enumerators: Vec<_> = body.named_children(&mut cursor).collect();
            for e in enumerators {
                if e.kind() != "enumerator" {
                    continue;
                }
                let Some(name) = e.child_by_field_name("name") else {
                    continue;
                };
                let mut constant =
                    DeclarationNode::new(self.text(name), DeclKind::Constant, self.span(name));
                self.lower_field(e, "value", &mut constant.children);
                decl.children.push(constant.into());
            }
        } else {
            self.classes.push(decl.name.clone());
            self.lower_children(body, &mut decl.children);
            self.classes.pop();
        }
        out.push(decl.into());
    }

    fn lower_label(&mut self, node: TsNode<'_>, out: &mut Vec<Node>) {
        if let Some(label) = node.child_by_field_name("label") {
            out.push(
                DeclarationNode::new(self.text(label), DeclKind::Label, self.span(label)).into(),
            );
        }
        let mut cursor = node.walk();
        let rest: Vec<_> = node
            .named_children(&mut cursor)
            .filter(|c| c.kind() != "statement_identifier")
            .collect();
        for child in rest {
            self.lower(child, out);
        }
    }

    fn lower_call(&mut self, node: TsNode<'_>, out: &mut Vec<Node>) {
        let Some(function) = node.child_by_field_name("function") else {
            self.lower_children(node, out);
            return;
        };
        let mut call = match callee_leaf(function) {
            Some(callee) => CallNode::new(self.text(callee), self.span(callee)),
            None => {
                let mut call = CallNode {
                    callee: None,
                    span: self.span(function),
                    arguments: Vec::new(),
                };
                self.lower(function, &mut call.arguments);
                call
            }
        };
        self.lower_field(node, "arguments", &mut call.arguments);
        out.push(call.into());
    }
}

/// Walks a declarator chain down to the declared name.
fn analyze_declarator(node: TsNode<'_>) -> DeclaratorInfo<'_> {
    let mut info = DeclaratorInfo::default();
    let mut current = Some(node);
    while let Some(n) = current {
        current = match n.kind() {
            "identifier" | "field_identifier" | "type_identifier" | "operator_name" => {
                info.name = Some(NameRef {
                    node: n,
                    kind: NameKind::Plain,
                });
                None
            }
            "destructor_name" => {
                info.name = Some(NameRef {
                    node: n,
                    kind: NameKind::Destructor,
                });
                None
            }
            "operator_cast" => {
                info.name = Some(NameRef {
                    node: n,
                    kind: NameKind::Conversion,
                });
                info.function = n
                    .child_by_field_name("declarator")
                    .filter(|d| d.kind() == "abstract_function_declarator")
                    .or(Some(n));
                None
            }
            "qualified_identifier" => {
                info.scope = n.child_by_field_name("scope").map(scope_leaf);
                n.child_by_field_name("name")
            }
            "template_function" | "template_method" => n.child_by_field_name("name"),
            "init_declarator" => {
                info.value = n.child_by_field_name("value");
                n.child_by_field_name("declarator")
            }
            "function_declarator" => {
                info.function = Some(n);
                info.behind_pointer = false;
                n.child_by_field_name("declarator")
            }
            "pointer_declarator" => {
                if info.function.is_some() {
                    info.behind_pointer = true;
                }
                info.pointer_const = Some(has_direct_const(n));
                n.child_by_field_name("declarator")
            }
            "reference_declarator" => {
                if info.function.is_some() {
                    info.behind_pointer = true;
                }
                info.reference = true;
                last_named_child(n)
            }
            "array_declarator" => n.child_by_field_name("declarator"),
            "parenthesized_declarator" | "attributed_declarator" => first_named_child(n),
            _ => None,
        };
    }
    info
}

/// `Foo` in `ns::Foo::bar`.
fn scope_leaf(node: TsNode<'_>) -> TsNode<'_> {
    match node.kind() {
        "qualified_identifier" => node
            .child_by_field_name("name")
            .map_or(node, scope_leaf),
        "template_type" => node.child_by_field_name("name").unwrap_or(node),
        _ => node,
    }
}

/// Name token of a record or enum name.
fn type_name_leaf(node: TsNode<'_>) -> TsNode<'_> {
    match node.kind() {
        "qualified_identifier" | "template_type" => node
            .child_by_field_name("name")
            .map_or(node, type_name_leaf),
        _ => node,
    }
}

/// Resolved name token of a direct callee.
fn callee_leaf(node: TsNode<'_>) -> Option<TsNode<'_>> {
    match node.kind() {
        "identifier" => Some(node),
        "qualified_identifier" | "template_function" => {
            node.child_by_field_name("name").and_then(callee_leaf)
        }
        "parenthesized_expression" => first_named_child(node).and_then(callee_leaf),
        _ => None,
    }
}

fn first_named_child(node: TsNode<'_>) -> Option<TsNode<'_>> {
    node.named_child(0)
}

fn last_named_child(node: TsNode<'_>) -> Option<TsNode<'_>> {
    let mut cursor = node.walk();
    let last = node.named_children(&mut cursor).last();
    last
}

fn has_named_child(node: TsNode<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).any(|c| c.kind() == kind);
    found
}

fn has_child(node: TsNode<'_>, src: &[u8], kind: &str, texts: &[&str]) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| c.kind() == kind && texts.contains(&c.utf8_text(src).unwrap_or("")));
    found
}

fn has_qualifier(node: TsNode<'_>, src: &[u8], texts: &[&str]) -> bool {
    has_child(node, src, "type_qualifier", texts)
        || texts.iter().any(|t| has_child(node, src, t, &[*t]))
}

fn has_direct_const(pointer: TsNode<'_>) -> bool {
    let mut cursor = pointer.walk();
    let found = pointer
        .children(&mut cursor)
        .any(|c| c.kind() == "type_qualifier" && c.child(0).is_some_and(|k| k.kind() == "const"));
    found
}
