//! Integration test: traversal, scoping and dispatch on hand-built trees.
//!
//! Recorder rules record every node they are handed, so the tests can observe
//! which nodes the analyzer visits, in which order, and with which role.

use cstyle_core::{
    Analyzer, CallNode, CheckContext, DeclKind, DeclarationNode, FileId, FunctionBody,
    LiteralNode, Node, Role, Rule, SourceMap, SourceSpan, StatementKind, StatementNode,
    TranslationUnit, Violation,
};

struct Recorder {
    roles: &'static [Role],
}

impl Rule for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }
    fn code(&self) -> &'static str {
        "CSC900"
    }
    fn roles(&self) -> &'static [Role] {
        self.roles
    }
    fn check_declaration(
        &self,
        ctx: &CheckContext<'_>,
        decl: &DeclarationNode,
        role: Role,
    ) -> Option<Violation> {
        Some(ctx.violation(self, decl.span, format!("{role} {}", decl.name)))
    }
    fn check_literal(&self, ctx: &CheckContext<'_>, literal: &LiteralNode) -> Option<Violation> {
        Some(ctx.violation(
            self,
            literal.span,
            format!("literal {}", String::from_utf8_lossy(&literal.bytes)),
        ))
    }
    fn check_call(&self, ctx: &CheckContext<'_>, call: &CallNode) -> Option<Violation> {
        let callee = call.callee.clone().unwrap_or_default();
        Some(ctx.violation(self, call.span, format!("call {callee}")))
    }
    fn check_buffer(&self, ctx: &CheckContext<'_>, file: FileId, bytes: &[u8]) -> Vec<Violation> {
        vec![ctx.violation(
            self,
            SourceSpan::new(file, 0, 0),
            format!("buffer {}", bytes.len()),
        )]
    }
}

const NAMING: &[Role] = &[
    Role::TypeName,
    Role::FunctionName,
    Role::VariableName,
    Role::ConstantName,
];

const EVERYTHING: &[Role] = &[
    Role::TypeName,
    Role::FunctionName,
    Role::VariableName,
    Role::ConstantName,
    Role::DeclaredIdentifier,
    Role::EntryPoint,
    Role::CallSite,
    Role::StringLiteral,
];

fn messages(analyzer: &Analyzer, unit: &TranslationUnit) -> Vec<String> {
    analyzer
        .analyze(unit)
        .violations
        .into_iter()
        .map(|v| v.message)
        .collect()
}

/// `main.c` includes `list.h`; the header defines one struct, the main file
/// defines a function with a parameter, a literal and a call.
fn two_file_unit() -> TranslationUnit {
    let mut map = SourceMap::new();
    let main = map.add("main.c", "#include \"list.h\"\nint run(int n) { puts(\"hi\"); }\n");
    let header = map.add("list.h", "struct list_node { int v; };\n");

    let header_type = DeclarationNode::new("list_node", DeclKind::Type, SourceSpan::new(header, 7, 16))
        .with_child(DeclarationNode::new("v", DeclKind::Field, SourceSpan::new(header, 23, 24)))
        .with_child(LiteralNode::new(b"in header".to_vec(), SourceSpan::new(header, 0, 1)));

    let call = CallNode::new("puts", SourceSpan::new(main, 35, 39))
        .with_argument(LiteralNode::new(b"hi".to_vec(), SourceSpan::new(main, 40, 44)));
    let body = FunctionBody::new(vec![StatementNode::new(
        StatementKind::Other,
        SourceSpan::new(main, 35, 46),
    )
    .with_child(call)
    .into()]);
    let run = DeclarationNode::new("run", DeclKind::Function, SourceSpan::new(main, 22, 25))
        .with_child(DeclarationNode::new("n", DeclKind::Variable, SourceSpan::new(main, 30, 31)))
        .with_body(body);

    TranslationUnit::new(map, main, vec![header_type.into(), run.into()])
}

#[test]
fn main_file_only_skips_included_subtrees() {
    let analyzer = Analyzer::builder()
        .rule(Recorder { roles: EVERYTHING })
        .build();
    let found = messages(&analyzer, &two_file_unit());
    assert_eq!(
        found,
        [
            "function-name run",
            "declared-identifier run",
            "variable-name n",
            "declared-identifier n",
            "call puts",
            "literal hi",
        ]
    );
}

#[test]
fn include_all_files_checks_headers_in_order() {
    let analyzer = Analyzer::builder()
        .rule(Recorder { roles: EVERYTHING })
        .include_all_files(true)
        .build();
    let found = messages(&analyzer, &two_file_unit());
    assert_eq!(found[0], "type-name list_node");
    assert_eq!(found[1], "literal in header");
    assert_eq!(found.len(), 8);
}

#[test]
fn pre_order_visits_parent_before_children() {
    let mut map = SourceMap::new();
    let id = map.add("a.c", "");
    let s = |n| SourceSpan::new(id, n, n + 1);
    let inner = DeclarationNode::new("inner", DeclKind::Type, s(2));
    let outer = DeclarationNode::new("outer", DeclKind::Type, s(1)).with_child(inner);
    let last = DeclarationNode::new("last", DeclKind::Type, s(3));
    let unit = TranslationUnit::new(map, id, vec![outer.into(), last.into()]);

    let analyzer = Analyzer::builder().rule(Recorder { roles: NAMING }).build();
    assert_eq!(
        messages(&analyzer, &unit),
        ["type-name outer", "type-name inner", "type-name last"]
    );
}

#[test]
fn deep_trees_do_not_overflow() {
    let mut map = SourceMap::new();
    let id = map.add("deep.c", "");
    let span = SourceSpan::new(id, 0, 1);
    let mut node: Node = StatementNode::new(StatementKind::Compound, span).into();
    for _ in 0..20_000 {
        node = StatementNode::new(StatementKind::Compound, span)
            .with_child(node)
            .into();
    }
    let unit = TranslationUnit::new(map, id, vec![node]);
    let analyzer = Analyzer::builder().rule(Recorder { roles: NAMING }).build();
    assert!(analyzer.analyze(&unit).violations.is_empty());
    // Drop glue for the nested tree recurses.
    std::mem::forget(unit);
}

#[test]
fn exempt_declarations_never_reach_naming_rules() {
    let mut map = SourceMap::new();
    let id = map.add("a.cpp", "");
    let span = SourceSpan::new(id, 0, 1);
    let nodes: Vec<Node> = vec![
        DeclarationNode::new("", DeclKind::Type, span).into(),
        DeclarationNode::new("", DeclKind::Variable, span).into(),
        DeclarationNode::new("Bad_Param", DeclKind::Variable, span)
            .anonymous()
            .into(),
        DeclarationNode::new("operator int", DeclKind::Function, span)
            .conversion()
            .into(),
        DeclarationNode::new("Widget", DeclKind::Function, span)
            .special_member()
            .into(),
        DeclarationNode::new("bit", DeclKind::Field, span).into(),
    ];
    let unit = TranslationUnit::new(map, id, nodes);
    let analyzer = Analyzer::builder().rule(Recorder { roles: EVERYTHING }).build();
    assert!(messages(&analyzer, &unit).is_empty());
}

#[test]
fn one_naming_violation_per_declaration() {
    let mut map = SourceMap::new();
    let id = map.add("a.c", "");
    let span = SourceSpan::new(id, 0, 1);
    let nodes: Vec<Node> = vec![
        DeclarationNode::new("T", DeclKind::Type, span).into(),
        DeclarationNode::new("f", DeclKind::Function, span).into(),
        DeclarationNode::new("v", DeclKind::Variable, span).into(),
        DeclarationNode::new("c", DeclKind::Variable, span).constant().into(),
        DeclarationNode::new("E", DeclKind::Constant, span).into(),
        DeclarationNode::new("l", DeclKind::Label, span).into(),
    ];
    let count = nodes.len();
    let unit = TranslationUnit::new(map, id, nodes);
    let analyzer = Analyzer::builder().rule(Recorder { roles: NAMING }).build();
    assert_eq!(messages(&analyzer, &unit).len(), count);
}

#[test]
fn registration_order_is_kept_per_node() {
    struct Named(&'static str);
    impl Rule for Named {
        fn name(&self) -> &'static str {
            self.0
        }
        fn code(&self) -> &'static str {
            "CSC901"
        }
        fn roles(&self) -> &'static [Role] {
            &[Role::TypeName]
        }
        fn check_declaration(
            &self,
            ctx: &CheckContext<'_>,
            decl: &DeclarationNode,
            _role: Role,
        ) -> Option<Violation> {
            Some(ctx.violation(self, decl.span, self.0))
        }
    }

    let mut map = SourceMap::new();
    let id = map.add("a.c", "");
    let unit = TranslationUnit::new(
        map,
        id,
        vec![DeclarationNode::new("t", DeclKind::Type, SourceSpan::new(id, 0, 1)).into()],
    );
    let analyzer = Analyzer::builder()
        .rule(Named("second"))
        .rule(Named("first"))
        .build();
    assert_eq!(messages(&analyzer, &unit), ["second", "first"]);
}

#[test]
fn buffer_rules_run_after_traversal() {
    static WITH_BUFFER: &[Role] = &[Role::TypeName, Role::SourceBuffer];
    let mut map = SourceMap::new();
    let id = map.add("a.c", "struct t;");
    let unit = TranslationUnit::new(
        map,
        id,
        vec![DeclarationNode::new("t", DeclKind::Type, SourceSpan::new(id, 7, 8)).into()],
    );
    let analyzer = Analyzer::builder().rule(Recorder { roles: WITH_BUFFER }).build();
    assert_eq!(messages(&analyzer, &unit), ["type-name t", "buffer 9"]);
}

#[test]
fn unreadable_primary_yields_one_run_level_violation() {
    static BUFFER: &[Role] = &[Role::TypeName, Role::SourceBuffer];
    let mut map = SourceMap::new();
    let id = map.add_unreadable("gone.c");
    let unit = TranslationUnit::new(
        map,
        id,
        vec![DeclarationNode::new("t", DeclKind::Type, SourceSpan::new(id, 0, 1)).into()],
    );
    let analyzer = Analyzer::builder().rule(Recorder { roles: BUFFER }).build();
    let result = analyzer.analyze(&unit);
    assert_eq!(result.violations.len(), 2);
    assert_eq!(result.violations[0].message, "type-name t");
    assert_eq!(result.violations[1].message, "unable to read source for recorder");
}
