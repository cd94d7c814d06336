//! Integration test: the built-in rule set end-to-end through the analyzer.

use cstyle_core::{
    Analyzer, CallNode, Config, DeclKind, DeclarationNode, FileId, LintResult, LiteralNode, Node,
    Severity, SourceMap, SourceSpan, TranslationUnit,
};
use cstyle_rules::{rule_set, Preset};

struct Source {
    text: String,
    map: SourceMap,
    id: FileId,
}

impl Source {
    fn new(text: &str) -> Self {
        let mut map = SourceMap::new();
        let id = map.add("scenario.cpp", text);
        Self {
            text: text.to_string(),
            map,
            id,
        }
    }

    fn span(&self, needle: &str) -> SourceSpan {
        let start = self.text.find(needle).expect("needle in source");
        SourceSpan::new(self.id, start, start + needle.len())
    }

    fn run(self, nodes: Vec<Node>) -> LintResult {
        let unit = TranslationUnit::new(self.map, self.id, nodes);
        Analyzer::builder()
            .rules(rule_set(Preset::Recommended, &Config::default()))
            .build()
            .analyze(&unit)
    }
}

#[test]
fn trailing_underscore_type() {
    let src = Source::new("struct node_ { };\n");
    let decl = DeclarationNode::new("node_", DeclKind::Type, src.span("node_"));
    let result = src.run(vec![decl.into()]);

    assert_eq!(result.violations.len(), 1);
    let v = &result.violations[0];
    assert_eq!(v.code, "CSC001");
    assert_eq!(v.location.offset, 11);
    assert_eq!(v.fix.as_ref().map(|f| f.replacement.as_str()), Some("Node"));
}

#[test]
fn function_and_constant_names() {
    let src = Source::new("void Some_Function(void);\nconst int bufSize = 4;\n");
    let function = DeclarationNode::new("Some_Function", DeclKind::Function, src.span("Some_Function"));
    let constant =
        DeclarationNode::new("bufSize", DeclKind::Variable, src.span("bufSize")).constant();
    let result = src.run(vec![function.into(), constant.into()]);

    let fixes: Vec<_> = result
        .violations
        .iter()
        .filter_map(|v| v.fix.as_ref().map(|f| f.replacement.as_str()))
        .collect();
    assert_eq!(fixes, ["some_function", "BUFSIZE"]);
    assert_eq!(result.violations.len(), 2);
}

#[test]
fn literal_and_forbidden_call() {
    let src = Source::new("int f() { strcpy(dst, \"a\\x7Fb\"); puts(\"x\\ty\"); }\n");
    let strcpy = CallNode::new("strcpy", src.span("strcpy"))
        .with_argument(LiteralNode::new(b"a\x7Fb".to_vec(), src.span("\"a\\x7Fb\"")));
    let puts = CallNode::new("puts", src.span("puts"))
        .with_argument(LiteralNode::new(b"x\ty".to_vec(), src.span("\"x\\ty\"")));
    let result = src.run(vec![strcpy.into(), puts.into()]);

    let codes: Vec<_> = result.violations.iter().map(|v| v.code.as_str()).collect();
    assert_eq!(codes, ["CSC006", "CSC004", "CSC004"]);

    let forbidden = &result.violations[0];
    assert!(forbidden.message.contains("'strcpy'"));
    assert!(forbidden.fix.is_none());

    let dirty = &result.violations[1];
    assert_eq!(dirty.fix.as_ref().map(|f| f.replacement.as_str()), Some("\"ab\""));

    let tab = &result.violations[2];
    assert_eq!(tab.message, "string literal contains '\\t'");
    assert!(tab.fix.is_none());
}

#[test]
fn raw_bytes_are_scanned_after_the_tree() {
    let src = Source::new("int main() {\n\treturn 0;\n}\n");
    let main = DeclarationNode::new("main", DeclKind::Function, src.span("main"));
    let result = src.run(vec![main.into()]);

    assert_eq!(result.violations.len(), 1);
    let v = &result.violations[0];
    assert_eq!(v.code, "CSC005");
    assert_eq!((v.location.line, v.location.column), (2, 1));
}

#[test]
fn minimal_preset_ignores_calls() {
    let mut map = SourceMap::new();
    let id = map.add("m.c", "gets(b);");
    let call = CallNode::new("gets", SourceSpan::new(id, 0, 4));
    let unit = TranslationUnit::new(map, id, vec![call.into()]);
    let result = Analyzer::builder()
        .rules(rule_set(Preset::Minimal, &Config::default()))
        .build()
        .analyze(&unit);
    assert!(result.violations.is_empty());
}

#[test]
fn severity_overrides_apply_after_the_run() {
    let config = Config::parse(
        r#"
[rules.forbidden-call]
severity = "error"
functions = ["strcat"]
"#,
    )
    .expect("config");
    let mut map = SourceMap::new();
    let id = map.add("o.c", "strcat(a, b);");
    let unit = TranslationUnit::new(
        map,
        id,
        vec![CallNode::new("strcat", SourceSpan::new(id, 0, 6)).into()],
    );
    let mut result = Analyzer::builder()
        .rules(rule_set(Preset::Recommended, &config))
        .build()
        .analyze(&unit);
    config.apply_severity_overrides(&mut result.violations);

    assert_eq!(result.violations.len(), 1);
    assert!(result.has_violations_at(Severity::Error));
}
