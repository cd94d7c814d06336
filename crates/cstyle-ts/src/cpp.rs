//! C and C++ front end using Tree-sitter.

use crate::lower::{IncludeHandler, Lowerer};
use crate::source::{FrontendError, SyntaxTreeSource};
use cstyle_core::{FileId, Node, SourceMap, TranslationUnit};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use tree_sitter::{Language, Parser};

/// Default bound on nested quoted includes.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 32;

/// Parses C and C++ sources and lowers them into engine trees.
///
/// Quoted includes are followed by default; angle-bracket includes never are.
pub struct CppFrontend {
    language: Language,
    include_dirs: Vec<PathBuf>,
    follow_includes: bool,
    max_include_depth: usize,
}

impl CppFrontend {
    /// Creates a new front end.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_cpp::LANGUAGE.into(),
            include_dirs: Vec::new(),
            follow_includes: true,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    /// Adds directories searched after the including file's directory.
    #[must_use]
    pub fn include_dirs(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.include_dirs.extend(dirs);
        self
    }

    /// Sets whether quoted includes are spliced into the tree.
    #[must_use]
    pub fn follow_includes(mut self, follow: bool) -> Self {
        self.follow_includes = follow;
        self
    }

    /// Sets the include nesting limit.
    #[must_use]
    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }
}

impl Default for CppFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxTreeSource for CppFrontend {
    fn language_id(&self) -> &'static str {
        "cpp"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx"]
    }

    fn parse_source(&self, path: &Path, source: Vec<u8>) -> Result<TranslationUnit, FrontendError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;

        let mut session = Session {
            frontend: self,
            parser,
            source_map: SourceMap::new(),
            visited: HashSet::new(),
            dirs: Vec::new(),
        };
        session.visited.insert(visit_key(path));
        let (primary, nodes) = session.lower_file(path, source)?;

        debug!(
            path = %path.display(),
            files = session.source_map.len(),
            nodes = nodes.len(),
            "lowered translation unit"
        );
        Ok(TranslationUnit::new(session.source_map, primary, nodes))
    }
}

/// State of one `parse_source` call.
struct Session<'f> {
    frontend: &'f CppFrontend,
    parser: Parser,
    source_map: SourceMap,
    visited: HashSet<PathBuf>,
    /// Directories of the files currently being lowered, innermost last.
    dirs: Vec<PathBuf>,
}

impl Session<'_> {
    fn lower_file(
        &mut self,
        path: &Path,
        source: Vec<u8>,
    ) -> Result<(FileId, Vec<Node>), FrontendError> {
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| FrontendError::Parse {
                path: path.to_path_buf(),
                message: "parser returned no tree".to_string(),
            })?;
        let root = tree.root_node();
        if root.has_error() {
            debug!(path = %path.display(), "source has syntax errors, lowering what parsed");
        }

        let id = self.source_map.add(path, source.clone());
        self.dirs
            .push(path.parent().map(Path::to_path_buf).unwrap_or_default());
        let nodes = Lowerer::new(&source, id, self).lower_root(root);
        self.dirs.pop();
        Ok((id, nodes))
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let here = self.dirs.last().map(|dir| dir.join(name));
        here.into_iter()
            .chain(self.frontend.include_dirs.iter().map(|dir| dir.join(name)))
            .find(|candidate| candidate.is_file())
    }
}

impl IncludeHandler for Session<'_> {
    fn include(&mut self, name: &str) -> Vec<Node> {
        if !self.frontend.follow_includes {
            return Vec::new();
        }
        if self.dirs.len() > self.frontend.max_include_depth {
            warn!(include = name, depth = self.dirs.len(), "include depth limit exceeded");
            return Vec::new();
        }
        let Some(path) = self.resolve(name) else {
            warn!(include = name, "unable to resolve include");
            return Vec::new();
        };
        if !self.visited.insert(visit_key(&path)) {
            trace!(path = %path.display(), "include already lowered");
            return Vec::new();
        }

        let source = match std::fs::read(&path) {
            Ok(source) => source,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unable to read include");
                return Vec::new();
            }
        };
        debug!(path = %path.display(), "splicing include");
        match self.lower_file(&path, source) {
            Ok((_, nodes)) => nodes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse include");
                Vec::new()
            }
        }
    }
}

fn visit_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cstyle_core::{DeclKind, DeclarationNode, StatementKind};

    fn parse(src: &str) -> TranslationUnit {
        CppFrontend::new()
            .follow_includes(false)
            .parse_source(Path::new("t.cpp"), src.as_bytes().to_vec())
            .unwrap()
    }

    /// Every declaration in pre-order as `(kind, name)`.
    fn decls(unit: &TranslationUnit) -> Vec<(DeclKind, String)> {
        fn walk(node: &Node, out: &mut Vec<(DeclKind, String)>) {
            if let Node::Declaration(d) = node {
                out.push((d.kind, d.name.clone()));
            }
            for child in node.children() {
                walk(child, out);
            }
        }
        let mut out = Vec::new();
        for node in &unit.nodes {
            walk(node, &mut out);
        }
        out
    }

    fn find<'u>(unit: &'u TranslationUnit, name: &str) -> &'u DeclarationNode {
        fn walk<'n>(node: &'n Node, name: &str) -> Option<&'n DeclarationNode> {
            if let Node::Declaration(d) = node {
                if d.name == name {
                    return Some(d);
                }
            }
            node.children().find_map(|child| walk(child, name))
        }
        unit.nodes
            .iter()
            .find_map(|node| walk(node, name))
            .unwrap_or_else(|| panic!("no declaration named {name}"))
    }

    #[test]
    fn handles_c_and_cpp_extensions() {
        let frontend = CppFrontend::new();
        assert!(frontend.handles(Path::new("a.c")));
        assert!(frontend.handles(Path::new("b/c.HPP")));
        assert!(!frontend.handles(Path::new("d.rs")));
        assert_eq!(frontend.language_id(), "cpp");
    }

    #[test]
    fn function_with_parameters() {
        let unit = parse("int add(int a, int) { return a; }\n");
        assert_eq!(
            decls(&unit),
            [
                (DeclKind::Function, "add".to_string()),
                (DeclKind::Variable, "a".to_string()),
                (DeclKind::Variable, String::new()),
            ]
        );
        let add = find(&unit, "add");
        assert_eq!(add.span.start, 4);
        assert!(add.body.as_ref().is_some_and(|b| b.has_direct_return()));
        let Node::Declaration(unnamed) = &add.children[1] else {
            panic!("expected parameter");
        };
        assert!(unnamed.is_anonymous);
    }

    #[test]
    fn constness_follows_the_object() {
        let unit = parse(
            "const int a = 1;\nconst char *b;\nchar *const c = 0;\nconstexpr int d = 2;\nint e;\n",
        );
        assert!(find(&unit, "a").is_constant_qualified);
        assert!(!find(&unit, "b").is_constant_qualified);
        assert!(find(&unit, "c").is_constant_qualified);
        assert!(find(&unit, "d").is_constant_qualified);
        assert!(!find(&unit, "e").is_constant_qualified);
    }

    #[test]
    fn records_members_and_enumerators() {
        let unit = parse(
            "struct Point { int x; static int count; unsigned : 3; };\nenum Color { RED, Green };\nstruct { int y; } anon;\n",
        );
        assert_eq!(find(&unit, "Point").kind, DeclKind::Type);
        assert_eq!(find(&unit, "x").kind, DeclKind::Field);
        assert_eq!(find(&unit, "count").kind, DeclKind::Variable);
        assert_eq!(find(&unit, "Green").kind, DeclKind::Constant);
        assert_eq!(find(&unit, "Color").kind, DeclKind::Type);
        assert_eq!(find(&unit, "anon").kind, DeclKind::Variable);

        let Node::Declaration(point) = &unit.nodes[0] else {
            panic!("expected struct");
        };
        let Node::Declaration(bitfield) = &point.children[2] else {
            panic!("expected bit-field");
        };
        assert!(bitfield.is_anonymous);
        assert_eq!(bitfield.kind, DeclKind::Field);

        let anonymous = decls(&unit)
            .into_iter()
            .filter(|(kind, name)| *kind == DeclKind::Type && name.is_empty())
            .count();
        assert_eq!(anonymous, 1);
    }

    #[test]
    fn special_members_are_flagged() {
        let unit = parse(
            "class Widget {\npublic:\n  Widget();\n  ~Widget();\n  operator bool() const;\n  void Draw();\n};\nWidget::Widget() {}\n",
        );
        let flags: Vec<_> = decls(&unit)
            .into_iter()
            .filter(|(kind, _)| *kind == DeclKind::Function)
            .map(|(_, name)| name)
            .collect();
        assert_eq!(flags.len(), 5);
        assert!(find(&unit, "~Widget").is_special_member);
        assert!(!find(&unit, "Draw").is_special_member);

        let conversions = unit
            .nodes
            .iter()
            .flat_map(Node::children)
            .filter(|n| matches!(n, Node::Declaration(d) if d.is_conversion_function))
            .count();
        assert_eq!(conversions, 1);

        let Some(Node::Declaration(out_of_line)) = unit.nodes.last() else {
            panic!("expected constructor definition");
        };
        assert_eq!(out_of_line.name, "Widget");
        assert!(out_of_line.is_special_member);
    }

    #[test]
    fn calls_literals_and_labels() {
        let unit = parse(
            "void f() {\nretry:\n  std::puts(\"a\\tb\");\n  obj.run(R\"(raw)\");\n  goto retry;\n}\n",
        );
        let f = find(&unit, "f");
        let body = f.body.as_ref().unwrap();
        assert!(matches!(&body.statements[0], Node::Statement(s) if s.kind == StatementKind::Other));

        let mut calls = Vec::new();
        let mut literals = Vec::new();
        let mut stack: Vec<&Node> = unit.nodes.iter().collect();
        while let Some(node) = stack.pop() {
            match node {
                Node::Call(c) => calls.push(c.callee.clone()),
                Node::Literal(l) => literals.push((l.bytes.clone(), l.quoting.raw_delimiter.clone())),
                _ => {}
            }
            stack.extend(node.children().rev());
        }
        assert_eq!(calls, [Some("puts".to_string()), None]);
        assert_eq!(
            literals,
            [(b"a\tb".to_vec(), None), (b"raw".to_vec(), Some(String::new()))]
        );
        assert_eq!(find(&unit, "retry").kind, DeclKind::Label);
    }

    #[test]
    fn lambda_catch_and_range_for_variables() {
        let unit = parse(
            "void f(int *v) {\n  auto g = [](int Bad_Param) { return Bad_Param; };\n  try { g(1); } catch (const int &Err) {}\n  for (auto Item : v) {}\n}\n",
        );
        for name in ["g", "Bad_Param", "Err", "Item"] {
            let decl = find(&unit, name);
            assert_eq!(decl.kind, DeclKind::Variable, "{name}");
            assert!(!decl.is_constant_qualified, "{name}");
        }
    }

    #[test]
    fn only_global_main_is_the_entry_point() {
        let unit = parse(
            "struct App { int main(); };\nint App::main() { return 1; }\nnamespace tools { int main() { return 2; } }\nint main() { return 0; }\n",
        );
        let mains: Vec<_> = decls(&unit)
            .into_iter()
            .filter(|(kind, name)| *kind == DeclKind::Function && name == "main")
            .collect();
        assert_eq!(mains.len(), 4);

        let Some(Node::Declaration(global)) = unit.nodes.last() else {
            panic!("expected global main");
        };
        assert!(global.is_entry_point);

        let mut entry_points = 0;
        let mut stack: Vec<&Node> = unit.nodes.iter().collect();
        while let Some(node) = stack.pop() {
            if let Node::Declaration(d) = node {
                if d.is_entry_point {
                    entry_points += 1;
                }
            }
            stack.extend(node.children());
        }
        assert_eq!(entry_points, 1);
    }

    #[test]
    fn syntax_errors_still_lower() {
        let unit = parse("int Good_name;\nint broken( {\n");
        assert!(decls(&unit)
            .iter()
            .any(|(_, name)| name == "Good_name"));
    }
}
