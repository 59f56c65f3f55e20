//! Integration tests for end-to-end compilation.
//!
//! These tests drive the full front end, from source text through
//! tokenization, validation and scope resolution, over inline sources and
//! over the files in `tests/fixtures/`.

use std::path::PathBuf;

use scandi::{
    compiler::compiler::{CompilationUnit, Compiler, Emitter, Options},
    errors::errors::Severity,
    lexer::tokens::TokenKind,
    scope::scope::{DeclarationKind, ScopeTree},
};

struct Counter {
    units: Vec<String>,
}

impl Emitter for Counter {
    fn emit(&mut self, unit: &CompilationUnit, _tree: &ScopeTree) -> Vec<String> {
        self.units.push(unit.name.to_string());
        vec![format!("; {} phrases", unit.phrases.len())]
    }
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(name)
}

fn compile(source: &str) -> Compiler {
    let mut compiler = Compiler::new(Options::default());
    compiler.compile_source("test", source);
    compiler.resolve();
    compiler
}

fn error_names(compiler: &Compiler) -> Vec<&str> {
    compiler.diagnostics.errors().map(|error| error.get_error_name()).collect()
}

#[test]
fn test_compile_declaration() {
    let compiler = compile("$ x = 5");
    let root = compiler.tree.get(compiler.tree.root());

    assert!(compiler.diagnostics.is_empty());
    assert_eq!(root.declarations.len(), 1);
    assert_eq!(root.declarations[0].name, "x");
}

#[test]
fn test_compile_label_with_undeclared_usage() {
    let compiler = compile("\\ loop\n  x");
    let root = compiler.tree.get(compiler.tree.root());

    assert_eq!(root.declarations[0].kind, DeclarationKind::Label);
    assert_eq!(error_names(&compiler), vec!["UndeclaredIdentifier"]);
    assert_eq!(compiler.diagnostics.entries()[0].get_position().line, 2);
}

#[test]
fn test_compile_label_with_declared_usage() {
    let compiler = compile("$ x = 1\n\\ loop\n  x");
    assert!(!compiler.has_errors());
}

#[test]
fn test_compile_function_with_parameters() {
    let compiler = compile("$ a $ b @ add\n  $ sum = a b +\n  sum");
    let root = compiler.tree.get(compiler.tree.root());
    let body = compiler.tree.get(root.children[0]);

    assert!(compiler.diagnostics.is_empty());
    assert_eq!(root.declarations[0].name, "add");
    assert_eq!(body.depth, root.depth + 1);
    assert_eq!(body.declarations.len(), 3);
}

#[test]
fn test_compile_comparison() {
    assert!(!compile("$ x = 1\n$ y = 2\nx ? y").has_errors());

    let compiler = compile("$ x = 1\n$ y = 2\nx ? + y");
    assert_eq!(error_names(&compiler), vec!["InvalidSyntax"]);
}

#[test]
fn test_compile_unclosed_string() {
    let mut compiler = Compiler::new(Options::default());
    compiler.compile_source("test", "\"abc");

    assert_eq!(compiler.diagnostics.warning_count(), 1);
    assert!(!compiler.has_errors());

    let phrase = &compiler.units[0].phrases[0];
    assert_eq!(phrase.tokens[0].kind, TokenKind::String);
    assert_eq!(phrase.tokens[0].value_or_empty(), "abc");
}

#[test]
fn test_diagnostics_keep_order_across_stages() {
    let compiler = compile("$ s = 'open\n$ x = 1 ;\n+ x");
    let severities: Vec<Severity> = compiler
        .diagnostics
        .entries()
        .iter()
        .map(|error| error.severity())
        .collect();

    assert_eq!(severities, vec![Severity::Warning, Severity::Error, Severity::Error]);
    assert_eq!(error_names(&compiler), vec!["IllegalDepthMarker", "InvalidSyntax"]);
}

#[test]
fn test_compile_fixture_files() {
    let mut compiler = Compiler::new(Options { debug: true });

    assert!(compiler.compile_file(&fixture("globals.scandi")));
    assert!(compiler.compile_file(&fixture("main.scandi")));

    let mut counter = Counter { units: vec![] };
    let listing = compiler.finish(&mut counter);

    assert!(compiler.diagnostics.is_empty(), "{:?}", compiler.diagnostics);
    assert_eq!(listing.map(|lines| lines.len()), Some(2));
    assert_eq!(
        counter.units,
        vec!["tests.fixtures.globals", "tests.fixtures.main"]
    );
}

#[test]
fn test_fixture_declarations_are_qualified() {
    let mut compiler = Compiler::new(Options::default());
    compiler.compile_file(&fixture("globals.scandi"));
    compiler.compile_file(&fixture("main.scandi"));

    let root = compiler.tree.get(compiler.tree.root());
    let names: Vec<String> = root
        .declarations
        .iter()
        .map(|declaration| declaration.qualified_name())
        .collect();

    assert!(names.contains(&String::from("tests.fixtures.globals.print")));
    assert!(names.contains(&String::from("tests.fixtures.main.main")));
}

#[test]
fn test_order_matters_only_for_gating() {
    let mut compiler = Compiler::new(Options::default());
    compiler.compile_file(&fixture("main.scandi"));
    compiler.compile_file(&fixture("globals.scandi"));
    compiler.resolve();

    // Usages resolve lazily, so compiling the user first is fine.
    assert!(!compiler.has_errors());
}

#[test]
fn test_broken_fixture() {
    let mut compiler = Compiler::new(Options::default());

    assert!(!compiler.compile_file(&fixture("broken.scandi")));
    compiler.resolve();

    assert_eq!(error_names(&compiler), vec!["IllegalDepthMarker", "InvalidSyntax"]);
    assert_eq!(compiler.diagnostics.warning_count(), 1);
    assert!(compiler.tree.get(compiler.tree.root()).declarations.is_empty());
}

#[test]
fn test_broken_file_does_not_stop_later_files() {
    let mut compiler = Compiler::new(Options::default());

    compiler.compile_file(&fixture("broken.scandi"));
    assert!(compiler.compile_file(&fixture("globals.scandi")));

    let mut counter = Counter { units: vec![] };
    assert!(compiler.finish(&mut counter).is_none());
    assert!(counter.units.is_empty());
    assert!(!compiler.tree.get(compiler.tree.root()).declarations.is_empty());
}

#[test]
fn test_unreadable_file_does_not_stop_later_files() {
    let mut compiler = Compiler::new(Options::default());

    assert!(!compiler.compile_file(&fixture("missing.scandi")));
    assert!(compiler.compile_file(&fixture("globals.scandi")));

    assert_eq!(error_names(&compiler), vec!["UnreadableSource"]);
    assert_eq!(compiler.units.len(), 1);
}
