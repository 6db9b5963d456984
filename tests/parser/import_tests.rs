//! Black-box coverage of every `import` production the parser recognizes
//! (spec §4.4), plus the Open Question (c) forms it deliberately rejects.

use bumpalo::Bump;
use choir::diagnostics::{Engine, SourceLookup};
use choir::lexer::TriviaMode;
use choir::module::Module;
use choir::parser::parse_module;

struct NoSource;
impl SourceLookup for NoSource {
    fn file_display_name(&self, _: u16) -> Option<String> {
        Some("t.laye".into())
    }
    fn file_text(&self, _: u16) -> Option<String> {
        None
    }
}

fn parse(src: &str) -> String {
    let arena = Bump::new();
    let engine = Engine::new(0, false);
    let lookup = NoSource;
    let mut module = Module::lex_and_fill(&arena, 0, src, TriviaMode::None, &engine, &lookup);
    parse_module(&mut module, &engine, &lookup);
    assert_eq!(module.top_level().len(), 1, "expected exactly one top-level node");
    module.node(module.top_level()[0]).kind_name().to_string()
}

#[test]
fn simple_path_import() {
    assert_eq!(parse(r#"import "std/io";"#), "ImportPathSimple");
}

#[test]
fn aliased_path_import() {
    assert_eq!(parse(r#"import "std/io" as io;"#), "ImportPathSimpleAliased");
}

#[test]
fn simple_named_import() {
    assert_eq!(parse("import io;"), "ImportNamedSimple");
}

#[test]
fn aliased_named_import() {
    assert_eq!(parse("import io as stdio;"), "ImportNamedSimpleAliased");
}

#[test]
fn scoped_import_path_is_not_yet_implemented() {
    assert_eq!(parse("import std::io;"), "ImportInvalidWithTokens");
}

#[test]
fn named_import_with_from_clause_is_not_yet_implemented() {
    assert_eq!(parse("import io as stdio from \"std/io\";"), "ImportInvalidWithTokens");
}

#[test]
fn import_missing_semicolon_still_recovers() {
    assert_eq!(parse("import io"), "ImportNamedSimple");
}

#[test]
fn import_with_a_numeric_literal_body_is_invalid() {
    assert_eq!(parse("import 42;"), "ImportInvalidWithTokens");
}
