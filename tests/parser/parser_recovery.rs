//! Recovery across multiple top-level declarations: a malformed or
//! unimplemented declaration must not swallow the declarations after it, and
//! every token must still land in some node (spec §4.4 tree-coverage
//! invariant).

use bumpalo::Bump;
use choir::diagnostics::{Engine, SourceLookup};
use choir::lexer::{TokenKind, TriviaMode};
use choir::module::{Module, TokenId};
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

fn with_parsed<R>(src: &str, f: impl for<'a> FnOnce(&Module<'a>) -> R) -> R {
    let arena = Bump::new();
    let engine = Engine::new(0, false);
    let lookup = NoSource;
    let mut module = Module::lex_and_fill(&arena, 0, src, TriviaMode::None, &engine, &lookup);
    parse_module(&mut module, &engine, &lookup);
    f(&module)
}

#[test]
fn a_malformed_import_does_not_block_the_next_declaration() {
    with_parsed("import 42; import foo;", |module| {
        assert_eq!(module.top_level().len(), 2);
        assert_eq!(module.node(module.top_level()[0]).kind_name(), "ImportInvalidWithTokens");
        assert_eq!(module.node(module.top_level()[1]).kind_name(), "ImportNamedSimple");
    });
}

#[test]
fn an_unimplemented_top_level_construct_recovers_to_the_next_declaration() {
    with_parsed("struct Foo {} import bar;", |module| {
        assert_eq!(module.top_level().len(), 2);
        assert_eq!(module.node(module.top_level()[0]).kind_name(), "DeclNotYetImplemented");
        assert_eq!(module.node(module.top_level()[1]).kind_name(), "ImportNamedSimple");
    });
}

#[test]
fn every_non_eof_token_is_reachable_across_several_declarations() {
    with_parsed("import foo;\nstruct Bar {}\nimport \"baz\" as qux;", |module| {
        let reachable = module.tokens_reachable_from_top_level();
        for (i, tok) in module.tokens().iter().enumerate() {
            if tok.kind == TokenKind::Eof || module.is_invalid_token(TokenId(i as u32)) {
                continue;
            }
            assert!(reachable.contains(&TokenId(i as u32)), "token {i} ({tok:?}) not covered");
        }
    });
}

#[test]
fn consecutive_unimplemented_declarations_each_produce_their_own_node() {
    with_parsed("struct A {} struct B {} struct C {}", |module| {
        assert_eq!(module.top_level().len(), 3);
        for id in module.top_level() {
            assert_eq!(module.node(*id).kind_name(), "DeclNotYetImplemented");
        }
    });
}
