//! Black-box lexer coverage beyond the inline unit tests: trivia attachment,
//! the `@`-identifier escape hatch, and the end-of-file invariant.

use bumpalo::Bump;
use choir::diagnostics::{Engine, SourceLookup};
use choir::interner::Interner;
use choir::lexer::{Lexer, TokenKind, TriviaMode};

struct NoSource;
impl SourceLookup for NoSource {
    fn file_display_name(&self, _: u16) -> Option<String> {
        Some("t.laye".into())
    }
    fn file_text(&self, _: u16) -> Option<String> {
        None
    }
}

fn lex(src: &str, mode: TriviaMode) -> Vec<choir::lexer::Token> {
    let arena = Bump::new();
    let mut interner = Interner::new(&arena);
    let engine = Engine::new(0, false);
    Lexer::new(src, 0, mode).lex(&mut interner, &engine, &NoSource)
}

#[test]
fn trivia_mode_all_attaches_whitespace_and_comments() {
    let tokens = lex("  // hello\n  import foo;", TriviaMode::All);
    let import_tok = &tokens[0];
    assert_eq!(import_tok.kind, TokenKind::Import);
    assert!(!import_tok.leading_trivia.is_empty());
}

#[test]
fn trivia_mode_none_discards_everything_but_still_advances() {
    let tokens = lex("  // hello\n  import foo;", TriviaMode::None);
    assert!(tokens[0].leading_trivia.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::Import);
}

#[test]
fn trivia_mode_documentation_only_keeps_doc_comments_and_drops_others() {
    let tokens = lex("/// doc\n// plain\nimport foo;", TriviaMode::DocumentationOnly);
    let import_tok = &tokens[0];
    assert_eq!(import_tok.leading_trivia.len(), 1);
}

#[test]
fn at_identifier_overrides_keyword_folding() {
    let tokens = lex("@import", TriviaMode::None);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
}

#[test]
fn bare_at_with_no_identifier_start_yields_artificial_identifier() {
    let tokens = lex("@ ", TriviaMode::None);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert!(tokens[0].artificial);
}

#[test]
fn token_stream_always_ends_in_a_single_eof() {
    let tokens = lex("struct Foo {}", TriviaMode::None);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
}

#[test]
fn unterminated_block_comment_still_produces_a_trailing_token_stream() {
    let tokens = lex("import foo; /* never closed", TriviaMode::All);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
}
