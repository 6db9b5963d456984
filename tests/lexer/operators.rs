//! Punctuation dispatch: three-byte operators must win over their two-byte
//! and one-byte prefixes (spec §4.3 "longest match").

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

fn kinds(src: &str) -> Vec<TokenKind> {
    let arena = Bump::new();
    let mut interner = Interner::new(&arena);
    let engine = Engine::new(0, false);
    Lexer::new(src, 0, TriviaMode::None)
        .lex(&mut interner, &engine, &NoSource)
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn three_byte_compound_assignments() {
    assert_eq!(
        kinds("+%= +|= -%= -|="),
        vec![
            TokenKind::PlusPercentEqual,
            TokenKind::PlusPipeEqual,
            TokenKind::MinusPercentEqual,
            TokenKind::MinusPipeEqual,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn three_byte_colon_forms_beat_their_two_byte_prefixes() {
    assert_eq!(
        kinds("<=: :>="),
        vec![TokenKind::LessEqualColon, TokenKind::ColonGreaterEqual, TokenKind::Eof]
    );
}

#[test]
fn shift_assignment_operators() {
    assert_eq!(
        kinds("<<= >>="),
        vec![TokenKind::LessLessEqual, TokenKind::GreaterGreaterEqual, TokenKind::Eof]
    );
}

#[test]
fn two_byte_arrows_and_comparisons() {
    assert_eq!(
        kinds("=> <- <: :>"),
        vec![
            TokenKind::EqualGreater,
            TokenKind::LessMinus,
            TokenKind::LessColon,
            TokenKind::ColonGreater,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn single_byte_punctuation_when_no_compound_matches() {
    assert_eq!(
        kinds("( ) [ ] { } . , ;"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenBrace,
            TokenKind::CloseBrace,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::SemiColon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unknown_byte_reports_and_emits_invalid_token() {
    assert_eq!(kinds("`"), vec![TokenKind::Invalid, TokenKind::Eof]);
}
