//! Integer/float literal scanning: arbitrary radix, underscores, and the
//! hex-float exponent recovery rule (spec §4.3).

use bumpalo::Bump;
use choir::diagnostics::{Engine, SourceLookup};
use choir::interner::Interner;
use choir::lexer::{Lexer, LiteralValue, TokenKind, TriviaMode};
use num_bigint::BigUint;

struct NoSource;
impl SourceLookup for NoSource {
    fn file_display_name(&self, _: u16) -> Option<String> {
        Some("t.laye".into())
    }
    fn file_text(&self, _: u16) -> Option<String> {
        None
    }
}

fn lex_one(src: &str) -> choir::lexer::Token {
    let arena = Bump::new();
    let mut interner = Interner::new(&arena);
    let engine = Engine::new(0, false);
    Lexer::new(src, 0, TriviaMode::None)
        .lex(&mut interner, &engine, &NoSource)
        .into_iter()
        .next()
        .unwrap()
}

fn lex_one_reporting(src: &str) -> (choir::lexer::Token, bool) {
    let arena = Bump::new();
    let mut interner = Interner::new(&arena);
    let engine = Engine::new(0, false);
    let tok = Lexer::new(src, 0, TriviaMode::None)
        .lex(&mut interner, &engine, &NoSource)
        .into_iter()
        .next()
        .unwrap();
    (tok, engine.errored())
}

#[test]
fn plain_decimal_integer() {
    let tok = lex_one("42");
    assert_eq!(tok.kind, TokenKind::LiteralInteger);
    match tok.value {
        LiteralValue::Integer(ref v) => assert_eq!(*v, BigUint::from(42u32)),
        _ => panic!("expected integer"),
    }
}

#[test]
fn underscore_separated_digits() {
    let tok = lex_one("1_000_000");
    match tok.value {
        LiteralValue::Integer(ref v) => assert_eq!(*v, BigUint::from(1_000_000u32)),
        _ => panic!("expected integer"),
    }
}

#[test]
fn binary_radix_literal() {
    let tok = lex_one("2#1010");
    match tok.value {
        LiteralValue::Integer(ref v) => assert_eq!(*v, BigUint::from(10u32)),
        _ => panic!("expected integer"),
    }
}

#[test]
fn radix_out_of_range_clamps_and_still_produces_a_token() {
    let tok = lex_one("99#1");
    assert_eq!(tok.kind, TokenKind::LiteralInteger);
}

#[test]
fn decimal_float_with_fraction() {
    let tok = lex_one("3.5");
    match tok.value {
        LiteralValue::Float(f) => assert!((f - 3.5).abs() < 1e-9),
        _ => panic!("expected float"),
    }
}

#[test]
fn decimal_float_with_exponent() {
    let tok = lex_one("1.5e2");
    match tok.value {
        LiteralValue::Float(f) => assert!((f - 150.0).abs() < 1e-6),
        _ => panic!("expected float"),
    }
}

#[test]
fn hex_float_missing_exponent_synthesizes_p0() {
    let tok = lex_one("16#1.8");
    match tok.value {
        LiteralValue::Float(f) => assert!((f - 1.5).abs() < 1e-9),
        _ => panic!("expected float"),
    }
}

#[test]
fn radix_16_fraction_without_hash_is_plain_decimal_float() {
    // Without the `16#` prefix, `.` after digits is always a base-10 float.
    let tok = lex_one("10.25");
    match tok.value {
        LiteralValue::Float(f) => assert!((f - 10.25).abs() < 1e-9),
        _ => panic!("expected float"),
    }
}

#[test]
fn unprefixed_invalid_digit_is_reported_and_still_consumed() {
    let (tok, errored) = lex_one_reporting("10x");
    assert!(errored, "invalid digit 'x' must be reported");
    assert_eq!(tok.kind, TokenKind::LiteralInteger);
    match tok.value {
        LiteralValue::Integer(ref v) => assert_eq!(*v, BigUint::from(10u32)),
        _ => panic!("expected integer"),
    }
}
