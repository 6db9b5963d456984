//! Hand-written Laye lexer.
//!
//! Grounded in the donor's `frontend/lexer/mod.rs` for overall shape (a
//! `next_token`-style loop driven by a byte-lookahead snapshot, two-byte
//! then one-byte operator dispatch tables) and in
//! `original_source/choir/lib/laye/lex.c` for the trivia-collection loop
//! (leading trivia before a token, trailing trivia up to end-of-line or the
//! next token start). The donor's `CharReader` cursor API
//! (`frontend/lexer/reader.rs`) is reflected in this module's own
//! `peek`/`peek_at`/`advance` helpers, simplified to operate directly on a
//! byte slice since Laye source is read once, not incrementally as in an
//! interpolated-string resume loop.

mod numbers;
mod strings;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::diagnostics::{Diagnostic, Engine, SourceLookup};
use crate::interner::Interner;
use crate::location::Location;

pub use self::numbers::digit_value;
pub use token::{LiteralValue, Token, TokenKind, TriviaKind, TriviaMode};

pub mod token;

pub struct Lexer<'src> {
    text: &'src str,
    bytes: &'src [u8],
    pos: u32,
    file_id: u16,
    mode: TriviaMode,
}

impl<'src> Lexer<'src> {
    pub fn new(text: &'src str, file_id: u16, mode: TriviaMode) -> Self {
        Lexer {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            file_id,
            mode,
        }
    }

    /// Lexes the entire source into a token vector ending in `EndOfFile`
    /// (Invariant I3).
    pub fn lex(
        mut self,
        interner: &mut Interner<'_>,
        engine: &Engine,
        lookup: &dyn SourceLookup,
    ) -> Vec<Token> {
        let span = tracing::trace_span!("lex", file_id = self.file_id);
        let _enter = span.enter();

        let mut tokens = Vec::new();
        loop {
            let leading = self.collect_trivia(true, engine, lookup);
            if self.at_eof() {
                let mut eof = Token::eof(self.loc(self.pos, 0));
                eof.leading_trivia = leading;
                tokens.push(eof);
                break;
            }

            let mut token = self.read_token(interner, engine, lookup);
            token.leading_trivia = leading;
            token.trailing_trivia = self.collect_trivia(false, engine, lookup);
            tokens.push(token);
        }

        tracing::trace!(token_count = tokens.len(), "lexed module");
        tokens
    }

    fn at_eof(&self) -> bool {
        self.pos as usize >= self.bytes.len()
    }

    fn byte_at(&self, offset: u32) -> Option<u8> {
        self.bytes.get(offset as usize).copied()
    }

    fn current(&self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    fn peek(&self, ahead: u32) -> Option<u8> {
        self.byte_at(self.pos + ahead)
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.current()?;
        self.pos += 1;
        Some(b)
    }

    fn loc(&self, pos: u32, len: u32) -> Location {
        Location::new(pos, len.min(u16::MAX as u32) as u16, self.file_id)
    }

    fn report(&self, engine: &Engine, lookup: &dyn SourceLookup, loc: Location, message: impl Into<String>) {
        engine.report(&Diagnostic::error(loc, message), lookup);
    }

    // ---- trivia -----------------------------------------------------

    /// Collects trivia. Leading trivia runs until the next significant
    /// character; trailing trivia stops at end-of-line or the next token
    /// start (spec §4.3). When `mode` is `None`, trivia is still scanned (to
    /// advance the cursor correctly) but discarded rather than attached.
    fn collect_trivia(&mut self, leading: bool, engine: &Engine, lookup: &dyn SourceLookup) -> Vec<Trivia> {
        let mut out = Vec::new();
        loop {
            let Some(b) = self.current() else { break };

            if b.is_ascii_whitespace() {
                let start = self.pos;
                let mut saw_newline = false;
                while let Some(b) = self.current() {
                    if !b.is_ascii_whitespace() {
                        break;
                    }
                    if b == b'\n' {
                        saw_newline = true;
                    }
                    self.advance();
                    if !leading && saw_newline {
                        break;
                    }
                }
                self.push_trivia(&mut out, TriviaKind::WhiteSpace, start);
                if !leading && saw_newline {
                    break;
                }
                continue;
            }

            if b == b'/' && self.peek(1) == Some(b'/') {
                let start = self.pos;
                let is_doc = self.peek(2) == Some(b'/');
                while let Some(b) = self.current() {
                    if b == b'\n' {
                        break;
                    }
                    self.advance();
                }
                let kind = if is_doc {
                    TriviaKind::DocComment
                } else {
                    TriviaKind::LineComment
                };
                self.push_trivia(&mut out, kind, start);
                if !leading {
                    break;
                }
                continue;
            }

            if b == b'/' && self.peek(1) == Some(b'*') {
                let start = self.pos;
                self.advance();
                self.advance();
                let mut closed = false;
                while let Some(b) = self.current() {
                    if b == b'*' && self.peek(1) == Some(b'/') {
                        self.advance();
                        self.advance();
                        closed = true;
                        break;
                    }
                    self.advance();
                }
                if !closed {
                    self.report(
                        engine,
                        lookup,
                        self.loc(start, self.pos - start),
                        "unterminated block comment",
                    );
                }
                self.push_trivia(&mut out, TriviaKind::BlockComment, start);
                continue;
            }

            break;
        }
        out
    }

    fn push_trivia(&self, out: &mut Vec<Trivia>, kind: TriviaKind, start: u32) {
        let keep = match self.mode {
            TriviaMode::None => false,
            TriviaMode::All => true,
            TriviaMode::CommentsOnly => !matches!(kind, TriviaKind::WhiteSpace),
            TriviaMode::DocumentationOnly => matches!(kind, TriviaKind::DocComment),
        };
        if keep {
            out.push(Trivia {
                kind,
                location: self.loc(start, self.pos - start),
            });
        }
    }

    // ---- tokens -------------------------------------------------------

    fn read_token(&mut self, interner: &mut Interner<'_>, engine: &Engine, lookup: &dyn SourceLookup) -> Token {
        let start = self.pos;
        let b0 = self.current().expect("read_token called at EOF");

        if b0 == b'"' {
            return self.read_string(interner, engine, lookup);
        }
        if b0 == b'\'' {
            return self.read_rune(engine, lookup);
        }
        if b0.is_ascii_digit() {
            return self.read_number(interner, engine, lookup);
        }
        if b0 == b'@' {
            return self.read_at_identifier(interner, engine, lookup);
        }
        if is_identifier_start(b0) {
            return self.read_identifier(interner);
        }
        if let Some((kind, len)) = punctuation_token(b0, self.peek(1), self.peek(2)) {
            for _ in 0..len {
                self.advance();
            }
            return self.plain_token(kind, start);
        }

        self.advance();
        self.report(
            engine,
            lookup,
            self.loc(start, self.pos - start),
            format!("unexpected character '{}'", b0 as char),
        );
        self.plain_token(TokenKind::Invalid, start)
    }

    fn plain_token(&self, kind: TokenKind, start: u32) -> Token {
        Token {
            kind,
            location: self.loc(start, self.pos - start),
            text: None,
            value: LiteralValue::None,
            artificial: false,
            leading_trivia: Vec::new(),
            trailing_trivia: Vec::new(),
        }
    }

    fn read_identifier(&mut self, interner: &mut Interner<'_>) -> Token {
        let start = self.pos;
        while let Some(b) = self.current() {
            if is_identifier_continue(b) {
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.text[start as usize..self.pos as usize];
        let kind = token::keyword_lookup(text).unwrap_or(TokenKind::Identifier);
        let symbol = interner.intern(text);
        let mut tok = self.plain_token(kind, start);
        tok.text = Some(symbol);
        tok
    }

    /// `@` forces identifier interpretation of the following run, overriding
    /// keyword folding, even if the run would otherwise be a keyword (spec
    /// §4.3). Resolution of Open Question (a): `@` not followed by an
    /// identifier start is `Error`, yielding an artificial empty identifier
    /// rather than the undecided "raw string-form identifier" the original
    /// only sketches.
    fn read_at_identifier(&mut self, interner: &mut Interner<'_>, engine: &Engine, lookup: &dyn SourceLookup) -> Token {
        let start = self.pos;
        self.advance(); // consume '@'

        if !self.current().map(is_identifier_start).unwrap_or(false) {
            self.report(
                engine,
                lookup,
                self.loc(start, self.pos - start),
                "expected an identifier after '@'",
            );
            let symbol = interner.intern("");
            let mut tok = self.plain_token(TokenKind::Identifier, start);
            tok.text = Some(symbol);
            tok.artificial = true;
            return tok;
        }

        let ident_start = self.pos;
        while let Some(b) = self.current() {
            if is_identifier_continue(b) {
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.text[ident_start as usize..self.pos as usize];
        let symbol = interner.intern(text);
        let mut tok = self.plain_token(TokenKind::Identifier, start);
        tok.text = Some(symbol);
        tok
    }

    fn read_number(&mut self, interner: &mut Interner<'_>, engine: &Engine, lookup: &dyn SourceLookup) -> Token {
        let start = self.pos;
        let first = numbers::parse_digits(&self.bytes[self.pos as usize..], 10);
        self.pos += first.consumed as u32;
        if let Some((offset, bad)) = first.invalid_digit {
            let bad_pos = start + offset as u32;
            self.report(
                engine,
                lookup,
                self.loc(bad_pos, 1),
                format!("'{}' is not a valid digit in base 10.", bad as char),
            );
        }

        // Radix form: `<radix>#<digits>`.
        if self.current() == Some(b'#') {
            self.advance();

            let requested_radix = to_u32_saturating(&first.value);
            let radix_u32 = if (2..=36).contains(&requested_radix) {
                requested_radix
            } else {
                self.report(
                    engine,
                    lookup,
                    self.loc(start, self.pos - start),
                    format!("radix {requested_radix} is out of range [2, 36]"),
                );
                requested_radix.clamp(2, 36)
            };

            let digits_start = self.pos;
            let digits = numbers::parse_digits(&self.bytes[self.pos as usize..], radix_u32);
            self.pos += digits.consumed as u32;
            if let Some((offset, bad)) = digits.invalid_digit {
                let bad_pos = digits_start + offset as u32;
                self.report(
                    engine,
                    lookup,
                    self.loc(bad_pos, 1),
                    format!("'{}' is not a valid digit in base {radix_u32}.", bad as char),
                );
            }

            if self.current() == Some(b'.') && (radix_u32 == 10 || radix_u32 == 16) {
                return self.read_float_fraction(start, digits.value, radix_u32, engine, lookup);
            }
            if self.current() == Some(b'.') {
                self.advance();
                self.report(
                    engine,
                    lookup,
                    self.loc(start, self.pos - start),
                    format!("radix {radix_u32} does not support fractional literals"),
                );
            }

            return self.finish_integer(start, digits.value, interner);
        }

        if self.current() == Some(b'.') && self.peek(1).map(|b| b.is_ascii_digit()).unwrap_or(false) {
            return self.read_float_fraction(start, first.value, 10, engine, lookup);
        }

        self.finish_integer(start, first.value, interner)
    }

    fn finish_integer(&self, start: u32, value: BigUint, interner: &mut Interner<'_>) -> Token {
        let mut tok = self.plain_token(TokenKind::LiteralInteger, start);
        let text = value.to_string();
        tok.text = Some(interner.intern(&text));
        tok.value = LiteralValue::Integer(value);
        tok
    }

    /// Reads the `.digits[exponent]` tail of a float literal. `int_part` is
    /// the already-parsed integer part's value (radix 10 or 16 only, per
    /// spec §4.3).
    fn read_float_fraction(
        &mut self,
        start: u32,
        int_part: BigUint,
        radix: u32,
        engine: &Engine,
        lookup: &dyn SourceLookup,
    ) -> Token {
        self.advance(); // consume '.'
        let frac_start = self.pos;
        let frac = numbers::parse_digits(&self.bytes[self.pos as usize..], radix);
        self.pos += frac.consumed as u32;
        let frac_digit_count = frac.consumed;
        let _ = frac_start;

        let mut exponent: i64 = 0;
        let mut has_exponent = false;

        let exponent_letter = if radix == 16 { b'p' } else { b'e' };
        if self.current().map(|b| b.to_ascii_lowercase()) == Some(exponent_letter) {
            has_exponent = true;
            self.advance();
            let mut sign: i64 = 1;
            if self.current() == Some(b'+') {
                self.advance();
            } else if self.current() == Some(b'-') {
                sign = -1;
                self.advance();
            }
            let digits = numbers::parse_digits(&self.bytes[self.pos as usize..], 10);
            for _ in 0..digits.consumed {
                self.advance();
            }
            exponent = sign * to_u32_saturating(&digits.value) as i64;
        }

        if radix == 16 && !has_exponent {
            self.report(
                engine,
                lookup,
                self.loc(start, self.pos - start),
                "hexadecimal float literals require an exponent delimited by 'p'.",
            );
            // Synthesize 'p0': exponent stays 0, matching spec §4.3's
            // "a synthetic p0 is inserted" recovery.
        }

        let int_f = bigint_to_f64(&int_part);
        let frac_value = numbers::parse_digits(
            self.text[(self.pos as usize - frac_digit_count)..self.pos as usize].as_bytes(),
            radix,
        )
        .value;
        let frac_f = bigint_to_f64(&frac_value);
        let radix_f = radix as f64;
        let scale = radix_f.powi(frac_digit_count as i32);
        let mut value = int_f + frac_f / scale;

        if radix == 16 {
            value *= 2f64.powi(exponent as i32);
        } else {
            value *= 10f64.powi(exponent as i32);
        }

        let mut tok = self.plain_token(TokenKind::LiteralFloat, start);
        tok.value = LiteralValue::Float(value);
        tok
    }

    fn read_string(&mut self, interner: &mut Interner<'_>, engine: &Engine, lookup: &dyn SourceLookup) -> Token {
        let start = self.pos;
        self.advance(); // opening quote
        let mut decoded: Vec<u8> = Vec::new();
        let mut terminated = false;

        loop {
            match self.current() {
                None => break,
                Some(b'"') => {
                    self.advance();
                    terminated = true;
                    break;
                }
                Some(b'\\') => {
                    self.advance();
                    let rest = &self.bytes[self.pos as usize..];
                    let (escape, consumed) = strings::decode_escape(rest);
                    match escape {
                        strings::Escape::Bytes(bytes) => decoded.extend_from_slice(&bytes),
                        strings::Escape::Unknown(ch) => {
                            self.report(
                                engine,
                                lookup,
                                self.loc(self.pos.saturating_sub(1), 1 + consumed as u32),
                                format!("unknown escape sequence '\\{ch}'"),
                            );
                            let mut buf = [0u8; 4];
                            decoded.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                        }
                    }
                    for _ in 0..consumed.max(1) {
                        self.advance();
                    }
                }
                Some(_) => {
                    let b = self.advance().unwrap();
                    decoded.push(b);
                }
            }
        }

        if !terminated {
            self.report(
                engine,
                lookup,
                self.loc(start, self.pos - start),
                "unterminated string literal",
            );
        }

        let text = String::from_utf8_lossy(&decoded).into_owned();
        let mut tok = self.plain_token(TokenKind::LiteralString, start);
        tok.text = Some(interner.intern(&text));
        tok
    }

    fn read_rune(&mut self, engine: &Engine, lookup: &dyn SourceLookup) -> Token {
        let start = self.pos;
        self.advance(); // opening quote
        let mut codepoints: Vec<char> = Vec::new();
        let mut terminated = false;

        loop {
            match self.current() {
                None => break,
                Some(b'\'') => {
                    self.advance();
                    terminated = true;
                    break;
                }
                Some(b'\\') => {
                    self.advance();
                    let rest = &self.bytes[self.pos as usize..];
                    let (escape, consumed) = strings::decode_escape(rest);
                    match escape {
                        strings::Escape::Bytes(bytes) => {
                            if let Ok(s) = std::str::from_utf8(&bytes) {
                                codepoints.extend(s.chars());
                            }
                        }
                        strings::Escape::Unknown(ch) => {
                            self.report(
                                engine,
                                lookup,
                                self.loc(self.pos.saturating_sub(1), 1 + consumed as u32),
                                format!("unknown escape sequence '\\{ch}'"),
                            );
                            codepoints.push(ch);
                        }
                    }
                    for _ in 0..consumed.max(1) {
                        self.advance();
                    }
                }
                Some(_) => {
                    let rest = &self.text[self.pos as usize..];
                    let ch = rest.chars().next().unwrap();
                    codepoints.push(ch);
                    self.pos += ch.len_utf8() as u32;
                }
            }
        }

        if !terminated {
            self.report(
                engine,
                lookup,
                self.loc(start, self.pos - start),
                "unterminated rune literal",
            );
        }

        // Open Question (b): more than one decoded codepoint is Error; the
        // value is clamped to the first codepoint rather than discarded.
        if codepoints.len() != 1 {
            self.report(
                engine,
                lookup,
                self.loc(start, self.pos - start),
                "rune literal must contain exactly one codepoint",
            );
        }

        let codepoint = codepoints.first().copied().unwrap_or('\0') as u32;
        let mut tok = self.plain_token(TokenKind::LiteralRune, start);
        tok.value = LiteralValue::Integer(BigUint::from(codepoint));
        tok
    }
}

fn bigint_to_f64(v: &BigUint) -> f64 {
    use num_traits::ToPrimitive;
    v.to_f64().unwrap_or(f64::INFINITY)
}

fn to_u32_saturating(v: &BigUint) -> u32 {
    use num_traits::ToPrimitive;
    v.to_u32().unwrap_or(u32::MAX)
}

pub fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub fn is_identifier_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Longest-match greedy dispatch over the punctuation table in spec §4.3.
/// Checked three bytes, then two, then one, so tie-breaks always resolve to
/// the longest valid sequence (e.g. `<=:` wins over `<=` which wins over
/// `<`).
fn punctuation_token(b0: u8, b1: Option<u8>, b2: Option<u8>) -> Option<(TokenKind, u32)> {
    use TokenKind::*;

    if let (Some(b1), Some(b2)) = (b1, b2) {
        let three = match (b0, b1, b2) {
            (b'+', b'%', b'=') => Some(PlusPercentEqual),
            (b'+', b'|', b'=') => Some(PlusPipeEqual),
            (b'-', b'%', b'=') => Some(MinusPercentEqual),
            (b'-', b'|', b'=') => Some(MinusPipeEqual),
            (b'<', b'=', b':') => Some(LessEqualColon),
            (b':', b'>', b'=') => Some(ColonGreaterEqual),
            (b'<', b'<', b'=') => Some(LessLessEqual),
            (b'>', b'>', b'=') => Some(GreaterGreaterEqual),
            (b'?', b'?', b'=') => Some(QuestionQuestionEqual),
            (b'/', b':', b'=') => Some(SlashColonEqual),
            (b'%', b':', b'=') => Some(PercentColonEqual),
            _ => None,
        };
        if let Some(kind) = three {
            return Some((kind, 3));
        }
    }

    if let Some(b1) = b1 {
        let two = match (b0, b1) {
            (b'+', b'+') => Some(PlusPlus),
            (b'+', b'=') => Some(PlusEqual),
            (b'+', b'%') => Some(PlusPercent),
            (b'+', b'|') => Some(PlusPipe),
            (b'-', b'-') => Some(MinusMinus),
            (b'-', b'=') => Some(MinusEqual),
            (b'-', b'%') => Some(MinusPercent),
            (b'-', b'|') => Some(MinusPipe),
            (b'=', b'=') => Some(EqualEqual),
            (b'=', b'>') => Some(EqualGreater),
            (b'<', b':') => Some(LessColon),
            (b'<', b'=') => Some(LessEqual),
            (b'<', b'<') => Some(LessLess),
            (b'<', b'-') => Some(LessMinus),
            (b'>', b'=') => Some(GreaterEqual),
            (b'>', b'>') => Some(GreaterGreater),
            (b':', b':') => Some(ColonColon),
            (b':', b'>') => Some(ColonGreater),
            (b'/', b'=') => Some(SlashEqual),
            (b'/', b':') => Some(SlashColon),
            (b'%', b'=') => Some(PercentEqual),
            (b'%', b':') => Some(PercentColon),
            (b'?', b'?') => Some(QuestionQuestion),
            (b'*', b'=') => Some(StarEqual),
            (b'^', b'=') => Some(CaretEqual),
            (b'&', b'=') => Some(AmpersandEqual),
            (b'|', b'=') => Some(PipeEqual),
            (b'~', b'=') => Some(TildeEqual),
            (b'!', b'=') => Some(BangEqual),
            _ => None,
        };
        if let Some(kind) = two {
            return Some((kind, 2));
        }
    }

    let one = match b0 {
        b'+' => Some(Plus),
        b'-' => Some(Minus),
        b'=' => Some(Equal),
        b'<' => Some(Less),
        b'>' => Some(Greater),
        b':' => Some(Colon),
        b'/' => Some(Slash),
        b'%' => Some(Percent),
        b'?' => Some(Question),
        b'*' => Some(Star),
        b'^' => Some(Caret),
        b'&' => Some(Ampersand),
        b'|' => Some(Pipe),
        b'~' => Some(Tilde),
        b'!' => Some(Bang),
        b'(' => Some(OpenParen),
        b')' => Some(CloseParen),
        b'[' => Some(OpenBracket),
        b']' => Some(CloseBracket),
        b'{' => Some(OpenBrace),
        b'}' => Some(CloseBrace),
        b'.' => Some(Dot),
        b',' => Some(Comma),
        b';' => Some(SemiColon),
        _ => None,
    };
    one.map(|kind| (kind, 1))
}

use token::Trivia;
