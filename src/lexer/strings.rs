//! Escape-sequence decoding shared by string and rune literals (spec §4.3).
//!
//! The donor's `frontend/lexer/strings.rs` and `frontend/lexer/escape.rs`
//! decode a conventional Rust/C-like escape grammar for Flux string
//! interpolation; the escape *letters* Laye recognizes are a near-identical
//! subset (`\a\b\f\n\r\t\v\\\'\"`) plus the `\u\U\x\<octal>` forms the donor
//! does not need, so this module keeps the donor's "decode one escape
//! starting after the backslash" shape but writes the full Laye grammar.

#[derive(Debug)]
pub enum Escape {
    /// Decoded to one or more bytes appended directly to the literal's
    /// decoded text (already UTF-8 for `\u`/`\U`, raw for `\x`/octal).
    Bytes(Vec<u8>),
    /// The escape letter was not recognized; `ch` is preserved literally,
    /// per spec §4.3 ("any other follower is an error and the literal
    /// character is preserved").
    Unknown(char),
}

/// Decodes one escape sequence from `rest`, which must start immediately
/// after the backslash. Returns the decoded escape and the number of bytes
/// of `rest` consumed.
pub fn decode_escape(rest: &[u8]) -> (Escape, usize) {
    let Some(&first) = rest.first() else {
        return (Escape::Unknown('\\'), 0);
    };

    match first {
        b'a' => (Escape::Bytes(vec![0x07]), 1),
        b'b' => (Escape::Bytes(vec![0x08]), 1),
        b'f' => (Escape::Bytes(vec![0x0C]), 1),
        b'n' => (Escape::Bytes(vec![b'\n']), 1),
        b'r' => (Escape::Bytes(vec![b'\r']), 1),
        b't' => (Escape::Bytes(vec![b'\t']), 1),
        b'v' => (Escape::Bytes(vec![0x0B]), 1),
        b'\\' => (Escape::Bytes(vec![b'\\']), 1),
        b'\'' => (Escape::Bytes(vec![b'\'']), 1),
        b'"' => (Escape::Bytes(vec![b'"']), 1),

        b'u' => decode_unicode_escape(&rest[1..], 4).map_consumed(1),
        b'U' => decode_unicode_escape(&rest[1..], 8).map_consumed(1),

        b'x' => decode_hex_byte_escape(&rest[1..]).map_consumed(1),

        b'0'..=b'7' => decode_octal_byte_escape(rest),

        other => {
            let ch = std::str::from_utf8(&rest[..1]).ok().and_then(|s| s.chars().next());
            (Escape::Unknown(ch.unwrap_or(other as char)), 1)
        }
    }
}

/// A tiny local combinator so the hex/unicode helpers can report "bytes
/// consumed from after the leading escape letter" and have the caller add
/// the `1` for the letter itself back in, without repeating the arithmetic
/// at every call site.
trait MapConsumed {
    fn map_consumed(self, extra: usize) -> (Escape, usize);
}

impl MapConsumed for (Escape, usize) {
    fn map_consumed(self, extra: usize) -> (Escape, usize) {
        (self.0, self.1 + extra)
    }
}

fn decode_unicode_escape(rest: &[u8], digit_count: usize) -> (Escape, usize) {
    let mut codepoint: u32 = 0;
    let mut consumed = 0;
    for &b in rest.iter().take(digit_count) {
        let Some(d) = (b as char).to_digit(16) else {
            break;
        };
        codepoint = codepoint * 16 + d;
        consumed += 1;
    }

    if consumed != digit_count {
        // Malformed: not enough hex digits. Preserve what was there as an
        // "unknown" escape rather than guessing a codepoint.
        return (Escape::Unknown('u'), consumed);
    }

    match char::from_u32(codepoint) {
        Some(c) => {
            let mut buf = [0u8; 4];
            let s = c.encode_utf8(&mut buf);
            (Escape::Bytes(s.as_bytes().to_vec()), consumed)
        }
        None => (Escape::Unknown('u'), consumed),
    }
}

fn decode_hex_byte_escape(rest: &[u8]) -> (Escape, usize) {
    let mut value: u32 = 0;
    let mut consumed = 0;
    for &b in rest.iter().take(2) {
        let Some(d) = (b as char).to_digit(16) else {
            break;
        };
        value = value * 16 + d;
        consumed += 1;
    }
    if consumed == 0 {
        return (Escape::Unknown('x'), 0);
    }
    (Escape::Bytes(vec![value as u8]), consumed)
}

fn decode_octal_byte_escape(rest: &[u8]) -> (Escape, usize) {
    let mut value: u32 = 0;
    let mut consumed = 0;
    for &b in rest.iter().take(3) {
        if !(b'0'..=b'7').contains(&b) {
            break;
        }
        value = value * 8 + (b - b'0') as u32;
        consumed += 1;
    }
    (Escape::Bytes(vec![(value & 0xFF) as u8]), consumed)
}
