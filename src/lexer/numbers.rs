//! Arbitrary-radix integer and float literal scanning (spec §4.3).
//!
//! The donor's own `frontend/lexer/numbers.rs` is a three-line decimal-only
//! stub; none of it survives here beyond the module's name and position in
//! the tree. The actual algorithm (radix-prefixed digits, underscore rules,
//! required/optional exponent delimiters) is grounded directly in spec §4.3
//! and in `original_source/choir/include/choir/front/laye/syntax.hh`'s
//! `integer_value`/`float_value` fields, which call for arbitrary-precision
//! storage.

use num_bigint::BigUint;
use num_traits::Zero;

/// Maps an ASCII byte to its digit value in radix `r`, per spec §4.3's
/// `digit_in_radix` character class (`0-9` for any radix, plus `a-z`/`A-Z`
/// for radices above 10).
pub fn digit_value(b: u8, radix: u32) -> Option<u32> {
    let value = match b {
        b'0'..=b'9' => (b - b'0') as u32,
        b'a'..=b'z' => (b - b'a') as u32 + 10,
        b'A'..=b'Z' => (b - b'A') as u32 + 10,
        _ => return None,
    };
    if value < radix {
        Some(value)
    } else {
        None
    }
}

pub struct DecodedInteger {
    pub value: BigUint,
    /// Byte offset (relative to the digit run's start) of the first invalid
    /// digit encountered, if any, so the caller can anchor a diagnostic.
    pub invalid_digit: Option<(usize, u8)>,
    pub consumed: usize,
}

/// Parses a run of `digit_in_radix(radix)` characters separated by single
/// underscores (never leading/trailing a component). `text` should start
/// exactly at the first digit. Stops at the first byte that is neither a
/// valid digit for `radix` nor an underscore in a legal position.
pub fn parse_digits(text: &[u8], radix: u32) -> DecodedInteger {
    let mut value = BigUint::zero();
    let mut consumed = 0usize;
    let mut invalid_digit = None;
    let mut prev_was_digit = false;

    let mut i = 0;
    while i < text.len() {
        let b = text[i];
        if b == b'_' {
            // Underscore only legal between two digits; a leading/trailing
            // underscore ends the digit run without being consumed as part
            // of it, leaving it for whatever scans next (spec §4.3).
            if !prev_was_digit || i + 1 >= text.len() || digit_value(text[i + 1], radix).is_none() {
                break;
            }
            consumed += 1;
            i += 1;
            prev_was_digit = false;
            continue;
        }

        match digit_value(b, radix) {
            Some(d) => {
                value = value * radix + d;
                consumed += 1;
                i += 1;
                prev_was_digit = true;
            }
            None => {
                if b.is_ascii_alphanumeric() && invalid_digit.is_none() {
                    invalid_digit = Some((i, b));
                    // Still consume it: an invalid-digit error does not stop
                    // the token, it is reported and scanning continues
                    // (spec §4.3 "Errors").
                    consumed += 1;
                    i += 1;
                    prev_was_digit = false;
                    continue;
                }
                break;
            }
        }
    }

    DecodedInteger {
        value,
        invalid_digit,
        consumed,
    }
}
