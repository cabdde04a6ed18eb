//! Integer parsing in bases 2 through 36.
//!
//! Parsing is lenient in the way serial consoles usually are: leading
//! spaces and tabs are skipped, parsing stops at the first byte that is not
//! a digit of the base, and overflow wraps silently.

use crate::strings::cstr;

/// Errors from the number parsers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("base {0} is outside 2..=36")]
    InvalidBase(u32),
}

/// Value of `c` as a digit, case-insensitive.
fn digit_value(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some(u32::from(c - b'0')),
        b'a'..=b'z' => Some(u32::from(c - b'a') + 10),
        b'A'..=b'Z' => Some(u32::from(c - b'A') + 10),
        _ => None,
    }
}

fn check_base(base: u32) -> Result<(), ParseError> {
    if (2..=36).contains(&base) {
        Ok(())
    } else {
        Err(ParseError::InvalidBase(base))
    }
}

fn skip_blanks(text: &[u8]) -> &[u8] {
    let start = text
        .iter()
        .position(|c| *c != b' ' && *c != b'\t')
        .unwrap_or(text.len());
    &text[start..]
}

/// Accumulate digits of `base` from the start of `text`, wrapping.
fn accumulate(text: &[u8], base: u32) -> u32 {
    text.iter()
        .map_while(|c| digit_value(*c).filter(|d| *d < base))
        .fold(0u32, |acc, d| acc.wrapping_mul(base).wrapping_add(d))
}

/// Parse a signed integer. `+` and `-` are accepted once, before the digits.
///
/// Text without any digits parses as `0`.
pub fn parse_number(text: &[u8], base: u32) -> Result<i32, ParseError> {
    check_base(base)?;
    let text = skip_blanks(cstr(text));

    let (negative, digits) = match text.split_first() {
        Some((&b'-', rest)) => (true, rest),
        Some((&b'+', rest)) => (false, rest),
        _ => (false, text),
    };

    let magnitude = accumulate(digits, base) as i32;
    Ok(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

/// Parse an unsigned integer. No sign is accepted.
pub fn parse_unsigned(text: &[u8], base: u32) -> Result<u32, ParseError> {
    check_base(base)?;
    Ok(accumulate(skip_blanks(cstr(text)), base))
}
