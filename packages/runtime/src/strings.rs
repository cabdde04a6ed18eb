//! Null-terminated byte-string utilities.
//!
//! Every function treats its input as a C string: the string ends at the
//! first `0` byte, or at the end of the slice if there is none. Stored keys
//! that exactly fill their field therefore work without a terminator.

use std::cmp::Ordering;

use crate::buffer::{BoundedBuf, Fit};

/// The string part of `s`: everything before the first null.
pub fn cstr(s: &[u8]) -> &[u8] {
    match s.iter().position(|b| *b == 0) {
        Some(end) => &s[..end],
        None => s,
    }
}

pub fn length(s: &[u8]) -> usize {
    cstr(s).len()
}

/// Byte-wise comparison.
pub fn compare(a: &[u8], b: &[u8]) -> Ordering {
    cstr(a).cmp(cstr(b))
}

/// ASCII case-insensitive comparison.
pub fn case_compare(a: &[u8], b: &[u8]) -> Ordering {
    let a = cstr(a).iter().map(u8::to_ascii_lowercase);
    let b = cstr(b).iter().map(u8::to_ascii_lowercase);
    a.cmp(b)
}

/// Index of the first `c`.
pub fn search_byte(s: &[u8], c: u8) -> Option<usize> {
    cstr(s).iter().position(|b| *b == c)
}

/// Index where `needle` first occurs. An empty needle matches at 0.
pub fn search_substring(s: &[u8], needle: &[u8]) -> Option<usize> {
    let (s, needle) = (cstr(s), cstr(needle));
    if needle.is_empty() {
        return Some(0);
    }
    s.windows(needle.len()).position(|w| w == needle)
}

pub fn contains(s: &[u8], needle: &[u8]) -> bool {
    search_substring(s, needle).is_some()
}

pub fn starts_with(s: &[u8], prefix: &[u8]) -> bool {
    cstr(s).starts_with(cstr(prefix))
}

pub fn ends_with(s: &[u8], suffix: &[u8]) -> bool {
    cstr(s).ends_with(cstr(suffix))
}

/// Number of occurrences of `c`.
pub fn count(s: &[u8], c: u8) -> usize {
    cstr(s).iter().filter(|b| **b == c).count()
}

/// Length of the leading run made only of bytes in `accept`.
pub fn spn(s: &[u8], accept: &[u8]) -> usize {
    cstr(s)
        .iter()
        .take_while(|b| accept.contains(*b))
        .count()
}

/// Length of the leading run containing no byte of `reject`.
pub fn cspn(s: &[u8], reject: &[u8]) -> usize {
    cstr(s)
        .iter()
        .take_while(|b| !reject.contains(*b))
        .count()
}

pub fn first_index_of(s: &[u8], c: u8) -> Option<usize> {
    search_byte(s, c)
}

pub fn last_index_of(s: &[u8], c: u8) -> Option<usize> {
    cstr(s).iter().rposition(|b| *b == c)
}

/// Index of the first byte not in `set`.
pub fn first_index_of_none(s: &[u8], set: &[u8]) -> Option<usize> {
    cstr(s).iter().position(|b| !set.contains(b))
}

/// Index of the last byte not in `set`.
pub fn last_index_of_none(s: &[u8], set: &[u8]) -> Option<usize> {
    cstr(s).iter().rposition(|b| !set.contains(b))
}

/// Reverse the string part of `s` in place, returning its length.
/// Bytes after the terminator are untouched.
pub fn reverse(s: &mut [u8]) -> usize {
    let len = length(s);
    s[..len].reverse();
    len
}

/// Replace the contents of `dest` with `src`.
pub fn copy(dest: &mut BoundedBuf, src: &[u8]) -> Fit {
    dest.clear();
    dest.extend_from_slice(cstr(src))
}

/// Append `src` to `dest`.
pub fn concat(dest: &mut BoundedBuf, src: &[u8]) -> Fit {
    dest.extend_from_slice(cstr(src))
}

pub fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

pub fn is_alphabetic(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

pub fn is_alphanumeric(c: u8) -> bool {
    c.is_ascii_alphanumeric()
}

pub fn is_xdigit(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

pub fn is_cntrl(c: u8) -> bool {
    c < 0x20 || c == 0x7F
}

/// Printable, not alphanumeric, not space.
pub fn is_punctuation(c: u8) -> bool {
    (0x21..=0x7E).contains(&c) && !is_alphanumeric(c)
}

pub fn is_upper(c: u8) -> bool {
    c.is_ascii_uppercase()
}

pub fn is_lower(c: u8) -> bool {
    c.is_ascii_lowercase()
}

/// `0x20..=0x7E`.
pub fn is_print(c: u8) -> bool {
    (0x20..=0x7E).contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cstr_stops_at_null() {
        assert_eq!(cstr(b"temp\0\0junk"), b"temp");
        assert_eq!(cstr(b"full"), b"full");
        assert_eq!(length(b"\0abc"), 0);
    }

    #[test]
    fn compare_is_case_sensitive() {
        assert_eq!(compare(b"READ", b"READ"), Ordering::Equal);
        assert_eq!(compare(b"READ", b"read"), Ordering::Less);
        assert_eq!(compare(b"key\0\0", b"key"), Ordering::Equal);
        assert_eq!(compare(b"ke", b"key"), Ordering::Less);
    }

    #[test]
    fn case_compare_folds_ascii() {
        assert_eq!(case_compare(b"#FullRainbow", b"#FULLRAINBOW"), Ordering::Equal);
        assert_eq!(case_compare(b"abc", b"ABD"), Ordering::Less);
        assert_eq!(case_compare(b"abcd", b"ABC"), Ordering::Greater);
    }

    #[test]
    fn searching() {
        assert_eq!(search_byte(b"1F 2A", b' '), Some(2));
        assert_eq!(search_byte(b"ab\0 c", b' '), None);
        assert_eq!(search_substring(b"hello world", b"wor"), Some(6));
        assert_eq!(search_substring(b"hello", b""), Some(0));
        assert_eq!(search_substring(b"hi", b"high"), None);
        assert!(contains(b"eeprom", b"prom"));
        assert!(!contains(b"eeprom", b"ram"));
    }

    #[test]
    fn prefix_and_suffix() {
        assert!(starts_with(b"WRITE key", b"WRITE"));
        assert!(!starts_with(b"WR", b"WRITE"));
        assert!(ends_with(b"image.bin", b".bin"));
        assert!(!ends_with(b"bin", b".bin"));
        assert!(ends_with(b"abc", b""));
    }

    #[test]
    fn counting_and_spans() {
        assert_eq!(count(b"a b c", b' '), 2);
        assert_eq!(spn(b"   x", b" \t"), 3);
        assert_eq!(cspn(b"key value", b" "), 3);
        assert_eq!(cspn(b"key", b" "), 3);
    }

    #[test]
    fn index_lookups() {
        assert_eq!(first_index_of(b"abcabc", b'b'), Some(1));
        assert_eq!(last_index_of(b"abcabc", b'b'), Some(4));
        assert_eq!(last_index_of(b"abc", b'z'), None);
        assert_eq!(first_index_of_none(b"  key  ", b" "), Some(2));
        assert_eq!(last_index_of_none(b"  key  ", b" "), Some(4));
        assert_eq!(first_index_of_none(b"    ", b" "), None);
    }

    #[test]
    fn reverse_in_place() {
        let mut s = *b"abc\0xy";
        assert_eq!(reverse(&mut s), 3);
        assert_eq!(&s, b"cba\0xy");
    }

    #[test]
    fn copy_and_concat_report_truncation() {
        let mut dest = BoundedBuf::new(6);
        assert_eq!(copy(&mut dest, b"foo"), Fit::Complete);
        assert_eq!(concat(&mut dest, b"bar"), Fit::Complete);
        assert_eq!(dest.as_bytes(), b"foobar");
        assert_eq!(concat(&mut dest, b"!"), Fit::Truncated);
        assert_eq!(copy(&mut dest, b"overflowing"), Fit::Truncated);
        assert_eq!(dest.as_bytes(), b"overfl");
    }

    #[test]
    fn character_classes() {
        assert!(is_whitespace(b'\t') && is_whitespace(0x0B) && !is_whitespace(b'_'));
        assert!(is_alphabetic(b'q') && !is_alphabetic(b'1'));
        assert!(is_digit(b'7') && !is_digit(b'a'));
        assert!(is_alphanumeric(b'Z') && !is_alphanumeric(b'-'));
        assert!(is_xdigit(b'f') && is_xdigit(b'F') && !is_xdigit(b'g'));
        assert!(is_cntrl(0x1B) && is_cntrl(0x7F) && !is_cntrl(b' '));
        assert!(is_punctuation(b'!') && !is_punctuation(b' ') && !is_punctuation(b'a'));
        assert!(is_upper(b'K') && !is_upper(b'k'));
        assert!(is_lower(b'k') && !is_lower(b'K'));
        assert!(is_print(b' ') && is_print(b'~') && !is_print(0x7F) && !is_print(0xFF));
    }
}
