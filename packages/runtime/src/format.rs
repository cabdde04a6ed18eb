//! Constrained `printf`-style formatting.
//!
//! Supported conversions: `%c %s %d %i %u %x %X %b %p %%`, with an optional
//! `0` flag and a decimal field width (`%04X`, `%8d`). Integers are the
//! host's native `int` width; there is no arbitrary precision.
//!
//! Quirks kept from the serial console this mirrors:
//! - hex digits are uppercase for both `%x` and `%X`
//! - the width pads the digits only, so `%04d` of `-5` is `-0005`
//! - `%c` and `%s` ignore the width
//! - `%p` is `0x` followed by unpadded hex
//! - an unknown conversion prints the conversion character itself
//! - a lone `%` at the end of the format prints nothing

/// A formatting argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    Char(u8),
    Str(&'a [u8]),
    Int(i32),
    Uint(u32),
    Ptr(usize),
}

impl From<u8> for Arg<'_> {
    fn from(c: u8) -> Self {
        Arg::Char(c)
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(s: &'a [u8]) -> Self {
        Arg::Str(s)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(s.as_bytes())
    }
}

impl From<i32> for Arg<'_> {
    fn from(n: i32) -> Self {
        Arg::Int(n)
    }
}

impl From<u32> for Arg<'_> {
    fn from(n: u32) -> Self {
        Arg::Uint(n)
    }
}

impl From<u16> for Arg<'_> {
    fn from(n: u16) -> Self {
        Arg::Uint(n.into())
    }
}

/// Errors from [`format`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("missing argument for %{conversion}")]
    MissingArgument { conversion: char },

    #[error("argument {index} cannot be formatted with %{conversion}")]
    ArgumentMismatch { index: usize, conversion: char },
}

/// Render `fmt` with `args` into a byte vector.
pub fn format(fmt: &str, args: &[Arg<'_>]) -> Result<Vec<u8>, FormatError> {
    let mut out = Vec::with_capacity(fmt.len());
    format_into(&mut out, fmt, args)?;
    Ok(out)
}

/// Render `fmt` with `args`, appending to `out`. Returns the number of bytes
/// appended.
pub fn format_into(out: &mut Vec<u8>, fmt: &str, args: &[Arg<'_>]) -> Result<usize, FormatError> {
    let start = out.len();
    let mut args = args.iter().copied().enumerate();
    let mut rest = fmt.bytes().peekable();

    while let Some(byte) = rest.next() {
        if byte != b'%' {
            out.push(byte);
            continue;
        }

        let mut pad = b' ';
        if rest.peek() == Some(&b'0') {
            pad = b'0';
            rest.next();
        }
        let mut width = 0usize;
        while let Some(digit) = rest.peek().filter(|d| d.is_ascii_digit()).copied() {
            width = width.saturating_mul(10).saturating_add(usize::from(digit - b'0'));
            rest.next();
        }

        let Some(conversion) = rest.next() else {
            break;
        };

        let mut next_arg = || {
            args.next().ok_or(FormatError::MissingArgument {
                conversion: conversion as char,
            })
        };
        let mismatch = |index: usize| FormatError::ArgumentMismatch {
            index,
            conversion: conversion as char,
        };

        match conversion {
            b'c' => match next_arg()? {
                (_, Arg::Char(c)) => out.push(c),
                (_, Arg::Int(n)) => out.push(n as u8),
                (_, Arg::Uint(n)) => out.push(n as u8),
                (index, _) => return Err(mismatch(index)),
            },
            b's' => match next_arg()? {
                (_, Arg::Str(s)) => out.extend_from_slice(crate::strings::cstr(s)),
                (index, _) => return Err(mismatch(index)),
            },
            b'd' | b'i' => {
                let (index, arg) = next_arg()?;
                let value = match arg {
                    Arg::Int(n) => n,
                    Arg::Uint(n) => n as i32,
                    Arg::Char(c) => i32::from(c),
                    _ => return Err(mismatch(index)),
                };
                if value < 0 {
                    out.push(b'-');
                }
                push_padded(out, u64::from(value.unsigned_abs()), 10, width, pad);
            }
            b'u' | b'x' | b'X' | b'b' => {
                let (index, arg) = next_arg()?;
                let value = match arg {
                    Arg::Uint(n) => n,
                    Arg::Int(n) => n as u32,
                    Arg::Char(c) => u32::from(c),
                    _ => return Err(mismatch(index)),
                };
                let base = match conversion {
                    b'u' => 10,
                    b'b' => 2,
                    _ => 16,
                };
                push_padded(out, u64::from(value), base, width, pad);
            }
            b'p' => {
                let (index, arg) = next_arg()?;
                let address = match arg {
                    Arg::Ptr(p) => p as u64,
                    Arg::Uint(n) => u64::from(n),
                    _ => return Err(mismatch(index)),
                };
                out.extend_from_slice(b"0x");
                push_padded(out, address, 16, 0, b'0');
            }
            b'%' => out.push(b'%'),
            other => out.push(other),
        }
    }

    Ok(out.len() - start)
}

/// Append `value` in `base`, left-padded with `pad` to `width` digits.
///
/// Digits are produced least significant first into a fixed local buffer
/// and emitted in reverse.
fn push_padded(out: &mut Vec<u8>, mut value: u64, base: u64, width: usize, pad: u8) {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut buf = [0u8; 64];
    let mut pos = 0;

    if value == 0 {
        buf[pos] = b'0';
        pos += 1;
    }
    while value != 0 {
        buf[pos] = DIGITS[(value % base) as usize];
        value /= base;
        pos += 1;
    }

    for _ in pos..width {
        out.push(pad);
    }
    out.extend(buf[..pos].iter().rev());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(template: &str, args: &[Arg<'_>]) -> String {
        String::from_utf8(format(template, args).unwrap()).unwrap()
    }

    #[test]
    fn zero_padded_hex() {
        assert_eq!(fmt("%04X", &[Arg::Uint(0x2A)]), "002A");
        assert_eq!(fmt("0x%08X: ", &[Arg::Uint(0x3F0)]), "0x000003F0: ");
    }

    #[test]
    fn signed_decimal() {
        assert_eq!(fmt("%d", &[Arg::Int(-5)]), "-5");
        assert_eq!(fmt("%i", &[Arg::Int(1234)]), "1234");
        assert_eq!(fmt("%d", &[Arg::Int(i32::MIN)]), "-2147483648");
    }

    #[test]
    fn width_pads_digits_after_sign() {
        assert_eq!(fmt("%04d", &[Arg::Int(-5)]), "-0005");
        assert_eq!(fmt("%4d|", &[Arg::Int(7)]), "   7|");
    }

    #[test]
    fn lowercase_x_prints_uppercase_digits() {
        assert_eq!(fmt("%x", &[Arg::Uint(0xBEEF)]), "BEEF");
        assert_eq!(fmt("%02x", &[Arg::Uint(0xF)]), "0F");
    }

    #[test]
    fn unsigned_binary_and_zero() {
        assert_eq!(fmt("%u", &[Arg::Uint(u32::MAX)]), "4294967295");
        assert_eq!(fmt("%b", &[Arg::Uint(5)]), "101");
        assert_eq!(fmt("%08b", &[Arg::Uint(5)]), "00000101");
        assert_eq!(fmt("%u", &[Arg::Uint(0)]), "0");
    }

    #[test]
    fn negative_as_unsigned_reinterprets_bits() {
        assert_eq!(fmt("%X", &[Arg::Int(-1)]), "FFFFFFFF");
    }

    #[test]
    fn chars_and_strings_ignore_width() {
        assert_eq!(fmt("%5c%3s!", &[Arg::Char(b'k'), "value".into()]), "kvalue!");
        assert_eq!(fmt("%c", &[Arg::Int(65)]), "A");
    }

    #[test]
    fn string_stops_at_null() {
        assert_eq!(fmt("%s\r\n", &[Arg::Str(b"42\0\0\0")]), "42\r\n");
    }

    #[test]
    fn pointer_has_prefix() {
        assert_eq!(fmt("%p", &[Arg::Ptr(0x1F40)]), "0x1F40");
        assert_eq!(fmt("%p", &[Arg::Ptr(0)]), "0x0");
    }

    #[test]
    fn percent_and_unknown_conversions() {
        assert_eq!(fmt("100%%", &[]), "100%");
        assert_eq!(fmt("%q", &[]), "q");
        assert_eq!(fmt("done%", &[]), "done");
        assert_eq!(fmt("done%08", &[]), "done");
    }

    #[test]
    fn missing_argument_is_an_error() {
        assert_eq!(
            format("%d %d", &[Arg::Int(1)]),
            Err(FormatError::MissingArgument { conversion: 'd' })
        );
    }

    #[test]
    fn mismatched_argument_is_an_error() {
        assert_eq!(
            format("%s", &[Arg::Int(1)]),
            Err(FormatError::ArgumentMismatch {
                index: 0,
                conversion: 's'
            })
        );
        assert!(format("%d", &[Arg::Str(b"x")]).is_err());
    }

    #[test]
    fn format_into_appends_and_counts() {
        let mut out = b"> ".to_vec();
        let n = format_into(&mut out, "%s=%u", &["k".into(), 3u32.into()]).unwrap();
        assert_eq!(n, 3);
        assert_eq!(out, b"> k=3");
    }
}
