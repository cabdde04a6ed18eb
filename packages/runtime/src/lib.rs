//! # eekv-runtime
//!
//! The small runtime the eekv shell is built on. Everything here works on
//! raw bytes, because the other end of the line is a serial terminal and not
//! a UTF-8 aware console.
//!
//! - [`transport`] - blocking byte transport ([`Transport`]) and a
//!   `Read`/`Write` adapter
//! - [`buffer`] - bounded buffers that report truncation
//! - [`line`] - an echoing line editor with backspace handling
//! - [`format`] - `printf`-style formatting with a fixed conversion set
//! - [`strings`] - null-terminated byte-string utilities
//! - [`tokenize`] - a reentrant tokenizer with an explicit cursor
//! - [`parse`] - base 2 to 36 integer parsing
//!
//! ## Example
//!
//! ```rust
//! use eekv_runtime::format::{format, Arg};
//! use eekv_runtime::tokenize::Tokenizer;
//!
//! let mut words = Tokenizer::new(b"WRITE temp 42", b" ");
//! assert_eq!(words.next(), Some(&b"WRITE"[..]));
//!
//! let out = format("0x%04X", &[Arg::Uint(0x41)]).unwrap();
//! assert_eq!(out, b"0x0041");
//! ```

pub mod buffer;
pub mod format;
pub mod line;
pub mod parse;
pub mod strings;
pub mod tokenize;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod scripted;

pub use buffer::{BoundedBuf, Fit};
pub use format::{Arg, FormatError};
pub use line::{LineEditor, ReadLine};
pub use parse::ParseError;
pub use tokenize::Tokenizer;
pub use transport::{StreamTransport, Transport, TransportError};

#[cfg(any(test, feature = "test-utils"))]
pub use scripted::ScriptedTransport;
