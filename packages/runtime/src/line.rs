//! Echoing line editor.
//!
//! Reads one byte at a time from a [`Transport`], echoes what it keeps and
//! handles backspace the way a dumb serial terminal expects.

use crate::buffer::BoundedBuf;
use crate::transport::{Transport, TransportError};

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

/// Erase the character left of the cursor on a dumb terminal.
const RUBOUT: &[u8] = b"\x08 \x08";

/// A committed input line.
#[derive(Debug, PartialEq, Eq)]
pub struct ReadLine<'a> {
    /// The line as edited, without the terminator.
    pub line: &'a [u8],
    /// Bytes received after the buffer was full. They were consumed from
    /// the transport and not echoed.
    pub dropped: usize,
}

/// Line editor over a bounded buffer.
///
/// A buffer of capacity `C` holds at most `C - 1` bytes, mirroring a
/// C-style buffer that reserves room for its terminator.
#[derive(Debug)]
pub struct LineEditor {
    buf: BoundedBuf,
}

impl LineEditor {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: BoundedBuf::new(capacity.saturating_sub(1)),
        }
    }

    /// Maximum number of bytes a line can hold.
    pub fn max_len(&self) -> usize {
        self.buf.limit()
    }

    /// Read one line.
    ///
    /// - CR or LF commits the line and echoes CRLF.
    /// - BS or DEL removes the last byte and echoes a rubout; on an empty
    ///   line it does nothing.
    /// - Anything else is appended and echoed while there is room, and
    ///   silently dropped otherwise.
    ///
    /// Blocks until a terminator arrives.
    pub fn read_line<T: Transport + ?Sized>(
        &mut self,
        io: &mut T,
    ) -> Result<ReadLine<'_>, TransportError> {
        self.buf.clear();
        let mut dropped = 0;

        loop {
            let byte = io.read_byte()?;
            match byte {
                b'\r' | b'\n' => {
                    io.write_all(b"\r\n")?;
                    break;
                }
                BACKSPACE | DELETE => {
                    if self.buf.pop().is_some() {
                        io.write_all(RUBOUT)?;
                    }
                }
                _ => {
                    if self.buf.push(byte).is_truncated() {
                        dropped += 1;
                    } else {
                        io.write_byte(byte)?;
                    }
                }
            }
        }

        io.flush()?;
        if dropped > 0 {
            tracing::debug!(dropped, limit = self.buf.limit(), "input line overflowed");
        }

        Ok(ReadLine {
            line: self.buf.as_bytes(),
            dropped,
        })
    }
}

/// Blank out `count` echoed characters of the current terminal line.
pub fn clear_line<T: Transport + ?Sized>(io: &mut T, count: usize) -> Result<(), TransportError> {
    io.write_byte(b'\r')?;
    for _ in 0..count {
        io.write_byte(b' ')?;
    }
    io.write_byte(b'\r')
}
