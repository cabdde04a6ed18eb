//! Byte transport abstraction.
//!
//! The shell talks to its operator only through the [`Transport`] trait,
//! so the same loop runs over a serial device, stdin/stdout or a scripted
//! test double.

use std::io::{self, Read, Write};

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The other end went away (end of input).
    #[error("transport closed")]
    Closed,

    #[error("transport I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A blocking, character-oriented link.
///
/// Reads suspend the caller until a byte arrives; writes suspend it until
/// the link accepts the byte. There are no timeouts and no partial results.
pub trait Transport {
    /// Block until one byte is received.
    fn read_byte(&mut self) -> Result<u8, TransportError>;

    /// Block until `byte` is accepted for transmission.
    fn write_byte(&mut self, byte: u8) -> Result<(), TransportError>;

    /// Write every byte of `bytes`, in order.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        for byte in bytes {
            self.write_byte(*byte)?;
        }
        Ok(())
    }

    /// Write `text` followed by CRLF.
    fn put_line(&mut self, text: &[u8]) -> Result<(), TransportError> {
        self.write_all(text)?;
        self.write_all(b"\r\n")
    }

    /// Push out anything buffered below this layer.
    fn flush(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn read_byte(&mut self) -> Result<u8, TransportError> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), TransportError> {
        (**self).write_byte(byte)
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write_all(bytes)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        (**self).flush()
    }
}

/// Adapts any blocking `Read` + `Write` pair into a [`Transport`].
///
/// A zero-length read means the peer closed the stream and is reported as
/// [`TransportError::Closed`]. Interrupted calls are retried.
#[derive(Debug)]
pub struct StreamTransport<R, W> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> StreamTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Give back the wrapped reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: Read, W: Write> Transport for StreamTransport<R, W> {
    fn read_byte(&mut self) -> Result<u8, TransportError> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Err(TransportError::Closed),
                Ok(_) => return Ok(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), TransportError> {
        self.writer.write_all(&[byte])?;
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.writer.flush()?;
        Ok(())
    }
}
