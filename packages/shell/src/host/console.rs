//! Stdin/stdout transport.

use std::io;
use std::os::unix::io::RawFd;

use eekv_runtime::{Transport, TransportError};

const CTRL_C: u8 = 0x03;
const CTRL_D: u8 = 0x04;

/// Puts a terminal into raw mode for as long as it lives.
///
/// The line editor does its own echo and backspace handling, so the
/// terminal must pass every byte through untouched.
pub struct RawMode {
    fd: RawFd,
    original: libc::termios,
}

impl RawMode {
    pub fn enable(fd: RawFd) -> io::Result<Self> {
        // SAFETY: termios is plain data; tcgetattr fills it before use.
        let mut original: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut original) } != 0 {
            return Err(io::Error::last_os_error());
        }

        let mut raw = original;
        unsafe { libc::cfmakeraw(&mut raw) };
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            return Err(io::Error::last_os_error());
        }

        tracing::debug!(fd, "terminal in raw mode");
        Ok(Self { fd, original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &self.original) } != 0 {
            tracing::warn!(
                error = %io::Error::last_os_error(),
                "failed to restore terminal mode"
            );
        }
    }
}

/// A raw terminal transport.
///
/// Raw mode turns Ctrl-C and Ctrl-D into ordinary bytes, so this wrapper
/// reports them as the end of the session.
#[derive(Debug)]
pub struct Console<T> {
    inner: T,
}

impl<T: Transport> Console<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Transport> Transport for Console<T> {
    fn read_byte(&mut self) -> Result<u8, TransportError> {
        match self.inner.read_byte()? {
            CTRL_C | CTRL_D => Err(TransportError::Closed),
            byte => Ok(byte),
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), TransportError> {
        self.inner.write_byte(byte)
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.inner.write_all(bytes)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.inner.flush()
    }
}
