//! Scripted transport for in-memory testing.
//!
//! This module provides a [`Transport`] that replays queued input bytes and
//! records everything written, so the shell can be driven end to end
//! without a serial device.

use std::collections::VecDeque;

use crate::transport::{Transport, TransportError};

/// Transport with in-memory input queue and output capture.
///
/// Input bytes are consumed in order; once the queue is empty, reads report
/// [`TransportError::Closed`], which ends a shell session.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    /// Bytes still to be returned by `read_byte()`.
    input: VecDeque<u8>,
    /// Every byte written so far.
    output: Vec<u8>,
    /// Number of times `flush()` was called.
    flush_count: usize,
}

impl ScriptedTransport {
    /// Create a transport with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw bytes.
    pub fn queue_bytes(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Queue a command line terminated by CR, as a terminal sends it.
    pub fn queue_line(&mut self, line: &str) {
        self.queue_bytes(line.as_bytes());
        self.input.push_back(b'\r');
    }

    /// Queue several command lines.
    pub fn queue_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        for line in lines {
            self.queue_line(line);
        }
    }

    /// Everything written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Output decoded lossily as text.
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Forget captured output.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Check if there is unread input.
    pub fn has_pending_input(&self) -> bool {
        !self.input.is_empty()
    }

    /// Get the number of times `flush()` was called.
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }
}

impl Transport for ScriptedTransport {
    fn read_byte(&mut self) -> Result<u8, TransportError> {
        self.input.pop_front().ok_or(TransportError::Closed)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), TransportError> {
        self.output.push(byte);
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.flush_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_empty_transport() {
        let link = ScriptedTransport::new();
        assert!(!link.has_pending_input());
        assert!(link.output().is_empty());
        assert_eq!(link.flush_count(), 0);
    }

    #[test]
    fn queue_line_appends_carriage_return() {
        let mut link = ScriptedTransport::new();
        link.queue_line("PRINT");
        let bytes: Vec<u8> = std::iter::from_fn(|| link.read_byte().ok()).collect();
        assert_eq!(bytes, b"PRINT\r");
    }

    #[test]
    fn read_after_exhaustion_is_closed() {
        let mut link = ScriptedTransport::new();
        link.queue_bytes(b"a");
        assert_eq!(link.read_byte().unwrap(), b'a');
        assert!(matches!(link.read_byte(), Err(TransportError::Closed)));
    }

    #[test]
    fn output_is_captured_and_clearable() {
        let mut link = ScriptedTransport::new();
        link.write_byte(b'>').unwrap();
        link.put_line(b" ok").unwrap();
        assert_eq!(link.output_text(), "> ok\r\n");

        link.clear_output();
        assert!(link.output().is_empty());
    }

    #[test]
    fn flush_increments_counter() {
        let mut link = ScriptedTransport::new();
        link.flush().unwrap();
        link.flush().unwrap();
        assert_eq!(link.flush_count(), 2);
    }
}
