//! Transport-independent shell loop.
//!
//! The loop talks to its operator only through the [`Transport`] trait, so
//! the same code serves a serial device, a terminal or a scripted test.

use eekv_byte_store::ByteStore;
use eekv_runtime::line::{clear_line, LineEditor};
use eekv_runtime::{Transport, TransportError};
use eekv_store::KvStore;

use crate::commands::{self, Rendering};
use crate::ShellError;

const BANNER: &[u8] = b"EEPROM Key-Value Store";
const PROMPT: &[u8] = b"> ";

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The transport reported end of input.
    Closed,
}

/// Read-tokenize-dispatch loop over one store.
#[derive(Debug)]
pub struct Shell<B> {
    store: KvStore<B>,
    editor: LineEditor,
    rendering: Rendering,
}

impl<B: ByteStore> Shell<B> {
    /// `line_capacity` is the input buffer size; lines hold one byte less.
    pub fn new(store: KvStore<B>, line_capacity: usize, rendering: Rendering) -> Self {
        Self {
            store,
            editor: LineEditor::new(line_capacity),
            rendering,
        }
    }

    pub fn store(&self) -> &KvStore<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut KvStore<B> {
        &mut self.store
    }

    pub fn into_store(self) -> KvStore<B> {
        self.store
    }

    /// Serve commands until the transport closes.
    pub fn run<T: Transport + ?Sized>(&mut self, io: &mut T) -> Result<ExitReason, ShellError> {
        io.put_line(BANNER)?;

        loop {
            io.write_all(PROMPT)?;
            io.flush()?;

            let read = match self.editor.read_line(io) {
                Ok(read) => read,
                Err(TransportError::Closed) => {
                    tracing::info!("transport closed, ending session");
                    return Ok(ExitReason::Closed);
                }
                Err(e) => return Err(e.into()),
            };
            let line = read.line;

            let command = match commands::parse(line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    io.put_line(e.to_string().as_bytes())?;
                    clear_line(io, line.len())?;
                    io.flush()?;
                    continue;
                }
            };

            tracing::debug!(?command, "dispatch");
            let reply = commands::execute(command, &mut self.store, self.rendering)?;
            for reply_line in &reply.lines {
                io.put_line(reply_line)?;
            }
            clear_line(io, line.len())?;
            io.flush()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eekv_byte_store::MemoryByteStore;
    use eekv_runtime::ScriptedTransport;
    use eekv_store::SlotLayout;

    fn shell() -> Shell<MemoryByteStore> {
        let store = KvStore::new(MemoryByteStore::new(1024), SlotLayout::EEPROM).unwrap();
        Shell::new(store, 72, Rendering::default())
    }

    #[test]
    fn banner_and_prompt() {
        let mut io = ScriptedTransport::new();
        let reason = shell().run(&mut io).unwrap();

        assert_eq!(reason, ExitReason::Closed);
        assert_eq!(io.output_text(), "EEPROM Key-Value Store\r\n> ");
    }

    #[test]
    fn command_reply_then_line_erase() {
        let mut io = ScriptedTransport::new();
        io.queue_line("READ k");
        shell().run(&mut io).unwrap();

        assert_eq!(
            io.output_text(),
            "EEPROM Key-Value Store\r\n> READ k\r\nempty\r\n\r      \r> "
        );
    }

    #[test]
    fn empty_line_gets_a_fresh_prompt_only() {
        let mut io = ScriptedTransport::new();
        io.queue_line("");
        shell().run(&mut io).unwrap();

        assert_eq!(io.output_text(), "EEPROM Key-Value Store\r\n> \r\n> ");
    }

    #[test]
    fn unknown_and_usage() {
        let mut io = ScriptedTransport::new();
        io.queue_lines(["FROB", "WRITE k"]);
        shell().run(&mut io).unwrap();

        let out = io.output_text();
        assert!(out.contains("Unknown command.\r\n"));
        assert!(out.contains("Usage: WRITE <key> <value>\r\n"));
    }

    #[test]
    fn flushes_every_prompt() {
        let mut io = ScriptedTransport::new();
        io.queue_lines(["HELP", "PRINT"]);
        shell().run(&mut io).unwrap();
        assert!(io.flush_count() >= 3);
    }

    #[test]
    fn store_survives_the_session() {
        let mut io = ScriptedTransport::new();
        io.queue_line("WRITE temp 42");
        let mut shell = shell();
        shell.run(&mut io).unwrap();

        assert_eq!(&shell.store_mut().read(b"temp").unwrap()[..], b"42");
        assert_eq!(shell.store().device().contents()[0], 0x7F);

        let mut store = shell.into_store();
        assert_eq!(&store.read(b"temp").unwrap()[..], b"42");
    }
}
