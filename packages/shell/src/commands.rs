//! Shell command parsing and execution.
//!
//! Commands (verbs are case-sensitive, words are split on spaces):
//! - `READ <key>` - print the value stored under `key`
//! - `WRITE <key> <value>` - create a record, print its slot address
//! - `FORGET <key>` - tombstone a record
//! - `PRINT` - hex dump of the whole region
//! - `CLEAR` - erase the region
//! - `POKE <addr> <value>` - set one raw byte, both in hex
//! - `HELP` - list the commands
//!
//! Tokens past the ones a verb needs are ignored.

use eekv_byte_store::ByteStore;
use eekv_runtime::format::{format, Arg};
use eekv_runtime::parse::parse_unsigned;
use eekv_runtime::strings;
use eekv_runtime::{FormatError, Tokenizer};
use eekv_store::{DumpLine, KvStore, Poke, StoreError};
use nu_ansi_term::{Color, Style};

const DELIMITERS: &[u8] = b" ";

const POKE_REJECTED: &str = "Address out of range or invalid value.";

/// A parsed command line. Arguments borrow from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Read { key: &'a [u8] },
    Write { key: &'a [u8], value: &'a [u8] },
    Forget { key: &'a [u8] },
    Print,
    Clear,
    Poke { addr: &'a [u8], value: &'a [u8] },
    Help,
}

/// A line that could not be turned into a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// A known verb without the arguments it needs.
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command.")]
    Unknown,
}

/// Parse one input line. A line with no words yields `Ok(None)`.
pub fn parse(line: &[u8]) -> Result<Option<Command<'_>>, CommandError> {
    let mut words = Tokenizer::new(line, DELIMITERS);
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb {
        b"READ" => {
            let key = words.next().ok_or(CommandError::Usage("READ <key>"))?;
            Command::Read { key }
        }
        b"WRITE" => match (words.next(), words.next()) {
            (Some(key), Some(value)) => Command::Write { key, value },
            _ => return Err(CommandError::Usage("WRITE <key> <value>")),
        },
        b"FORGET" => {
            let key = words.next().ok_or(CommandError::Usage("FORGET <key>"))?;
            Command::Forget { key }
        }
        b"PRINT" => Command::Print,
        b"CLEAR" => Command::Clear,
        b"POKE" => match (words.next(), words.next()) {
            (Some(addr), Some(value)) => Command::Poke { addr, value },
            _ => return Err(CommandError::Usage("POKE <addr> <value>")),
        },
        b"HELP" => Command::Help,
        _ => return Err(CommandError::Unknown),
    };
    Ok(Some(command))
}

/// Lines to send back to the operator, without terminators.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<Vec<u8>>,
}

impl Reply {
    pub fn line(line: impl Into<Vec<u8>>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    pub fn text(text: &str) -> Self {
        Self::line(text.as_bytes())
    }

    fn push(&mut self, line: impl Into<Vec<u8>>) {
        self.lines.push(line.into());
    }
}

/// How replies are decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rendering {
    /// Emit ANSI colour (the poked byte in dumps, verbs in help).
    pub color: bool,
}

/// Run `command` against `store` and render the outcome.
///
/// Store failures become reply lines; storage I/O failures are logged as
/// well. Only a formatting failure is returned as an error.
pub fn execute<B: ByteStore>(
    command: Command<'_>,
    store: &mut KvStore<B>,
    rendering: Rendering,
) -> Result<Reply, FormatError> {
    match command {
        Command::Read { key } => match store.read(key) {
            Ok(value) => Ok(Reply::line(value.to_vec())),
            Err(StoreError::NotFound) => Ok(Reply::text("empty")),
            Err(e) => Ok(failure(e)),
        },
        Command::Write { key, value } => match store.write(key, value) {
            Ok(written) => Ok(Reply::line(format(
                "0x%04X",
                &[addr_arg(written.addr.get())],
            )?)),
            Err(e) => Ok(failure(e)),
        },
        Command::Forget { key } => match store.forget(key) {
            Ok(_) => Ok(Reply::text("deleted")),
            Err(e) => Ok(failure(e)),
        },
        Command::Print => match store.dump() {
            Ok(lines) => Ok(Reply {
                lines: render_dump(&lines, None, rendering)?,
            }),
            Err(e) => Ok(failure(e)),
        },
        Command::Clear => match store.clear() {
            Ok(()) => Ok(Reply::text("EEPROM cleared")),
            Err(e) => Ok(failure(e)),
        },
        Command::Poke { addr, value } => poke(store, addr, value, rendering),
        Command::Help => Ok(help(rendering)),
    }
}

fn poke<B: ByteStore>(
    store: &mut KvStore<B>,
    addr: &[u8],
    value: &[u8],
    rendering: Rendering,
) -> Result<Reply, FormatError> {
    let (Some(addr), Some(value)) = (hex_operand(addr), hex_operand(value)) else {
        return Ok(Reply::text(POKE_REJECTED));
    };
    let Ok(value) = u8::try_from(value) else {
        return Ok(Reply::text(POKE_REJECTED));
    };
    let addr = addr as usize;

    let mut reply = match store.poke(addr, value) {
        Ok(Poke::Written) => Reply::text("Value written."),
        Ok(Poke::Unchanged) => Reply::text("Value unchanged."),
        Err(StoreError::OutOfRange { .. }) => return Ok(Reply::text(POKE_REJECTED)),
        Err(e) => return Ok(failure(e)),
    };

    match store.dump() {
        Ok(lines) => {
            for line in render_dump(&lines, Some(addr), rendering)? {
                reply.push(line);
            }
            Ok(reply)
        }
        Err(e) => Ok(failure(e)),
    }
}

/// Most significant hex digits a `u32` can hold.
const MAX_HEX_DIGITS: usize = 8;

/// A whole token of hex digits whose value fits a `u32`, or `None`.
///
/// The parser wraps on overflow, so oversized tokens are rejected here.
fn hex_operand(token: &[u8]) -> Option<u32> {
    if token.is_empty() || !token.iter().all(|c| strings::is_xdigit(*c)) {
        return None;
    }
    let significant =
        strings::first_index_of_none(token, b"0").map_or(0, |start| token.len() - start);
    if significant > MAX_HEX_DIGITS {
        return None;
    }
    parse_unsigned(token, 16).ok()
}

fn failure(err: StoreError) -> Reply {
    if let StoreError::Storage(source) = &err {
        tracing::error!(error = %source, "storage operation failed");
    }
    Reply::line(err.to_string())
}

/// Region addresses always fit the formatter's native width.
fn addr_arg(addr: usize) -> Arg<'static> {
    Arg::Uint(addr as u32)
}

/// Render dump lines as `0xAAAAAAAA: XXXX XXXX ... | ascii`.
///
/// With colour on, the byte at `highlight` is shown in red.
pub fn render_dump(
    lines: &[DumpLine],
    highlight: Option<usize>,
    rendering: Rendering,
) -> Result<Vec<Vec<u8>>, FormatError> {
    let highlight = highlight.filter(|_| rendering.color);
    lines
        .iter()
        .map(|line| render_dump_line(line, highlight))
        .collect()
}

fn render_dump_line(line: &DumpLine, highlight: Option<usize>) -> Result<Vec<u8>, FormatError> {
    let mut out = format("0x%08X: ", &[addr_arg(line.addr)])?;

    for (offset, byte) in line.bytes.iter().enumerate() {
        let hex = format("%02X", &[Arg::Uint(u32::from(*byte))])?;
        if highlight == Some(line.addr + offset) {
            let painted = Color::Red.paint(String::from_utf8_lossy(&hex).into_owned());
            out.extend_from_slice(painted.to_string().as_bytes());
        } else {
            out.extend_from_slice(&hex);
        }
        if offset % 2 == 1 {
            out.push(b' ');
        }
    }

    out.extend_from_slice(b" | ");
    out.extend_from_slice(&line.ascii());
    Ok(out)
}

/// The command list shown by `HELP`.
pub fn help(rendering: Rendering) -> Reply {
    let verb_style = if rendering.color {
        Style::new().bold().fg(Color::Cyan)
    } else {
        Style::new()
    };

    let commands = [
        ("READ", "<key>", "Print the value stored under key"),
        ("WRITE", "<key> <value>", "Store a new record"),
        ("FORGET", "<key>", "Delete a record (slot stays used until CLEAR)"),
        ("PRINT", "", "Hex dump of the region"),
        ("CLEAR", "", "Erase the whole region"),
        ("POKE", "<addr> <value>", "Set one byte, both in hex"),
        ("HELP", "", "Show this list"),
    ];

    let mut reply = Reply::text("Commands:");
    for (verb, args, desc) in commands {
        // Pad outside the paint so escape codes do not eat the width.
        let pad = " ".repeat(8 - verb.len());
        reply.push(format!(
            "  {}{}{:<16}{}",
            verb_style.paint(verb),
            pad,
            args,
            desc
        ));
    }
    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use eekv_byte_store::MemoryByteStore;
    use eekv_store::SlotLayout;

    fn store() -> KvStore<MemoryByteStore> {
        KvStore::new(MemoryByteStore::new(1024), SlotLayout::EEPROM).unwrap()
    }

    fn run(store: &mut KvStore<MemoryByteStore>, line: &str) -> Vec<String> {
        let command = parse(line.as_bytes()).unwrap().unwrap();
        execute(command, store, Rendering::default())
            .unwrap()
            .lines
            .into_iter()
            .map(|l| String::from_utf8(l).unwrap())
            .collect()
    }

    #[test]
    fn parse_verbs() {
        assert_eq!(
            parse(b"WRITE temp 42"),
            Ok(Some(Command::Write {
                key: b"temp",
                value: b"42"
            }))
        );
        assert_eq!(parse(b"READ  temp"), Ok(Some(Command::Read { key: b"temp" })));
        assert_eq!(parse(b"PRINT"), Ok(Some(Command::Print)));
        assert_eq!(parse(b"CLEAR extra words"), Ok(Some(Command::Clear)));
    }

    #[test]
    fn parse_blank_lines() {
        assert_eq!(parse(b""), Ok(None));
        assert_eq!(parse(b"    "), Ok(None));
    }

    #[test]
    fn parse_usage_errors() {
        assert_eq!(parse(b"READ"), Err(CommandError::Usage("READ <key>")));
        assert_eq!(
            parse(b"WRITE onlykey"),
            Err(CommandError::Usage("WRITE <key> <value>"))
        );
        assert_eq!(parse(b"FORGET"), Err(CommandError::Usage("FORGET <key>")));
        assert_eq!(
            CommandError::Usage("READ <key>").to_string(),
            "Usage: READ <key>"
        );
    }

    #[test]
    fn verbs_are_case_sensitive() {
        assert_eq!(parse(b"read temp"), Err(CommandError::Unknown));
        assert_eq!(CommandError::Unknown.to_string(), "Unknown command.");
    }

    #[test]
    fn tab_is_not_a_delimiter() {
        assert_eq!(
            parse(b"READ a\tb"),
            Ok(Some(Command::Read { key: b"a\tb" }))
        );
    }

    #[test]
    fn write_then_read() {
        let mut store = store();
        assert_eq!(run(&mut store, "WRITE temp 42"), ["0x0000"]);
        assert_eq!(run(&mut store, "WRITE hum 51"), ["0x0041"]);
        assert_eq!(run(&mut store, "READ temp"), ["42"]);
        assert_eq!(run(&mut store, "WRITE temp 1"), ["already exists"]);
    }

    #[test]
    fn read_and_forget_missing_keys() {
        let mut store = store();
        assert_eq!(run(&mut store, "READ nope"), ["empty"]);
        assert_eq!(run(&mut store, "FORGET nope"), ["not found"]);
        run(&mut store, "WRITE k v");
        assert_eq!(run(&mut store, "FORGET k"), ["deleted"]);
        assert_eq!(run(&mut store, "READ k"), ["empty"]);
    }

    #[test]
    fn print_renders_region() {
        let mut store = store();
        run(&mut store, "WRITE temp 42");
        let lines = run(&mut store, "PRINT");
        assert_eq!(lines.len(), 64);
        assert_eq!(
            lines[0],
            "0x00000000: 7F74 656D 7000 0000 0000 0000 0000 0000  | .temp..........."
        );
        assert_eq!(
            lines[63],
            "0x000003F0: FFFF FFFF FFFF FFFF FFFF FFFF FFFF FFFF  | ................"
        );
    }

    #[test]
    fn clear_reports() {
        let mut store = store();
        run(&mut store, "WRITE a 1");
        assert_eq!(run(&mut store, "CLEAR"), ["EEPROM cleared"]);
        assert_eq!(run(&mut store, "READ a"), ["empty"]);
    }

    #[test]
    fn poke_writes_and_dumps() {
        let mut store = store();
        let lines = run(&mut store, "POKE 12 41");
        assert_eq!(lines[0], "Value written.");
        assert_eq!(lines.len(), 65);
        assert!(lines[2].starts_with("0x00000010: FFFF 41FF"));

        let lines = run(&mut store, "POKE 12 41");
        assert_eq!(lines[0], "Value unchanged.");
    }

    #[test]
    fn poke_rejects_bad_operands() {
        let mut store = store();
        assert_eq!(run(&mut store, "POKE 400 00"), [POKE_REJECTED]);
        assert_eq!(run(&mut store, "POKE 10 100"), [POKE_REJECTED]);
        assert_eq!(run(&mut store, "POKE xyz 1"), [POKE_REJECTED]);
        assert_eq!(
            parse(b"POKE 10"),
            Err(CommandError::Usage("POKE <addr> <value>"))
        );
    }

    #[test]
    fn poke_operands_do_not_wrap() {
        let mut store = store();
        run(&mut store, "WRITE temp 42");
        let before = store.device().contents().to_vec();

        assert_eq!(run(&mut store, "POKE 100000000 00"), [POKE_REJECTED]);
        assert_eq!(run(&mut store, "POKE 1 100000041"), [POKE_REJECTED]);

        assert_eq!(store.device().contents(), before.as_slice());
        assert_eq!(run(&mut store, "READ temp"), ["42"]);
    }

    #[test]
    fn hex_operand_accepts_leading_zeros() {
        assert_eq!(hex_operand(b"0000000000000041"), Some(0x41));
        assert_eq!(hex_operand(b"FFFFFFFF"), Some(u32::MAX));
        assert_eq!(hex_operand(b"000"), Some(0));
        assert_eq!(hex_operand(b"1FFFFFFFF"), None);
        assert_eq!(hex_operand(b""), None);
    }

    #[test]
    fn highlight_needs_color() {
        let line = DumpLine {
            addr: 0x10,
            bytes: vec![0xAB, 0xCD],
        };
        let plain = render_dump(&[line.clone()], Some(0x11), Rendering { color: false }).unwrap();
        assert_eq!(plain[0], b"0x00000010: ABCD  | ..");

        let colored = render_dump(&[line], Some(0x11), Rendering { color: true }).unwrap();
        let text = String::from_utf8(colored[0].clone()).unwrap();
        assert!(text.contains("AB\x1b[31mCD\x1b[0m "));
    }

    #[test]
    fn help_lists_every_verb() {
        let reply = help(Rendering::default());
        let text: Vec<String> = reply
            .lines
            .iter()
            .map(|l| String::from_utf8_lossy(l).into_owned())
            .collect();
        for verb in ["READ", "WRITE", "FORGET", "PRINT", "CLEAR", "POKE", "HELP"] {
            assert!(text.iter().any(|l| l.trim_start().starts_with(verb)));
        }
    }
}
