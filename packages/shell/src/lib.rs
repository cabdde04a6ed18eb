//! # eekv-shell
//!
//! A line-oriented command shell over an [`eekv_store::KvStore`], meant to
//! be driven from a dumb serial terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Serve stdin/stdout, image in the default data directory
//! eekv
//!
//! # Serve a serial line against a specific image
//! eekv --device /dev/ttyUSB0 --baud 115200 --store board.bin
//!
//! # Inside the shell:
//! > WRITE temp 42
//! 0x0000
//! > READ temp
//! 42
//! > FORGET temp
//! deleted
//! ```

pub mod commands;
pub mod config;
mod error;
pub mod host;
pub mod shell;

use std::io::{self, IsTerminal};
use std::os::unix::io::AsRawFd;

use eekv_byte_store::FileByteStore;
use eekv_runtime::StreamTransport;
use eekv_store::KvStore;

pub use commands::{Command, CommandError, Rendering, Reply};
pub use config::ShellConfig;
pub use error::ShellError;
pub use shell::{ExitReason, Shell};

/// Open the image named by `config` and serve a session until the
/// transport closes.
pub fn run(config: &ShellConfig) -> Result<ExitReason, ShellError> {
    let device = FileByteStore::open(&config.store, config.layout.region_size)?;
    let store = KvStore::new(device, config.layout)?;
    tracing::info!(
        image = %config.store.display(),
        slots = config.layout.slot_count(),
        "store opened"
    );

    let rendering = Rendering {
        color: config.color,
    };
    let mut shell = Shell::new(store, config.line_capacity, rendering);

    if let Some(path) = &config.device {
        let mut serial = host::open_serial(path, config.baud)?;
        return shell.run(&mut serial);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        let _raw = host::RawMode::enable(stdin.as_raw_fd()).map_err(ShellError::Terminal)?;
        let mut console = host::Console::new(StreamTransport::new(stdin, io::stdout()));
        shell.run(&mut console)
    } else {
        let mut piped = StreamTransport::new(stdin, io::stdout());
        shell.run(&mut piped)
    }
}
