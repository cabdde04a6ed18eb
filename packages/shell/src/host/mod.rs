//! Transports the `eekv` binary can serve a session over.
//!
//! - [`serial`] - a tty device configured raw 8N1 at a fixed bit rate
//! - [`console`] - the process's own stdin/stdout, in raw mode when stdin is
//!   a terminal

pub mod console;
pub mod serial;

pub use console::{Console, RawMode};
pub use serial::open_serial;
