use std::io;
use std::path::PathBuf;

use eekv_byte_store::ByteStoreError;
use eekv_runtime::{FormatError, TransportError};
use eekv_store::StoreError;

/// Errors that end a shell session or stop it from starting.
///
/// Store outcomes such as "not found" never get here; they are answers
/// shown to the operator.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("failed to open image: {0}")]
    Storage(#[from] ByteStoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to read config {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot open serial device {path}: {source}")]
    Serial { path: PathBuf, source: io::Error },

    #[error("unsupported baud rate {0}")]
    UnsupportedBaud(u32),

    #[error("terminal setup failed: {0}")]
    Terminal(io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_closed_is_transparent() {
        let err: ShellError = TransportError::Closed.into();
        assert_eq!(err.to_string(), "transport closed");
    }

    #[test]
    fn baud_message() {
        assert_eq!(
            ShellError::UnsupportedBaud(12345).to_string(),
            "unsupported baud rate 12345"
        );
    }
}
