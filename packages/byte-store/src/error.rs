//! Error types for the byte layer.
//!
//! Errors at this level are device-focused. Nothing here knows about slots
//! or keys - "key not found" belongs in the store layer.

/// Errors raised by a [`ByteStore`](crate::ByteStore).
#[derive(Debug, thiserror::Error)]
pub enum ByteStoreError {
    /// The access would touch bytes outside the device.
    #[error("access of {len} byte(s) at {addr:#06x} exceeds capacity {capacity}")]
    OutOfBounds {
        addr: usize,
        len: usize,
        capacity: usize,
    },

    /// An existing image file does not match the requested capacity.
    #[error("image is {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: u64 },

    /// A block write was cut short by simulated power loss.
    ///
    /// Only the first `written` bytes reached the medium.
    #[error("power lost during write at {addr:#06x} after {written} byte(s)")]
    PowerLoss { addr: usize, written: usize },

    /// Underlying file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
