//! eekv-byte-store: Byte-Addressable Storage
//!
//! This is the bottom of the eekv stack. Everything at this level is pure
//! bytes - no slots, no markers, no keys. A `ByteStore` is a flat array of
//! non-volatile bytes addressed from zero.
//!
//! Backings:
//! - [`MemoryByteStore`] - an erased (`0xFF`) array in RAM, with fault
//!   injection hooks for tests
//! - [`FileByteStore`] - a fixed-size image file, synced after every write
//!
//! # Example
//!
//! ```rust
//! use eekv_byte_store::{ByteStore, MemoryByteStore};
//!
//! let mut store = MemoryByteStore::new(1024);
//! assert_eq!(store.read_byte(0).unwrap(), 0xFF);
//!
//! store.write_block(16, b"hello").unwrap();
//! assert_eq!(&store.read_block(16, 5).unwrap()[..], b"hello");
//! ```

pub use bytes::Bytes;

mod error;
mod file;
mod memory;
mod traits;

pub use error::ByteStoreError;
pub use file::FileByteStore;
pub use memory::MemoryByteStore;
pub use traits::ByteStore;

/// Value of an erased byte.
pub const ERASED: u8 = 0xFF;

/// Validate that `len` bytes starting at `addr` fit in `capacity`.
pub(crate) fn check_bounds(addr: usize, len: usize, capacity: usize) -> Result<(), ByteStoreError> {
    match addr.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(ByteStoreError::OutOfBounds {
            addr,
            len,
            capacity,
        }),
    }
}
