//! In-memory byte store.
//!
//! Simulates an EEPROM-style device in RAM for tests and scripted sessions.

use bytes::Bytes;

use crate::{check_bounds, ByteStore, ByteStoreError, ERASED};

/// Pattern written by [`MemoryByteStore::inject_corruption`].
pub const CORRUPTION_PATTERN: u8 = 0xAA;

/// An in-memory byte store, initially fully erased (`0xFF`).
///
/// Supports fault injection for testing how upper layers cope with damaged
/// media:
/// - [`inject_corruption`](Self::inject_corruption) overwrites a span with a
///   fixed pattern
/// - [`simulate_power_loss`](Self::simulate_power_loss) makes the next block
///   write stop halfway
///
/// # Example
///
/// ```
/// use eekv_byte_store::{ByteStore, MemoryByteStore};
///
/// let mut store = MemoryByteStore::new(64);
/// store.write_byte(0, 0x7F).unwrap();
/// assert_eq!(store.contents()[0], 0x7F);
/// assert_eq!(store.write_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryByteStore {
    cells: Vec<u8>,
    power_loss: bool,
    write_count: u64,
}

impl MemoryByteStore {
    /// Create an erased store of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: vec![ERASED; capacity],
            power_loss: false,
            write_count: 0,
        }
    }

    /// Create a store holding an existing image.
    pub fn from_image(image: Vec<u8>) -> Self {
        Self {
            cells: image,
            power_loss: false,
            write_count: 0,
        }
    }

    /// The full device contents (for test verification).
    pub fn contents(&self) -> &[u8] {
        &self.cells
    }

    /// Overwrite `len` bytes at `addr` with [`CORRUPTION_PATTERN`].
    ///
    /// Out-of-range bytes are ignored.
    pub fn inject_corruption(&mut self, addr: usize, len: usize) {
        let end = addr.saturating_add(len).min(self.cells.len());
        if addr < end {
            self.cells[addr..end].fill(CORRUPTION_PATTERN);
        }
    }

    /// Make the next block write store only its first half.
    pub fn simulate_power_loss(&mut self) {
        self.power_loss = true;
    }

    /// Number of write calls that reached the medium.
    pub fn write_count(&self) -> u64 {
        self.write_count
    }
}

impl ByteStore for MemoryByteStore {
    fn capacity(&self) -> usize {
        self.cells.len()
    }

    fn read_byte(&mut self, addr: usize) -> Result<u8, ByteStoreError> {
        check_bounds(addr, 1, self.cells.len())?;
        Ok(self.cells[addr])
    }

    fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), ByteStoreError> {
        check_bounds(addr, 1, self.cells.len())?;
        self.cells[addr] = value;
        self.write_count += 1;
        Ok(())
    }

    fn read_block(&mut self, addr: usize, len: usize) -> Result<Bytes, ByteStoreError> {
        check_bounds(addr, len, self.cells.len())?;
        Ok(Bytes::copy_from_slice(&self.cells[addr..addr + len]))
    }

    fn write_block(&mut self, addr: usize, data: &[u8]) -> Result<(), ByteStoreError> {
        check_bounds(addr, data.len(), self.cells.len())?;
        self.write_count += 1;

        if self.power_loss {
            self.power_loss = false;
            let written = data.len() / 2;
            self.cells[addr..addr + written].copy_from_slice(&data[..written]);
            tracing::debug!(addr, written, "simulated power loss");
            return Err(ByteStoreError::PowerLoss { addr, written });
        }

        self.cells[addr..addr + data.len()].copy_from_slice(data);
        Ok(())
    }
}
