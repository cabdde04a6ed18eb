//! Core trait for the byte layer.

use bytes::Bytes;

use crate::ByteStoreError;

/// Byte-addressable non-volatile storage.
///
/// This is the lowest-level storage interface. Addresses run from `0` to
/// `capacity() - 1`; there is no erase granularity and no alignment.
///
/// # Contract
///
/// - A write is durable once the call returns.
/// - A multi-byte `write_block` is NOT atomic: an interruption may leave a
///   prefix of the block written.
/// - There is exactly one caller. Implementations do no locking.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn ByteStore>`.
pub trait ByteStore {
    /// Total number of addressable bytes.
    fn capacity(&self) -> usize;

    /// Read one byte.
    fn read_byte(&mut self, addr: usize) -> Result<u8, ByteStoreError>;

    /// Write one byte.
    fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), ByteStoreError>;

    /// Read `len` bytes starting at `addr`.
    ///
    /// The default implementation reads byte by byte, which is what a
    /// device without a block interface does anyway.
    fn read_block(&mut self, addr: usize, len: usize) -> Result<Bytes, ByteStoreError> {
        crate::check_bounds(addr, len, self.capacity())?;
        let mut out = Vec::with_capacity(len);
        for offset in 0..len {
            out.push(self.read_byte(addr + offset)?);
        }
        Ok(Bytes::from(out))
    }

    /// Write `data` starting at `addr`.
    fn write_block(&mut self, addr: usize, data: &[u8]) -> Result<(), ByteStoreError> {
        crate::check_bounds(addr, data.len(), self.capacity())?;
        for (offset, byte) in data.iter().enumerate() {
            self.write_byte(addr + offset, *byte)?;
        }
        Ok(())
    }
}

// Blanket implementations for references and boxes

impl<T: ByteStore + ?Sized> ByteStore for &mut T {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read_byte(&mut self, addr: usize) -> Result<u8, ByteStoreError> {
        (**self).read_byte(addr)
    }

    fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), ByteStoreError> {
        (**self).write_byte(addr, value)
    }

    fn read_block(&mut self, addr: usize, len: usize) -> Result<Bytes, ByteStoreError> {
        (**self).read_block(addr, len)
    }

    fn write_block(&mut self, addr: usize, data: &[u8]) -> Result<(), ByteStoreError> {
        (**self).write_block(addr, data)
    }
}

impl<T: ByteStore + ?Sized> ByteStore for Box<T> {
    fn capacity(&self) -> usize {
        self.as_ref().capacity()
    }

    fn read_byte(&mut self, addr: usize) -> Result<u8, ByteStoreError> {
        self.as_mut().read_byte(addr)
    }

    fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), ByteStoreError> {
        self.as_mut().write_byte(addr, value)
    }

    fn read_block(&mut self, addr: usize, len: usize) -> Result<Bytes, ByteStoreError> {
        self.as_mut().read_block(addr, len)
    }

    fn write_block(&mut self, addr: usize, data: &[u8]) -> Result<(), ByteStoreError> {
        self.as_mut().write_block(addr, data)
    }
}
