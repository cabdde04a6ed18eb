//! The slot-table store.

use std::cmp::Ordering;

use eekv_byte_store::{ByteStore, Bytes, ERASED};
use eekv_runtime::buffer::{BoundedBuf, Fit};
use eekv_runtime::strings;

use crate::dump::{self, DumpLine};
use crate::layout::{SlotAddr, SlotLayout, SlotState, MARKER_TOMBSTONE, MARKER_VALID};
use crate::StoreError;

/// Result of a successful [`KvStore::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Written {
    pub addr: SlotAddr,
    /// Whether the key was cut to fit its field.
    pub key_fit: Fit,
    /// Whether the value was cut to fit its field.
    pub value_fit: Fit,
}

impl Written {
    pub fn is_truncated(&self) -> bool {
        self.key_fit.is_truncated() || self.value_fit.is_truncated()
    }
}

/// Result of a successful [`KvStore::poke`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poke {
    Written,
    /// The byte already held the value; nothing was written.
    Unchanged,
}

/// Key-value store over a fixed slot table.
///
/// Every lookup is a linear scan from address 0 in slot-size strides.
/// Records are never moved or overwritten in place:
///
/// - `write` claims the first free slot and fails if the key exists
/// - `forget` flips the marker to a tombstone and leaves the payload
/// - only `clear` turns slots (tombstones included) back into free ones
///
/// Each slot is one contiguous span, so a write interrupted part way can
/// damage only the slot being written.
#[derive(Debug)]
pub struct KvStore<B> {
    device: B,
    layout: SlotLayout,
}

impl<B: ByteStore> KvStore<B> {
    /// Wrap `device` with `layout`. The region must fit the device.
    pub fn new(device: B, layout: SlotLayout) -> Result<Self, StoreError> {
        let capacity = device.capacity();
        if layout.region_size > capacity {
            return Err(StoreError::RegionTooLarge {
                region: layout.region_size,
                capacity,
            });
        }
        Ok(Self { device, layout })
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    pub fn device(&self) -> &B {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut B {
        &mut self.device
    }

    pub fn into_device(self) -> B {
        self.device
    }

    /// First valid slot holding `key`.
    ///
    /// Keys compare as C strings truncated to the key field, so a key
    /// longer than the field finds the record it was truncated into.
    pub fn find_key(&mut self, key: &[u8]) -> Result<Option<SlotAddr>, StoreError> {
        let (wanted, _) = BoundedBuf::from_slice(self.layout.key_size, strings::cstr(key));

        for slot in self.layout.slots() {
            if self.device.read_byte(slot.get())? != MARKER_VALID {
                continue;
            }
            let stored = self
                .device
                .read_block(slot.get() + self.layout.key_offset(), self.layout.key_size)?;
            if strings::compare(&stored, wanted.as_bytes()) == Ordering::Equal {
                return Ok(Some(slot));
            }
        }
        Ok(None)
    }

    /// First slot whose marker is erased.
    pub fn find_free_slot(&mut self) -> Result<Option<SlotAddr>, StoreError> {
        for slot in self.layout.slots() {
            if self.device.read_byte(slot.get())? == ERASED {
                return Ok(Some(slot));
            }
        }
        Ok(None)
    }

    /// Value stored under `key`, up to its first null.
    pub fn read(&mut self, key: &[u8]) -> Result<Bytes, StoreError> {
        let slot = self.find_key(key)?.ok_or(StoreError::NotFound)?;
        let field = self
            .device
            .read_block(slot.get() + self.layout.value_offset(), self.layout.value_size)?;
        let len = strings::length(&field);
        Ok(field.slice(..len))
    }

    /// Create a record. An existing key is never overwritten.
    ///
    /// The marker goes down first, then the key field, then the value
    /// field. Oversized input is truncated; the returned [`Written`] says so.
    pub fn write(&mut self, key: &[u8], value: &[u8]) -> Result<Written, StoreError> {
        if self.find_key(key)?.is_some() {
            return Err(StoreError::AlreadyExists);
        }
        let slot = self.find_free_slot()?.ok_or(StoreError::NoSpace)?;

        let (key_field, key_fit) =
            BoundedBuf::from_slice(self.layout.key_size, strings::cstr(key));
        let (value_field, value_fit) =
            BoundedBuf::from_slice(self.layout.value_size, strings::cstr(value));

        self.device.write_byte(slot.get(), MARKER_VALID)?;
        self.device
            .write_block(slot.get() + self.layout.key_offset(), &key_field.to_padded())?;
        self.device.write_block(
            slot.get() + self.layout.value_offset(),
            &value_field.to_padded(),
        )?;

        let written = Written {
            addr: slot,
            key_fit,
            value_fit,
        };
        if written.is_truncated() {
            tracing::warn!(
                %slot,
                key_truncated = key_fit.is_truncated(),
                value_truncated = value_fit.is_truncated(),
                "record input truncated to fit slot"
            );
        }
        tracing::debug!(%slot, "record created");
        Ok(written)
    }

    /// Tombstone the record holding `key`.
    ///
    /// Only the marker changes; key and value bytes stay on the device
    /// until the next [`clear`](Self::clear).
    pub fn forget(&mut self, key: &[u8]) -> Result<SlotAddr, StoreError> {
        let slot = self.find_key(key)?.ok_or(StoreError::NotFound)?;
        self.device.write_byte(slot.get(), MARKER_TOMBSTONE)?;
        tracing::debug!(%slot, "record tombstoned");
        Ok(slot)
    }

    /// Erase every byte of the region to `0xFF`.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.device
            .write_block(0, &vec![ERASED; self.layout.region_size])?;
        tracing::debug!(bytes = self.layout.region_size, "region wiped");
        Ok(())
    }

    /// The whole region as 16-byte dump lines.
    pub fn dump(&mut self) -> Result<Vec<DumpLine>, StoreError> {
        let image = self.device.read_block(0, self.layout.region_size)?;
        Ok(dump::lines(&image))
    }

    /// Set one raw byte of the region.
    pub fn poke(&mut self, addr: usize, value: u8) -> Result<Poke, StoreError> {
        if addr >= self.layout.region_size {
            return Err(StoreError::OutOfRange { addr });
        }
        if self.device.read_byte(addr)? == value {
            return Ok(Poke::Unchanged);
        }
        self.device.write_byte(addr, value)?;
        tracing::debug!(addr, value, "byte poked");
        Ok(Poke::Written)
    }

    /// Marker state of every slot, in scan order.
    pub fn slot_states(&mut self) -> Result<Vec<(SlotAddr, SlotState)>, StoreError> {
        self.layout
            .slots()
            .map(|slot| {
                let marker = self.device.read_byte(slot.get())?;
                Ok((slot, SlotState::from_marker(marker)))
            })
            .collect()
    }
}
