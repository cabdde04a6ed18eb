//! On-device slot layout.
//!
//! ```text
//! addr = index * slot_size
//! +--------+----------------------+----------------------+
//! | marker | key (key_size bytes) | value (value_size)   |
//! +--------+----------------------+----------------------+
//! ```
//!
//! Key and value are null-padded. A field that is exactly full has no
//! terminator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker of an erased slot, available for writing.
pub const MARKER_FREE: u8 = 0xFF;
/// Marker of a live record.
pub const MARKER_VALID: u8 = 0x7F;
/// Marker of a deleted record. Not free until the next wipe.
pub const MARKER_TOMBSTONE: u8 = 0x00;

/// Byte address of a slot's marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotAddr(pub usize);

impl SlotAddr {
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06X}", self.0)
    }
}

/// State of a slot as encoded by its marker byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Free,
    Valid,
    Tombstoned,
    /// Any other marker. Neither matched nor reused until a wipe.
    Corrupt(u8),
}

impl SlotState {
    pub fn from_marker(marker: u8) -> Self {
        match marker {
            MARKER_FREE => SlotState::Free,
            MARKER_VALID => SlotState::Valid,
            MARKER_TOMBSTONE => SlotState::Tombstoned,
            other => SlotState::Corrupt(other),
        }
    }
}

/// Geometry of the slot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLayout {
    /// Bytes of the device used for the table, starting at address 0.
    pub region_size: usize,
    pub key_size: usize,
    pub value_size: usize,
}

impl SlotLayout {
    /// 1 KiB EEPROM with 32-byte keys and values: 65-byte slots, 15 of them.
    pub const EEPROM: SlotLayout = SlotLayout {
        region_size: 1024,
        key_size: 32,
        value_size: 32,
    };

    pub const fn slot_size(&self) -> usize {
        1 + self.key_size + self.value_size
    }

    /// Number of whole slots in the region. Trailing bytes are never used
    /// for records.
    pub const fn slot_count(&self) -> usize {
        self.region_size / self.slot_size()
    }

    /// Address of slot `index`, if it lies wholly inside the region.
    pub fn slot_addr(&self, index: usize) -> Option<SlotAddr> {
        let addr = index.checked_mul(self.slot_size())?;
        (addr + self.slot_size() <= self.region_size).then_some(SlotAddr(addr))
    }

    /// Every slot address, ascending.
    pub fn slots(&self) -> impl Iterator<Item = SlotAddr> {
        let step = self.slot_size();
        (0..self.slot_count()).map(move |index| SlotAddr(index * step))
    }

    pub(crate) const fn key_offset(&self) -> usize {
        1
    }

    pub(crate) const fn value_offset(&self) -> usize {
        1 + self.key_size
    }
}

impl Default for SlotLayout {
    fn default() -> Self {
        SlotLayout::EEPROM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eeprom_profile_geometry() {
        let layout = SlotLayout::EEPROM;
        assert_eq!(layout.slot_size(), 65);
        assert_eq!(layout.slot_count(), 15);
        assert_eq!(layout.slot_addr(1), Some(SlotAddr(0x41)));
        assert_eq!(layout.slot_addr(14), Some(SlotAddr(910)));
        assert_eq!(layout.slot_addr(15), None);
    }

    #[test]
    fn slots_are_ascending_and_whole() {
        let layout = SlotLayout {
            region_size: 20,
            key_size: 2,
            value_size: 3,
        };
        let addrs: Vec<usize> = layout.slots().map(SlotAddr::get).collect();
        assert_eq!(addrs, vec![0, 6, 12]);
    }

    #[test]
    fn marker_states() {
        assert_eq!(SlotState::from_marker(0xFF), SlotState::Free);
        assert_eq!(SlotState::from_marker(0x7F), SlotState::Valid);
        assert_eq!(SlotState::from_marker(0x00), SlotState::Tombstoned);
        assert_eq!(SlotState::from_marker(0xAA), SlotState::Corrupt(0xAA));
    }

    #[test]
    fn slot_addr_display() {
        assert_eq!(SlotAddr(0x41).to_string(), "0x0041");
    }

    #[test]
    fn layout_from_json() {
        let layout: SlotLayout =
            serde_json::from_str(r#"{"region_size": 256, "key_size": 8, "value_size": 16}"#)
                .unwrap();
        assert_eq!(layout.slot_size(), 25);
        assert_eq!(layout.slot_count(), 10);
    }
}
