//! # eekv-store
//!
//! A durable key-value store laid directly over a [`ByteStore`]. The region
//! is cut into fixed-width slots, each a marker byte followed by a key field
//! and a value field. There is no index and no free list: every operation
//! scans the slots in address order.
//!
//! Slot lifecycle:
//!
//! ```text
//!          WRITE              FORGET
//!   free ---------> valid -----------> tombstoned
//!    ^                                     |
//!    +-------------- CLEAR ----------------+
//! ```
//!
//! Tombstoned slots are not free. Deleted records keep their payload and
//! their slot until the whole region is wiped.
//!
//! ## Example
//!
//! ```rust
//! use eekv_byte_store::MemoryByteStore;
//! use eekv_store::{KvStore, SlotAddr, SlotLayout, StoreError};
//!
//! let device = MemoryByteStore::new(1024);
//! let mut store = KvStore::new(device, SlotLayout::EEPROM).unwrap();
//!
//! let written = store.write(b"temp", b"42").unwrap();
//! assert_eq!(written.addr, SlotAddr(0));
//! assert_eq!(&store.read(b"temp").unwrap()[..], b"42");
//!
//! assert!(matches!(store.write(b"temp", b"43"), Err(StoreError::AlreadyExists)));
//! ```
//!
//! [`ByteStore`]: eekv_byte_store::ByteStore

pub mod dump;
mod error;
pub mod layout;
mod store;

pub use dump::{DumpLine, DUMP_WIDTH};
pub use error::StoreError;
pub use layout::{SlotAddr, SlotLayout, SlotState};
pub use store::{KvStore, Poke, Written};
