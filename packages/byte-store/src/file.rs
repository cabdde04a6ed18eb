//! File-backed byte store.
//!
//! Persists the device image in a regular file so a hosted shell keeps its
//! records between runs.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tempfile::NamedTempFile;

use crate::{check_bounds, ByteStore, ByteStoreError, ERASED};

/// A fixed-size device image stored in a file.
///
/// Every write is followed by `sync_data`, so a write is durable once the
/// call returns. No write is ever buffered across calls.
#[derive(Debug)]
pub struct FileByteStore {
    file: File,
    path: PathBuf,
    capacity: usize,
}

impl FileByteStore {
    /// Open the image at `path`, creating an erased one if it does not exist.
    ///
    /// Missing parent directories are created. An existing file must be
    /// exactly `capacity` bytes long.
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> Result<Self, ByteStoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = if path.exists() {
            let file = OpenOptions::new().read(true).write(true).open(&path)?;
            let actual = file.metadata()?.len();
            if actual != capacity as u64 {
                return Err(ByteStoreError::SizeMismatch {
                    expected: capacity,
                    actual,
                });
            }
            tracing::debug!(path = %path.display(), capacity, "opened device image");
            file
        } else {
            let file = create_erased(&path, capacity)?;
            tracing::info!(path = %path.display(), capacity, "created erased device image");
            file
        };

        Ok(Self {
            file,
            path,
            capacity,
        })
    }

    /// Location of the image file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_at(&mut self, addr: usize, data: &[u8]) -> Result<(), ByteStoreError> {
        self.file.seek(SeekFrom::Start(addr as u64))?;
        self.file.write_all(data)?;
        self.file.sync_data()?;
        Ok(())
    }
}

impl ByteStore for FileByteStore {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn read_byte(&mut self, addr: usize) -> Result<u8, ByteStoreError> {
        let block = self.read_block(addr, 1)?;
        Ok(block[0])
    }

    fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), ByteStoreError> {
        check_bounds(addr, 1, self.capacity)?;
        self.write_at(addr, &[value])
    }

    fn read_block(&mut self, addr: usize, len: usize) -> Result<Bytes, ByteStoreError> {
        check_bounds(addr, len, self.capacity)?;
        let mut buf = vec![0u8; len];
        self.file.seek(SeekFrom::Start(addr as u64))?;
        self.file.read_exact(&mut buf)?;
        Ok(Bytes::from(buf))
    }

    fn write_block(&mut self, addr: usize, data: &[u8]) -> Result<(), ByteStoreError> {
        check_bounds(addr, data.len(), self.capacity)?;
        self.write_at(addr, data)
    }
}

/// Write an erased image next to `path` and rename it into place.
///
/// A failed fill never leaves a short image at `path`; the temporary file
/// is removed when it is dropped.
fn create_erased(path: &Path, capacity: usize) -> Result<File, ByteStoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(&vec![ERASED; capacity])?;
    staged.as_file().sync_all()?;
    let file = staged.persist(path).map_err(|e| e.error)?;
    Ok(file)
}
