//! Bounded byte buffers.
//!
//! Fixed-capacity storage that never grows past its limit. Writes that do
//! not fit are cut short and say so through [`Fit`], instead of vanishing.

/// Whether a write fit entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Fit {
    /// Every byte was stored.
    Complete,
    /// The buffer filled up and trailing bytes were discarded.
    Truncated,
}

impl Fit {
    pub fn is_truncated(self) -> bool {
        self == Fit::Truncated
    }

    /// Combine two outcomes; truncated if either was.
    pub fn and(self, other: Fit) -> Fit {
        if self.is_truncated() || other.is_truncated() {
            Fit::Truncated
        } else {
            Fit::Complete
        }
    }
}

/// A byte buffer holding at most `limit` bytes.
///
/// A C-style buffer of size `C` with a terminator maps to a `BoundedBuf`
/// with limit `C - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedBuf {
    bytes: Vec<u8>,
    limit: usize,
}

impl BoundedBuf {
    pub fn new(limit: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(limit),
            limit,
        }
    }

    /// Build a buffer from `src`, keeping what fits.
    pub fn from_slice(limit: usize, src: &[u8]) -> (Self, Fit) {
        let mut buf = Self::new(limit);
        let fit = buf.extend_from_slice(src);
        (buf, fit)
    }

    /// Append one byte if there is room.
    pub fn push(&mut self, byte: u8) -> Fit {
        if self.bytes.len() < self.limit {
            self.bytes.push(byte);
            Fit::Complete
        } else {
            Fit::Truncated
        }
    }

    /// Append as much of `src` as fits.
    pub fn extend_from_slice(&mut self, src: &[u8]) -> Fit {
        let room = self.remaining();
        if src.len() <= room {
            self.bytes.extend_from_slice(src);
            Fit::Complete
        } else {
            self.bytes.extend_from_slice(&src[..room]);
            Fit::Truncated
        }
    }

    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.pop()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bytes.len() >= self.limit
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// The contents null-padded to exactly `limit` bytes.
    pub fn to_padded(&self) -> Vec<u8> {
        let mut field = self.bytes.clone();
        field.resize(self.limit, 0);
        field
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}
