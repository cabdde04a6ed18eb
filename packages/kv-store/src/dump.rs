//! Hex dump of the raw region.

use eekv_runtime::strings::is_print;

/// Bytes shown per dump line.
pub const DUMP_WIDTH: usize = 16;

/// One 16-byte-aligned span of the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpLine {
    pub addr: usize,
    /// Up to [`DUMP_WIDTH`] bytes; shorter only for a region whose size is
    /// not a multiple of the width.
    pub bytes: Vec<u8>,
}

impl DumpLine {
    /// The ASCII column: printable bytes as-is, everything else as `.`.
    pub fn ascii(&self) -> Vec<u8> {
        self.bytes
            .iter()
            .map(|b| if is_print(*b) { *b } else { b'.' })
            .collect()
    }

    /// Whether `addr` falls on this line.
    pub fn covers(&self, addr: usize) -> bool {
        (self.addr..self.addr + self.bytes.len()).contains(&addr)
    }
}

/// Split a region image into dump lines.
pub(crate) fn lines(image: &[u8]) -> Vec<DumpLine> {
    image
        .chunks(DUMP_WIDTH)
        .enumerate()
        .map(|(index, chunk)| DumpLine {
            addr: index * DUMP_WIDTH,
            bytes: chunk.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_column_masks_unprintable() {
        let line = DumpLine {
            addr: 0,
            bytes: vec![0x7F, b't', b'e', 0x00, b'~', 0xFF],
        };
        assert_eq!(line.ascii(), b".te.~.");
    }

    #[test]
    fn lines_are_aligned() {
        let image: Vec<u8> = (0..40).collect();
        let lines = lines(&image);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].addr, 16);
        assert_eq!(lines[1].bytes[0], 16);
        assert_eq!(lines[2].bytes.len(), 8);
        assert!(lines[2].covers(39));
        assert!(!lines[2].covers(40));
    }
}
