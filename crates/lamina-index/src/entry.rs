//! On-disk index entry format.

use bytes::{Buf, BufMut, Bytes, BytesMut};

/// A single index entry.
///
/// Entry format on disk (16 bytes, little-endian):
/// - key: 8 bytes (primary key value)
/// - locator: 8 bytes (row ordinal in the dense index, row byte offset in
///   the sparse index)
///
/// Entries are stored in ascending key order, the same order as the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// Primary key value of the indexed row.
    pub key: u64,
    /// Position reference: row ordinal (dense) or byte offset (sparse).
    pub locator: u64,
}

impl IndexEntry {
    /// Size of one encoded entry in bytes.
    pub const SIZE: usize = 16;

    /// Creates a new index entry.
    pub fn new(key: u64, locator: u64) -> Self {
        Self { key, locator }
    }

    /// Appends the encoded entry to a buffer.
    pub fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u64_le(self.key);
        buf.put_u64_le(self.locator);
    }

    /// Parses all complete entries from a memory buffer, preserving order.
    pub fn parse_all(mut data: Bytes) -> Vec<IndexEntry> {
        let mut entries = Vec::with_capacity(data.remaining() / Self::SIZE);
        while data.remaining() >= Self::SIZE {
            let key = data.get_u64_le();
            let locator = data.get_u64_le();
            entries.push(IndexEntry { key, locator });
        }
        entries
    }
}
