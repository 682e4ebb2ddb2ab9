//! Index loader: materializes an index file fully in memory.

use crate::entry::IndexEntry;
use bytes::Bytes;
use lamina_common::{LaminaError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// An index loaded fully into memory for the life of a query session.
///
/// The loaded form is split in two, both in on-disk (ascending key)
/// order: a key-only array that searches run against, and the full
/// key+locator entries used to recover a physical position once a search
/// has picked a candidate.
#[derive(Debug, Clone)]
pub struct LoadedIndex {
    keys: Vec<u64>,
    entries: Vec<IndexEntry>,
}

impl LoadedIndex {
    /// Loads an index file, requiring at least `expected_entries` entries.
    ///
    /// A missing file or a file shorter than expected is an error: no
    /// query can proceed without the index.
    pub fn load(path: &Path, expected_entries: u64) -> Result<Self> {
        let mut file = File::open(path)?;

        let expected_bytes = expected_entries * IndexEntry::SIZE as u64;
        let actual_bytes = file.metadata()?.len();
        if actual_bytes < expected_bytes {
            return Err(LaminaError::IndexTruncated {
                expected: expected_bytes,
                actual: actual_bytes,
            });
        }

        let mut raw = vec![0u8; expected_bytes as usize];
        file.read_exact(&mut raw)?;

        let entries = IndexEntry::parse_all(Bytes::from(raw));
        let keys = entries.iter().map(|entry| entry.key).collect();

        log::debug!(
            "loaded index {} ({} entries)",
            path.display(),
            expected_entries
        );

        Ok(Self { keys, entries })
    }

    /// Number of loaded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The key-only array, for search.
    pub fn keys(&self) -> &[u64] {
        &self.keys
    }

    /// The full key+locator entries, for seeking.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// The locator stored at the given position.
    pub fn locator(&self, position: usize) -> u64 {
        self.entries[position].locator
    }
}
