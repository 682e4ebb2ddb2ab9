//! Offline builder for the dense and sparse clustering-key index files.
//!
//! Both builds read the data file once with positioned reads, accumulate
//! the entries in one owned buffer, and write the index file in a single
//! transfer at the end. Rebuilding from the same data file is
//! byte-for-byte deterministic.

use crate::entry::IndexEntry;
use bytes::BytesMut;
use lamina_common::{BlockGeometry, BuildConfig, Result, RowLayout, TableSpec};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Number of entries a sparse index holds for the given dimensions:
/// `ceil(row_count / stride)`.
pub fn sparse_entry_count(row_count: u64, stride: u64) -> u64 {
    (row_count + stride - 1) / stride
}

/// Builds the dense and sparse index files for one table.
///
/// Building is an offline, one-shot step that runs before any query
/// session; errors here are fatal to the build, never retried.
pub struct IndexBuilder {
    spec: TableSpec,
    config: BuildConfig,
    layout: RowLayout,
    geometry: BlockGeometry,
}

impl IndexBuilder {
    /// Creates a builder, validating the spec and tuning parameters.
    pub fn new(spec: TableSpec, config: BuildConfig) -> Result<Self> {
        spec.validate()?;
        config.validate()?;
        let layout = RowLayout::new(spec.col_count)?;
        let geometry = BlockGeometry::new(&layout, config.rows_per_block)?;

        Ok(Self {
            spec,
            config,
            layout,
            geometry,
        })
    }

    /// Builds both index files.
    pub fn build_all(&self) -> Result<()> {
        self.build_dense()?;
        self.build_sparse()?;
        Ok(())
    }

    /// Builds the dense index: one `(key, row ordinal)` entry per table
    /// row, in table order. Returns the number of entries written.
    pub fn build_dense(&self) -> Result<u64> {
        let mut data = File::open(self.spec.data_path())?;
        let row_count = self.spec.row_count;
        let row_bytes = self.layout.row_bytes();

        let mut entries = Vec::with_capacity(row_count as usize);
        let mut block_buf = vec![0u8; self.geometry.block_bytes()];

        for block in 0..self.geometry.block_count(row_count) {
            let rows = self.geometry.rows_in_block(block, row_count);
            let buf = &mut block_buf[..rows * row_bytes];
            data.seek(SeekFrom::Start(self.geometry.block_offset(block)))?;
            data.read_exact(buf)?;

            // Ordinals derive from block index plus within-block position,
            // so a partial final block cannot drift the numbering.
            let first_ordinal = block * self.geometry.rows_per_block() as u64;
            for row in 0..rows {
                let key = self.layout.key_of(&buf[row * row_bytes..]);
                entries.push(IndexEntry::new(key, first_ordinal + row as u64));
            }
        }

        let path = self.spec.dense_index_path();
        self.write_index_file(&path, &entries)?;
        log::info!(
            "dense index built: {} entries -> {}",
            entries.len(),
            path.display()
        );
        Ok(entries.len() as u64)
    }

    /// Builds the sparse index: one `(key, row byte offset)` entry for
    /// every `sparse_stride`-th row. Returns the number of entries
    /// written.
    pub fn build_sparse(&self) -> Result<u64> {
        let mut data = File::open(self.spec.data_path())?;
        let stride = self.config.sparse_stride;
        let expected = sparse_entry_count(self.spec.row_count, stride);

        let mut entries = Vec::with_capacity(expected as usize);
        let mut row_buf = vec![0u8; self.layout.row_bytes()];

        let mut ordinal = 0u64;
        while ordinal < self.spec.row_count {
            let offset = self.layout.row_offset(ordinal);
            data.seek(SeekFrom::Start(offset))?;
            data.read_exact(&mut row_buf)?;
            entries.push(IndexEntry::new(self.layout.key_of(&row_buf), offset));
            ordinal += stride;
        }

        let path = self.spec.sparse_index_path();
        self.write_index_file(&path, &entries)?;
        log::info!(
            "sparse index built: {} entries (stride {}) -> {}",
            entries.len(),
            stride,
            path.display()
        );
        Ok(entries.len() as u64)
    }

    /// Encodes the accumulated entries and writes them in one transfer,
    /// overwriting any previous index file.
    fn write_index_file(&self, path: &Path, entries: &[IndexEntry]) -> Result<()> {
        let mut buf = BytesMut::with_capacity(entries.len() * IndexEntry::SIZE);
        for entry in entries {
            entry.encode_into(&mut buf);
        }

        let mut file = File::create(path)?;
        file.write_all(&buf)?;
        if self.config.fsync_enabled {
            file.sync_all()?;
        }
        Ok(())
    }
}
