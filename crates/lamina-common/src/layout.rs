//! Row and block geometry for the clustered table file.
//!
//! The data file is row-major: `row_count` rows of `col_count` 64-bit
//! little-endian values, column 0 being the primary key. All translation
//! between row ordinals, block indexes, and byte offsets goes through the
//! named accessors here.

use crate::error::{LaminaError, Result};

/// Width of one stored value in bytes (64-bit words).
pub const WORD_BYTES: usize = 8;

/// Byte layout of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    col_count: usize,
}

impl RowLayout {
    /// Creates a row layout, rejecting zero columns.
    pub fn new(col_count: usize) -> Result<Self> {
        if col_count == 0 {
            return Err(LaminaError::InvalidParameter {
                name: "col_count".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(Self { col_count })
    }

    /// Number of columns per row.
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// Width of one row in bytes.
    pub fn row_bytes(&self) -> usize {
        self.col_count * WORD_BYTES
    }

    /// Byte offset of the row with the given ordinal.
    pub fn row_offset(&self, ordinal: u64) -> u64 {
        ordinal * self.row_bytes() as u64
    }

    /// Total byte size of a table with the given row count.
    pub fn table_bytes(&self, row_count: u64) -> u64 {
        self.row_offset(row_count)
    }

    /// Decodes the primary key (column 0) from an encoded row.
    pub fn key_of(&self, row: &[u8]) -> u64 {
        u64::from_le_bytes([
            row[0], row[1], row[2], row[3], row[4], row[5], row[6], row[7],
        ])
    }
}

/// Block geometry: how rows group into fixed-size I/O transfers.
///
/// Block `k` covers rows `[k*B, k*B+B)`; the final block may be partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGeometry {
    rows_per_block: usize,
    row_bytes: usize,
}

impl BlockGeometry {
    /// Creates a block geometry, rejecting zero rows per block.
    pub fn new(layout: &RowLayout, rows_per_block: usize) -> Result<Self> {
        if rows_per_block == 0 {
            return Err(LaminaError::InvalidParameter {
                name: "rows_per_block".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(Self {
            rows_per_block,
            row_bytes: layout.row_bytes(),
        })
    }

    /// Rows per full block.
    pub fn rows_per_block(&self) -> usize {
        self.rows_per_block
    }

    /// Width of one full block in bytes.
    pub fn block_bytes(&self) -> usize {
        self.rows_per_block * self.row_bytes
    }

    /// Number of blocks covering `row_count` rows (final block may be
    /// partial).
    pub fn block_count(&self, row_count: u64) -> u64 {
        let per_block = self.rows_per_block as u64;
        (row_count + per_block - 1) / per_block
    }

    /// Index of the block containing the row with the given ordinal.
    pub fn block_of_row(&self, ordinal: u64) -> u64 {
        ordinal / self.rows_per_block as u64
    }

    /// Index of the block containing the given byte offset.
    pub fn block_of_offset(&self, offset: u64) -> u64 {
        offset / self.block_bytes() as u64
    }

    /// Byte offset where the given block starts.
    pub fn block_offset(&self, block: u64) -> u64 {
        block * self.block_bytes() as u64
    }

    /// Number of valid rows in the given block, accounting for a partial
    /// final block. Returns 0 for blocks past the end of the table.
    pub fn rows_in_block(&self, block: u64, row_count: u64) -> usize {
        let start = block * self.rows_per_block as u64;
        if start >= row_count {
            return 0;
        }
        let remaining = row_count - start;
        remaining.min(self.rows_per_block as u64) as usize
    }
}
