//! The ranged block scan shared by all four query strategies.

use crate::session::QuerySession;
use lamina_common::{BlockGeometry, Result};

/// Inclusive range of block indexes to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockSpan {
    pub first: u64,
    pub last: u64,
}

impl QuerySession {
    /// Counts rows with key in `[from, to]` across the span's blocks.
    ///
    /// One positioned read per block, with the final (possibly partial)
    /// block sized exactly. Keys are scanned within the in-memory block;
    /// the first key above `to` ends the whole scan, since the table is
    /// key-ascending and nothing later can match.
    pub(crate) fn count_span(
        &self,
        geometry: &BlockGeometry,
        span: BlockSpan,
        from: u64,
        to: u64,
    ) -> Result<u64> {
        let row_count = self.row_count();
        let row_bytes = self.layout().row_bytes();
        let mut block_buf = vec![0u8; geometry.block_bytes()];
        let mut matches = 0u64;

        for block in span.first..=span.last {
            let rows = geometry.rows_in_block(block, row_count);
            if rows == 0 {
                break;
            }

            let buf = &mut block_buf[..rows * row_bytes];
            self.read_at(geometry.block_offset(block), buf)?;

            for row in 0..rows {
                let key = self.layout().key_of(&buf[row * row_bytes..]);
                if key > to {
                    return Ok(matches);
                }
                if key >= from {
                    matches += 1;
                }
            }
        }

        Ok(matches)
    }
}
