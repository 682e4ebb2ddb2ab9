//! The four range-count strategies.
//!
//! All four share one contract: inclusive `[from, to]` bounds in, the
//! number of rows whose primary key falls in the range out, identical
//! results guaranteed. They differ only in how they compute the block
//! span handed to the shared ranged scan, which is where their I/O cost
//! profiles diverge.

use crate::scan::BlockSpan;
use crate::session::QuerySession;
use lamina_common::Result;
use lamina_index::closest_predecessor;

impl QuerySession {
    /// Full scan: one row per I/O, from the first row until a key exceeds
    /// `to`.
    pub fn count_range_scan(&self, from: u64, to: u64) -> Result<u64> {
        if from > to {
            return Ok(0);
        }
        let span = BlockSpan {
            first: 0,
            last: self.row_count() - 1,
        };
        self.count_span(self.row_geometry(), span, from, to)
    }

    /// Blocked scan: whole blocks per I/O, from the first block until a
    /// key exceeds `to`.
    pub fn count_range_blocked(&self, from: u64, to: u64) -> Result<u64> {
        if from > to {
            return Ok(0);
        }
        let geometry = self.block_geometry();
        let span = BlockSpan {
            first: 0,
            last: geometry.block_count(self.row_count()) - 1,
        };
        self.count_span(geometry, span, from, to)
    }

    /// Dense-index seek: predecessor searches over the dense key array
    /// pick the row ordinals bounding the candidates; only the block span
    /// containing them is read.
    pub fn count_range_dense(&self, from: u64, to: u64) -> Result<u64> {
        if from > to {
            return Ok(0);
        }
        let dense = self.dense_index();
        let keys = dense.keys();
        let geometry = self.block_geometry();

        // No key at or below `to`: the range lies before the table.
        let Some(end) = closest_predecessor(keys, to) else {
            return Ok(0);
        };
        let last = geometry.block_of_row(dense.locator(end));

        // Lower bound via the last key strictly below `from`, so a
        // duplicate run of `from` is never entered mid-run. No such key
        // means `from` precedes the table: start at block 0.
        let first = match lower_bound_position(keys, from) {
            Some(position) => geometry.block_of_row(dense.locator(position)),
            None => 0,
        };

        self.count_span(geometry, BlockSpan { first, last }, from, to)
    }

    /// Sparse-index seek: predecessor searches over the sparse key array
    /// bound the candidates to within one sampling stride; the block span
    /// derives from the entries' byte-offset locators rather than row
    /// ordinals.
    pub fn count_range_sparse(&self, from: u64, to: u64) -> Result<u64> {
        if from > to {
            return Ok(0);
        }
        let sparse = self.sparse_index();
        let keys = sparse.keys();
        let geometry = self.block_geometry();

        // No sampled key at or below `to`: `to` precedes the table's
        // first row, which the sparse index always samples.
        let Some(end) = closest_predecessor(keys, to) else {
            return Ok(0);
        };

        // Start at the latest entry strictly below `from`; with none,
        // fall back to the first entry (offset 0).
        let start_offset = match lower_bound_position(keys, from) {
            Some(position) => sparse.locator(position),
            None => 0,
        };

        // The sample after `end` is the first position known to exceed
        // `to`; the row just before it is the last possible candidate.
        let bound_offset = match sparse.entries().get(end + 1) {
            Some(entry) => entry.locator,
            None => self.layout().table_bytes(self.row_count()),
        };
        let last_candidate = bound_offset - self.layout().row_bytes() as u64;

        let span = BlockSpan {
            first: geometry.block_of_offset(start_offset),
            last: geometry.block_of_offset(last_candidate),
        };
        self.count_span(geometry, span, from, to)
    }
}

/// Position of the greatest key strictly below `from`, if any.
fn lower_bound_position(keys: &[u64], from: u64) -> Option<usize> {
    from.checked_sub(1)
        .and_then(|bound| closest_predecessor(keys, bound))
}
