//! Query session: the per-table context every strategy runs against.

use lamina_common::{BlockGeometry, QueryConfig, Result, RowLayout, TableSpec};
use lamina_index::{sparse_entry_count, LoadedIndex};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

/// A query session over one clustered table.
///
/// Opened once per battery of queries: loads both indexes fully into
/// memory, opens the data file, and holds everything for the session's
/// lifetime. Nothing here mutates after open, so a session can be shared
/// read-only across concurrent query evaluations; the data file handle is
/// mutex-guarded for its seek position. All resources are released on
/// drop.
pub struct QuerySession {
    spec: TableSpec,
    layout: RowLayout,
    /// One row per transfer: the full-scan I/O granularity.
    row_geometry: BlockGeometry,
    /// `rows_per_block` rows per transfer: every other strategy's
    /// granularity.
    block_geometry: BlockGeometry,
    data: Mutex<File>,
    dense: LoadedIndex,
    sparse: LoadedIndex,
}

impl QuerySession {
    /// Opens a session: validates the configuration, loads the dense and
    /// sparse indexes, and opens the data file.
    ///
    /// `config.sparse_stride` must match the stride the sparse index was
    /// built with; the expected entry counts are derived from it and a
    /// shorter index file fails the load.
    pub fn open(spec: TableSpec, config: QueryConfig) -> Result<Self> {
        spec.validate()?;
        config.validate()?;
        let layout = RowLayout::new(spec.col_count)?;
        let row_geometry = BlockGeometry::new(&layout, 1)?;
        let block_geometry = BlockGeometry::new(&layout, config.rows_per_block)?;

        let dense = LoadedIndex::load(&spec.dense_index_path(), spec.row_count)?;
        let sparse = LoadedIndex::load(
            &spec.sparse_index_path(),
            sparse_entry_count(spec.row_count, config.sparse_stride),
        )?;
        let data = Mutex::new(File::open(spec.data_path())?);

        log::debug!(
            "query session open: {} ({} rows, {} dense / {} sparse entries)",
            spec.base.display(),
            spec.row_count,
            dense.len(),
            sparse.len()
        );

        Ok(Self {
            spec,
            layout,
            row_geometry,
            block_geometry,
            data,
            dense,
            sparse,
        })
    }

    /// The table spec this session serves.
    pub fn spec(&self) -> &TableSpec {
        &self.spec
    }

    /// Total number of rows in the table.
    pub fn row_count(&self) -> u64 {
        self.spec.row_count
    }

    /// The table's row layout.
    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    /// Single-row I/O geometry (full scan).
    pub(crate) fn row_geometry(&self) -> &BlockGeometry {
        &self.row_geometry
    }

    /// Block I/O geometry (blocked scan and both index seeks).
    pub fn block_geometry(&self) -> &BlockGeometry {
        &self.block_geometry
    }

    /// The loaded dense index.
    pub fn dense_index(&self) -> &LoadedIndex {
        &self.dense
    }

    /// The loaded sparse index.
    pub fn sparse_index(&self) -> &LoadedIndex {
        &self.sparse
    }

    /// Positioned read from the data file into the caller's buffer.
    pub(crate) fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let mut data = self.data.lock();
        data.seek(SeekFrom::Start(offset))?;
        data.read_exact(buf)?;
        Ok(())
    }
}
