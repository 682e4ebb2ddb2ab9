//! Configuration structures for LaminaDB.

use crate::error::{LaminaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of rows transferred per block I/O.
pub const DEFAULT_ROWS_PER_BLOCK: usize = 400;

/// Default sparse index sampling stride (one entry every N rows).
pub const DEFAULT_SPARSE_STRIDE: u64 = 10;

/// Identity of a clustered table: the file base name plus its dimensions.
///
/// The three values come from a small text descriptor file (base name,
/// row count, column count on separate lines). All on-disk file names
/// derive from the base name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Path skeleton for the table's files (everything before the dot).
    pub base: PathBuf,
    /// Total number of rows in the table.
    pub row_count: u64,
    /// Number of 64-bit columns per row. Column 0 is the primary key.
    pub col_count: usize,
}

impl TableSpec {
    /// Creates a table spec, rejecting empty dimensions.
    pub fn new(base: impl Into<PathBuf>, row_count: u64, col_count: usize) -> Result<Self> {
        let spec = Self {
            base: base.into(),
            row_count,
            col_count,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Re-checks the dimension invariants. `new` enforces them already;
    /// the builder and the query session re-check so a hand-assembled
    /// spec cannot reach a build or a query with empty dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.row_count == 0 {
            return Err(LaminaError::InvalidParameter {
                name: "row_count".to_string(),
                value: "0".to_string(),
            });
        }
        if self.col_count == 0 {
            return Err(LaminaError::InvalidParameter {
                name: "col_count".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Parses a descriptor file: base name, row count, and column count,
    /// one per line.
    pub fn from_descriptor(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut fields = text.split_whitespace();

        let base = fields
            .next()
            .ok_or_else(|| LaminaError::MalformedDescriptor("missing base name".to_string()))?;
        let row_count = fields
            .next()
            .ok_or_else(|| LaminaError::MalformedDescriptor("missing row count".to_string()))?
            .parse::<u64>()
            .map_err(|e| LaminaError::MalformedDescriptor(format!("row count: {e}")))?;
        let col_count = fields
            .next()
            .ok_or_else(|| LaminaError::MalformedDescriptor("missing column count".to_string()))?
            .parse::<usize>()
            .map_err(|e| LaminaError::MalformedDescriptor(format!("column count: {e}")))?;

        if let Some(extra) = fields.next() {
            return Err(LaminaError::MalformedDescriptor(format!(
                "unexpected trailing field: {extra}"
            )));
        }

        Self::new(base, row_count, col_count)
    }

    /// Path of the data file (`<base>.data`).
    pub fn data_path(&self) -> PathBuf {
        self.path_with_extension("data")
    }

    /// Path of the dense index file (`<base>.dense_index`).
    pub fn dense_index_path(&self) -> PathBuf {
        self.path_with_extension("dense_index")
    }

    /// Path of the sparse index file (`<base>.sparse_index`).
    pub fn sparse_index_path(&self) -> PathBuf {
        self.path_with_extension("sparse_index")
    }

    fn path_with_extension(&self, extension: &str) -> PathBuf {
        let mut path = self.base.clone().into_os_string();
        path.push(".");
        path.push(extension);
        PathBuf::from(path)
    }
}

/// Configuration for the offline index builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Rows read per block I/O during the dense build.
    pub rows_per_block: usize,
    /// Sparse sampling stride: one entry per `sparse_stride` rows.
    pub sparse_stride: u64,
    /// Enable fsync after writing each index file.
    pub fsync_enabled: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            rows_per_block: DEFAULT_ROWS_PER_BLOCK,
            sparse_stride: DEFAULT_SPARSE_STRIDE,
            fsync_enabled: true,
        }
    }
}

impl BuildConfig {
    /// Rejects zero block size or stride.
    pub fn validate(&self) -> Result<()> {
        validate_tuning(self.rows_per_block, self.sparse_stride)
    }
}

/// Configuration for a query session.
///
/// `sparse_stride` must match the value the sparse index was built with;
/// it determines the expected entry count at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Rows read per block I/O by the blocked and index-seek strategies.
    pub rows_per_block: usize,
    /// Sampling stride the sparse index was built with.
    pub sparse_stride: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            rows_per_block: DEFAULT_ROWS_PER_BLOCK,
            sparse_stride: DEFAULT_SPARSE_STRIDE,
        }
    }
}

impl QueryConfig {
    /// Rejects zero block size or stride.
    pub fn validate(&self) -> Result<()> {
        validate_tuning(self.rows_per_block, self.sparse_stride)
    }
}

fn validate_tuning(rows_per_block: usize, sparse_stride: u64) -> Result<()> {
    if rows_per_block == 0 {
        return Err(LaminaError::InvalidParameter {
            name: "rows_per_block".to_string(),
            value: "0".to_string(),
        });
    }
    if sparse_stride == 0 {
        return Err(LaminaError::InvalidParameter {
            name: "sparse_stride".to_string(),
            value: "0".to_string(),
        });
    }
    Ok(())
}
