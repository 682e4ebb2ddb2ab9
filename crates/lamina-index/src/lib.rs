//! Clustering-key indexes for LaminaDB.
//!
//! This crate provides:
//! - The on-disk index entry format shared by both index files
//! - The offline index builder (dense and sparse)
//! - The index loader that materializes in-memory search arrays
//! - Closest-predecessor search primitives over sorted key arrays

mod builder;
mod entry;
mod loader;
mod search;

pub use builder::{sparse_entry_count, IndexBuilder};
pub use entry::IndexEntry;
pub use loader::LoadedIndex;
pub use search::{closest_predecessor, closest_predecessor_linear};
