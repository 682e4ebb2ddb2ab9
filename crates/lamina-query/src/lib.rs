//! Query engine for LaminaDB.
//!
//! This crate provides:
//! - The per-table query session owning the data file handle and both
//!   loaded indexes
//! - The unified ranged block scan all strategies share
//! - The four range-count strategies: full scan, blocked scan,
//!   dense-index seek, and sparse-index seek
//! - The verification harness that cross-checks the four strategies

mod scan;
mod session;
mod strategies;
mod verify;

pub use session::QuerySession;
pub use verify::{verify_range_queries, Mismatch, StrategyCounts, VerificationReport};
