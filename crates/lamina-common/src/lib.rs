//! LaminaDB common types, errors, and table geometry.
//!
//! This crate provides shared definitions used across all LaminaDB
//! components.

pub mod config;
pub mod error;
pub mod layout;

pub use config::{BuildConfig, QueryConfig, TableSpec};
pub use error::{LaminaError, Result};
pub use layout::{BlockGeometry, RowLayout, WORD_BYTES};
