//! Data ingestion and row-level cleaning layer.

pub mod clean;
pub mod loader;
pub mod record;
pub mod summary;

pub use record::{Dataset, Record, MISSING_SENTINEL};
