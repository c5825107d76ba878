//! Runtime state layer for the Copilot Metrics dashboard.
//!
//! Owns the raw record collection and its load/clear lifecycle, caches the
//! derived dashboard snapshot, and exposes the loading/error state the
//! presentation layer reads.

pub mod store;

pub use metrics_core as core;
pub use metrics_data as data;
