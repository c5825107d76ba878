//! Terminal UI layer for the Copilot Metrics dashboard.
//!
//! Provides themes, table views for each aggregate, and the application
//! event loop built on top of [`ratatui`] for rendering the dashboard in the
//! terminal.

pub mod app;
pub mod table_view;
pub mod themes;

pub use metrics_core as core;
