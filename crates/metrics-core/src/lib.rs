//! Core domain types for the Copilot Metrics dashboard.
//!
//! Holds the wire-contract record types, the derived aggregate view types,
//! the shared error enum, display-name formatting, and CLI settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
