//! NDJSON ingestion for Copilot usage exports.
//!
//! A metrics export is one self-contained JSON record per line. Parsing is
//! all-or-nothing: the first malformed line aborts the whole load so a
//! partially ingested collection can never be observed.

use std::path::Path;

use metrics_core::error::{MetricsError, Result};
use metrics_core::models::UsageRecord;
use tracing::debug;

/// Parse NDJSON text into an ordered sequence of [`UsageRecord`]s.
///
/// Blank lines are discarded before anything else. Fails with
/// [`MetricsError::EmptyInput`] when nothing remains, and with
/// [`MetricsError::LineParse`] on the first line that is not valid JSON.
/// Line numbers are 1-indexed positions among the non-blank lines.
pub fn parse_records(text: &str) -> Result<Vec<UsageRecord>> {
    let lines: Vec<&str> = text
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(MetricsError::EmptyInput);
    }

    let mut records = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let record: UsageRecord = serde_json::from_str(line)
            .map_err(|_| MetricsError::LineParse { line: index + 1 })?;
        records.push(record);
    }

    debug!("parsed {} usage records", records.len());
    Ok(records)
}

/// Read the raw metrics text from `path`.
///
/// A single non-cancelable read with no timeout, retry, or in-flight
/// deduplication. Failures map to [`MetricsError::Fetch`] with the
/// underlying error text in the message.
pub async fn fetch_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| MetricsError::Fetch(e.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
