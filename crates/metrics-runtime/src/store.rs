//! Owned metrics state with an explicit load/clear lifecycle.
//!
//! [`MetricsStore`] is the single writer of the record collection. A load
//! either fully replaces the collection or leaves it unchanged; readers only
//! ever observe fully-formed snapshots. The derived snapshot is built on
//! demand and cached until the collection changes.

use std::path::Path;

use metrics_core::models::{
    DailyMetrics, FeatureMetrics, GlobalStats, IdeMetrics, LanguageMetrics, UsageRecord,
    UserSummary,
};
use metrics_data::cache::SessionCache;
use metrics_data::ingest::{fetch_text, parse_records};
use metrics_data::snapshot::{build_snapshot, DashboardSnapshot};
use tracing::{debug, error, warn};

/// Process-wide metrics state: the raw record collection, its derived
/// snapshot, and the loading/error flags surfaced to the UI.
///
/// # Example
/// ```no_run
/// use metrics_data::cache::NoopCache;
/// use metrics_runtime::store::MetricsStore;
///
/// let mut store = MetricsStore::new(Box::new(NoopCache));
/// store.load_from_text(r#"{"day":"2024-01-15","user_login":"alice"}"#);
/// assert!(store.error().is_none());
/// println!("{} users", store.snapshot().users.len());
/// ```
pub struct MetricsStore {
    /// The raw record collection. Single source of truth for every view.
    records: Vec<UsageRecord>,
    /// Cached derived views, dropped whenever `records` changes.
    snapshot: Option<DashboardSnapshot>,
    /// `true` while a load is in flight.
    loading: bool,
    /// Human-readable message of the last failed load, if any.
    error: Option<String>,
    /// Injected session persistence.
    cache: Box<dyn SessionCache>,
}

impl MetricsStore {
    /// Create a store seeded from the session cache. Cache failures silently
    /// degrade to an empty initial state.
    pub fn new(cache: Box<dyn SessionCache>) -> Self {
        let records = cache.read().unwrap_or_default();
        if !records.is_empty() {
            debug!("restored {} records from session cache", records.len());
        }
        Self {
            records,
            snapshot: None,
            loading: false,
            error: None,
            cache,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Fetch the metrics text at `path` and replace the collection with its
    /// parsed records.
    ///
    /// On any failure the collection is left unchanged and the error is
    /// recorded in [`error`](Self::error) for the UI; nothing propagates as
    /// a fatal failure.
    pub async fn load(&mut self, path: &Path) {
        self.loading = true;
        self.error = None;

        match fetch_text(path).await {
            Ok(text) => self.ingest_text(&text),
            Err(e) => self.record_error(e.to_string()),
        }

        self.loading = false;
    }

    /// Replace the collection with records parsed from `text` (file-upload
    /// path). Same failure semantics as [`load`](Self::load).
    pub fn load_from_text(&mut self, text: &str) {
        self.loading = true;
        self.error = None;

        self.ingest_text(text);

        self.loading = false;
    }

    /// Drop all records, the cached snapshot, any error state, and the
    /// session cache entry.
    pub fn clear(&mut self) {
        self.records.clear();
        self.snapshot = None;
        self.error = None;
        if let Err(e) = self.cache.clear() {
            warn!("failed to clear session cache: {}", e);
        }
    }

    // ── Read accessors ────────────────────────────────────────────────────

    /// The raw record collection, in parse order.
    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    /// Whether the store currently holds any records.
    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }

    /// `true` while a load is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Human-readable message of the last failed load, or `None`.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The derived dashboard snapshot, built on demand and cached until the
    /// collection changes.
    pub fn snapshot(&mut self) -> &DashboardSnapshot {
        if self.snapshot.is_none() {
            debug!("rebuilding dashboard snapshot");
        }
        self.snapshot
            .get_or_insert_with(|| build_snapshot(&self.records))
    }

    /// Per-user summaries, descending by total interactions.
    pub fn users_summary(&mut self) -> &[UserSummary] {
        &self.snapshot().users
    }

    /// Per-day metrics, ascending by day.
    pub fn daily_metrics(&mut self) -> &[DailyMetrics] {
        &self.snapshot().daily
    }

    /// Per-feature metrics, descending by code generated.
    pub fn feature_metrics(&mut self) -> &[FeatureMetrics] {
        &self.snapshot().features
    }

    /// Per-editor metrics, descending by distinct-user count.
    pub fn ide_metrics(&mut self) -> &[IdeMetrics] {
        &self.snapshot().ides
    }

    /// Per-language metrics, descending by code generated.
    pub fn language_metrics(&mut self) -> &[LanguageMetrics] {
        &self.snapshot().languages
    }

    /// Whole-dataset totals.
    pub fn global_stats(&mut self) -> &GlobalStats {
        &self.snapshot().global
    }

    /// All records belonging to `login`, in original collection order.
    pub fn user_metrics(&self, login: &str) -> Vec<UsageRecord> {
        metrics_data::aggregator::MetricsAggregator::records_for_user(&self.records, login)
            .cloned()
            .collect()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Parse `text` and, on success, atomically replace the collection and
    /// persist it to the session cache. A cache write failure is logged and
    /// swallowed.
    fn ingest_text(&mut self, text: &str) {
        match parse_records(text) {
            Ok(records) => {
                self.records = records;
                self.snapshot = None;
                if let Err(e) = self.cache.write(&self.records) {
                    warn!("failed to persist session cache: {}", e);
                }
            }
            Err(e) => self.record_error(e.to_string()),
        }
    }

    fn record_error(&mut self, message: String) {
        error!("metrics load failed: {}", message);
        self.error = Some(message);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
