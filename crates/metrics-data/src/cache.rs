//! Session-scoped persistence of the raw record collection.
//!
//! The cache is a convenience, not a correctness requirement: every failure
//! path degrades to "no cached data" and is logged rather than surfaced.
//! The store receives the cache as an injected trait object so persistence
//! can be swapped out or disabled in tests.

use std::path::{Path, PathBuf};

use metrics_core::error::{MetricsError, Result};
use metrics_core::models::UsageRecord;
use tracing::{debug, warn};

/// Fixed identifier the record collection is cached under.
pub const CACHE_KEY: &str = "copilot-metrics-data";

/// Key-value persistence for the record collection.
pub trait SessionCache {
    /// Read the cached collection. `None` on any miss or failure.
    fn read(&self) -> Option<Vec<UsageRecord>>;
    /// Persist the collection, replacing any previous value.
    fn write(&self, records: &[UsageRecord]) -> Result<()>;
    /// Drop the cached collection if present.
    fn clear(&self) -> Result<()>;
}

// ── FileCache ─────────────────────────────────────────────────────────────────

/// JSON-document cache stored on disk under a fixed key.
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    /// Cache rooted at `dir`; the document lives at `<dir>/<CACHE_KEY>.json`.
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{CACHE_KEY}.json")),
        }
    }

    /// Default cache directory: `~/.copilot-metrics/cache/`.
    pub fn default_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".copilot-metrics").join("cache")
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionCache for FileCache {
    fn read(&self) -> Option<Vec<UsageRecord>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("no cached session data at {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!("discarding unreadable session cache: {}", e);
                None
            }
        }
    }

    fn write(&self, records: &[UsageRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| MetricsError::Cache(e.to_string()))?;
        }

        let json = serde_json::to_string(records)?;

        // Write to a temp file then rename for atomicity.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &json).map_err(|e| MetricsError::Cache(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| MetricsError::Cache(e.to_string()))?;

        debug!("cached {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| MetricsError::Cache(e.to_string()))?;
        }
        Ok(())
    }
}

// ── NoopCache ─────────────────────────────────────────────────────────────────

/// Cache that stores nothing. Used when persistence is disabled and in tests.
pub struct NoopCache;

impl SessionCache for NoopCache {
    fn read(&self) -> Option<Vec<UsageRecord>> {
        None
    }

    fn write(&self, _records: &[UsageRecord]) -> Result<()> {
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_records() -> Vec<UsageRecord> {
        let line = serde_json::json!({
            "day": "2024-01-15",
            "user_login": "alice",
            "user_initiated_interaction_count": 10,
        })
        .to_string();
        vec![serde_json::from_str(&line).unwrap()]
    }

    // ── FileCache ─────────────────────────────────────────────────────────

    #[test]
    fn test_file_cache_round_trip() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());

        cache.write(&sample_records()).unwrap();
        let loaded = cache.read().expect("cache should hit");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].user_login, "alice");
        assert_eq!(loaded[0].user_initiated_interaction_count, 10);
    }

    #[test]
    fn test_file_cache_uses_fixed_key() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());
        assert!(cache
            .path()
            .to_string_lossy()
            .ends_with("copilot-metrics-data.json"));
    }

    #[test]
    fn test_file_cache_miss_returns_none() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());
        assert!(cache.read().is_none());
    }

    #[test]
    fn test_file_cache_corrupt_document_returns_none() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());
        std::fs::write(cache.path(), "{not json").unwrap();
        assert!(cache.read().is_none());
    }

    #[test]
    fn test_file_cache_write_replaces_previous() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());

        cache.write(&sample_records()).unwrap();
        cache.write(&[]).unwrap();
        let loaded = cache.read().expect("cache should hit");
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_file_cache_clear() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());

        cache.write(&sample_records()).unwrap();
        cache.clear().unwrap();
        assert!(cache.read().is_none());

        // Clearing an already-empty cache is fine.
        cache.clear().unwrap();
    }

    #[test]
    fn test_file_cache_creates_missing_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let cache = FileCache::new(&nested);
        cache.write(&sample_records()).unwrap();
        assert!(cache.read().is_some());
    }

    // ── NoopCache ─────────────────────────────────────────────────────────

    #[test]
    fn test_noop_cache_never_hits() {
        let cache = NoopCache;
        cache.write(&sample_records()).unwrap();
        assert!(cache.read().is_none());
        cache.clear().unwrap();
    }
}
