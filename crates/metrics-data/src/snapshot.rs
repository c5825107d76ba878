//! Dashboard snapshot construction.
//!
//! Runs all six reduction passes over an immutable record slice and bundles
//! the results for the presentation layer. A snapshot is a pure function of
//! its input; the runtime caches it and rebuilds only when the underlying
//! collection changes.

use chrono::Utc;
use metrics_core::models::{
    DailyMetrics, FeatureMetrics, GlobalStats, IdeMetrics, LanguageMetrics, UsageRecord,
    UserSummary,
};

use crate::aggregator::MetricsAggregator;

/// Metadata produced alongside a snapshot.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SnapshotMetadata {
    /// ISO-8601 timestamp when this snapshot was built.
    pub generated_at: String,
    /// Number of raw records the snapshot was built from.
    pub records_count: usize,
    /// Distinct user logins in the dataset.
    pub distinct_users: u64,
    /// Wall-clock seconds spent running the reduction passes.
    pub build_time_seconds: f64,
}

/// All six aggregate views plus metadata, built from one record collection.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub users: Vec<UserSummary>,
    pub daily: Vec<DailyMetrics>,
    pub features: Vec<FeatureMetrics>,
    pub ides: Vec<IdeMetrics>,
    pub languages: Vec<LanguageMetrics>,
    pub global: GlobalStats,
    pub metadata: SnapshotMetadata,
}

/// Build a [`DashboardSnapshot`] from `records`.
///
/// Each view is an independent linear reduction over the same input; no view
/// holds state of its own.
pub fn build_snapshot(records: &[UsageRecord]) -> DashboardSnapshot {
    let build_start = std::time::Instant::now();

    let users = MetricsAggregator::users_summary(records);
    let daily = MetricsAggregator::daily_metrics(records);
    let features = MetricsAggregator::feature_metrics(records);
    let ides = MetricsAggregator::ide_metrics(records);
    let languages = MetricsAggregator::language_metrics(records);
    let global = MetricsAggregator::global_stats(records);

    let metadata = SnapshotMetadata {
        generated_at: Utc::now().to_rfc3339(),
        records_count: records.len(),
        distinct_users: global.total_users,
        build_time_seconds: build_start.elapsed().as_secs_f64(),
    };

    DashboardSnapshot {
        users,
        daily,
        features,
        ides,
        languages,
        global,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::parse_records;

    fn sample_text() -> String {
        [
            serde_json::json!({
                "report_start_day": "2024-01-01",
                "report_end_day": "2024-01-31",
                "day": "2024-01-15",
                "user_login": "alice",
                "user_initiated_interaction_count": 10,
                "code_generation_activity_count": 5,
                "code_acceptance_activity_count": 2,
                "totals_by_ide": [{"ide": "vscode", "loc_added_sum": 3, "loc_suggested_to_add_sum": 6}],
                "totals_by_feature": [{"feature": "code_completion", "code_generation_activity_count": 5}],
                "totals_by_language_feature": [{"language": "rust", "feature": "code_completion", "code_generation_activity_count": 5}],
            }),
            serde_json::json!({
                "day": "2024-01-16",
                "user_login": "bob",
                "user_initiated_interaction_count": 4,
                "code_generation_activity_count": 2,
                "code_acceptance_activity_count": 1,
            }),
        ]
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n")
    }

    #[test]
    fn test_snapshot_populates_all_views() {
        let records = parse_records(&sample_text()).unwrap();
        let snapshot = build_snapshot(&records);

        assert_eq!(snapshot.users.len(), 2);
        assert_eq!(snapshot.daily.len(), 2);
        assert_eq!(snapshot.features.len(), 1);
        assert_eq!(snapshot.ides.len(), 1);
        assert_eq!(snapshot.languages.len(), 1);
        assert_eq!(snapshot.global.total_users, 2);
    }

    #[test]
    fn test_snapshot_metadata() {
        let records = parse_records(&sample_text()).unwrap();
        let snapshot = build_snapshot(&records);

        assert_eq!(snapshot.metadata.records_count, 2);
        assert_eq!(snapshot.metadata.distinct_users, 2);
        assert!(!snapshot.metadata.generated_at.is_empty());
        assert!(snapshot.metadata.build_time_seconds >= 0.0);
    }

    #[test]
    fn test_snapshot_empty_records() {
        let snapshot = build_snapshot(&[]);
        assert!(snapshot.users.is_empty());
        assert!(snapshot.daily.is_empty());
        assert_eq!(snapshot.global.total_users, 0);
        assert_eq!(snapshot.metadata.records_count, 0);
    }

    #[test]
    fn test_snapshot_idempotent_over_same_input() {
        // Two loads of the same text yield structurally identical views.
        let records_a = parse_records(&sample_text()).unwrap();
        let records_b = parse_records(&sample_text()).unwrap();
        let a = build_snapshot(&records_a);
        let b = build_snapshot(&records_b);

        let users_a: Vec<(&str, u64)> = a
            .users
            .iter()
            .map(|u| (u.user_login.as_str(), u.total_interactions))
            .collect();
        let users_b: Vec<(&str, u64)> = b
            .users
            .iter()
            .map(|u| (u.user_login.as_str(), u.total_interactions))
            .collect();
        assert_eq!(users_a, users_b);

        let days_a: Vec<&str> = a.daily.iter().map(|d| d.day.as_str()).collect();
        let days_b: Vec<&str> = b.daily.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days_a, days_b);

        assert_eq!(a.global.total_interactions, b.global.total_interactions);
        assert_eq!(a.global.total_loc_added, b.global.total_loc_added);
    }
}
