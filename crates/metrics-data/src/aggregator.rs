//! Aggregation of usage records into the dashboard's six views.
//!
//! Each view is built in a single linear pass: iterate all records (and,
//! where relevant, their nested breakdown entries) once, maintain a mapping
//! from the grouping key to an accumulator, then project the mapping to an
//! ordered sequence with a fixed per-view sort. Accumulator maps remember
//! first-seen key order, and all sorts are stable, so ties keep insertion
//! order and outputs are reproducible.

use std::collections::{BTreeMap, HashMap, HashSet};

use metrics_core::formatting::{
    acceptance_rate, format_feature_name, format_ide_name, format_language_name,
};
use metrics_core::models::{
    DailyMetrics, FeatureMetrics, GlobalStats, IdeMetrics, LanguageMetrics, UsageRecord,
    UserSummary,
};

// ── Accumulators ──────────────────────────────────────────────────────────────

/// Running per-user totals while scanning the record stream.
#[derive(Debug)]
struct UserAccumulator {
    user_id: u64,
    total_interactions: u64,
    total_code_generated: u64,
    total_code_accepted: u64,
    active_days: u64,
    last_active_day: String,
    /// Frozen at the user's first-seen record; later records never touch it.
    primary_ide: String,
    loc_added: u64,
    loc_suggested: u64,
}

impl UserAccumulator {
    fn new(record: &UsageRecord) -> Self {
        let primary_ide = record
            .totals_by_ide
            .first()
            .map(|ide| format_ide_name(&ide.ide))
            .unwrap_or_else(|| "unknown".to_string());

        let mut acc = Self {
            user_id: record.user_id,
            total_interactions: record.user_initiated_interaction_count,
            total_code_generated: record.code_generation_activity_count,
            total_code_accepted: record.code_acceptance_activity_count,
            active_days: 1,
            last_active_day: record.day.clone(),
            primary_ide,
            loc_added: 0,
            loc_suggested: 0,
        };
        acc.add_loc(record);
        acc
    }

    /// Fold one more record for this user into the running totals.
    /// `active_days` counts records, not distinct days: two records on the
    /// same calendar day count twice.
    fn add_record(&mut self, record: &UsageRecord) {
        self.total_interactions += record.user_initiated_interaction_count;
        self.total_code_generated += record.code_generation_activity_count;
        self.total_code_accepted += record.code_acceptance_activity_count;
        self.active_days += 1;
        if record.day > self.last_active_day {
            self.last_active_day = record.day.clone();
        }
        self.add_loc(record);
    }

    fn add_loc(&mut self, record: &UsageRecord) {
        for ide in &record.totals_by_ide {
            self.loc_added += ide.loc_added_sum;
            self.loc_suggested += ide.loc_suggested_to_add_sum;
        }
    }

    fn into_summary(self, user_login: String) -> UserSummary {
        UserSummary {
            user_login,
            user_id: self.user_id,
            total_interactions: self.total_interactions,
            total_code_generated: self.total_code_generated,
            total_code_accepted: self.total_code_accepted,
            acceptance_rate: acceptance_rate(self.total_code_accepted, self.total_code_generated),
            active_days: self.active_days,
            last_active_day: self.last_active_day,
            primary_ide: self.primary_ide,
            loc_added: self.loc_added,
            loc_suggested: self.loc_suggested,
        }
    }
}

/// Running per-day totals.
#[derive(Debug, Default)]
struct DayAccumulator {
    users: HashSet<String>,
    interactions: u64,
    generated: u64,
    accepted: u64,
}

impl DayAccumulator {
    fn add_record(&mut self, record: &UsageRecord) {
        self.users.insert(record.user_login.clone());
        self.interactions += record.user_initiated_interaction_count;
        self.generated += record.code_generation_activity_count;
        self.accepted += record.code_acceptance_activity_count;
    }
}

/// Running per-feature totals across feature breakdown entries.
#[derive(Debug, Default)]
struct FeatureAccumulator {
    interactions: u64,
    generated: u64,
    accepted: u64,
}

/// Running per-editor totals across editor breakdown entries.
#[derive(Debug, Default)]
struct IdeAccumulator {
    users: HashSet<String>,
    interactions: u64,
    generated: u64,
    accepted: u64,
}

/// Running per-language totals across language breakdown entries.
#[derive(Debug, Default)]
struct LanguageAccumulator {
    generated: u64,
    accepted: u64,
}

// ── MetricsAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that folds a record slice into each aggregate view.
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Per-user summaries, sorted descending by total interactions.
    pub fn users_summary(records: &[UsageRecord]) -> Vec<UserSummary> {
        let mut order: Vec<String> = Vec::new();
        let mut map: HashMap<String, UserAccumulator> = HashMap::new();

        for record in records {
            if let Some(acc) = map.get_mut(&record.user_login) {
                acc.add_record(record);
            } else {
                order.push(record.user_login.clone());
                map.insert(record.user_login.clone(), UserAccumulator::new(record));
            }
        }

        let mut users: Vec<UserSummary> = order
            .into_iter()
            .filter_map(|login| map.remove(&login).map(|acc| acc.into_summary(login)))
            .collect();
        users.sort_by(|a, b| b.total_interactions.cmp(&a.total_interactions));
        users
    }

    /// Per-day metrics, sorted ascending by day string.
    pub fn daily_metrics(records: &[UsageRecord]) -> Vec<DailyMetrics> {
        // BTreeMap keys are ISO date strings, so iteration order is
        // chronological for free.
        let mut map: BTreeMap<String, DayAccumulator> = BTreeMap::new();

        for record in records {
            map.entry(record.day.clone()).or_default().add_record(record);
        }

        map.into_iter()
            .map(|(day, acc)| DailyMetrics {
                day,
                active_users: acc.users.len() as u64,
                total_interactions: acc.interactions,
                total_code_generated: acc.generated,
                total_code_accepted: acc.accepted,
                acceptance_rate: acceptance_rate(acc.accepted, acc.generated),
            })
            .collect()
    }

    /// Per-feature metrics, sorted descending by code generated.
    ///
    /// Accumulation keys on the raw feature identifier; display formatting
    /// is applied when projecting, so two identifiers that format to the
    /// same name stay distinct rows.
    pub fn feature_metrics(records: &[UsageRecord]) -> Vec<FeatureMetrics> {
        let mut order: Vec<String> = Vec::new();
        let mut map: HashMap<String, FeatureAccumulator> = HashMap::new();

        for record in records {
            for feature in &record.totals_by_feature {
                let acc = map.entry(feature.feature.clone()).or_insert_with(|| {
                    order.push(feature.feature.clone());
                    FeatureAccumulator::default()
                });
                acc.interactions += feature.user_initiated_interaction_count;
                acc.generated += feature.code_generation_activity_count;
                acc.accepted += feature.code_acceptance_activity_count;
            }
        }

        let mut features: Vec<FeatureMetrics> = order
            .into_iter()
            .filter_map(|key| {
                map.remove(&key).map(|acc| FeatureMetrics {
                    feature: format_feature_name(&key),
                    interactions: acc.interactions,
                    code_generated: acc.generated,
                    code_accepted: acc.accepted,
                    acceptance_rate: acceptance_rate(acc.accepted, acc.generated),
                })
            })
            .collect();
        features.sort_by(|a, b| b.code_generated.cmp(&a.code_generated));
        features
    }

    /// Per-editor metrics, sorted descending by distinct-user count.
    pub fn ide_metrics(records: &[UsageRecord]) -> Vec<IdeMetrics> {
        let mut order: Vec<String> = Vec::new();
        let mut map: HashMap<String, IdeAccumulator> = HashMap::new();

        for record in records {
            for ide in &record.totals_by_ide {
                let acc = map.entry(ide.ide.clone()).or_insert_with(|| {
                    order.push(ide.ide.clone());
                    IdeAccumulator::default()
                });
                acc.users.insert(record.user_login.clone());
                acc.interactions += ide.user_initiated_interaction_count;
                acc.generated += ide.code_generation_activity_count;
                acc.accepted += ide.code_acceptance_activity_count;
            }
        }

        let mut ides: Vec<IdeMetrics> = order
            .into_iter()
            .filter_map(|key| {
                map.remove(&key).map(|acc| IdeMetrics {
                    ide: format_ide_name(&key),
                    users: acc.users.len() as u64,
                    interactions: acc.interactions,
                    code_generated: acc.generated,
                    code_accepted: acc.accepted,
                })
            })
            .collect();
        ides.sort_by(|a, b| b.users.cmp(&a.users));
        ides
    }

    /// Per-language metrics, sorted descending by code generated.
    pub fn language_metrics(records: &[UsageRecord]) -> Vec<LanguageMetrics> {
        let mut order: Vec<String> = Vec::new();
        let mut map: HashMap<String, LanguageAccumulator> = HashMap::new();

        for record in records {
            for lang in &record.totals_by_language_feature {
                let acc = map.entry(lang.language.clone()).or_insert_with(|| {
                    order.push(lang.language.clone());
                    LanguageAccumulator::default()
                });
                acc.generated += lang.code_generation_activity_count;
                acc.accepted += lang.code_acceptance_activity_count;
            }
        }

        let mut languages: Vec<LanguageMetrics> = order
            .into_iter()
            .filter_map(|key| {
                map.remove(&key).map(|acc| LanguageMetrics {
                    language: format_language_name(&key),
                    code_generated: acc.generated,
                    code_accepted: acc.accepted,
                    acceptance_rate: acceptance_rate(acc.accepted, acc.generated),
                })
            })
            .collect();
        languages.sort_by(|a, b| b.code_generated.cmp(&a.code_generated));
        languages
    }

    /// Whole-dataset totals. The report span is taken from the first
    /// record's declared start/end days, empty when there are no records.
    pub fn global_stats(records: &[UsageRecord]) -> GlobalStats {
        let mut users: HashSet<&str> = HashSet::new();
        let mut interactions = 0u64;
        let mut generated = 0u64;
        let mut accepted = 0u64;
        let mut loc_added = 0u64;
        let mut loc_suggested = 0u64;

        for record in records {
            users.insert(record.user_login.as_str());
            interactions += record.user_initiated_interaction_count;
            generated += record.code_generation_activity_count;
            accepted += record.code_acceptance_activity_count;
            for ide in &record.totals_by_ide {
                loc_added += ide.loc_added_sum;
                loc_suggested += ide.loc_suggested_to_add_sum;
            }
        }

        let first = records.first();

        GlobalStats {
            total_users: users.len() as u64,
            total_interactions: interactions,
            total_code_generated: generated,
            total_code_accepted: accepted,
            average_acceptance_rate: acceptance_rate(accepted, generated),
            report_start_day: first.map(|r| r.report_start_day.clone()).unwrap_or_default(),
            report_end_day: first.map(|r| r.report_end_day.clone()).unwrap_or_default(),
            total_loc_added: loc_added,
            total_loc_suggested: loc_suggested,
        }
    }

    /// The subsequence of `records` belonging to one user, lazily, in
    /// original collection order.
    pub fn records_for_user<'a>(
        records: &'a [UsageRecord],
        login: &'a str,
    ) -> impl Iterator<Item = &'a UsageRecord> {
        records.iter().filter(move |r| r.user_login == login)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
