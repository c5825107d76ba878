use serde::{Deserialize, Serialize};

/// One usage observation for a single user on a single day, parsed from one
/// NDJSON line of a Copilot metrics export.
///
/// Unknown extra fields on the wire are ignored. Breakdown collections that
/// are missing from a line deserialize as empty; `totals_by_language_model`
/// may be entirely absent and stays `None` in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    /// First day covered by the report this record belongs to.
    #[serde(default)]
    pub report_start_day: String,
    /// Last day covered by the report this record belongs to.
    #[serde(default)]
    pub report_end_day: String,
    /// ISO date string (`YYYY-MM-DD`) of the observation. Lexicographic
    /// ordering of these strings is chronological ordering.
    pub day: String,
    /// Enterprise the user belongs to.
    #[serde(default)]
    pub enterprise_id: String,
    /// Numeric user identifier.
    #[serde(default)]
    pub user_id: u64,
    /// User login the observation is attributed to.
    pub user_login: String,
    /// Number of interactions the user initiated that day.
    #[serde(default)]
    pub user_initiated_interaction_count: u64,
    /// Number of code-generation activities that day.
    #[serde(default)]
    pub code_generation_activity_count: u64,
    /// Number of code-acceptance activities that day.
    #[serde(default)]
    pub code_acceptance_activity_count: u64,
    /// Per-editor sub-totals for this observation.
    #[serde(default)]
    pub totals_by_ide: Vec<IdeBreakdown>,
    /// Per-feature sub-totals for this observation.
    #[serde(default)]
    pub totals_by_feature: Vec<FeatureBreakdown>,
    /// Per-language-and-feature sub-totals for this observation.
    #[serde(default)]
    pub totals_by_language_feature: Vec<LanguageFeatureBreakdown>,
    /// Per-language-and-model sub-totals. Absent entirely in some exports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals_by_language_model: Option<Vec<LanguageModelBreakdown>>,
}

/// Plugin version sample attached to an editor breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginVersion {
    /// When the version was sampled.
    #[serde(default)]
    pub sampled_at: String,
    /// Plugin identifier.
    #[serde(default)]
    pub plugin: String,
    /// Plugin version string.
    #[serde(default)]
    pub plugin_version: String,
}

/// Editor version sample attached to an editor breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeVersion {
    /// When the version was sampled.
    #[serde(default)]
    pub sampled_at: String,
    /// Editor version string.
    #[serde(default)]
    pub ide_version: String,
}

/// Activity sub-totals scoped to one editor within a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdeBreakdown {
    /// Raw editor identifier, e.g. `"vscode"`.
    pub ide: String,
    #[serde(default)]
    pub user_initiated_interaction_count: u64,
    #[serde(default)]
    pub code_generation_activity_count: u64,
    #[serde(default)]
    pub code_acceptance_activity_count: u64,
    /// Lines of code suggested for addition in this editor.
    #[serde(default)]
    pub loc_suggested_to_add_sum: u64,
    /// Lines of code suggested for deletion in this editor.
    #[serde(default)]
    pub loc_suggested_to_delete_sum: u64,
    /// Lines of code actually added in this editor.
    #[serde(default)]
    pub loc_added_sum: u64,
    /// Lines of code actually deleted in this editor.
    #[serde(default)]
    pub loc_deleted_sum: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_known_plugin_version: Option<PluginVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_known_ide_version: Option<IdeVersion>,
}

/// Activity sub-totals scoped to one product feature within a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureBreakdown {
    /// Raw feature identifier, e.g. `"chat_panel_ask_mode"`.
    pub feature: String,
    #[serde(default)]
    pub user_initiated_interaction_count: u64,
    #[serde(default)]
    pub code_generation_activity_count: u64,
    #[serde(default)]
    pub code_acceptance_activity_count: u64,
    #[serde(default)]
    pub loc_suggested_to_add_sum: u64,
    #[serde(default)]
    pub loc_suggested_to_delete_sum: u64,
    #[serde(default)]
    pub loc_added_sum: u64,
    #[serde(default)]
    pub loc_deleted_sum: u64,
}

/// Activity sub-totals scoped to one language/feature pair within a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageFeatureBreakdown {
    /// Raw language identifier, e.g. `"rust"`.
    pub language: String,
    /// Raw feature identifier the activity happened in.
    #[serde(default)]
    pub feature: String,
    #[serde(default)]
    pub code_generation_activity_count: u64,
    #[serde(default)]
    pub code_acceptance_activity_count: u64,
    #[serde(default)]
    pub loc_suggested_to_add_sum: u64,
    #[serde(default)]
    pub loc_suggested_to_delete_sum: u64,
    #[serde(default)]
    pub loc_added_sum: u64,
    #[serde(default)]
    pub loc_deleted_sum: u64,
}

/// Activity sub-totals scoped to one language/model pair within a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageModelBreakdown {
    /// Raw language identifier.
    pub language: String,
    /// Model identifier the activity was served by.
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub code_generation_activity_count: u64,
    #[serde(default)]
    pub code_acceptance_activity_count: u64,
    #[serde(default)]
    pub loc_suggested_to_add_sum: u64,
    #[serde(default)]
    pub loc_suggested_to_delete_sum: u64,
    #[serde(default)]
    pub loc_added_sum: u64,
    #[serde(default)]
    pub loc_deleted_sum: u64,
}

// ── Derived aggregate views ───────────────────────────────────────────────────

/// Per-user aggregate across all of a user's records.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    /// User login this summary belongs to.
    pub user_login: String,
    /// Numeric user identifier, taken from the first-seen record.
    pub user_id: u64,
    /// Sum of user-initiated interactions.
    pub total_interactions: u64,
    /// Sum of code-generation activities.
    pub total_code_generated: u64,
    /// Sum of code-acceptance activities.
    pub total_code_accepted: u64,
    /// `round(accepted / generated * 100)`, 0 when nothing was generated.
    pub acceptance_rate: u64,
    /// Number of records observed for this user. Two records on the same
    /// calendar day count twice.
    pub active_days: u64,
    /// Most recent `day` string observed for this user.
    pub last_active_day: String,
    /// Display name of the editor on the user's first-seen record. Frozen at
    /// first observation; later records never change it.
    pub primary_ide: String,
    /// Lines of code added, summed over all editor breakdowns.
    pub loc_added: u64,
    /// Lines of code suggested, summed over all editor breakdowns.
    pub loc_suggested: u64,
}

/// Per-day aggregate across all users.
#[derive(Debug, Clone, Serialize)]
pub struct DailyMetrics {
    /// ISO date string this row covers.
    pub day: String,
    /// Distinct user logins observed that day.
    pub active_users: u64,
    pub total_interactions: u64,
    pub total_code_generated: u64,
    pub total_code_accepted: u64,
    pub acceptance_rate: u64,
}

/// Per-feature aggregate across all records' feature breakdowns.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureMetrics {
    /// Human-formatted feature name.
    pub feature: String,
    pub interactions: u64,
    pub code_generated: u64,
    pub code_accepted: u64,
    pub acceptance_rate: u64,
}

/// Per-editor aggregate across all records' editor breakdowns.
#[derive(Debug, Clone, Serialize)]
pub struct IdeMetrics {
    /// Human-formatted editor name.
    pub ide: String,
    /// Distinct user logins that used this editor.
    pub users: u64,
    pub interactions: u64,
    pub code_generated: u64,
    pub code_accepted: u64,
}

/// Per-language aggregate across all records' language breakdowns.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageMetrics {
    /// Language with its first letter capitalized.
    pub language: String,
    pub code_generated: u64,
    pub code_accepted: u64,
    pub acceptance_rate: u64,
}

/// Whole-dataset aggregate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GlobalStats {
    /// Distinct user logins in the dataset.
    pub total_users: u64,
    pub total_interactions: u64,
    pub total_code_generated: u64,
    pub total_code_accepted: u64,
    pub average_acceptance_rate: u64,
    /// Report span, taken from the first record. Empty when no records.
    pub report_start_day: String,
    /// See `report_start_day`.
    pub report_end_day: String,
    pub total_loc_added: u64,
    pub total_loc_suggested: u64,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
