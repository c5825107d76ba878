//! Display-name normalization and number formatting for the dashboard.

// ── Display-name lookup tables ────────────────────────────────────────────────

/// Known feature identifiers and their display names. The tables are data,
/// not code: extend them here when a new identifier ships.
const FEATURE_NAMES: &[(&str, &str)] = &[
    ("chat_panel_ask_mode", "Chat - Ask Mode"),
    ("chat_panel_agent_mode", "Chat - Agent Mode"),
    ("chat_panel_edit_mode", "Chat - Edit Mode"),
    ("code_completion", "Code Completion"),
    ("inline_chat", "Inline Chat"),
];

/// Known editor identifiers and their branded display names.
const IDE_NAMES: &[(&str, &str)] = &[
    ("vscode", "VS Code"),
    ("intellij", "IntelliJ IDEA"),
    ("neovim", "Neovim"),
    ("vim", "Vim"),
    ("jetbrains", "JetBrains"),
];

/// Map a raw feature identifier to its display name.
///
/// Unmapped identifiers fall back to replacing underscores with spaces and
/// capitalizing each word.
///
/// # Examples
///
/// ```
/// use metrics_core::formatting::format_feature_name;
///
/// assert_eq!(format_feature_name("chat_panel_ask_mode"), "Chat - Ask Mode");
/// assert_eq!(format_feature_name("custom_new_thing"), "Custom New Thing");
/// ```
pub fn format_feature_name(feature: &str) -> String {
    if let Some((_, name)) = FEATURE_NAMES.iter().find(|(key, _)| *key == feature) {
        return (*name).to_string();
    }
    feature
        .split('_')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a raw editor identifier to its branded display name.
///
/// Unmapped identifiers fall back to capitalizing the first letter only.
///
/// # Examples
///
/// ```
/// use metrics_core::formatting::format_ide_name;
///
/// assert_eq!(format_ide_name("vscode"), "VS Code");
/// assert_eq!(format_ide_name("emacs"), "Emacs");
/// ```
pub fn format_ide_name(ide: &str) -> String {
    if let Some((_, name)) = IDE_NAMES.iter().find(|(key, _)| *key == ide) {
        return (*name).to_string();
    }
    capitalize_first(ide)
}

/// Capitalize a raw language identifier: first letter upper-cased, rest
/// unchanged. There is no lookup table for languages.
///
/// # Examples
///
/// ```
/// use metrics_core::formatting::format_language_name;
///
/// assert_eq!(format_language_name("rust"), "Rust");
/// assert_eq!(format_language_name("typescript"), "Typescript");
/// ```
pub fn format_language_name(language: &str) -> String {
    capitalize_first(language)
}

// ── Rates ─────────────────────────────────────────────────────────────────────

/// Acceptance rate as a rounded percentage: `round(accepted / generated *
/// 100)`. Returns 0 when nothing was generated.
///
/// # Examples
///
/// ```
/// use metrics_core::formatting::acceptance_rate;
///
/// assert_eq!(acceptance_rate(2, 5), 40);
/// assert_eq!(acceptance_rate(1, 2), 50);
/// assert_eq!(acceptance_rate(1, 3), 33);
/// assert_eq!(acceptance_rate(0, 0), 0);
/// ```
pub fn acceptance_rate(accepted: u64, generated: u64) -> u64 {
    if generated == 0 {
        return 0;
    }
    ((accepted as f64 / generated as f64) * 100.0).round() as u64
}

// ── Number formatting ─────────────────────────────────────────────────────────

/// Format an integer count with thousands separators.
///
/// # Examples
///
/// ```
/// use metrics_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format a rounded percentage for table display, e.g. `"40%"`.
pub fn format_percent(rate: u64) -> String {
    format!("{}%", rate)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Upper-case the first character of `s`, leaving the rest unchanged.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Lookup tables ─────────────────────────────────────────────────────

    #[test]
    fn test_all_known_feature_names() {
        // Enumerates every key in the table so a table edit breaks loudly.
        let expected = [
            ("chat_panel_ask_mode", "Chat - Ask Mode"),
            ("chat_panel_agent_mode", "Chat - Agent Mode"),
            ("chat_panel_edit_mode", "Chat - Edit Mode"),
            ("code_completion", "Code Completion"),
            ("inline_chat", "Inline Chat"),
        ];
        assert_eq!(FEATURE_NAMES.len(), expected.len());
        for (key, name) in expected {
            assert_eq!(format_feature_name(key), name, "feature key {key}");
        }
    }

    #[test]
    fn test_all_known_ide_names() {
        let expected = [
            ("vscode", "VS Code"),
            ("intellij", "IntelliJ IDEA"),
            ("neovim", "Neovim"),
            ("vim", "Vim"),
            ("jetbrains", "JetBrains"),
        ];
        assert_eq!(IDE_NAMES.len(), expected.len());
        for (key, name) in expected {
            assert_eq!(format_ide_name(key), name, "ide key {key}");
        }
    }

    // ── Fallbacks ─────────────────────────────────────────────────────────

    #[test]
    fn test_feature_fallback_capitalizes_words() {
        assert_eq!(format_feature_name("pull_request_summary"), "Pull Request Summary");
    }

    #[test]
    fn test_feature_fallback_single_word() {
        assert_eq!(format_feature_name("autocomplete"), "Autocomplete");
    }

    #[test]
    fn test_ide_fallback_capitalizes_first_only() {
        assert_eq!(format_ide_name("emacs"), "Emacs");
        assert_eq!(format_ide_name("sublime_text"), "Sublime_text");
    }

    #[test]
    fn test_language_capitalize_only() {
        assert_eq!(format_language_name("rust"), "Rust");
        assert_eq!(format_language_name("c++"), "C++");
        assert_eq!(format_language_name("javascript"), "Javascript");
    }

    #[test]
    fn test_empty_identifiers() {
        assert_eq!(format_ide_name(""), "");
        assert_eq!(format_language_name(""), "");
    }

    // ── acceptance_rate ───────────────────────────────────────────────────

    #[test]
    fn test_acceptance_rate_basic() {
        assert_eq!(acceptance_rate(2, 5), 40);
    }

    #[test]
    fn test_acceptance_rate_exact_half_rounds_up() {
        assert_eq!(acceptance_rate(1, 2), 50);
        assert_eq!(acceptance_rate(3, 8), 38); // 37.5 rounds away from zero
    }

    #[test]
    fn test_acceptance_rate_one_third() {
        assert_eq!(acceptance_rate(1, 3), 33);
    }

    #[test]
    fn test_acceptance_rate_zero_generated() {
        assert_eq!(acceptance_rate(5, 0), 0);
    }

    #[test]
    fn test_acceptance_rate_over_hundred() {
        // Accepted can exceed generated in the raw data; the ratio is kept.
        assert_eq!(acceptance_rate(6, 5), 120);
    }

    // ── format_count ──────────────────────────────────────────────────────

    #[test]
    fn test_format_count_small() {
        assert_eq!(format_count(5), "5");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn test_format_count_thousands() {
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234), "1,234");
    }

    #[test]
    fn test_format_count_millions() {
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(40), "40%");
        assert_eq!(format_percent(0), "0%");
    }
}
