use regex::Regex;
use std::sync::LazyLock;

// Summaries read like "Discover Palm Hills' latest project in ...".
static DEVELOPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"discover\s+(.*?)['’]").expect("developer pattern"));
static BEFORE_CURRENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*EGP").expect("currency pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Developer name mentioned in a card summary, lowercased.
pub fn developer_name(summary: &str) -> Option<String> {
    let lowered = summary.to_lowercase();
    DEVELOPER
        .captures(&lowered)
        .map(|caps| caps[1].trim().to_string())
}

/// Puts exactly one space before the currency and collapses whitespace.
pub fn normalize_price(raw: &str) -> String {
    let spaced = BEFORE_CURRENCY.replace_all(raw, " EGP");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

/// Splits "Apartment, Mountain View iCity" into type and project.
pub fn split_name(name: &str) -> (String, Option<String>) {
    match name.split_once(',') {
        Some((kind, project)) => (kind.trim().to_string(), Some(project.trim().to_string())),
        None => (name.to_string(), None),
    }
}
