//! URL slugs for articles

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid slug regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Slug with the current Unix timestamp as uniqueness suffix
pub fn slugify(title: &str) -> String {
    slugify_at(title, Utc::now().timestamp())
}

/// Lowercases, drops characters outside `[a-z0-9 -]`, hyphenates whitespace
/// runs and appends `-{timestamp}`
pub fn slugify_at(title: &str, timestamp: i64) -> String {
    let lowered = title.to_lowercase();
    let kept = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(&kept, "-");
    format!("{}-{}", hyphenated, timestamp)
}
