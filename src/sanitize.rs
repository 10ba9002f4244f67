//! Text sanitizing helpers
//!
//! Markup stripping for feed summaries and the character filters used by the
//! image fallback prompt.

use scraper::Html;

/// Strips markup from an HTML fragment and returns its plain text
pub fn clean_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates to at most `max_chars` characters, never splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Keeps ASCII letters, digits and spaces, trimmed and capped at `max_chars`
pub fn alphanumeric_title(title: &str, max_chars: usize) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    truncate_chars(kept.trim(), max_chars)
}
