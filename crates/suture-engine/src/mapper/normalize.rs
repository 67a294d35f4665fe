//! Text normalization.
//!
//! Identity hashes and matchers both consume the normalized form, so a
//! reflowed or re-cased paragraph re-extracts to the same requirement.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lowercase and collapse whitespace runs to single spaces.
pub fn normalize(text: &str) -> String {
    WHITESPACE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}
