//! Splits an utterance into per-item phrases

use super::amount::amount_span;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SEPARATOR_RE: Regex =
        Regex::new(r"\s*(?:\band\b|,|\+)\s*").expect("separator pattern is valid");
}

/// Drop the tendered amount (and anything spoken after it), then split the
/// rest on "and", commas and "+". Empty pieces are skipped.
pub fn split_segments(text: &str) -> Vec<&str> {
    let items_part = match amount_span(text) {
        Some(start) => &text[..start],
        None => text,
    };

    SEPARATOR_RE
        .split(items_part)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
