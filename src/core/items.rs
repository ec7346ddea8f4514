//! Item phrase parsing

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref ITEM_RE: Regex = Regex::new(r"^([0-9]+)\s+(.+)$").expect("item pattern is valid");
}

/// A spoken line item before catalog resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLineItem {
    pub name: String,
    pub quantity: u32,
}

/// Parse "<quantity> <name>". Anything else yields `None`.
pub fn parse_item(segment: &str) -> Option<ParsedLineItem> {
    let caps = ITEM_RE.captures(segment.trim())?;

    // Overflowing quantities fail to parse and drop the segment
    let quantity: u32 = caps[1].parse().ok()?;
    let name = caps[2].trim();

    if quantity == 0 || name.is_empty() {
        return None;
    }

    Some(ParsedLineItem {
        name: name.to_string(),
        quantity,
    })
}

/// Parse every segment, keeping spoken order and skipping the malformed ones
pub fn parse_items<'a, I>(segments: I) -> Vec<ParsedLineItem>
where
    I: IntoIterator<Item = &'a str>,
{
    segments.into_iter().filter_map(parse_item).collect()
}
