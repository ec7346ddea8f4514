//! Tendered amount extraction
//!
//! Finds the first "<number> pesos" style phrase in a normalized utterance.

use bigdecimal::BigDecimal;
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;
use tracing::debug;

lazy_static! {
    /// Number with at most two fraction digits, followed by a currency marker.
    /// Word markers must end on a word boundary so "1 piattos" is not money.
    static ref AMOUNT_RE: Regex =
        Regex::new(r"(?i)([0-9]+(?:\.[0-9]{1,2})?)\s*(?:(?:pesos|peso|php|p)\b|₱)")
            .expect("amount pattern is valid");
}

/// Return the value of the first monetary phrase, or zero if there is none
pub fn extract_amount(text: &str) -> BigDecimal {
    let Some(caps) = AMOUNT_RE.captures(text) else {
        return BigDecimal::from(0);
    };

    match BigDecimal::from_str(&caps[1]) {
        Ok(amount) => {
            debug!("💰 Tendered amount: {}", amount);
            amount
        }
        Err(e) => {
            debug!("Unparseable amount '{}': {}", &caps[1], e);
            BigDecimal::from(0)
        }
    }
}

/// Byte offset where the first monetary phrase starts
pub fn amount_span(text: &str) -> Option<usize> {
    AMOUNT_RE.find(text).map(|m| m.start())
}
