//! Voice Transaction Parser
//!
//! Turns a transcribed utterance into a list of spoken items and the
//! tendered amount. Parsing never fails: unrecognized pieces are dropped.

use super::amount::extract_amount;
use super::items::parse_items;
use super::segments::split_segments;
use super::text_normalizer::{normalize_utterance, rewrite_number_words, NameNormalizer};
use crate::config::Config;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A product as spoken, after name canonicalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokenProduct {
    pub name: String,
    pub quantity: u32,
}

/// Structured result of parsing one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceTransactionData {
    /// Products in spoken order
    pub products: Vec<SpokenProduct>,
    /// Zero when no amount was spoken
    pub amount_paid: BigDecimal,
    /// The input, verbatim
    pub raw_text: String,
}

/// Parser switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Rewrite "two coke" as "2 coke" before parsing
    pub spoken_numbers: bool,
}

/// Utterance parser with its alias table
#[derive(Debug, Clone, Default)]
pub struct VoiceParser {
    options: ParserOptions,
    names: NameNormalizer,
}

impl VoiceParser {
    pub fn new(options: ParserOptions, names: NameNormalizer) -> Self {
        Self { options, names }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ParserOptions {
                spoken_numbers: config.spoken_numbers,
            },
            NameNormalizer::new(config.product_aliases.clone()),
        )
    }

    pub fn names(&self) -> &NameNormalizer {
        &self.names
    }

    /// Parse an utterance into products and tendered amount
    pub fn parse(&self, text: &str) -> VoiceTransactionData {
        let mut normalized = normalize_utterance(text);
        if self.options.spoken_numbers {
            normalized = rewrite_number_words(&normalized);
        }

        let amount_paid = extract_amount(&normalized);
        let segments = split_segments(&normalized);
        let parsed = parse_items(segments.iter().copied());

        debug!(
            "Parsed '{}': {} segments, {} items",
            normalized,
            segments.len(),
            parsed.len()
        );

        let products = parsed
            .into_iter()
            .map(|item| SpokenProduct {
                name: self.names.normalize(&item.name),
                quantity: item.quantity,
            })
            .collect();

        VoiceTransactionData {
            products,
            amount_paid,
            raw_text: text.to_string(),
        }
    }
}

/// Parse with default options and the built-in alias table
pub fn parse_voice_input(text: &str) -> VoiceTransactionData {
    VoiceParser::default().parse(text)
}
