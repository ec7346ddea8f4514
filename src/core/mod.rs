//! Core parsing modules
//!
//! Utterance normalization, amount extraction, segment splitting,
//! item parsing and product-name canonicalization.

pub mod amount;
pub mod items;
pub mod parser;
pub mod segments;
pub mod text_normalizer;

pub use parser::{parse_voice_input, ParserOptions, SpokenProduct, VoiceParser, VoiceTransactionData};
pub use text_normalizer::{normalize_product_name, NameNormalizer};
