//! VoiceCart Library
//!
//! Turns transcribed point-of-sale speech ("2 coke and 1 piattos, 100 pesos")
//! into a structured cart and resolves it against a product catalog.

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod matcher;
pub mod report;
pub mod speech;
pub mod utils;

pub use crate::catalog::CatalogProduct;
pub use crate::core::{parse_voice_input, SpokenProduct, VoiceTransactionData};
pub use crate::error::{RecognitionError, VoiceError, VoiceResult};
pub use crate::matcher::{match_products_with_database, MatchedLineItem};
pub use crate::speech::VoiceService;
