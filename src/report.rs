//! Transaction report
//!
//! Bundles a parsed utterance with its catalog resolution, totals and
//! suggestions for the lines that need a human to confirm them.

use crate::catalog::CatalogProduct;
use crate::core::VoiceTransactionData;
use crate::matcher::{suggest_products, MatchedLineItem, ProductSuggestion, TransactionSummary};
use crate::speech::VoiceService;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct TransactionReport {
    pub transaction: VoiceTransactionData,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<MatchedLineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<TransactionSummary>,
    /// Unmatched line name -> near misses
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub suggestions: BTreeMap<String, Vec<ProductSuggestion>>,
}

impl TransactionReport {
    /// Parse `text` and, when a catalog is given, resolve it
    pub fn build(
        service: &VoiceService,
        text: &str,
        catalog: Option<&[CatalogProduct]>,
        suggestion_limit: usize,
        suggestion_cutoff: f64,
    ) -> Self {
        let transaction = service.parse_voice_input(text);

        let Some(catalog) = catalog else {
            return Self {
                transaction,
                items: Vec::new(),
                summary: None,
                suggestions: BTreeMap::new(),
            };
        };

        let items = service.match_products_with_database(&transaction.products, catalog);
        let summary = TransactionSummary::new(&items, &transaction.amount_paid);

        let mut suggestions = BTreeMap::new();
        if suggestion_limit > 0 {
            for item in items.iter().filter(|i| !i.matched) {
                let near = suggest_products(&item.name, catalog, suggestion_limit, suggestion_cutoff);
                if !near.is_empty() {
                    suggestions.insert(item.name.clone(), near);
                }
            }
        }

        Self {
            transaction,
            items,
            summary: Some(summary),
            suggestions,
        }
    }
}
