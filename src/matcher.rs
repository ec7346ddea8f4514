//! Catalog Matcher
//!
//! Resolves spoken products against the live catalog. Matching is
//! case-insensitive: an exact name wins, otherwise the first catalog entry
//! (in catalog order) where one name contains the other. No match is a
//! normal outcome, reported as `matched: false`.

use crate::catalog::CatalogProduct;
use crate::core::SpokenProduct;
use crate::utils::fuzzy::find_matches;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A cart line resolved against the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedLineItem {
    /// Empty when unmatched
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: BigDecimal,
    pub total: BigDecimal,
    pub matched: bool,
}

impl MatchedLineItem {
    fn unmatched(product: &SpokenProduct) -> Self {
        Self {
            id: String::new(),
            name: product.name.clone(),
            quantity: product.quantity,
            price: BigDecimal::from(0),
            total: BigDecimal::from(0),
            matched: false,
        }
    }

    fn from_catalog(entry: &CatalogProduct, quantity: u32) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            quantity,
            price: entry.price.clone(),
            total: entry.price.clone() * BigDecimal::from(quantity),
            matched: true,
        }
    }
}

/// Matching knobs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Skip substring matching when the shorter name has fewer characters.
    /// Zero keeps plain substring containment, so a one-letter name can
    /// match the first catalog entry containing that letter.
    pub min_partial_len: usize,
}

/// Near-miss catalog entry for an unmatched line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSuggestion {
    pub id: String,
    pub name: String,
    pub score: f64,
}

/// Find the catalog entry for a product name
pub fn find_product<'a>(
    name: &str,
    catalog: &'a [CatalogProduct],
    options: MatchOptions,
) -> Option<&'a CatalogProduct> {
    let needle = name.trim().to_lowercase();

    if let Some(exact) = catalog
        .iter()
        .find(|entry| entry.name.trim().to_lowercase() == needle)
    {
        return Some(exact);
    }

    let needle_len = needle.chars().count();
    catalog.iter().find(|entry| {
        let hay = entry.name.trim().to_lowercase();
        if needle_len.min(hay.chars().count()) < options.min_partial_len {
            return false;
        }
        hay.contains(&needle) || needle.contains(&hay)
    })
}

/// Resolve products against the catalog with explicit options
pub fn match_products_with_options(
    products: &[SpokenProduct],
    catalog: &[CatalogProduct],
    options: MatchOptions,
) -> Vec<MatchedLineItem> {
    products
        .iter()
        .map(|product| match find_product(&product.name, catalog, options) {
            Some(entry) => {
                debug!("🎯 '{}' -> {} ({})", product.name, entry.name, entry.id);
                MatchedLineItem::from_catalog(entry, product.quantity)
            }
            None => {
                debug!("❓ No catalog match for '{}'", product.name);
                MatchedLineItem::unmatched(product)
            }
        })
        .collect()
}

/// Resolve products against the catalog, one line per product in order
pub fn match_products_with_database(
    products: &[SpokenProduct],
    catalog: &[CatalogProduct],
) -> Vec<MatchedLineItem> {
    match_products_with_options(products, catalog, MatchOptions::default())
}

/// Rank catalog entries by name similarity
pub fn suggest_products(
    name: &str,
    catalog: &[CatalogProduct],
    limit: usize,
    cutoff: f64,
) -> Vec<ProductSuggestion> {
    let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();

    find_matches(name, &names, limit, cutoff)
        .into_iter()
        .map(|m| ProductSuggestion {
            id: catalog[m.index].id.clone(),
            name: m.value,
            score: m.score,
        })
        .collect()
}

/// Totals for a resolved cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_due: BigDecimal,
    pub amount_paid: BigDecimal,
    /// Zero when the tendered amount falls short
    pub change: BigDecimal,
    pub line_count: usize,
    pub unmatched_count: usize,
}

impl TransactionSummary {
    pub fn new(items: &[MatchedLineItem], amount_paid: &BigDecimal) -> Self {
        let total_due = items
            .iter()
            .fold(BigDecimal::from(0), |acc, item| acc + item.total.clone());

        let change = if *amount_paid > total_due {
            amount_paid.clone() - total_due.clone()
        } else {
            BigDecimal::from(0)
        };

        Self {
            total_due,
            amount_paid: amount_paid.clone(),
            change,
            line_count: items.len(),
            unmatched_count: items.iter().filter(|i| !i.matched).count(),
        }
    }

    /// Every line resolved and the tendered amount covers the total
    pub fn can_checkout(&self) -> bool {
        self.line_count > 0 && self.unmatched_count == 0 && self.amount_paid >= self.total_due
    }
}
