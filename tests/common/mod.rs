#![allow(dead_code)]

pub mod mock_recognizer;

use bigdecimal::BigDecimal;
use std::str::FromStr;
use voicecart::CatalogProduct;

pub fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).expect("valid decimal")
}

/// A small sari-sari store inventory
pub fn store_catalog() -> Vec<CatalogProduct> {
    vec![
        CatalogProduct::new("p-001", "Coca Cola Zero", dec("30.00")),
        CatalogProduct::new("p-002", "Coca Cola", dec("25.50")),
        CatalogProduct::new("p-003", "Piattos", dec("18.75")),
        CatalogProduct::new("p-004", "Bottled Water", dec("12.00")),
        CatalogProduct::new("p-005", "Water Refill", dec("5.00")),
        CatalogProduct::new("p-006", "Pancit Canton", dec("16.25")),
        CatalogProduct::new("p-007", "Biscuit", dec("8.10")),
    ]
}
