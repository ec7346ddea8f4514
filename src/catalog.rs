//! Product catalog input
//!
//! The catalog is owned by the surrounding application; this crate only
//! reads it.

use crate::error::{VoiceError, VoiceResult};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A product as listed in the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub price: BigDecimal,
}

impl CatalogProduct {
    pub fn new(id: &str, name: &str, price: BigDecimal) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
        }
    }
}

/// Parse a catalog from a JSON array of `{id, name, price}`
pub fn parse_catalog(json: &str) -> VoiceResult<Vec<CatalogProduct>> {
    let products: Vec<CatalogProduct> = serde_json::from_str(json)?;

    if let Some(bad) = products.iter().find(|p| p.price < BigDecimal::from(0)) {
        return Err(VoiceError::Catalog(format!(
            "product '{}' ({}) has a negative price",
            bad.name, bad.id
        )));
    }

    Ok(products)
}

/// Load a catalog file
pub fn load_catalog(path: &Path) -> VoiceResult<Vec<CatalogProduct>> {
    let content = std::fs::read_to_string(path)?;
    let products = parse_catalog(&content)?;
    info!(
        "📦 Loaded {} catalog products from {}",
        products.len(),
        path.display()
    );
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;

    #[test]
    fn test_parse_catalog_prices() {
        let json = r#"[
            {"id": "p1", "name": "Coca Cola", "price": 25},
            {"id": "p2", "name": "Piattos", "price": "18.50"}
        ]"#;
        let catalog = parse_catalog(json).expect("catalog should parse");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].price, BigDecimal::from(25));
        assert_eq!(catalog[1].price, BigDecimal::from_str("18.5").unwrap());
    }

    #[test]
    fn test_negative_price_rejected() {
        let json = r#"[{"id": "p1", "name": "Refund", "price": "-5"}]"#;
        let err = parse_catalog(json).unwrap_err();
        assert!(matches!(err, VoiceError::Catalog(_)));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_catalog("{ not a list"),
            Err(VoiceError::Json(_))
        ));
    }

    #[test]
    fn test_load_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"[{{"id": "a", "name": "Bread", "price": "5"}}]"#).unwrap();

        let catalog = load_catalog(file.path()).expect("catalog should load");
        assert_eq!(catalog, vec![CatalogProduct::new("a", "Bread", BigDecimal::from(5))]);

        let missing = load_catalog(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(missing, Err(VoiceError::Io(_))));
    }
}
