use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::warn;

use crate::error::{PageError, Result};

pub const OUT_OF_STOCK: &str = "https://schema.org/OutOfStock";

/// Metadata shipped with the page when no file is configured.
pub const DEFAULT_PRODUCT_SCHEMA: &str = r#"{
  "@context": "https://schema.org",
  "@type": "Product",
  "name": "Kit Razer 4×1 — Black Friday",
  "sku": "KIT-RAZER-4X1-BF-2025",
  "brand": {
    "@type": "Brand",
    "name": "Razer"
  },
  "offers": {
    "@type": "Offer",
    "priceCurrency": "BRL",
    "price": 659.90,
    "priceValidUntil": "2025-11-28",
    "availability": "https://schema.org/InStock",
    "url": "https://SEU-CHECKOUT.com/checkout"
  }
}"#;

/// Structured product/offer description embedded in the page for search
/// engines. Kept as text: only `offers.priceValidUntil` and
/// `offers.availability` are ever rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSchema {
    text: String,
}

impl ProductSchema {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Metadata from `path`, or the built-in one when unset or unreadable.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match fs::read_to_string(path) {
            Ok(text) => Self::new(text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read product metadata, using built-in");
                Self::default()
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Set `priceValidUntil` to `valid_until` and, if the offer has ended,
    /// `availability` to out of stock. Key order and number text of every
    /// other field are kept. On error the text is left untouched.
    pub fn refresh(&mut self, valid_until: DateTime<Utc>, expired: bool) -> Result<()> {
        let mut doc: Value = serde_json::from_str(&self.text)?;

        let offers = doc
            .get_mut("offers")
            .and_then(Value::as_object_mut)
            .ok_or(PageError::MetadataShape)?;

        offers.insert(
            "priceValidUntil".into(),
            Value::String(valid_until.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        if expired {
            offers.insert("availability".into(), Value::String(OUT_OF_STOCK.into()));
        }

        self.text = serde_json::to_string_pretty(&doc)?;
        Ok(())
    }
}

impl Default for ProductSchema {
    fn default() -> Self {
        Self::new(DEFAULT_PRODUCT_SCHEMA)
    }
}
