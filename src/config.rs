use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::clock::CommercialZone;
use crate::error::PageError;
use crate::offer::PriceTable;
use crate::state::StockTuning;

/// Page configuration. Every field has a default, so an empty file (or no
/// file at all) gives the stock Black Friday page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub offer: OfferConfig,
    pub stock: StockTuning,
    pub coupon: CouponConfig,
    pub page: PageConfig,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct General {
    /// Used when RUST_LOG is not set.
    pub log_level: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OfferConfig {
    /// IANA zone whose midnight ends the offer
    pub timezone: String,
    pub price_from: Decimal,
    pub price_to: Decimal,
    pub discount_pct: u32,
    pub currency: String,
    pub checkout_url: String,
    pub product_id: String,
    pub product_name: String,
    pub product_category: String,
    pub page_title: String,
    /// Product metadata JSON; the built-in one when unset.
    pub schema_path: Option<PathBuf>,
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            timezone: "America/Sao_Paulo".into(),
            price_from: dec!(2199.90),
            price_to: dec!(659.90),
            discount_pct: 70,
            currency: "BRL".into(),
            checkout_url: "https://SEU-CHECKOUT.com/checkout".into(),
            product_id: "KIT-RAZER-4X1-BF-2025".into(),
            product_name: "Kit Razer 4×1 — Black Friday".into(),
            product_category: "Gaming".into(),
            page_title: "Kit Razer 4x1 Black Friday".into(),
            schema_path: None,
        }
    }
}

impl OfferConfig {
    pub fn prices(&self) -> PriceTable {
        PriceTable {
            from: self.price_from,
            to: self.price_to,
            discount_pct: self.discount_pct,
            currency: self.currency.clone(),
        }
    }

    pub fn zone(&self) -> Result<CommercialZone, PageError> {
        CommercialZone::parse(&self.timezone)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CouponConfig {
    pub code: String,
}

impl Default for CouponConfig {
    fn default() -> Self {
        Self {
            code: "BFKIT".into(),
        }
    }
}

/// Layout numbers the headless page cannot measure itself.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Bottom edge of the hero section, px
    pub hero_bottom: f64,
    pub viewport_height: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            hero_bottom: 900.0,
            viewport_height: 800.0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Also write tracked events to the log.
    pub log_events: bool,
    pub collectors: Vec<CollectorConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    pub name: String,
    pub endpoint: String,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Like `load`, but a missing file means defaults.
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            warn!(path, "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), PageError> {
        let invalid = |msg: String| Err(PageError::InvalidConfig(msg));

        self.offer.zone()?;

        let p = self.stock.decay_probability;
        if !(p > 0.0 && p < 1.0) {
            return invalid(format!("stock.decay_probability must be in (0, 1), got {p}"));
        }
        if self.stock.floor > self.stock.initial {
            return invalid(format!(
                "stock.floor ({}) is above stock.initial ({})",
                self.stock.floor, self.stock.initial
            ));
        }
        if self.stock.max_decrement == 0 {
            return invalid("stock.max_decrement must be at least 1".into());
        }
        if !(self.offer.checkout_url.starts_with("https://")
            || self.offer.checkout_url.starts_with("http://"))
        {
            return invalid(format!("offer.checkout_url is not http(s): {}", self.offer.checkout_url));
        }
        if self.offer.price_to > self.offer.price_from {
            return invalid("offer.price_to is above offer.price_from".into());
        }
        if self.coupon.code.trim().is_empty() {
            return invalid("coupon.code is empty".into());
        }
        Ok(())
    }
}
