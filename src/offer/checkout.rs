use std::time::Duration;

use crate::state::ExpiryFlag;

/// Wait between firing tracking and leaving the page.
pub const NAVIGATION_DELAY: Duration = Duration::from_millis(100);

/// Told to the user when they try to buy after the offer ended.
pub const OFFER_ENDED_NOTICE: &str = "Oferta expirada. Verifique disponibilidade.";

/// Where to go, and after how long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub url: String,
    pub delay: Duration,
}

/// Outbound checkout redirect.
#[derive(Debug, Clone)]
pub struct Checkout {
    base_url: String,
    expiry: ExpiryFlag,
}

impl Checkout {
    pub fn new(base_url: impl Into<String>, expiry: ExpiryFlag) -> Self {
        Self {
            base_url: base_url.into(),
            expiry,
        }
    }

    /// Checkout target carrying the page's query (UTMs and the like).
    /// None once the offer has expired.
    pub fn begin(&self, page_query: &str) -> Option<Navigation> {
        if self.expiry.is_expired() {
            return None;
        }
        Some(Navigation {
            url: preserve_query(&self.base_url, page_query),
            delay: NAVIGATION_DELAY,
        })
    }

    /// Direct link to the checkout, with no query handling. Stays usable
    /// even if the rest of the page is broken.
    pub fn fallback(&self) -> Navigation {
        Navigation {
            url: self.base_url.clone(),
            delay: Duration::ZERO,
        }
    }
}

/// Append the current page's query parameters to `base`, unmodified.
///
/// Parameters `base` already carries are not repeated, so applying this
/// twice gives the same URL. A fragment on `base` stays at the end.
pub fn preserve_query(base: &str, page_query: &str) -> String {
    let query = page_query.trim_start_matches('?');

    let (head, fragment) = match base.find('#') {
        Some(i) => base.split_at(i),
        None => (base, ""),
    };
    let existing: Vec<&str> = head
        .split_once('?')
        .map(|(_, q)| q.split('&').filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    let mut missing: Vec<&str> = Vec::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        if !existing.contains(&pair) && !missing.contains(&pair) {
            missing.push(pair);
        }
    }
    if missing.is_empty() {
        return base.to_string();
    }

    let separator = match head.find('?') {
        None => "?",
        Some(_) if head.ends_with('?') || head.ends_with('&') => "",
        Some(_) => "&",
    };
    format!("{head}{separator}{}{fragment}", missing.join("&"))
}
