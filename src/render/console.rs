use tracing::{debug, info};

use super::{Announcement, CtaControl, Politeness, Renderer};
use crate::countdown::TimerReadout;
use crate::offer::{CouponStatus, PriceDisplay};
use crate::ui::{Gallery, Variant};

/// Draws the page as log lines. The timer is drawn at debug level since it
/// changes every second.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn render_timer(&mut self, readout: &TimerReadout) {
        let [h, m, s] = readout.fields();
        debug!(target: "page::timer", top = %readout, offer = %format!("{h}h {m}m {s}s"));
    }

    fn render_stock(&mut self, level: u32, pulse: bool) {
        if pulse {
            info!(target: "page::stock", level, "stock dropped");
        } else {
            info!(target: "page::stock", level, "stock");
        }
    }

    fn label_stock_region(&mut self, label: &str) {
        debug!(target: "page::a11y", label, "stock live region");
    }

    fn disable_checkout(&mut self, control: CtaControl, label: &str, aria_label: &str) {
        info!(target: "page::cta", ?control, label, aria_label, "checkout disabled");
    }

    fn announce(&mut self, announcement: &Announcement) {
        let level = match announcement.politeness {
            Politeness::Polite => "polite",
            Politeness::Assertive => "assertive",
        };
        info!(
            target: "page::a11y",
            aria_live = level,
            ttl_ms = announcement.ttl.as_millis() as u64,
            "{}",
            announcement.message
        );
    }

    fn render_prices(&mut self, prices: &PriceDisplay) {
        info!(
            target: "page::prices",
            from = %prices.from,
            to = %prices.to,
            savings = %prices.savings,
            discount = %prices.discount,
        );
    }

    fn render_coupon_status(&mut self, status: &CouponStatus) {
        info!(target: "page::coupon", "{}", status.markup());
    }

    fn set_sticky_bar(&mut self, visible: bool) {
        debug!(target: "page::sticky", visible);
    }

    fn render_gallery(&mut self, gallery: &Gallery) {
        info!(
            target: "page::gallery",
            product = gallery.product(),
            main = %gallery.main().src,
            "gallery updated"
        );
        for index in 0..gallery.thumbnails().len() {
            if let Some(label) = gallery.thumbnail_label(index) {
                debug!(target: "page::gallery", index, "{label}");
            }
        }
    }

    fn render_review_group(&mut self, group: u8) {
        info!(target: "page::reviews", group, "showing review group");
    }

    fn apply_variant(&mut self, variant: Variant) {
        info!(target: "page::variant", ?variant);
    }

    fn publish_metadata(&mut self, json: &str) {
        debug!(target: "page::schema", "{json}");
    }
}
