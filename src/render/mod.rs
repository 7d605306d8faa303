mod console;

pub use console::ConsoleRenderer;

use std::time::Duration;

use crate::countdown::TimerReadout;
use crate::offer::{CouponStatus, PriceDisplay};
use crate::ui::{Gallery, Variant};

/// Checkout buttons on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtaControl {
    /// Hero button
    Primary,
    /// Bottom sticky bar button
    Sticky,
    /// Button after the FAQ
    Final,
}

impl CtaControl {
    pub const ALL: [CtaControl; 3] = [CtaControl::Primary, CtaControl::Sticky, CtaControl::Final];
}

/// Screen-reader live region urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness {
    Polite,
    Assertive,
}

/// A transient message for assistive technology. It lives for `ttl` and is
/// then removed; nothing else depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub message: String,
    pub politeness: Politeness,
    pub ttl: Duration,
}

impl Announcement {
    pub fn polite(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            politeness: Politeness::Polite,
            ttl: Duration::from_secs(3),
        }
    }

    pub fn assertive(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            politeness: Politeness::Assertive,
            ttl: Duration::from_secs(5),
        }
    }
}

/// Everything the page can draw. Every method defaults to a no-op, which
/// is exactly what a page without that element should do.
pub trait Renderer {
    /// Both timer displays (top bar and offer box).
    fn render_timer(&mut self, _readout: &TimerReadout) {}

    /// `pulse` asks for the short highlight after a decrement.
    fn render_stock(&mut self, _level: u32, _pulse: bool) {}

    /// Mark the stock counter as a polite live region with this label.
    fn label_stock_region(&mut self, _label: &str) {}

    fn disable_checkout(&mut self, _control: CtaControl, _label: &str, _aria_label: &str) {}

    fn announce(&mut self, _announcement: &Announcement) {}

    fn render_prices(&mut self, _prices: &PriceDisplay) {}

    fn render_coupon_status(&mut self, _status: &CouponStatus) {}

    fn set_sticky_bar(&mut self, _visible: bool) {}

    fn render_gallery(&mut self, _gallery: &Gallery) {}

    fn render_review_group(&mut self, _group: u8) {}

    fn apply_variant(&mut self, _variant: Variant) {}

    /// Replace the embedded product metadata text.
    fn publish_metadata(&mut self, _json: &str) {}
}

/// Renderer for a page with none of the elements. Used headless.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {}

#[cfg(test)]
pub use recording::{Rendered, RecordingRenderer};

#[cfg(test)]
mod recording {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Rendered {
        Timer(String),
        Stock { level: u32, pulse: bool },
        StockRegion(String),
        Disabled { control: CtaControl, label: String, aria_label: String },
        Announce(Announcement),
        Prices(PriceDisplay),
        Coupon(CouponStatus),
        Sticky(bool),
        Gallery(Gallery),
        Reviews(u8),
        Variant(Variant),
        Metadata(String),
    }

    /// Keeps everything drawn. Clones share the log.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingRenderer {
        log: Rc<RefCell<Vec<Rendered>>>,
    }

    impl RecordingRenderer {
        pub fn take(&self) -> Vec<Rendered> {
            self.log.borrow_mut().drain(..).collect()
        }

        pub fn all(&self) -> Vec<Rendered> {
            self.log.borrow().clone()
        }

        pub fn timers(&self) -> Vec<String> {
            self.log
                .borrow()
                .iter()
                .filter_map(|r| match r {
                    Rendered::Timer(t) => Some(t.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn announcements(&self) -> Vec<Announcement> {
            self.log
                .borrow()
                .iter()
                .filter_map(|r| match r {
                    Rendered::Announce(a) => Some(a.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn last_metadata(&self) -> Option<String> {
            self.log.borrow().iter().rev().find_map(|r| match r {
                Rendered::Metadata(m) => Some(m.clone()),
                _ => None,
            })
        }

        fn push(&self, r: Rendered) {
            self.log.borrow_mut().push(r);
        }
    }

    impl Renderer for RecordingRenderer {
        fn render_timer(&mut self, readout: &TimerReadout) {
            self.push(Rendered::Timer(readout.to_string()));
        }

        fn render_stock(&mut self, level: u32, pulse: bool) {
            self.push(Rendered::Stock { level, pulse });
        }

        fn label_stock_region(&mut self, label: &str) {
            self.push(Rendered::StockRegion(label.to_string()));
        }

        fn disable_checkout(&mut self, control: CtaControl, label: &str, aria_label: &str) {
            self.push(Rendered::Disabled {
                control,
                label: label.to_string(),
                aria_label: aria_label.to_string(),
            });
        }

        fn announce(&mut self, announcement: &Announcement) {
            self.push(Rendered::Announce(announcement.clone()));
        }

        fn render_prices(&mut self, prices: &PriceDisplay) {
            self.push(Rendered::Prices(prices.clone()));
        }

        fn render_coupon_status(&mut self, status: &CouponStatus) {
            self.push(Rendered::Coupon(status.clone()));
        }

        fn set_sticky_bar(&mut self, visible: bool) {
            self.push(Rendered::Sticky(visible));
        }

        fn render_gallery(&mut self, gallery: &Gallery) {
            self.push(Rendered::Gallery(gallery.clone()));
        }

        fn render_review_group(&mut self, group: u8) {
            self.push(Rendered::Reviews(group));
        }

        fn apply_variant(&mut self, variant: Variant) {
            self.push(Rendered::Variant(variant));
        }

        fn publish_metadata(&mut self, json: &str) {
            self.push(Rendered::Metadata(json.to_string()));
        }
    }
}
