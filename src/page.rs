use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::analytics::{Analytics, Item, TrackedEvent};
use crate::clock::Clock;
use crate::config::Config;
use crate::countdown::{CountdownEngine, TickOutcome};
use crate::error::Result;
use crate::events::Event;
use crate::offer::{
    check_coupon, Checkout, CouponStatus, ExpiryBroadcaster, Navigation, PriceTable, ProductSchema,
    OFFER_ENDED_NOTICE,
};
use crate::query::PageQuery;
use crate::render::{Announcement, Renderer};
use crate::scheduler::{Scheduler, TimerKind};
use crate::state::{ExpiryFlag, StockModel, DECAY_INTERVAL};
use crate::ui::{kit_galleries, Gallery, ReviewNav, StickyBar, Variant};

const STOCK_REGION_LABEL: &str = "Quantidade em estoque";

/// Product identity used in tracking payloads.
#[derive(Debug, Clone)]
struct Product {
    id: String,
    name: String,
    category: String,
    page_title: String,
}

/// One open landing page: owns every widget and routes timer ticks and
/// viewer events to them. Single-threaded; the expiry flag is the only state
/// shared between widgets.
pub struct Page {
    clock: Box<dyn Clock>,
    renderer: Box<dyn Renderer>,
    analytics: Analytics,
    rng: StdRng,

    query: PageQuery,
    variant: Variant,
    product: Product,
    prices: PriceTable,
    coupon_code: String,

    expiry: ExpiryFlag,
    countdown: CountdownEngine,
    broadcaster: ExpiryBroadcaster,
    stock: StockModel,
    schema: ProductSchema,
    checkout: Checkout,

    galleries: Vec<Gallery>,
    reviews: ReviewNav,
    sticky: StickyBar,
    viewport_height: f64,

    opened_at: DateTime<Utc>,
}

impl Page {
    pub fn new(
        config: &Config,
        schema: ProductSchema,
        query: PageQuery,
        clock: Box<dyn Clock>,
        renderer: Box<dyn Renderer>,
        analytics: Analytics,
        rng: StdRng,
    ) -> Result<Self> {
        let zone = config.offer.zone()?;
        let expiry = ExpiryFlag::new();
        let opened_at = clock.now();

        Ok(Self {
            clock,
            renderer,
            analytics,
            rng,
            variant: Variant::from_query(&query),
            query,
            product: Product {
                id: config.offer.product_id.clone(),
                name: config.offer.product_name.clone(),
                category: config.offer.product_category.clone(),
                page_title: config.offer.page_title.clone(),
            },
            prices: config.offer.prices(),
            coupon_code: config.coupon.code.clone(),
            countdown: CountdownEngine::new(zone),
            broadcaster: ExpiryBroadcaster::new(expiry.clone()),
            stock: StockModel::new(config.stock.clone(), expiry.clone()),
            checkout: Checkout::new(config.offer.checkout_url.clone(), expiry.clone()),
            expiry,
            schema,
            galleries: kit_galleries(),
            reviews: ReviewNav::default(),
            sticky: StickyBar::new(config.page.hero_bottom),
            viewport_height: config.page.viewport_height,
            opened_at,
        })
    }

    /// Draw the page and start its timers.
    pub fn init(&mut self, sched: &mut dyn Scheduler) {
        let now = self.clock.now();

        self.renderer.render_prices(&self.prices.display());

        self.renderer.apply_variant(self.variant);
        if let Some(event) = self.variant.tracking() {
            self.analytics.track(event);
        }

        sched.arm(TimerKind::StockDecay, DECAY_INTERVAL);
        self.renderer.label_stock_region(STOCK_REGION_LABEL);
        self.renderer.render_stock(self.stock.level(), false);

        self.renderer.render_review_group(self.reviews.active());
        for gallery in &self.galleries {
            self.renderer.render_gallery(gallery);
        }

        self.refresh_schema(now);
        self.update_sticky(0.0);

        let outcome = self.countdown.start(now, sched, self.renderer.as_mut());
        self.after_countdown(outcome);

        self.analytics.track(TrackedEvent::PageView {
            page_title: self.product.page_title.clone(),
            page_location: self.query.href().to_string(),
        });

        let load_ms = (self.clock.now() - now).num_milliseconds().max(0) as u64;
        self.analytics.track(TrackedEvent::PageLoadTime {
            event_category: "performance".into(),
            value: load_ms,
            non_interaction: true,
        });
        info!(variant = ?self.variant, stock = self.stock.level(), "page ready");
    }

    pub fn on_timer(&mut self, timer: TimerKind, sched: &mut dyn Scheduler) {
        match timer {
            TimerKind::Countdown => {
                let outcome = self.countdown.tick(self.clock.now(), sched, self.renderer.as_mut());
                self.after_countdown(outcome);
            }
            TimerKind::StockDecay => {
                self.stock.tick(&mut self.rng, self.renderer.as_mut());
            }
        }
    }

    /// Route one outside event. Returns where to navigate, if the event
    /// leaves the page.
    pub fn handle(&mut self, event: Event, sched: &mut dyn Scheduler) -> Option<Navigation> {
        match event {
            Event::Checkout => return self.begin_checkout(),
            Event::DirectCheckout => return Some(self.checkout.fallback()),
            Event::Coupon(input) => self.apply_coupon(&input),
            Event::Gallery { product, index } => self.select_thumbnail(&product, index),
            Event::ReviewGroup(group) => {
                if self.reviews.show(group) {
                    self.renderer.render_review_group(group);
                }
            }
            Event::Scroll { y } => self.update_sticky(y),
            Event::Visibility { hidden: true } => self.countdown.suspend(sched),
            Event::Visibility { hidden: false } => {
                let outcome = self.countdown.start(self.clock.now(), sched, self.renderer.as_mut());
                self.after_countdown(outcome);
            }
            Event::RuntimeError(message) => self.report_error(&message),
            Event::Shutdown => self.shutdown(),
        }
        None
    }

    /// Report how long the page was open.
    pub fn shutdown(&mut self) {
        let secs = (self.clock.now() - self.opened_at).num_seconds().max(0) as u64;
        self.analytics.track(TrackedEvent::PageViewDuration {
            event_category: "engagement".into(),
            value: secs,
        });
        info!(
            open_secs = secs,
            countdown = ?self.countdown.state(),
            stock = self.stock.level(),
            sticky_bar = self.sticky.is_visible(),
            "page closed"
        );
    }

    /// Analytics deliveries still running, for the driver to wait on.
    pub fn take_in_flight(&self) -> Vec<JoinHandle<()>> {
        self.analytics.take_in_flight()
    }

    fn after_countdown(&mut self, outcome: Result<TickOutcome>) {
        match outcome {
            Ok(TickOutcome::Expired { deadline }) => {
                self.broadcaster
                    .fire(deadline, &mut self.schema, self.renderer.as_mut());
            }
            Ok(_) => {}
            // Checkout stays enabled: the expiry flag is untouched.
            Err(e) => self.report_error(&format!("countdown: {e}")),
        }
    }

    fn refresh_schema(&mut self, now: DateTime<Utc>) {
        let valid_until = match self.countdown.end_of_day(now) {
            Ok(end) => end,
            Err(e) => {
                warn!(error = %e, "cannot compute price validity");
                return;
            }
        };
        match self.schema.refresh(valid_until, self.expiry.is_expired()) {
            Ok(()) => self.renderer.publish_metadata(self.schema.as_str()),
            Err(e) => warn!(error = %e, "product metadata left untouched"),
        }
    }

    fn begin_checkout(&mut self) -> Option<Navigation> {
        let Some(navigation) = self.checkout.begin(self.query.as_str()) else {
            self.renderer.announce(&Announcement::polite(OFFER_ENDED_NOTICE));
            return None;
        };

        let value = self.prices.value();
        self.analytics.track(TrackedEvent::InitiateCheckout {
            value,
            currency: self.prices.currency.clone(),
            content_name: self.product.name.clone(),
            content_category: self.product.category.clone(),
            content_ids: vec![self.product.id.clone()],
            content_type: "product".into(),
        });
        self.analytics.track(TrackedEvent::BeginCheckout {
            currency: self.prices.currency.clone(),
            value,
            items: vec![Item {
                item_id: self.product.id.clone(),
                item_name: self.product.name.clone(),
                item_category: self.product.category.clone(),
                price: value,
                quantity: 1,
            }],
        });
        self.analytics.track(TrackedEvent::OfferCheckoutStart {
            event_category: "ecommerce".into(),
            event_label: self.product.page_title.clone(),
            value,
        });

        info!(url = %navigation.url, "checkout started");
        Some(navigation)
    }

    fn apply_coupon(&mut self, input: &str) {
        let status = check_coupon(&self.coupon_code, input);
        self.renderer.render_coupon_status(&status);

        if let CouponStatus::Valid { code } = &status {
            self.analytics.track(TrackedEvent::CouponApplied {
                coupon_code: code.clone(),
                value: self.prices.value(),
                currency: self.prices.currency.clone(),
            });
        }
        if let Some(announcement) = status.announcement() {
            self.renderer.announce(&announcement);
        }
    }

    fn select_thumbnail(&mut self, product: &str, index: usize) {
        let Some(gallery) = self.galleries.iter_mut().find(|g| g.product() == product) else {
            warn!(product, "no gallery for product");
            return;
        };
        if !gallery.select(index) {
            return;
        }

        self.renderer.render_gallery(gallery);
        self.analytics.track(TrackedEvent::GalleryInteraction {
            product_type: product.to_string(),
            image_index: index,
            interaction_type: "thumbnail_click".into(),
        });
    }

    fn update_sticky(&mut self, scroll_y: f64) {
        if let Some(visible) = self.sticky.update(scroll_y, self.viewport_height) {
            self.renderer.set_sticky_bar(visible);
        }
    }

    /// Log and report; never rethrown.
    fn report_error(&mut self, message: &str) {
        warn!(error = message, "page error");
        self.analytics.track(TrackedEvent::runtime_error(message));
        debug!(expired = self.expiry.is_expired(), "page keeps running after error");
    }
}
