use serde::Serialize;

/// Line item sent with checkout events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub item_id: String,
    pub item_name: String,
    pub item_category: String,
    pub price: f64,
    pub quantity: u32,
}

/// Everything the page reports. Serialized with the event name in an
/// `event` field and the parameters beside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackedEvent {
    PageView {
        page_title: String,
        page_location: String,
    },
    /// Ad-pixel flavoured checkout event.
    InitiateCheckout {
        value: f64,
        currency: String,
        content_name: String,
        content_category: String,
        content_ids: Vec<String>,
        content_type: String,
    },
    BeginCheckout {
        currency: String,
        value: f64,
        items: Vec<Item>,
    },
    /// Campaign-specific checkout marker.
    OfferCheckoutStart {
        event_category: String,
        event_label: String,
        value: f64,
    },
    CouponApplied {
        coupon_code: String,
        value: f64,
        currency: String,
    },
    GalleryInteraction {
        product_type: String,
        image_index: usize,
        interaction_type: String,
    },
    AbTestVariant {
        variant_name: String,
        test_name: String,
    },
    RuntimeError {
        event_category: String,
        event_label: String,
        non_interaction: bool,
    },
    PageLoadTime {
        event_category: String,
        /// Milliseconds
        value: u64,
        non_interaction: bool,
    },
    PageViewDuration {
        event_category: String,
        /// Seconds
        value: u64,
    },
}

impl TrackedEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TrackedEvent::PageView { .. } => "page_view",
            TrackedEvent::InitiateCheckout { .. } => "initiate_checkout",
            TrackedEvent::BeginCheckout { .. } => "begin_checkout",
            TrackedEvent::OfferCheckoutStart { .. } => "offer_checkout_start",
            TrackedEvent::CouponApplied { .. } => "coupon_applied",
            TrackedEvent::GalleryInteraction { .. } => "gallery_interaction",
            TrackedEvent::AbTestVariant { .. } => "ab_test_variant",
            TrackedEvent::RuntimeError { .. } => "runtime_error",
            TrackedEvent::PageLoadTime { .. } => "page_load_time",
            TrackedEvent::PageViewDuration { .. } => "page_view_duration",
        }
    }

    pub fn runtime_error(message: impl Into<String>) -> Self {
        TrackedEvent::RuntimeError {
            event_category: "error".into(),
            event_label: message.into(),
            non_interaction: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_shape() {
        let event = TrackedEvent::GalleryInteraction {
            product_type: "mouse".into(),
            image_index: 2,
            interaction_type: "thumbnail_click".into(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "gallery_interaction",
                "product_type": "mouse",
                "image_index": 2,
                "interaction_type": "thumbnail_click"
            })
        );
    }

    #[test]
    fn test_name_matches_tag() {
        let event = TrackedEvent::runtime_error("boom");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], event.name());
        assert_eq!(value["non_interaction"], true);
    }
}
