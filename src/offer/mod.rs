mod broadcast;
mod checkout;
mod coupon;
mod pricing;
mod schema;

pub use broadcast::ExpiryBroadcaster;
pub use checkout::{Checkout, Navigation, OFFER_ENDED_NOTICE};
pub use coupon::{check_coupon, CouponStatus};
pub use pricing::{PriceDisplay, PriceTable};
pub use schema::ProductSchema;
