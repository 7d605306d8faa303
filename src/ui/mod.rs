mod gallery;
mod reviews;
mod sticky;
mod variant;

pub use gallery::{kit_galleries, Gallery};
pub use reviews::ReviewNav;
pub use sticky::StickyBar;
pub use variant::Variant;
