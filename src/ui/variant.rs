use crate::analytics::TrackedEvent;
use crate::query::PageQuery;

/// Query parameter selecting the experiment arm.
pub const VARIANT_PARAM: &str = "v";

const TEST_NAME: &str = "cta_color_hero_image";

/// Static presentation variants of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    A,
    B,
}

impl Variant {
    /// `?v=b` picks B; anything else is the base variant.
    pub fn from_query(query: &PageQuery) -> Self {
        match query.param(VARIANT_PARAM) {
            Some("b") => Variant::B,
            _ => Variant::A,
        }
    }

    /// Only the non-base arm is reported.
    pub fn tracking(&self) -> Option<TrackedEvent> {
        match self {
            Variant::A => None,
            Variant::B => Some(TrackedEvent::AbTestVariant {
                variant_name: "variant_b".into(),
                test_name: TEST_NAME.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query() {
        assert_eq!(Variant::from_query(&PageQuery::new("?v=b")), Variant::B);
        assert_eq!(Variant::from_query(&PageQuery::new("?v=B")), Variant::A);
        assert_eq!(Variant::from_query(&PageQuery::new("?v=c")), Variant::A);
        assert_eq!(Variant::from_query(&PageQuery::default()), Variant::A);
    }

    #[test]
    fn test_tracking() {
        assert!(Variant::A.tracking().is_none());
        assert_eq!(Variant::B.tracking().unwrap().name(), "ab_test_variant");
    }
}
