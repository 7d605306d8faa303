use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::ProductSchema;
use crate::render::{Announcement, CtaControl, Renderer};
use crate::state::ExpiryFlag;

pub const ENDED_LABEL: &str = "Oferta encerrada — verifique disponibilidade";
pub const ENDED_ARIA_LABEL: &str = "Oferta expirada - verifique disponibilidade";
pub const ENDED_ANNOUNCEMENT: &str = "A oferta especial expirou. Verifique disponibilidade.";

/// Fans the end of the offer out to everything that depends on it.
#[derive(Debug, Clone)]
pub struct ExpiryBroadcaster {
    expiry: ExpiryFlag,
}

impl ExpiryBroadcaster {
    pub fn new(expiry: ExpiryFlag) -> Self {
        Self { expiry }
    }

    /// End the offer: set the flag, disable every checkout control, mark
    /// the metadata out of stock and tell assistive tech.
    ///
    /// Only the first call has any effect. Returns whether this call did.
    pub fn fire(
        &self,
        deadline: DateTime<Utc>,
        schema: &mut ProductSchema,
        renderer: &mut dyn Renderer,
    ) -> bool {
        if !self.expiry.set() {
            debug!("offer expiry already broadcast");
            return false;
        }
        info!(%deadline, "broadcasting offer expiry");

        for control in CtaControl::ALL {
            renderer.disable_checkout(control, ENDED_LABEL, ENDED_ARIA_LABEL);
        }

        match schema.refresh(deadline, true) {
            Ok(()) => renderer.publish_metadata(schema.as_str()),
            Err(e) => warn!(error = %e, "product metadata left untouched"),
        }

        renderer.announce(&Announcement::assertive(ENDED_ANNOUNCEMENT));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::schema::OUT_OF_STOCK;
    use crate::render::{Politeness, Rendered, RecordingRenderer};
    use std::time::Duration;

    fn deadline() -> DateTime<Utc> {
        "2025-11-29T02:59:59.999Z".parse().unwrap()
    }

    #[test]
    fn test_fire_effects() {
        let flag = ExpiryFlag::new();
        let broadcaster = ExpiryBroadcaster::new(flag.clone());
        let mut schema = ProductSchema::default();
        let mut renderer = RecordingRenderer::default();

        assert!(broadcaster.fire(deadline(), &mut schema, &mut renderer));
        assert!(flag.is_expired());

        let disabled: Vec<CtaControl> = renderer
            .all()
            .into_iter()
            .filter_map(|r| match r {
                Rendered::Disabled { control, label, aria_label } => {
                    assert_eq!(label, ENDED_LABEL);
                    assert_eq!(aria_label, ENDED_ARIA_LABEL);
                    Some(control)
                }
                _ => None,
            })
            .collect();
        assert_eq!(disabled, CtaControl::ALL.to_vec());

        assert!(renderer.last_metadata().unwrap().contains(OUT_OF_STOCK));

        let announcements = renderer.announcements();
        assert_eq!(announcements.len(), 1);
        assert_eq!(announcements[0].message, ENDED_ANNOUNCEMENT);
        assert_eq!(announcements[0].politeness, Politeness::Assertive);
        assert_eq!(announcements[0].ttl, Duration::from_secs(5));
    }

    #[test]
    fn test_second_fire_is_noop() {
        let broadcaster = ExpiryBroadcaster::new(ExpiryFlag::new());
        let mut schema = ProductSchema::default();
        let mut renderer = RecordingRenderer::default();

        assert!(broadcaster.fire(deadline(), &mut schema, &mut renderer));
        let snapshot = schema.clone();
        renderer.take();

        assert!(!broadcaster.fire(deadline(), &mut schema, &mut renderer));
        assert!(renderer.all().is_empty());
        assert_eq!(schema, snapshot);
    }

    #[test]
    fn test_bad_metadata_does_not_block_expiry() {
        let flag = ExpiryFlag::new();
        let broadcaster = ExpiryBroadcaster::new(flag.clone());
        let mut schema = ProductSchema::new("<broken>");
        let mut renderer = RecordingRenderer::default();

        assert!(broadcaster.fire(deadline(), &mut schema, &mut renderer));
        assert!(flag.is_expired());
        assert_eq!(schema.as_str(), "<broken>");
        assert!(renderer.last_metadata().is_none());
        assert_eq!(renderer.announcements().len(), 1);
    }
}
