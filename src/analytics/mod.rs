mod event;
mod http;

pub use event::{Item, TrackedEvent};
pub use http::HttpCollector;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::AnalyticsConfig;

/// An external place tracked events go to.
pub trait Collector {
    fn name(&self) -> &str;

    /// Hand the event off. Must not block.
    fn send(&self, event: &TrackedEvent) -> anyhow::Result<()>;

    /// Deliveries still running in the background, handed over to the
    /// caller. Collectors that deliver inline have none.
    fn take_in_flight(&self) -> Vec<JoinHandle<()>> {
        Vec::new()
    }
}

/// Fire-and-forget fan-out to zero or more collectors. A missing or failing
/// collector never affects the page.
#[derive(Default)]
pub struct Analytics {
    collectors: Vec<Box<dyn Collector>>,
}

impl Analytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, collector: impl Collector + 'static) -> Self {
        self.collectors.push(Box::new(collector));
        self
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        let mut analytics = Self::new();
        if config.log_events {
            analytics = analytics.with(LogCollector);
        }
        for c in &config.collectors {
            analytics = analytics.with(HttpCollector::new(&c.name, &c.endpoint));
        }
        analytics
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    /// Background deliveries not yet finished, across all collectors.
    pub fn take_in_flight(&self) -> Vec<JoinHandle<()>> {
        self.collectors
            .iter()
            .flat_map(|c| c.take_in_flight())
            .collect()
    }

    pub fn track(&self, event: TrackedEvent) {
        for collector in &self.collectors {
            if let Err(e) = collector.send(&event) {
                debug!(collector = collector.name(), event = event.name(), error = %e, "analytics event dropped");
            }
        }
    }
}

/// Writes events to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCollector;

impl Collector for LogCollector {
    fn name(&self) -> &str {
        "log"
    }

    fn send(&self, event: &TrackedEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(event)?;
        info!(target: "analytics", event = event.name(), %payload);
        Ok(())
    }
}

#[cfg(test)]
pub use recording::RecordingCollector;


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollectorConfig;

    struct Broken;

    impl Collector for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn send(&self, _event: &TrackedEvent) -> anyhow::Result<()> {
            anyhow::bail!("collector unavailable")
        }
    }

    #[test]
    fn test_no_collectors_is_fine() {
        Analytics::new().track(TrackedEvent::runtime_error("nobody listens"));
    }

    #[test]
    fn test_failure_does_not_stop_fanout() {
        let recorder = RecordingCollector::default();
        let analytics = Analytics::new().with(Broken).with(recorder.clone());

        analytics.track(TrackedEvent::runtime_error("boom"));
        assert_eq!(recorder.names(), vec!["runtime_error"]);
    }

    #[test]
    fn test_from_config() {
        let config = AnalyticsConfig {
            log_events: true,
            collectors: vec![CollectorConfig {
                name: "ga".into(),
                endpoint: "https://collect.test/e".into(),
            }],
        };
        assert_eq!(Analytics::from_config(&config).len(), 2);
        assert_eq!(Analytics::from_config(&AnalyticsConfig::default()).len(), 0);
    }

    #[tokio::test]
    async fn test_in_flight_posts_are_handed_over() {
        let analytics = Analytics::new()
            .with(RecordingCollector::default())
            .with(HttpCollector::new("ga", "http://127.0.0.1:9/collect"));

        analytics.track(TrackedEvent::runtime_error("a"));
        analytics.track(TrackedEvent::runtime_error("b"));

        let pending = analytics.take_in_flight();
        assert_eq!(pending.len(), 2);
        for handle in pending {
            handle.abort();
        }
        assert!(analytics.take_in_flight().is_empty());
    }
}
