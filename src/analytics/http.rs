use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use anyhow::Context;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{Collector, TrackedEvent};

/// Posts each event as JSON to a collector endpoint. The request runs on
/// its own task; the page never waits for it, but the handles are kept so
/// the driver can let them finish before exiting.
#[derive(Debug, Clone)]
pub struct HttpCollector {
    name: String,
    endpoint: String,
    client: reqwest::Client,
    in_flight: Rc<RefCell<Vec<JoinHandle<()>>>>,
}

impl HttpCollector {
    pub fn new(name: &str, endpoint: &str) -> Self {
        Self {
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            client: reqwest::Client::new(),
            in_flight: Rc::default(),
        }
    }
}

impl Collector for HttpCollector {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(&self, event: &TrackedEvent) -> anyhow::Result<()> {
        let runtime = Handle::try_current().context("no async runtime for analytics post")?;

        let request = self.client.post(&self.endpoint).json(event);
        let name = self.name.clone();
        let event_name = event.name();
        let handle = runtime.spawn(async move {
            match request.send().await {
                Ok(resp) if !resp.status().is_success() => {
                    debug!(collector = %name, event = event_name, status = %resp.status(), "collector rejected event");
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(collector = %name, event = event_name, error = %e, "collector unreachable");
                }
            }
        });

        let mut in_flight = self.in_flight.borrow_mut();
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle);
        Ok(())
    }

    fn take_in_flight(&self) -> Vec<JoinHandle<()>> {
        mem::take(&mut *self.in_flight.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_runtime_reports_error() {
        let collector = HttpCollector::new("ga", "http://127.0.0.1:9/collect");
        assert!(collector.send(&TrackedEvent::runtime_error("x")).is_err());
    }

    #[tokio::test]
    async fn test_inside_runtime_hands_off() {
        let collector = HttpCollector::new("ga", "http://127.0.0.1:9/collect");
        assert!(collector.send(&TrackedEvent::runtime_error("x")).is_ok());

        let pending = collector.take_in_flight();
        assert_eq!(pending.len(), 1);
        pending[0].abort();
        assert!(collector.take_in_flight().is_empty());
    }
}
