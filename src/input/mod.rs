pub mod stdin;

use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::events::Event;

/// Spawns a task that turns Ctrl+C into a Shutdown event.
pub fn spawn_ctrl_c(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            return;
        }
        let _ = tx.send(Event::Shutdown).await;
    });
}

/// Route every panic, on any thread or task, to the page as a runtime
/// error so it gets logged and tracked instead of vanishing.
pub fn install_panic_hook(tx: mpsc::Sender<Event>) {
    std::panic::set_hook(Box::new(move |info| report_panic(&tx, info.to_string())));
}

/// Never blocks: with the channel full or closed the panic is only logged.
fn report_panic(tx: &mpsc::Sender<Event>, message: String) {
    error!(%message, "uncaught panic");
    if let Err(e) = tx.try_send(Event::RuntimeError(message)) {
        warn!(error = %e, "panic not forwarded to the page");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_becomes_runtime_error() {
        let (tx, mut rx) = mpsc::channel(4);
        report_panic(&tx, "index out of bounds".into());

        assert_eq!(
            rx.try_recv().unwrap(),
            Event::RuntimeError("index out of bounds".into())
        );
    }

    #[test]
    fn test_full_channel_does_not_block() {
        let (tx, _rx) = mpsc::channel(1);
        report_panic(&tx, "first".into());
        report_panic(&tx, "second".into());
    }

    #[test]
    fn test_closed_channel_is_tolerated() {
        let (tx, rx) = mpsc::channel::<Event>(1);
        drop(rx);
        report_panic(&tx, "late".into());
    }
}
