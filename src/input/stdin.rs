use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::events::Event;

/// Spawns a task that reads driver commands from stdin, one per line, and
/// sends them as page events. EOF closes the page.
pub fn spawn(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match line.parse::<Event>() {
                    Ok(event) => {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!(error = %e, "ignoring input"),
                },
                Ok(None) => {
                    debug!("stdin closed");
                    let _ = tx.send(Event::Shutdown).await;
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "stdin read failed");
                    let _ = tx.send(Event::Shutdown).await;
                    break;
                }
            }
        }
    });
}
